use crate::model::Profile;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const COVER_TITLE: &str = "Relatório de Análise de Solo";
pub const COVER_SUBTITLE: &str = "Agricultura de Precisão";
pub const PRODUCER_HEADING: &str = "Informações do Produtor";
pub const INSTITUTION_LINES: [&str; 2] = [
    "ETE FMC - 45a Projete | Equipe 34DS08",
    "Santa Rita do Sapucai, MG",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSection {
    /// Logo text printed above the title.
    pub brand: String,
    pub title: String,
    pub subtitle: String,
    pub producer_heading: String,
    /// Producer, property, area and date lines, in print order.
    pub producer_lines: Vec<String>,
    pub institution_lines: Vec<String>,
}

pub fn build(profile: &Profile, generated_on: NaiveDate, brand: &str) -> CoverSection {
    let area = profile
        .area_hectares
        .filter(|a| !a.is_zero())
        .unwrap_or(Decimal::ZERO)
        .normalize();

    CoverSection {
        brand: brand.to_string(),
        title: COVER_TITLE.to_string(),
        subtitle: COVER_SUBTITLE.to_string(),
        producer_heading: PRODUCER_HEADING.to_string(),
        producer_lines: vec![
            format!("Produtor: {}", or_na(profile.producer_name.as_deref())),
            format!("Propriedade: {}", or_na(profile.property_name.as_deref())),
            format!("Area: {} hectares", area),
            format!("Data: {}", generated_on.format("%d/%m/%Y")),
        ],
        institution_lines: INSTITUTION_LINES.iter().map(|l| l.to_string()).collect(),
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_cover_with_profile() {
        let profile = Profile {
            producer_name: Some("Ana Souza".into()),
            property_name: Some("Sitio Boa Vista".into()),
            area_hectares: Some(dec!(12.50)),
        };
        let cover = build(&profile, date(), "EKKO");
        assert_eq!(cover.title, "Relatório de Análise de Solo");
        assert_eq!(
            cover.producer_lines,
            vec![
                "Produtor: Ana Souza",
                "Propriedade: Sitio Boa Vista",
                "Area: 12.5 hectares",
                "Data: 07/03/2024",
            ]
        );
    }

    #[test]
    fn test_cover_defaults() {
        let cover = build(&Profile::default(), date(), "EKKO");
        assert_eq!(cover.producer_lines[0], "Produtor: N/A");
        assert_eq!(cover.producer_lines[1], "Propriedade: N/A");
        assert_eq!(cover.producer_lines[2], "Area: 0 hectares");
        assert_eq!(cover.institution_lines.len(), 2);
    }
}
