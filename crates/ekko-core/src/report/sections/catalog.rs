use crate::model::{Parameter, SoilMeasurement};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const CATALOG_TITLE: &str = "Produtos Recomendados";
pub const CATALOG_HEADER: [&str; 4] = ["Produto", "Marca", "Aplicação", "Dosagem"];
pub const PLAN_HEADING: &str = "PLANO DE ACAO:";
pub const PLAN_STEPS: [&str; 6] = [
    "1. Analise laboratorial completa",
    "2. Corrigir pH antes de fertilizar",
    "3. Aplicar corretivos conforme recomendacao",
    "4. Monitorar umidade regularmente",
    "5. Adubacao de cobertura conforme cultura",
    "6. Registrar todas aplicacoes",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub product: String,
    pub brand: String,
    pub application: String,
    pub dosage: String,
}

impl CatalogRow {
    fn new(product: &str, brand: &str, application: &str, dosage: &str) -> Self {
        CatalogRow {
            product: product.to_string(),
            brand: brand.to_string(),
            application: application.to_string(),
            dosage: dosage.to_string(),
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.product.clone(),
            self.brand.clone(),
            self.application.clone(),
            self.dosage.clone(),
        ]
    }
}

/// Rows added when a reading falls below a threshold.
struct CatalogTrigger {
    parameter: Parameter,
    below: Decimal,
    rows: &'static [(&'static str, &'static str, &'static str, &'static str)],
}

const TRIGGERS: [CatalogTrigger; 4] = [
    CatalogTrigger {
        parameter: Parameter::Ph,
        below: dec!(6),
        rows: &[("Calcário Dolomítico", "Yara/Mosaic", "Correção pH", "2-4 ton/ha")],
    },
    CatalogTrigger {
        parameter: Parameter::Nitrogen,
        below: dec!(150),
        rows: &[
            ("Ureia 45%", "Yara/Petrobras", "Adubação N", "100-200 kg/ha"),
            ("Sulfato Amônio", "Mosaic/Heringer", "N+S", "150-250 kg/ha"),
        ],
    },
    CatalogTrigger {
        parameter: Parameter::Phosphorus,
        below: dec!(120),
        rows: &[
            ("Superfosfato Simples", "Mosaic/Yara", "Adubação P", "300-500 kg/ha"),
            ("MAP 11-52-00", "Mosaic/Yara", "P+N", "150-250 kg/ha"),
        ],
    },
    CatalogTrigger {
        parameter: Parameter::Potassium,
        below: dec!(150),
        rows: &[("Cloreto Potássio", "Mosaic/ICL", "Adubação K", "100-200 kg/ha")],
    },
];

/// Always listed, after any triggered rows.
const BASELINE_ROWS: [(&str, &str, &str, &str); 2] = [
    ("NPK 04-14-08", "Yara/Heringer", "Plantio", "300-400 kg/ha"),
    ("NPK 20-05-20", "Yara/Mosaic", "Cobertura", "150-200 kg/ha"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<CatalogRow>,
    pub plan_heading: String,
    pub plan_steps: Vec<String>,
}

/// Catalog rows for a measurement. A missing reading triggers nothing.
pub fn catalog_rows(measurement: &SoilMeasurement) -> Vec<CatalogRow> {
    let triggered = TRIGGERS
        .iter()
        .filter(|t| {
            measurement
                .reading(t.parameter)
                .is_some_and(|v| v < t.below)
        })
        .flat_map(|t| t.rows.iter());

    triggered
        .chain(BASELINE_ROWS.iter())
        .map(|(product, brand, application, dosage)| {
            CatalogRow::new(product, brand, application, dosage)
        })
        .collect()
}

pub fn build(measurement: &SoilMeasurement) -> CatalogSection {
    CatalogSection {
        title: CATALOG_TITLE.to_string(),
        header: CATALOG_HEADER.iter().map(|h| h.to_string()).collect(),
        rows: catalog_rows(measurement),
        plan_heading: PLAN_HEADING.to_string(),
        plan_steps: PLAN_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[CatalogRow]) -> Vec<&str> {
        rows.iter().map(|r| r.product.as_str()).collect()
    }

    #[test]
    fn test_all_deficient() {
        let m = SoilMeasurement {
            ph: Some(dec!(5.0)),
            nitrogen: Some(dec!(80)),
            phosphorus: Some(dec!(60)),
            potassium: Some(dec!(90)),
            ..Default::default()
        };
        assert_eq!(
            names(&catalog_rows(&m)),
            vec![
                "Calcário Dolomítico",
                "Ureia 45%",
                "Sulfato Amônio",
                "Superfosfato Simples",
                "MAP 11-52-00",
                "Cloreto Potássio",
                "NPK 04-14-08",
                "NPK 20-05-20",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let m = SoilMeasurement {
            ph: Some(dec!(6)),
            nitrogen: Some(dec!(150)),
            phosphorus: Some(dec!(120)),
            potassium: Some(dec!(150)),
            ..Default::default()
        };
        assert_eq!(names(&catalog_rows(&m)), vec!["NPK 04-14-08", "NPK 20-05-20"]);
    }

    #[test]
    fn test_missing_readings_trigger_nothing_but_zero_does() {
        assert_eq!(catalog_rows(&SoilMeasurement::default()).len(), 2);

        let zero = SoilMeasurement {
            potassium: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(names(&catalog_rows(&zero))[0], "Cloreto Potássio");
    }

    #[test]
    fn test_plan_steps_fixed() {
        let section = build(&SoilMeasurement::default());
        assert_eq!(section.plan_steps.len(), 6);
        assert_eq!(section.plan_steps[1], "2. Corrigir pH antes de fertilizar");
        assert_eq!(section.header[2], "Aplicação");
    }
}
