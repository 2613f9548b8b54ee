use crate::classify::{Assessment, Priority, Status};
use crate::model::{format_with_unit, Parameter, SoilMeasurement};
use crate::plan::ActionItem;
use serde::{Deserialize, Serialize};

pub const SUMMARY_TITLE: &str = "Resumo Executivo";
pub const SUMMARY_HEADER: [&str; 4] = ["Parametro", "Valor", "Status", "Prioridade"];
pub const ACTIONS_HEADING: &str = "ACOES PRIORITARIAS:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub parameter: Parameter,
    pub name: String,
    /// Formatted value with unit, e.g. `45.0%`.
    pub value: String,
    pub status: Status,
    pub priority: Priority,
}

impl SummaryRow {
    /// Table cells in header order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.value.clone(),
            self.status.label_for(self.parameter).to_string(),
            self.priority.label().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<SummaryRow>,
    pub actions_heading: String,
    pub actions: Vec<ActionItem>,
}

impl SummarySection {
    /// Action lines as printed: `1. <description>`.
    pub fn action_lines(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|a| format!("{}. {}", a.rank, a.description))
            .collect()
    }
}

pub fn build(
    measurement: &SoilMeasurement,
    assessment: &Assessment,
    actions: Vec<ActionItem>,
) -> SummarySection {
    let rows = Parameter::ALL
        .iter()
        .filter_map(|&p| {
            let result = assessment.get(&p)?;
            let spec = p.spec();
            Some(SummaryRow {
                parameter: p,
                name: spec.name.to_string(),
                value: format_with_unit(measurement.value_or_zero(p), spec.summary_decimals, spec.unit),
                status: result.status,
                priority: result.priority,
            })
        })
        .collect();

    SummarySection {
        title: SUMMARY_TITLE.to_string(),
        header: SUMMARY_HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
        actions_heading: ACTIONS_HEADING.to_string(),
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_measurement;
    use crate::plan::plan;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_formats_values() {
        let m = SoilMeasurement {
            ph: Some(dec!(5.2)),
            moisture: Some(dec!(45)),
            temperature: Some(dec!(24.25)),
            nitrogen: Some(dec!(80)),
            phosphorus: Some(dec!(130.4)),
            potassium: None,
        };
        let a = classify_measurement(&m);
        let summary = build(&m, &a, plan(&a));

        let values: Vec<&str> = summary.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["5.20", "45.0%", "24.3°C", "80 mg/kg", "130 mg/kg", "0 mg/kg"]
        );
        assert_eq!(
            summary.rows[3].cells(),
            vec!["Nitrogenio", "80 mg/kg", "❌", "ALTA"]
        );
        assert_eq!(summary.rows[5].cells()[2], "N/A");
        assert_eq!(summary.rows[0].cells()[2], "⚠ Atenção");
        assert_eq!(summary.rows[4].cells()[2], "⚠");
    }

    #[test]
    fn test_action_lines_numbered() {
        let m = SoilMeasurement {
            ph: Some(dec!(5.2)),
            nitrogen: Some(dec!(80)),
            ..Default::default()
        };
        let a = classify_measurement(&m);
        let summary = build(&m, &a, plan(&a));
        assert_eq!(
            summary.action_lines(),
            vec![
                "1. Corrigir pH com calcario ou enxofre",
                "2. Aplicar Ureia 100-200 kg/ha",
            ]
        );
    }
}
