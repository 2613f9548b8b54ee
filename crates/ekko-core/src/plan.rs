use crate::classify::{Assessment, Priority};
use crate::model::Parameter;
use serde::{Deserialize, Serialize};

/// Action reported when no parameter needs urgent correction.
pub const SOIL_IN_GOOD_CONDITION: &str = "Solo em boas condicoes";

/// Parameters in the order their corrective actions are listed, with the
/// action text for each.
const ACTION_PRECEDENCE: [(Parameter, &str); 5] = [
    (Parameter::Ph, "Corrigir pH com calcario ou enxofre"),
    (Parameter::Nitrogen, "Aplicar Ureia 100-200 kg/ha"),
    (Parameter::Phosphorus, "Aplicar Superfosfato 300-500 kg/ha"),
    (Parameter::Potassium, "Aplicar KCl 100-200 kg/ha"),
    (Parameter::Moisture, "Ajustar irrigacao"),
];

/// One numbered corrective action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// 1-based position in the list.
    pub rank: usize,
    pub description: String,
}

/// Ordered corrective actions for every high-priority parameter.
///
/// Never empty: when nothing is urgent the list holds the single
/// "soil in good condition" item.
pub fn plan(assessment: &Assessment) -> Vec<ActionItem> {
    let descriptions: Vec<&str> = ACTION_PRECEDENCE
        .iter()
        .filter(|(parameter, _)| {
            assessment
                .get(parameter)
                .is_some_and(|r| r.priority == Priority::High)
        })
        .map(|(_, action)| *action)
        .collect();

    let descriptions = if descriptions.is_empty() {
        vec![SOIL_IN_GOOD_CONDITION]
    } else {
        descriptions
    };

    descriptions
        .into_iter()
        .enumerate()
        .map(|(i, description)| ActionItem {
            rank: i + 1,
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_measurement;
    use crate::model::SoilMeasurement;
    use rust_decimal_macros::dec;

    fn measurement(ph: &str, n: &str, p: &str, k: &str, moisture: &str) -> SoilMeasurement {
        SoilMeasurement {
            ph: Some(ph.parse().unwrap()),
            moisture: Some(moisture.parse().unwrap()),
            temperature: Some(dec!(25)),
            nitrogen: Some(n.parse().unwrap()),
            phosphorus: Some(p.parse().unwrap()),
            potassium: Some(k.parse().unwrap()),
        }
    }

    #[test]
    fn test_all_ideal_returns_sentinel() {
        let a = classify_measurement(&measurement("6.5", "250", "200", "250", "55"));
        let actions = plan(&a);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].rank, 1);
        assert_eq!(actions[0].description, SOIL_IN_GOOD_CONDITION);
    }

    #[test]
    fn test_missing_moisture_still_good_condition() {
        let m = SoilMeasurement {
            moisture: None,
            ..measurement("6.5", "250", "200", "250", "55")
        };
        let actions = plan(&classify_measurement(&m));
        assert_eq!(actions[0].description, SOIL_IN_GOOD_CONDITION);
    }

    #[test]
    fn test_precedence_order() {
        // Moisture listed last even though it is checked second in the report.
        let a = classify_measurement(&measurement("5.0", "80", "200", "90", "20"));
        let actions: Vec<_> = plan(&a).into_iter().map(|a| a.description).collect();
        assert_eq!(
            actions,
            vec![
                "Corrigir pH com calcario ou enxofre",
                "Aplicar Ureia 100-200 kg/ha",
                "Aplicar KCl 100-200 kg/ha",
                "Ajustar irrigacao",
            ]
        );
    }

    #[test]
    fn test_ranks_are_sequential() {
        let a = classify_measurement(&measurement("8.0", "50", "50", "50", "90"));
        let actions = plan(&a);
        assert_eq!(actions.len(), 5);
        for (i, action) in actions.iter().enumerate() {
            assert_eq!(action.rank, i + 1);
        }
    }

    #[test]
    fn test_empty_assessment_returns_sentinel() {
        let actions = plan(&Assessment::new());
        assert_eq!(actions.len(), 1);
    }
}
