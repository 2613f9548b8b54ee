//! The dashboard's user record, as stored by the sensor backend.
//!
//! Field names follow the stored JSON (Portuguese). Every field is optional;
//! absent values default when the record is turned into model types.

use crate::error::EkkoError;
use crate::model::{Profile, SoilMeasurement};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    #[serde(default)]
    pub latest_soil_data: Option<SoilDataRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub dados_pessoais: Option<PersonalData>,
    #[serde(default)]
    pub propriedade: Option<PropertyData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalData {
    #[serde(default)]
    pub nome: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyData {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub area_hectares: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilDataRecord {
    #[serde(default)]
    pub soil_parameters: Option<SoilParameters>,
    #[serde(default)]
    pub nutrients: Option<Nutrients>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilParameters {
    #[serde(default, deserialize_with = "lenient_number")]
    pub ph: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub umidade: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperatura: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, deserialize_with = "lenient_number")]
    pub nitrogenio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fosforo: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub potassio: Option<f64>,
}

impl UserRecord {
    pub fn from_json(json: &str) -> Result<Self, EkkoError> {
        serde_json::from_str(json).map_err(|e| EkkoError::InputParse(e.to_string()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, EkkoError> {
        serde_json::from_slice(bytes).map_err(|e| EkkoError::InputParse(e.to_string()))
    }

    /// The latest soil measurement, or `None` if the record has none.
    pub fn measurement(&self) -> Option<SoilMeasurement> {
        let data = self.latest_soil_data.as_ref()?;
        let params = data.soil_parameters.clone().unwrap_or_default();
        let nutrients = data.nutrients.clone().unwrap_or_default();

        Some(SoilMeasurement {
            ph: reading("ph", params.ph),
            moisture: reading("umidade", params.umidade),
            temperature: reading("temperatura", params.temperatura),
            nitrogen: reading("nitrogenio", nutrients.nitrogenio),
            phosphorus: reading("fosforo", nutrients.fosforo),
            potassium: reading("potassio", nutrients.potassio),
        })
    }

    pub fn profile(&self) -> Profile {
        let profile = self.profile.clone().unwrap_or_default();
        let personal = profile.dados_pessoais.unwrap_or_default();
        let property = profile.propriedade.unwrap_or_default();

        if personal.nome.is_none() {
            tracing::debug!("producer name missing, defaulting");
        }
        if property.nome.is_none() {
            tracing::debug!("property name missing, defaulting");
        }

        Profile {
            producer_name: personal.nome,
            property_name: property.nome,
            area_hectares: reading("area_hectares", property.area_hectares),
        }
    }
}

/// A JSON number, a string holding one, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accept `6.5` and `"6.5"` alike. Anything else reads as missing rather
/// than rejecting the whole record.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(text)) => match text.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                if !text.trim().is_empty() {
                    tracing::warn!(text = %text, "reading is not numeric, ignoring");
                }
                None
            }
        },
        Some(NumberOrText::Other(_)) => {
            tracing::warn!("reading is neither a number nor text, ignoring");
            None
        }
        None => None,
    })
}

fn reading(field: &str, value: Option<f64>) -> Option<Decimal> {
    let Some(v) = value else {
        tracing::debug!(field, "reading missing");
        return None;
    };
    if let Some(decimal) = Decimal::from_f64(v) {
        return Some(decimal);
    }
    if v.is_nan() {
        tracing::warn!(field, "reading is not a number, ignoring");
        return None;
    }
    // Out of Decimal's range: keep the sign so thresholds still fire.
    let saturated = if v > 0.0 { Decimal::MAX } else { Decimal::MIN };
    tracing::warn!(field, value = v, "reading out of range, saturating");
    Some(saturated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FULL: &str = r#"{
        "profile": {
            "dados_pessoais": { "nome": "Ana Souza" },
            "propriedade": { "nome": "Sitio Boa Vista", "area_hectares": 12.5 }
        },
        "latest_soil_data": {
            "soil_parameters": { "ph": 5.2, "umidade": 45, "temperatura": 24.3 },
            "nutrients": { "nitrogenio": 80, "fosforo": 130, "potassio": 200 }
        }
    }"#;

    #[test]
    fn test_full_record() {
        let record = UserRecord::from_json(FULL).unwrap();
        let m = record.measurement().unwrap();
        assert_eq!(m.ph, Some(dec!(5.2)));
        assert_eq!(m.moisture, Some(dec!(45)));
        assert_eq!(m.temperature, Some(dec!(24.3)));
        assert_eq!(m.nitrogen, Some(dec!(80)));
        assert_eq!(m.phosphorus, Some(dec!(130)));
        assert_eq!(m.potassium, Some(dec!(200)));

        let profile = record.profile();
        assert_eq!(profile.producer_name.as_deref(), Some("Ana Souza"));
        assert_eq!(profile.property_name.as_deref(), Some("Sitio Boa Vista"));
        assert_eq!(profile.area_hectares, Some(dec!(12.5)));
    }

    #[test]
    fn test_missing_soil_data_means_no_measurement() {
        let record = UserRecord::from_json(r#"{ "profile": {} }"#).unwrap();
        assert!(record.measurement().is_none());
        assert_eq!(record.profile(), Profile::default());
    }

    #[test]
    fn test_partial_soil_data() {
        let record = UserRecord::from_json(
            r#"{ "latest_soil_data": { "nutrients": { "fosforo": 90 } } }"#,
        )
        .unwrap();
        let m = record.measurement().unwrap();
        assert_eq!(m.phosphorus, Some(dec!(90)));
        assert_eq!(m.ph, None);
        assert_eq!(m.potassium, None);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let record = UserRecord::from_json(
            r#"{ "latest_soil_data": {
                "soil_parameters": { "ph": "6.5", "umidade": " 45 " },
                "nutrients": { "nitrogenio": "abc", "fosforo": "", "potassio": true }
            } }"#,
        )
        .unwrap();
        let m = record.measurement().unwrap();
        assert_eq!(m.ph, Some(dec!(6.5)));
        assert_eq!(m.moisture, Some(dec!(45)));
        assert_eq!(m.nitrogen, None);
        assert_eq!(m.phosphorus, None);
        assert_eq!(m.potassium, None);
    }

    #[test]
    fn test_null_reading_is_missing() {
        let record = UserRecord::from_json(
            r#"{ "latest_soil_data": { "soil_parameters": { "ph": null } } }"#,
        )
        .unwrap();
        assert_eq!(record.measurement().unwrap().ph, None);
    }

    #[test]
    fn test_out_of_range_reading_saturates() {
        let record = UserRecord::from_json(
            r#"{ "latest_soil_data": { "nutrients": { "nitrogenio": 1e30, "fosforo": -1e30 } } }"#,
        )
        .unwrap();
        let m = record.measurement().unwrap();
        assert_eq!(m.nitrogen, Some(Decimal::MAX));
        assert_eq!(m.phosphorus, Some(Decimal::MIN));
    }

    #[test]
    fn test_malformed_json_is_input_parse_error() {
        let err = UserRecord::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EkkoError::InputParse(_)));
    }
}
