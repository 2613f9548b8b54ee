use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A knowledge base mapping parameter readings to diagnostic texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub parameters: Vec<ParameterKnowledgeDef>,
}

/// Diagnostic tables for one parameter.
///
/// Every table is an ordered list of range rules; the first rule matching
/// the reading wins, so tables must end with a catch-all rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterKnowledgeDef {
    /// Parameter key (e.g. "ph", "umidade", "n").
    pub key: String,
    /// Opening clause of the analysis. `{value}` and `{qualifier}` are
    /// substituted.
    pub opening: String,
    /// Decimals used when inserting `{value}`.
    #[serde(default)]
    pub decimals: u32,
    pub qualifier: Vec<RangeRule<String>>,
    /// Sentence appended after the opening clause. Optional.
    #[serde(default)]
    pub explanation: Vec<RangeRule<String>>,
    pub recommendation: Vec<RangeRule<String>>,
    pub correction: Vec<RangeRule<String>>,
    pub products: Vec<RangeRule<Vec<Product>>>,
}

/// One row of a range table. `below` matches readings strictly under the
/// bound, `above` readings strictly over it; a rule with neither matches
/// everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRule<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<Decimal>,
    pub value: T,
}

impl<T> RangeRule<T> {
    pub fn matches(&self, reading: Decimal) -> bool {
        match (self.below, self.above) {
            (Some(bound), _) => reading < bound,
            (None, Some(bound)) => reading > bound,
            (None, None) => true,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.below.is_none() && self.above.is_none()
    }

    /// Short description of the range, e.g. "< 5.5" or "otherwise".
    pub fn describe(&self) -> String {
        match (self.below, self.above) {
            (Some(bound), _) => format!("< {}", bound),
            (None, Some(bound)) => format!("> {}", bound),
            (None, None) => "otherwise".to_string(),
        }
    }
}

/// Select the value of the first rule matching `reading`.
pub fn select<T>(rules: &[RangeRule<T>], reading: Decimal) -> Option<&T> {
    rules.iter().find(|r| r.matches(reading)).map(|r| &r.value)
}

/// A commercial product with its application dosage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub dosage: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.brand.is_empty() {
            write!(f, " ({})", self.brand)?;
        }
        if !self.dosage.is_empty() {
            write!(f, " - {}", self.dosage)?;
        }
        Ok(())
    }
}
