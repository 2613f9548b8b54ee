pub mod builtin;
pub mod schema;

use crate::error::EkkoError;
use crate::model::{format_fixed, Parameter};
use rust_decimal::Decimal;
use schema::{select, KnowledgeBaseDef, ParameterKnowledgeDef, Product, RangeRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Texts and products selected for one parameter reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticBundle {
    pub analysis: String,
    pub recommendation: String,
    pub correction: String,
    /// Ranked product list, best fit first.
    pub products: Vec<Product>,
}

impl DiagnosticBundle {
    /// Bundle used when no tables exist for a parameter.
    pub fn neutral() -> Self {
        DiagnosticBundle {
            analysis: "N/A".to_string(),
            recommendation: "N/A".to_string(),
            correction: "N/A".to_string(),
            products: Vec::new(),
        }
    }
}

/// A validated knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    def: KnowledgeBaseDef,
}

impl KnowledgeBase {
    /// Validate a parsed definition and wrap it.
    pub fn from_def(def: KnowledgeBaseDef) -> Result<Self, EkkoError> {
        validate_knowledge(&def)?;
        Ok(KnowledgeBase { def })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn version(&self) -> &str {
        &self.def.version
    }

    pub fn definition(&self) -> &KnowledgeBaseDef {
        &self.def
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables(key).is_some()
    }

    pub fn tables(&self, key: &str) -> Option<&ParameterKnowledgeDef> {
        self.def.parameters.iter().find(|p| p.key == key)
    }

    /// Select the diagnostic bundle for a reading of the parameter `key`.
    ///
    /// Unknown keys yield [`DiagnosticBundle::neutral`], never an error.
    pub fn lookup(&self, key: &str, value: Decimal) -> DiagnosticBundle {
        let Some(tables) = self.tables(key) else {
            tracing::debug!(key, "no diagnostic tables, using neutral bundle");
            return DiagnosticBundle::neutral();
        };

        let qualifier = select(&tables.qualifier, value).map(String::as_str).unwrap_or("");
        let mut analysis = tables
            .opening
            .replace("{value}", &format_fixed(value, tables.decimals))
            .replace("{qualifier}", qualifier);
        if let Some(explanation) = select(&tables.explanation, value) {
            analysis.push(' ');
            analysis.push_str(explanation);
        }

        DiagnosticBundle {
            analysis,
            recommendation: text_or_na(select(&tables.recommendation, value)),
            correction: text_or_na(select(&tables.correction, value)),
            products: select(&tables.products, value).cloned().unwrap_or_default(),
        }
    }

    pub fn lookup_parameter(&self, parameter: Parameter, value: Decimal) -> DiagnosticBundle {
        self.lookup(parameter.key(), value)
    }
}

fn text_or_na(text: Option<&String>) -> String {
    text.cloned().unwrap_or_else(|| "N/A".to_string())
}

/// Load a knowledge base from a JSON file.
pub fn load_knowledge(path: &Path) -> Result<KnowledgeBase, EkkoError> {
    let content = std::fs::read_to_string(path).map_err(|e| EkkoError::KnowledgeLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_knowledge(&content, path)
}

/// Parse a knowledge base from a JSON string.
pub fn parse_knowledge(json: &str, source: &Path) -> Result<KnowledgeBase, EkkoError> {
    let def: KnowledgeBaseDef = serde_json::from_str(json).map_err(|e| EkkoError::KnowledgeLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    KnowledgeBase::from_def(def)
}

/// Parse a knowledge base from a JSON string (no file path context).
pub fn parse_knowledge_str(json: &str) -> Result<KnowledgeBase, EkkoError> {
    let def: KnowledgeBaseDef = serde_json::from_str(json).map_err(EkkoError::Json)?;
    KnowledgeBase::from_def(def)
}

/// Validate that a knowledge base is well-formed.
pub fn validate_knowledge(def: &KnowledgeBaseDef) -> Result<(), EkkoError> {
    if def.name.trim().is_empty() {
        return Err(EkkoError::KnowledgeInvalid("name must not be empty".into()));
    }
    if def.version.trim().is_empty() {
        return Err(EkkoError::KnowledgeInvalid("version must not be empty".into()));
    }
    if def.parameters.is_empty() {
        return Err(EkkoError::KnowledgeInvalid(
            "parameters must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for tables in &def.parameters {
        if tables.key.is_empty() {
            return Err(EkkoError::KnowledgeInvalid(
                "parameter key must not be empty".into(),
            ));
        }
        if !seen.insert(tables.key.as_str()) {
            return Err(EkkoError::KnowledgeInvalid(format!(
                "parameter '{}' is defined more than once",
                tables.key
            )));
        }
        if tables.opening.trim().is_empty() {
            return Err(EkkoError::KnowledgeInvalid(format!(
                "parameter '{}' has an empty opening clause",
                tables.key
            )));
        }

        validate_texts(&tables.key, "qualifier", &tables.qualifier, true)?;
        validate_texts(&tables.key, "explanation", &tables.explanation, false)?;
        validate_texts(&tables.key, "recommendation", &tables.recommendation, true)?;
        validate_texts(&tables.key, "correction", &tables.correction, true)?;
        validate_ranges(&tables.key, "products", &tables.products, true)?;

        for rule in &tables.products {
            if rule.value.iter().any(|p| p.name.trim().is_empty()) {
                return Err(EkkoError::KnowledgeInvalid(format!(
                    "parameter '{}' lists a product without a name",
                    tables.key
                )));
            }
        }
    }

    Ok(())
}

fn validate_texts(
    key: &str,
    table: &str,
    rules: &[RangeRule<String>],
    required: bool,
) -> Result<(), EkkoError> {
    validate_ranges(key, table, rules, required)?;
    if rules.iter().any(|r| r.value.trim().is_empty()) {
        return Err(EkkoError::KnowledgeInvalid(format!(
            "parameter '{}' has an empty {} text",
            key, table
        )));
    }
    Ok(())
}

fn validate_ranges<T>(
    key: &str,
    table: &str,
    rules: &[RangeRule<T>],
    required: bool,
) -> Result<(), EkkoError> {
    if rules.is_empty() {
        if required {
            return Err(EkkoError::KnowledgeInvalid(format!(
                "parameter '{}' has no {} rules",
                key, table
            )));
        }
        return Ok(());
    }

    if rules.iter().any(|r| r.below.is_some() && r.above.is_some()) {
        return Err(EkkoError::KnowledgeInvalid(format!(
            "parameter '{}' has a {} rule with both 'below' and 'above'",
            key, table
        )));
    }

    if !rules.last().is_some_and(|r| r.is_catch_all()) {
        return Err(EkkoError::KnowledgeInvalid(format!(
            "parameter '{}': {} rules must end with a catch-all rule",
            key, table
        )));
    }

    Ok(())
}
