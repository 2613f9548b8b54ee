use crate::model::Parameter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a reading sits relative to its ideal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ideal,
    Attention,
    Critical,
    /// No usable reading (missing or zero).
    Unavailable,
}

impl Status {
    /// Glyph and label as printed in the summary table.
    pub fn label(self) -> &'static str {
        match self {
            Status::Ideal => "✓ Ideal",
            Status::Attention => "⚠ Atenção",
            Status::Critical => "❌ Crítico",
            Status::Unavailable => "N/A",
        }
    }

    /// Bare glyph without the label.
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Ideal => "✓",
            Status::Attention => "⚠",
            Status::Critical => "❌",
            Status::Unavailable => "N/A",
        }
    }

    /// Summary cell for `parameter`: nutrients show only the glyph.
    pub fn label_for(self, parameter: Parameter) -> &'static str {
        if parameter.is_nutrient() {
            self.glyph()
        } else {
            self.label()
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency tier. Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "BAIXA",
            Priority::Medium => "MÉDIA",
            Priority::High => "ALTA",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a single parameter reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub parameter: Parameter,
    /// The reading that was classified; `None` when it was missing.
    pub value: Option<Decimal>,
    pub status: Status,
    pub priority: Priority,
    /// Human-readable explanation of which thresholds fired.
    pub reason: String,
}

/// Classification of every parameter of one measurement.
pub type Assessment = BTreeMap<Parameter, ClassificationResult>;
