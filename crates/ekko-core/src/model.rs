use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six tracked soil parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Ph,
    Moisture,
    Temperature,
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Parameter {
    /// Report order: summary rows and detail pages follow this sequence.
    pub const ALL: [Parameter; 6] = [
        Parameter::Ph,
        Parameter::Moisture,
        Parameter::Temperature,
        Parameter::Nitrogen,
        Parameter::Phosphorus,
        Parameter::Potassium,
    ];

    /// Stable key used by the knowledge base and the chart bands.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::Moisture => "umidade",
            Parameter::Temperature => "temp",
            Parameter::Nitrogen => "n",
            Parameter::Phosphorus => "p",
            Parameter::Potassium => "k",
        }
    }

    /// Resolve a parameter from its key or a common English/Portuguese name.
    pub fn from_key_loose(s: &str) -> Option<Parameter> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "ph" => Some(Parameter::Ph),
            "umidade" | "moisture" => Some(Parameter::Moisture),
            "temp" | "temperatura" | "temperature" => Some(Parameter::Temperature),
            "n" | "nitrogenio" | "nitrogen" => Some(Parameter::Nitrogen),
            "p" | "fosforo" | "phosphorus" => Some(Parameter::Phosphorus),
            "k" | "potassio" | "potassium" => Some(Parameter::Potassium),
            _ => None,
        }
    }

    pub fn is_nutrient(self) -> bool {
        matches!(
            self,
            Parameter::Nitrogen | Parameter::Phosphorus | Parameter::Potassium
        )
    }

    pub fn spec(self) -> ParameterSpec {
        match self {
            Parameter::Ph => ParameterSpec {
                name: "pH",
                title: "pH do Solo",
                unit: Unit::Ph,
                ideal_min: dec!(6.0),
                ideal_max: dec!(7.0),
                color: "#22C55E",
                summary_decimals: 2,
            },
            Parameter::Moisture => ParameterSpec {
                name: "Umidade",
                title: "Umidade",
                unit: Unit::Percent,
                ideal_min: dec!(40),
                ideal_max: dec!(70),
                color: "#3B82F6",
                summary_decimals: 1,
            },
            Parameter::Temperature => ParameterSpec {
                name: "Temperatura",
                title: "Temperatura",
                unit: Unit::Celsius,
                ideal_min: dec!(20),
                ideal_max: dec!(30),
                color: "#F97316",
                summary_decimals: 1,
            },
            Parameter::Nitrogen => ParameterSpec {
                name: "Nitrogenio",
                title: "Nitrogenio (N)",
                unit: Unit::MgPerKg,
                ideal_min: dec!(150),
                ideal_max: dec!(300),
                color: "#8B5CF6",
                summary_decimals: 0,
            },
            Parameter::Phosphorus => ParameterSpec {
                name: "Fosforo",
                title: "Fosforo (P)",
                unit: Unit::MgPerKg,
                ideal_min: dec!(120),
                ideal_max: dec!(250),
                color: "#EC4899",
                summary_decimals: 0,
            },
            Parameter::Potassium => ParameterSpec {
                name: "Potassio",
                title: "Potassio (K)",
                unit: Unit::MgPerKg,
                ideal_min: dec!(150),
                ideal_max: dec!(300),
                color: "#FBBF24",
                summary_decimals: 0,
            },
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec().name)
    }
}

/// Static description of a tracked parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    /// Label used in the summary table.
    pub name: &'static str,
    /// Heading of the parameter's detail page.
    pub title: &'static str,
    pub unit: Unit,
    pub ideal_min: Decimal,
    pub ideal_max: Decimal,
    /// Hex color token for charts and section styling.
    pub color: &'static str,
    /// Decimals shown in the summary table.
    pub summary_decimals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "pH")]
    Ph,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "mg/kg")]
    MgPerKg,
}

impl Unit {
    /// Suffix appended directly after a formatted value.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Ph => "",
            Unit::Percent => "%",
            Unit::Celsius => "°C",
            Unit::MgPerKg => " mg/kg",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Ph => write!(f, "pH"),
            Unit::Percent => write!(f, "%"),
            Unit::Celsius => write!(f, "°C"),
            Unit::MgPerKg => write!(f, "mg/kg"),
        }
    }
}

/// Snapshot of one plot's soil readings.
///
/// A reading is `None` when the sensor record did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilMeasurement {
    #[serde(default)]
    pub ph: Option<Decimal>,
    /// Volumetric moisture, %.
    #[serde(default)]
    pub moisture: Option<Decimal>,
    /// °C.
    #[serde(default)]
    pub temperature: Option<Decimal>,
    /// mg/kg.
    #[serde(default)]
    pub nitrogen: Option<Decimal>,
    /// mg/kg.
    #[serde(default)]
    pub phosphorus: Option<Decimal>,
    /// mg/kg.
    #[serde(default)]
    pub potassium: Option<Decimal>,
}

impl SoilMeasurement {
    pub fn reading(&self, parameter: Parameter) -> Option<Decimal> {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Moisture => self.moisture,
            Parameter::Temperature => self.temperature,
            Parameter::Nitrogen => self.nitrogen,
            Parameter::Phosphorus => self.phosphorus,
            Parameter::Potassium => self.potassium,
        }
    }

    /// Reading with missing values shown as zero.
    pub fn value_or_zero(&self, parameter: Parameter) -> Decimal {
        self.reading(parameter).unwrap_or_default()
    }
}

/// Producer identity shown on the cover page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub producer_name: Option<String>,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub area_hectares: Option<Decimal>,
}

/// Format a decimal with a fixed number of decimals, rounding half away
/// from zero.
pub fn format_fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.prec$}", rounded, prec = decimals as usize)
}

/// Format a value followed by its unit suffix, e.g. `45.0%` or `80 mg/kg`.
pub fn format_with_unit(value: Decimal, decimals: u32, unit: Unit) -> String {
    format!("{}{}", format_fixed(value, decimals), unit.suffix())
}
