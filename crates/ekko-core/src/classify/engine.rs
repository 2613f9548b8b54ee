use crate::classify::outcome::{Assessment, ClassificationResult, Priority, Status};
use crate::model::{format_fixed, Parameter, SoilMeasurement};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Generic three-tier banding of a value against its ideal band.
///
/// Values inside `[ideal_min, ideal_max]` are ideal; values below
/// `0.8 * ideal_min` or above `1.2 * ideal_max` are critical; everything in
/// between needs attention. A zero reading is unavailable.
pub fn classify(value: Decimal, ideal_min: Decimal, ideal_max: Decimal) -> Status {
    if value.is_zero() {
        return Status::Unavailable;
    }
    if value >= ideal_min && value <= ideal_max {
        Status::Ideal
    } else if value < ideal_min * dec!(0.8) || value > ideal_max * dec!(1.2) {
        Status::Critical
    } else {
        Status::Attention
    }
}

/// Fixed thresholds for the macronutrients. Status and priority use these
/// instead of the generic band.
struct NutrientRule {
    ideal_above: Decimal,
    attention_above: Decimal,
    high_priority_below: Decimal,
}

fn nutrient_rule(parameter: Parameter) -> Option<NutrientRule> {
    match parameter {
        Parameter::Nitrogen => Some(NutrientRule {
            ideal_above: dec!(200),
            attention_above: dec!(100),
            high_priority_below: dec!(100),
        }),
        Parameter::Phosphorus => Some(NutrientRule {
            ideal_above: dec!(150),
            attention_above: dec!(80),
            high_priority_below: dec!(80),
        }),
        Parameter::Potassium => Some(NutrientRule {
            ideal_above: dec!(180),
            attention_above: dec!(100),
            high_priority_below: dec!(100),
        }),
        _ => None,
    }
}

/// Priority tier for a reading. Each parameter has its own hand-tuned
/// thresholds, independent of the status band.
pub fn priority_for(parameter: Parameter, value: Decimal) -> Priority {
    match parameter {
        Parameter::Ph => {
            if value < dec!(5.5) || value > dec!(7.5) {
                Priority::High
            } else if value < dec!(6.0) || value > dec!(7.0) {
                Priority::Medium
            } else {
                Priority::Low
            }
        }
        Parameter::Moisture => {
            if value < dec!(30) || value > dec!(80) {
                Priority::High
            } else {
                Priority::Medium
            }
        }
        Parameter::Temperature => Priority::Low,
        Parameter::Nitrogen | Parameter::Phosphorus | Parameter::Potassium => {
            match nutrient_rule(parameter) {
                Some(rule) if value < rule.high_priority_below => Priority::High,
                _ => Priority::Medium,
            }
        }
    }
}

/// Classify one parameter reading, applying its status rule and its
/// priority thresholds.
pub fn classify_parameter(parameter: Parameter, value: Decimal) -> ClassificationResult {
    let spec = parameter.spec();

    let (status, status_reason) = match nutrient_rule(parameter) {
        Some(rule) => nutrient_status(value, &rule),
        None => {
            let status = classify(value, spec.ideal_min, spec.ideal_max);
            let reason = match status {
                Status::Unavailable => "no reading".to_string(),
                Status::Ideal => {
                    format!("{} within ideal {}-{}", value, spec.ideal_min, spec.ideal_max)
                }
                Status::Critical => format!(
                    "{} beyond critical band {}-{}",
                    value,
                    format_fixed(spec.ideal_min * dec!(0.8), 1),
                    format_fixed(spec.ideal_max * dec!(1.2), 1)
                ),
                Status::Attention => {
                    format!("{} outside ideal {}-{}", value, spec.ideal_min, spec.ideal_max)
                }
            };
            (status, reason)
        }
    };

    let priority = priority_for(parameter, value);

    ClassificationResult {
        parameter,
        value: Some(value),
        status,
        priority,
        reason: format!(
            "{}: {} -> {}, priority {}",
            spec.name, status_reason, status, priority
        ),
    }
}

fn nutrient_status(value: Decimal, rule: &NutrientRule) -> (Status, String) {
    if value.is_zero() {
        (Status::Unavailable, "no reading".to_string())
    } else if value > rule.ideal_above {
        (Status::Ideal, format!("{} > {}", value, rule.ideal_above))
    } else if value > rule.attention_above {
        (
            Status::Attention,
            format!("{} > {} but <= {}", value, rule.attention_above, rule.ideal_above),
        )
    } else {
        (
            Status::Critical,
            format!("{} <= {}", value, rule.attention_above),
        )
    }
}

/// Priority of a parameter whose reading is missing: no threshold can
/// fire, so it sits at the parameter's resting tier.
pub fn missing_priority(parameter: Parameter) -> Priority {
    match parameter {
        Parameter::Ph | Parameter::Temperature => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Classify a possibly missing reading.
pub fn classify_reading(parameter: Parameter, reading: Option<Decimal>) -> ClassificationResult {
    match reading {
        Some(value) => classify_parameter(parameter, value),
        None => {
            let priority = missing_priority(parameter);
            ClassificationResult {
                parameter,
                value: None,
                status: Status::Unavailable,
                priority,
                reason: format!(
                    "{}: missing reading -> {}, priority {}",
                    parameter.spec().name,
                    Status::Unavailable,
                    priority
                ),
            }
        }
    }
}

/// Classify all six parameters of a measurement.
pub fn classify_measurement(measurement: &SoilMeasurement) -> Assessment {
    Parameter::ALL
        .iter()
        .map(|&p| (p, classify_reading(p, measurement.reading(p))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_band() {
        assert_eq!(classify(dec!(6.5), dec!(6.0), dec!(7.0)), Status::Ideal);
        assert_eq!(classify(dec!(6.0), dec!(6.0), dec!(7.0)), Status::Ideal);
        assert_eq!(classify(dec!(7.0), dec!(6.0), dec!(7.0)), Status::Ideal);
        // 0.8 * 6.0 = 4.8, 1.2 * 7.0 = 8.4
        assert_eq!(classify(dec!(4.8), dec!(6.0), dec!(7.0)), Status::Attention);
        assert_eq!(classify(dec!(4.79), dec!(6.0), dec!(7.0)), Status::Critical);
        assert_eq!(classify(dec!(8.4), dec!(6.0), dec!(7.0)), Status::Attention);
        assert_eq!(classify(dec!(8.41), dec!(6.0), dec!(7.0)), Status::Critical);
    }

    #[test]
    fn test_zero_is_unavailable() {
        assert_eq!(classify(Decimal::ZERO, dec!(6.0), dec!(7.0)), Status::Unavailable);
        let r = classify_parameter(Parameter::Nitrogen, Decimal::ZERO);
        assert_eq!(r.status, Status::Unavailable);
        // Priority still follows the reading.
        assert_eq!(r.priority, Priority::High);
    }

    #[test]
    fn test_ph_5_2_is_attention_high() {
        // 5.2 is not below 4.8, so attention rather than critical.
        let r = classify_parameter(Parameter::Ph, dec!(5.2));
        assert_eq!(r.status, Status::Attention);
        assert_eq!(r.priority, Priority::High);
    }

    #[test]
    fn test_ph_priorities() {
        assert_eq!(priority_for(Parameter::Ph, dec!(6.5)), Priority::Low);
        assert_eq!(priority_for(Parameter::Ph, dec!(5.8)), Priority::Medium);
        assert_eq!(priority_for(Parameter::Ph, dec!(7.2)), Priority::Medium);
        assert_eq!(priority_for(Parameter::Ph, dec!(5.5)), Priority::Medium);
        assert_eq!(priority_for(Parameter::Ph, dec!(7.6)), Priority::High);
    }

    #[test]
    fn test_moisture_and_temperature() {
        let dry = classify_parameter(Parameter::Moisture, dec!(25));
        assert_eq!(dry.status, Status::Critical);
        assert_eq!(dry.priority, Priority::High);

        let damp = classify_parameter(Parameter::Moisture, dec!(75));
        assert_eq!(damp.status, Status::Attention);
        assert_eq!(damp.priority, Priority::Medium);

        let ideal = classify_parameter(Parameter::Moisture, dec!(55));
        assert_eq!(ideal.priority, Priority::Medium);

        let hot = classify_parameter(Parameter::Temperature, dec!(45));
        assert_eq!(hot.status, Status::Critical);
        assert_eq!(hot.priority, Priority::Low);
    }

    #[test]
    fn test_nitrogen_80_is_critical_high() {
        let r = classify_parameter(Parameter::Nitrogen, dec!(80));
        assert_eq!(r.status, Status::Critical);
        assert_eq!(r.priority, Priority::High);
        assert!(r.reason.contains("80 <= 100"));
    }

    #[test]
    fn test_nutrient_thresholds() {
        assert_eq!(classify_parameter(Parameter::Nitrogen, dec!(150)).status, Status::Attention);
        assert_eq!(classify_parameter(Parameter::Nitrogen, dec!(201)).status, Status::Ideal);
        assert_eq!(classify_parameter(Parameter::Nitrogen, dec!(100)).priority, Priority::Medium);

        let p = classify_parameter(Parameter::Phosphorus, dec!(90));
        assert_eq!(p.status, Status::Attention);
        assert_eq!(p.priority, Priority::Medium);
        assert_eq!(classify_parameter(Parameter::Phosphorus, dec!(79)).priority, Priority::High);

        assert_eq!(classify_parameter(Parameter::Potassium, dec!(190)).status, Status::Ideal);
        assert_eq!(classify_parameter(Parameter::Potassium, dec!(100)).status, Status::Critical);
        assert_eq!(classify_parameter(Parameter::Potassium, dec!(99)).priority, Priority::High);
    }

    #[test]
    fn test_priority_is_monotonic_away_from_ideal() {
        for p in Parameter::ALL {
            let spec = p.spec();
            let mid = (spec.ideal_min + spec.ideal_max) / dec!(2);
            let step = (spec.ideal_max - spec.ideal_min) / dec!(20);

            let mut last = priority_for(p, mid);
            let mut v = mid;
            while v > step {
                v -= step;
                let next = priority_for(p, v);
                assert!(next >= last, "{p} priority dropped going down at {v}");
                last = next;
            }

            let mut last = priority_for(p, mid);
            let mut v = mid;
            for _ in 0..200 {
                v += step;
                let next = priority_for(p, v);
                assert!(next >= last, "{p} priority dropped going up at {v}");
                last = next;
            }
        }
    }

    #[test]
    fn test_classify_measurement_covers_all() {
        let m = SoilMeasurement {
            ph: Some(dec!(6.5)),
            moisture: Some(dec!(55)),
            temperature: Some(dec!(25)),
            nitrogen: Some(dec!(250)),
            phosphorus: Some(dec!(200)),
            potassium: Some(dec!(250)),
        };
        let a = classify_measurement(&m);
        assert_eq!(a.len(), 6);
        assert!(a.values().all(|r| r.status == Status::Ideal));
        assert!(a.values().all(|r| r.priority != Priority::High));
    }

    #[test]
    fn test_missing_reading_is_unavailable_without_urgency() {
        let m = SoilMeasurement {
            ph: Some(dec!(6.5)),
            ..Default::default()
        };
        let a = classify_measurement(&m);
        assert_eq!(a[&Parameter::Ph].status, Status::Ideal);
        for p in [Parameter::Moisture, Parameter::Nitrogen, Parameter::Potassium] {
            assert_eq!(a[&p].status, Status::Unavailable);
            assert_eq!(a[&p].priority, Priority::Medium);
            assert_eq!(a[&p].value, None);
        }
        assert_eq!(a[&Parameter::Temperature].priority, Priority::Low);
    }
}
