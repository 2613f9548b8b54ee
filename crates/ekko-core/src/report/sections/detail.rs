use crate::chart::{ChartImage, ChartRequest};
use crate::classify::ClassificationResult;
use crate::knowledge::schema::Product;
use crate::knowledge::DiagnosticBundle;
use crate::model::{format_with_unit, Parameter};
use crate::report::layout::NarrativeCard;
use rust_decimal::Decimal;
use serde::Serialize;

pub const ANALYSIS_HEADING: &str = "ANALISE";
pub const RECOMMENDATION_HEADING: &str = "RECOMENDACAO";
pub const CORRECTION_HEADING: &str = "COMO CORRIGIR";
pub const PRODUCTS_HEADING: &str = "PRODUTOS";

pub const ANALYSIS_MAX_LINES: usize = 3;
pub const RECOMMENDATION_MAX_LINES: usize = 2;
pub const CORRECTION_MAX_LINES: usize = 2;
pub const MAX_PRODUCTS: usize = 3;

/// One parameter's page: value card, chart and diagnostic cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSection {
    pub parameter: Parameter,
    pub title: String,
    pub color: String,
    /// Reading with one decimal and its unit.
    pub value_label: String,
    pub classification: ClassificationResult,
    pub chart_request: ChartRequest,
    pub chart: ChartImage,
    pub analysis: NarrativeCard,
    pub recommendation: NarrativeCard,
    pub correction: NarrativeCard,
    pub products_heading: String,
    /// At most [`MAX_PRODUCTS`] entries.
    pub products: Vec<Product>,
}

impl DetailSection {
    /// Product lines as printed on the card.
    pub fn product_lines(&self) -> Vec<String> {
        self.products.iter().map(|p| format!("• {p}")).collect()
    }
}

pub fn build(
    parameter: Parameter,
    value: Decimal,
    classification: ClassificationResult,
    bundle: DiagnosticBundle,
    chart_request: ChartRequest,
    chart: ChartImage,
    wrap_width: usize,
) -> DetailSection {
    let spec = parameter.spec();
    let mut products = bundle.products;
    products.truncate(MAX_PRODUCTS);

    DetailSection {
        parameter,
        title: spec.title.to_string(),
        color: spec.color.to_string(),
        value_label: format_with_unit(value, 1, spec.unit),
        classification,
        chart_request,
        chart,
        analysis: NarrativeCard::new(
            ANALYSIS_HEADING,
            &bundle.analysis,
            wrap_width,
            ANALYSIS_MAX_LINES,
        ),
        recommendation: NarrativeCard::new(
            RECOMMENDATION_HEADING,
            &bundle.recommendation,
            wrap_width,
            RECOMMENDATION_MAX_LINES,
        ),
        correction: NarrativeCard::new(
            CORRECTION_HEADING,
            &bundle.correction,
            wrap_width,
            CORRECTION_MAX_LINES,
        ),
        products_heading: PRODUCTS_HEADING.to_string(),
        products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{chart_request, ImageFormat};
    use crate::classify::classify_parameter;
    use rust_decimal_macros::dec;

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            brand: "Marca".to_string(),
            dosage: "1 kg/ha".to_string(),
        }
    }

    #[test]
    fn test_detail_truncates_products_and_cards() {
        let bundle = DiagnosticBundle {
            analysis: "palavra ".repeat(60),
            recommendation: "curta".to_string(),
            correction: "outra ".repeat(40),
            products: vec![product("A"), product("B"), product("C"), product("D")],
        };
        let detail = build(
            Parameter::Ph,
            dec!(5.2),
            classify_parameter(Parameter::Ph, dec!(5.2)),
            bundle,
            chart_request(Parameter::Ph, dec!(5.2)),
            ChartImage {
                format: ImageFormat::Svg,
                bytes: b"<svg/>".to_vec(),
            },
            40,
        );

        assert_eq!(detail.title, "pH do Solo");
        assert_eq!(detail.value_label, "5.2");
        assert_eq!(detail.products.len(), 3);
        assert_eq!(detail.product_lines()[0], "• A (Marca) - 1 kg/ha");
        assert_eq!(detail.analysis.lines.len(), 3);
        assert_eq!(detail.recommendation.lines, vec!["curta"]);
        assert_eq!(detail.correction.lines.len(), 2);
        assert!(detail.correction.is_truncated());
    }

    #[test]
    fn test_value_label_units() {
        let bundle = DiagnosticBundle::neutral();
        let detail = build(
            Parameter::Nitrogen,
            dec!(80),
            classify_parameter(Parameter::Nitrogen, dec!(80)),
            bundle,
            chart_request(Parameter::Nitrogen, dec!(80)),
            ChartImage {
                format: ImageFormat::Svg,
                bytes: Vec::new(),
            },
            105,
        );
        assert_eq!(detail.value_label, "80.0 mg/kg");
        assert!(detail.products.is_empty());
        assert_eq!(detail.analysis.lines, vec!["N/A"]);
    }
}
