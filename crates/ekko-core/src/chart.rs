//! Comparison chart data and the chart rendering seam.
//!
//! Each parameter page carries a three-bar chart: the current reading next
//! to the lower and upper bound of its ideal band. This module computes the
//! series; turning it into an image is the job of a [`ChartRenderer`].

use crate::error::EkkoError;
use crate::model::Parameter;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Bar labels, in series order.
pub const CHART_LABELS: [&str; 3] = ["Atual", "Ideal Min", "Ideal Max"];

/// Registered ideal band for a parameter key.
pub fn ideal_band(key: &str) -> Option<(Decimal, Decimal)> {
    Parameter::ALL
        .iter()
        .find(|p| p.key() == key)
        .map(|p| (p.spec().ideal_min, p.spec().ideal_max))
}

/// `[current, ideal_min, ideal_max]` for a parameter key.
///
/// Keys without a registered band get a synthetic `[0.8·v, 1.2·v]` band so
/// that any reading still yields a renderable series.
pub fn series_for(key: &str, current: Decimal) -> [Decimal; 3] {
    match ideal_band(key) {
        Some((min, max)) => [current, min, max],
        None => [current, current * dec!(0.8), current * dec!(1.2)],
    }
}

/// Everything a chart renderer needs to draw one comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRequest {
    pub key: String,
    pub title: String,
    pub labels: Vec<String>,
    pub series: [Decimal; 3],
    /// Hex color token of the current-value bar.
    pub color: String,
}

pub fn chart_request(parameter: Parameter, value: Decimal) -> ChartRequest {
    let spec = parameter.spec();
    ChartRequest {
        key: parameter.key().to_string(),
        title: spec.title.to_string(),
        labels: CHART_LABELS.iter().map(|l| l.to_string()).collect(),
        series: series_for(parameter.key(), value),
        color: spec.color.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
}

/// An encoded chart image. The engine never looks inside `bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartImage {
    pub format: ImageFormat,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

/// Trait for chart rendering backends.
pub trait ChartRenderer: Send + Sync {
    /// Render one chart. Returning is the completion signal: the image is
    /// final once this returns `Ok`.
    fn render(&self, request: &ChartRequest) -> Result<ChartImage, EkkoError>;

    /// Name of this rendering backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Renders comparison charts as standalone SVG documents.
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl SvgChartRenderer {
    pub fn new() -> Self {
        SvgChartRenderer {
            width: 300,
            height: 200,
        }
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, request: &ChartRequest) -> Result<ChartImage, EkkoError> {
        let values: Vec<f64> = request
            .series
            .iter()
            .map(|v| v.to_f64().unwrap_or(0.0).max(0.0))
            .collect();
        let peak = values.iter().copied().fold(0.0_f64, f64::max);
        // Zero-based axis with some headroom above the tallest bar.
        let scale_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let plot_top = 10.0;
        let plot_bottom = height - 24.0;
        let plot_height = plot_bottom - plot_top;
        let slot = width / values.len().max(1) as f64;
        let bar_width = slot * 0.6;

        let mut svg = String::new();
        write_svg(&mut svg, |svg| {
            writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
                self.width, self.height, self.width, self.height
            )?;
            writeln!(svg, "<title>{}</title>", escape(&request.title))?;
            writeln!(
                svg,
                r#"<line x1="0" y1="{plot_bottom:.1}" x2="{width:.1}" y2="{plot_bottom:.1}" stroke="rgba(0,0,0,0.05)"/>"#
            )?;

            for (i, value) in values.iter().enumerate() {
                let bar_height = plot_height * value / scale_max;
                let x = slot * i as f64 + (slot - bar_width) / 2.0;
                let y = plot_bottom - bar_height;
                let (fill, stroke) = if i == 0 {
                    (request.color.as_str(), request.color.as_str())
                } else {
                    ("rgba(200,200,200,0.3)", "#999")
                };
                writeln!(
                    svg,
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#
                )?;
                let label = request.labels.get(i).map(String::as_str).unwrap_or("");
                writeln!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
                    x + bar_width / 2.0,
                    height - 8.0,
                    escape(label)
                )?;
                writeln!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle">{}</text>"#,
                    x + bar_width / 2.0,
                    (y - 3.0).max(plot_top),
                    request.series[i].normalize()
                )?;
            }

            writeln!(svg, "</svg>")
        })?;

        Ok(ChartImage {
            format: ImageFormat::Svg,
            bytes: svg.into_bytes(),
        })
    }

    fn backend_name(&self) -> &str {
        "svg"
    }
}

fn write_svg(
    svg: &mut String,
    body: impl FnOnce(&mut String) -> std::fmt::Result,
) -> Result<(), EkkoError> {
    body(svg).map_err(|e| EkkoError::Rendering(format!("failed to write SVG: {}", e)))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_bands() {
        assert_eq!(series_for("ph", dec!(5.2)), [dec!(5.2), dec!(6.0), dec!(7.0)]);
        assert_eq!(series_for("umidade", dec!(50)), [dec!(50), dec!(40), dec!(70)]);
        assert_eq!(series_for("temp", dec!(22)), [dec!(22), dec!(20), dec!(30)]);
        assert_eq!(series_for("n", dec!(80)), [dec!(80), dec!(150), dec!(300)]);
        assert_eq!(series_for("p", dec!(80)), [dec!(80), dec!(120), dec!(250)]);
        assert_eq!(series_for("k", dec!(80)), [dec!(80), dec!(150), dec!(300)]);
    }

    #[test]
    fn test_unknown_key_gets_synthetic_band() {
        assert_eq!(series_for("salinidade", dec!(10)), [dec!(10), dec!(8), dec!(12)]);
    }

    #[test]
    fn test_chart_request_carries_style() {
        let req = chart_request(Parameter::Moisture, dec!(33));
        assert_eq!(req.labels, vec!["Atual", "Ideal Min", "Ideal Max"]);
        assert_eq!(req.color, "#3B82F6");
        assert_eq!(req.title, "Umidade");
    }

    #[test]
    fn test_svg_renderer_draws_three_bars() {
        let req = chart_request(Parameter::Nitrogen, dec!(80));
        let image = SvgChartRenderer::new().render(&req).unwrap();
        assert_eq!(image.format, ImageFormat::Svg);
        let svg = String::from_utf8(image.bytes).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("#8B5CF6"));
        assert!(svg.contains("Ideal Max"));
    }

    #[test]
    fn test_svg_renderer_handles_zero_series() {
        let req = chart_request(Parameter::Ph, Decimal::ZERO);
        let image = SvgChartRenderer::new().render(&req).unwrap();
        assert!(!image.bytes.is_empty());
    }
}
