use crate::chart::{chart_request, ChartImage, ChartRenderer, ChartRequest};
use crate::classify::{classify_measurement, Assessment};
use crate::error::EkkoError;
use crate::knowledge::{DiagnosticBundle, KnowledgeBase};
use crate::model::{Parameter, Profile, SoilMeasurement};
use crate::plan::plan;
use crate::report::sections::{catalog, cover, detail, summary};
use crate::report::{report_file_name, FooterSpec, ReportDocument, Section};
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Report generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Date printed on the cover and used for the file name.
    pub generated_on: NaiveDate,
    /// Characters per line on the diagnostic cards.
    pub wrap_width: usize,
    /// Logo text on the cover and left footer mark.
    pub brand: String,
    /// Right footer mark.
    pub institution: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            generated_on: chrono::Local::now().date_naive(),
            wrap_width: 105,
            brand: "EKKO".to_string(),
            institution: "ETE FMC".to_string(),
        }
    }
}

impl ReportOptions {
    pub fn for_date(generated_on: NaiveDate) -> Self {
        ReportOptions {
            generated_on,
            ..Default::default()
        }
    }
}

struct ChartTask {
    parameter: Parameter,
    request: ChartRequest,
}

/// Charts waiting to be drawn, in report order.
///
/// Tasks are drained one at a time; a task is done when the renderer
/// returns.
struct ChartQueue {
    tasks: VecDeque<ChartTask>,
}

impl ChartQueue {
    fn for_measurement(measurement: &SoilMeasurement) -> Self {
        let tasks = Parameter::ALL
            .iter()
            .map(|&p| ChartTask {
                parameter: p,
                request: chart_request(p, measurement.value_or_zero(p)),
            })
            .collect();
        ChartQueue { tasks }
    }

    fn drain(
        mut self,
        renderer: &dyn ChartRenderer,
    ) -> Result<Vec<(Parameter, ChartRequest, ChartImage)>, EkkoError> {
        let mut done = Vec::with_capacity(self.tasks.len());
        while let Some(task) = self.tasks.pop_front() {
            tracing::debug!(
                parameter = task.parameter.key(),
                backend = renderer.backend_name(),
                remaining = self.tasks.len(),
                "rendering chart"
            );
            let image = renderer.render(&task.request).map_err(|e| {
                tracing::warn!(parameter = task.parameter.key(), error = %e, "chart rendering failed");
                match e {
                    EkkoError::ChartRendering { .. } => e,
                    other => EkkoError::ChartRendering {
                        parameter: task.parameter.spec().name.to_string(),
                        reason: other.to_string(),
                    },
                }
            })?;
            done.push((task.parameter, task.request, image));
        }
        Ok(done)
    }
}

/// Build the full report document.
///
/// Fails with [`EkkoError::MissingInput`] when there is no measurement, and
/// with [`EkkoError::ChartRendering`] if any chart fails to render.
pub fn assemble(
    measurement: Option<&SoilMeasurement>,
    profile: &Profile,
    knowledge: &KnowledgeBase,
    charts: &dyn ChartRenderer,
    options: &ReportOptions,
) -> Result<ReportDocument, EkkoError> {
    let measurement = measurement.ok_or(EkkoError::MissingInput)?;

    let assessment: Assessment = classify_measurement(measurement);
    let actions = plan(&assessment);

    let mut sections = Vec::with_capacity(Parameter::ALL.len() + 3);

    sections.push(Section::Cover(cover::build(
        profile,
        options.generated_on,
        &options.brand,
    )));
    tracing::debug!("cover section built");

    sections.push(Section::Summary(summary::build(
        measurement,
        &assessment,
        actions,
    )));
    tracing::debug!("summary section built");

    let rendered = ChartQueue::for_measurement(measurement).drain(charts)?;
    for (parameter, request, image) in rendered {
        let reading = measurement.reading(parameter);
        let bundle = match reading {
            Some(value) => knowledge.lookup_parameter(parameter, value),
            None => DiagnosticBundle::neutral(),
        };
        let classification = assessment.get(&parameter).cloned().ok_or_else(|| {
            EkkoError::Rendering(format!("no classification for {}", parameter))
        })?;

        sections.push(Section::ParameterDetail(Box::new(detail::build(
            parameter,
            reading.unwrap_or_default(),
            classification,
            bundle,
            request,
            image,
            options.wrap_width,
        ))));
        tracing::debug!(parameter = parameter.key(), "detail section built");
    }

    sections.push(Section::ProductCatalog(catalog::build(measurement)));
    tracing::debug!("catalog section built");

    Ok(ReportDocument {
        generated_on: options.generated_on,
        file_name: report_file_name(options.generated_on),
        sections,
        footer: FooterSpec {
            brand: options.brand.clone(),
            institution: options.institution.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SvgChartRenderer;
    use crate::knowledge::builtin;

    #[test]
    fn test_missing_measurement_fails_first() {
        let kb = builtin::load().unwrap();
        let err = assemble(
            None,
            &Profile::default(),
            &kb,
            &SvgChartRenderer::new(),
            &ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EkkoError::MissingInput));
    }

    #[test]
    fn test_section_order() {
        let kb = builtin::load().unwrap();
        let doc = assemble(
            Some(&SoilMeasurement::default()),
            &Profile::default(),
            &kb,
            &SvgChartRenderer::new(),
            &ReportOptions::default(),
        )
        .unwrap();

        let kinds: Vec<&str> = doc.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds.len(), 9);
        assert_eq!(kinds[0], "cover");
        assert_eq!(kinds[1], "summary");
        assert!(kinds[2..8].iter().all(|k| *k == "parameter_detail"));
        assert_eq!(kinds[8], "product_catalog");

        let order: Vec<Parameter> = doc.details().map(|d| d.parameter).collect();
        assert_eq!(order, Parameter::ALL.to_vec());
    }

    #[test]
    fn test_missing_reading_uses_neutral_bundle() {
        let kb = builtin::load().unwrap();
        let doc = assemble(
            Some(&SoilMeasurement::default()),
            &Profile::default(),
            &kb,
            &SvgChartRenderer::new(),
            &ReportOptions::default(),
        )
        .unwrap();
        for detail in doc.details() {
            assert_eq!(detail.analysis.full_text, "N/A");
            assert!(detail.products.is_empty());
        }
    }
}
