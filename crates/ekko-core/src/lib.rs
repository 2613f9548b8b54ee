pub mod chart;
pub mod classify;
pub mod error;
pub mod input;
pub mod knowledge;
pub mod model;
pub mod plan;
pub mod render;
pub mod report;

use chart::ChartRenderer;
use error::EkkoError;
use input::UserRecord;
use knowledge::KnowledgeBase;
use render::RenderBackend;
use report::{ReportDocument, ReportOptions};
use std::path::{Path, PathBuf};

/// Main API entry point: assemble the report for a user record.
///
/// Fails with [`EkkoError::MissingInput`] when the record carries no soil
/// measurement. Missing individual readings never fail.
pub fn build_report(
    record: &UserRecord,
    knowledge: &KnowledgeBase,
    charts: &dyn ChartRenderer,
    options: &ReportOptions,
) -> Result<ReportDocument, EkkoError> {
    let measurement = record.measurement();
    let profile = record.profile();
    report::assemble(measurement.as_ref(), &profile, knowledge, charts, options)
}

/// Assemble the report and write it through `backend` into `out_dir`.
///
/// Nothing is written unless every section, chart and page succeeds.
pub fn export_report(
    record: &UserRecord,
    knowledge: &KnowledgeBase,
    charts: &dyn ChartRenderer,
    backend: &mut dyn RenderBackend,
    options: &ReportOptions,
    out_dir: &Path,
) -> Result<PathBuf, EkkoError> {
    let document = build_report(record, knowledge, charts, options)?;
    render::export(&document, backend, out_dir)
}
