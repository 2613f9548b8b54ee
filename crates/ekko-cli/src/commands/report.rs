use chrono::NaiveDate;
use ekko_core::chart::SvgChartRenderer;
use ekko_core::error::EkkoError;
use ekko_core::input::UserRecord;
use ekko_core::knowledge::{builtin, load_knowledge};
use ekko_core::render::recording::RecordingBackend;
use ekko_core::render::export;
use ekko_core::report::ReportOptions;
use std::path::PathBuf;

use crate::output;

pub struct ReportArgs {
    pub input_file: PathBuf,
    pub knowledge: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub date: Option<String>,
    pub output: String,
    pub dry_run: bool,
}

pub fn run(args: ReportArgs) -> Result<(), EkkoError> {
    let knowledge = match &args.knowledge {
        Some(path) => load_knowledge(path)?,
        None => builtin::load()?,
    };
    tracing::debug!(name = knowledge.name(), version = knowledge.version(), "knowledge base loaded");

    let mut options = ReportOptions::default();
    if let Some(date) = &args.date {
        options.generated_on = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| EkkoError::InputParse(format!("invalid --date '{}': {}", date, e)))?;
    }

    let bytes = std::fs::read(&args.input_file)?;
    let record = UserRecord::from_slice(&bytes)?;

    let charts = SvgChartRenderer::new();
    let document = ekko_core::build_report(&record, &knowledge, &charts, &options)?;

    if args.dry_run {
        match args.output.as_str() {
            "json" => output::json::print_document(&document)?,
            _ => output::table::print_document(&document),
        }
        return Ok(());
    }

    let mut backend = RecordingBackend::new();
    let written = export(&document, &mut backend, &args.out_dir)?;
    println!(
        "Report '{}' written to {} ({} pages)",
        document.file_name,
        written.display(),
        backend.pages().len()
    );

    Ok(())
}
