use ekko_core::classify::classify_measurement;
use ekko_core::error::EkkoError;
use ekko_core::input::UserRecord;
use ekko_core::plan::plan;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), EkkoError> {
    let bytes = std::fs::read(&input_file)?;
    let record = UserRecord::from_slice(&bytes)?;
    let measurement = record.measurement().ok_or(EkkoError::MissingInput)?;

    let assessment = classify_measurement(&measurement);
    let actions = plan(&assessment);

    match output_format {
        "json" => output::json::print_classification(&assessment, &actions)?,
        _ => output::table::print_classification(&measurement, &assessment, &actions),
    }

    Ok(())
}
