use ekko_core::classify::Assessment;
use ekko_core::error::EkkoError;
use ekko_core::plan::ActionItem;
use ekko_core::report::ReportDocument;
use serde_json::json;

pub fn print_classification(
    assessment: &Assessment,
    actions: &[ActionItem],
) -> Result<(), EkkoError> {
    let results: Vec<_> = assessment.values().collect();
    let json = serde_json::to_string_pretty(&json!({
        "results": results,
        "actions": actions,
    }))?;
    println!("{json}");
    Ok(())
}

pub fn print_document(document: &ReportDocument) -> Result<(), EkkoError> {
    let json = serde_json::to_string_pretty(document)?;
    println!("{json}");
    Ok(())
}
