use ekko_core::classify::Assessment;
use ekko_core::model::{format_with_unit, SoilMeasurement};
use ekko_core::plan::ActionItem;
use ekko_core::report::sections::DetailSection;
use ekko_core::report::{ReportDocument, Section};

pub fn print_classification(
    measurement: &SoilMeasurement,
    assessment: &Assessment,
    actions: &[ActionItem],
) {
    println!(
        "  {:<12}  {:>10}  {:<10}  {}",
        "Parametro", "Valor", "Status", "Prioridade"
    );
    println!("  {}", "-".repeat(48));
    for (parameter, result) in assessment {
        let spec = parameter.spec();
        let value = format_with_unit(
            measurement.value_or_zero(*parameter),
            spec.summary_decimals,
            spec.unit,
        );
        println!(
            "  {:<12}  {:>10}  {:<10}  {}",
            spec.name,
            value,
            result.status.label_for(*parameter),
            result.priority.label()
        );
    }
    println!();

    println!("Acoes prioritarias:");
    for action in actions {
        println!("  {}. {}", action.rank, action.description);
    }
    println!();
}

pub fn print_document(document: &ReportDocument) {
    println!(
        "=== {} ({} sections) ===\n",
        document.file_name,
        document.sections.len()
    );

    for (i, section) in document.sections.iter().enumerate() {
        let page = i + 1;
        match section {
            Section::Cover(cover) => {
                println!("[{page}] {}", cover.title);
                for line in &cover.producer_lines {
                    println!("    {line}");
                }
            }
            Section::Summary(summary) => {
                println!("[{page}] {}", summary.title);
                for row in &summary.rows {
                    println!("    {}", row.cells().join(" | "));
                }
                println!("    {}", summary.actions_heading);
                for line in summary.action_lines() {
                    println!("      {line}");
                }
            }
            Section::ParameterDetail(detail) => print_detail(page, detail),
            Section::ProductCatalog(catalog) => {
                println!("[{page}] {}", catalog.title);
                for row in &catalog.rows {
                    println!("    {}", row.cells().join(" | "));
                }
            }
        }
        println!();
    }

    println!(
        "Footer: {} | {} | {}",
        document.footer.brand,
        document.footer.page_label(1, document.sections.len()),
        document.footer.institution
    );
}

fn print_detail(page: usize, detail: &DetailSection) {
    println!(
        "[{page}] {} = {} ({}, {})",
        detail.title, detail.value_label, detail.classification.status, detail.classification.priority
    );
    for card in [&detail.analysis, &detail.recommendation, &detail.correction] {
        println!("    {}:", card.heading);
        for line in &card.lines {
            println!("      {line}");
        }
        if card.is_truncated() {
            println!("      ...");
        }
    }
    println!("    {}:", detail.products_heading);
    for line in detail.product_lines() {
        println!("      {line}");
    }
}
