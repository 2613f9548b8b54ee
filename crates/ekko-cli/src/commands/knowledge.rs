use ekko_core::error::EkkoError;
use ekko_core::knowledge::schema::RangeRule;
use ekko_core::knowledge::{builtin, load_knowledge, KnowledgeBase};
use ekko_core::model::Parameter;
use std::path::Path;

pub fn list() -> Result<(), EkkoError> {
    let kb = builtin::load()?;

    println!("{} (v{})\n", kb.name(), kb.version());
    if let Some(ref desc) = kb.definition().description {
        println!("{}\n", desc);
    }

    for p in Parameter::ALL {
        let spec = p.spec();
        let covered = if kb.contains(p.key()) { "" } else { "  (no tables)" };
        println!(
            "  {:<8} {:<16} ideal {}-{} {}{}",
            p.key(),
            spec.title,
            spec.ideal_min,
            spec.ideal_max,
            spec.unit,
            covered
        );
    }
    println!();
    Ok(())
}

pub fn explain(parameter: &str) -> Result<(), EkkoError> {
    let p = Parameter::from_key_loose(parameter).ok_or_else(|| {
        EkkoError::KnowledgeInvalid(format!(
            "unknown parameter '{}'. Known keys: ph, umidade, temp, n, p, k",
            parameter
        ))
    })?;
    let kb = builtin::load()?;
    let tables = kb.tables(p.key()).ok_or_else(|| {
        EkkoError::KnowledgeInvalid(format!("no tables for parameter '{}'", p.key()))
    })?;
    let spec = p.spec();

    println!("{} [{}]\n", spec.title, p.key());
    println!("  Ideal range: {}-{} {}", spec.ideal_min, spec.ideal_max, spec.unit);
    println!("  Opening: {}\n", tables.opening);

    print_texts("Qualifier", &tables.qualifier);
    if !tables.explanation.is_empty() {
        print_texts("Explanation", &tables.explanation);
    }
    print_texts("Recommendation", &tables.recommendation);
    print_texts("Correction", &tables.correction);

    println!("Products:");
    for rule in &tables.products {
        println!("  {}", rule.describe());
        for product in &rule.value {
            println!("    - {}", product);
        }
    }
    println!();

    Ok(())
}

fn print_texts(title: &str, rules: &[RangeRule<String>]) {
    println!("{}:", title);
    let width = rules.iter().map(|r| r.describe().len()).max().unwrap_or(9);
    for rule in rules {
        println!("  {:<width$}  {}", rule.describe(), rule.value, width = width);
    }
    println!();
}

pub fn validate(file: &Path) -> Result<(), EkkoError> {
    let kb: KnowledgeBase = load_knowledge(file)?;
    let def = kb.definition();

    println!("Knowledge base '{}' (v{}) is valid.", kb.name(), kb.version());
    println!("  Parameters: {}", def.parameters.len());

    // Keys the report will fall back to neutral texts for.
    let missing: Vec<&str> = Parameter::ALL
        .iter()
        .map(|p| p.key())
        .filter(|key| !kb.contains(key))
        .collect();
    let unknown: Vec<&str> = def
        .parameters
        .iter()
        .map(|t| t.key.as_str())
        .filter(|key| Parameter::ALL.iter().all(|p| p.key() != *key))
        .collect();

    if !missing.is_empty() || !unknown.is_empty() {
        println!("\nWarnings:");
        for key in &missing {
            println!("  - no tables for '{}': report shows N/A", key);
        }
        for key in &unknown {
            println!("  - tables for '{}' are not used by the report", key);
        }
    }

    Ok(())
}
