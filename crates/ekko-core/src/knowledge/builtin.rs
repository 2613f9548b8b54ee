use crate::error::EkkoError;
use crate::knowledge::schema::KnowledgeBaseDef;
use crate::knowledge::KnowledgeBase;

const DIAGNOSTICS_JSON: &str = include_str!("../../../../knowledge/diagnostics.json");

/// Load the knowledge base bundled with the crate.
pub fn load() -> Result<KnowledgeBase, EkkoError> {
    let def: KnowledgeBaseDef = serde_json::from_str(DIAGNOSTICS_JSON)?;
    KnowledgeBase::from_def(def)
}
