//! Report document model and assembly.
//!
//! A [`ReportDocument`] is a fully resolved, renderer-independent description
//! of the report: every text is final, every chart is rendered. Drawing it
//! onto pages is the job of [`crate::render`].

pub mod assembler;
pub mod layout;
pub mod sections;

use chrono::NaiveDate;
use serde::Serialize;
use sections::{CatalogSection, CoverSection, DetailSection, SummarySection};

pub use assembler::{assemble, ReportOptions};

/// One logical section. Each section starts on a new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Cover(CoverSection),
    Summary(SummarySection),
    ParameterDetail(Box<DetailSection>),
    ProductCatalog(CatalogSection),
}

impl Section {
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Cover(_) => "cover",
            Section::Summary(_) => "summary",
            Section::ParameterDetail(_) => "parameter_detail",
            Section::ProductCatalog(_) => "product_catalog",
        }
    }
}

/// Overlay drawn on every page once all sections are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterSpec {
    pub brand: String,
    pub institution: String,
}

impl FooterSpec {
    /// `Pagina <page> de <total>`, 1-based.
    pub fn page_label(&self, page: usize, total: usize) -> String {
        format!("Pagina {} de {}", page, total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub generated_on: NaiveDate,
    pub file_name: String,
    pub sections: Vec<Section>,
    pub footer: FooterSpec,
}

impl ReportDocument {
    pub fn details(&self) -> impl Iterator<Item = &DetailSection> {
        self.sections.iter().filter_map(|s| match s {
            Section::ParameterDetail(d) => Some(d.as_ref()),
            _ => None,
        })
    }

    pub fn summary(&self) -> Option<&SummarySection> {
        self.sections.iter().find_map(|s| match s {
            Section::Summary(s) => Some(s),
            _ => None,
        })
    }

    pub fn catalog(&self) -> Option<&CatalogSection> {
        self.sections.iter().find_map(|s| match s {
            Section::ProductCatalog(c) => Some(c),
            _ => None,
        })
    }
}

/// Export file name for a report generated on `date`: `EKKO_<YYYY-MM-DD>.pdf`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("EKKO_{}.pdf", date.format("%Y-%m-%d"))
}
