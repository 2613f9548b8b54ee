pub mod catalog;
pub mod cover;
pub mod detail;
pub mod summary;

pub use catalog::{CatalogRow, CatalogSection};
pub use cover::CoverSection;
pub use detail::DetailSection;
pub use summary::{SummaryRow, SummarySection};
