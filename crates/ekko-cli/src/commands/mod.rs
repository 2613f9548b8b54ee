pub mod classify;
pub mod knowledge;
pub mod report;
