//! Reporting and export of suite runs

mod export;
mod report;

pub use export::export_summary;
pub use report::ReportGenerator;
