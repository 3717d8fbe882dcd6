//! Report formatting and export

pub mod report;
pub mod formatter;
pub mod pdf;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, RenderedReport, ReportGenerator};
pub use report::{CareerReport, Verdict};
