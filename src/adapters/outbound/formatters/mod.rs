/// Markdown report formatters
pub mod execution_report;
pub mod version_report;

pub use execution_report::ExecutionReportFormatter;
pub use version_report::VersionReportFormatter;
