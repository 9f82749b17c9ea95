//! Report rendering port trait.

use std::path::Path;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::AlphalabError;

/// Port for writing a completed analysis report.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &Path) -> Result<(), AlphalabError>;

    /// Render the report to a string without touching the filesystem.
    fn render(&self, report: &AnalysisReport) -> Result<String, AlphalabError>;
}
