//! JSON report adapter.

use std::fs;
use std::path::Path;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::AlphalabError;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &Path) -> Result<(), AlphalabError> {
        let rendered = self.render(report)?;
        fs::write(output_path, rendered)?;
        Ok(())
    }

    fn render(&self, report: &AnalysisReport) -> Result<String, AlphalabError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        result.map_err(|e| AlphalabError::Data {
            reason: format!("report serialization failed: {e}"),
        })
    }
}
