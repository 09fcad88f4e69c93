//! Report generation port trait.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::TickerlensError;

/// Port for writing an analysis report; keeps presentation swappable
/// (plain text today, templated HTML tomorrow) without touching the core.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), TickerlensError>;
}
