//! Plain-text report adapter.

use std::fs;
use std::fmt::Write as _;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::TickerlensError;
use crate::domain::risk::{MetricResult, MetricTag};
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn render(report: &AnalysisReport) -> String {
        let mut out = String::new();

        match &report.company_name {
            Some(name) => {
                let _ = writeln!(out, "{} ({})", name, report.ticker);
            }
            None => {
                let _ = writeln!(out, "{}", report.ticker);
            }
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Risk metrics vs {}:", report.benchmark_ticker);
        for result in report.subject_metrics.values() {
            let _ = writeln!(out, "{}", format_metric(result));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Benchmark baseline ({} vs itself):", report.benchmark_ticker);
        for result in report.benchmark_metrics.values() {
            let _ = writeln!(out, "{}", format_metric(result));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Last {} trading days:", report.last_days.len());
        let _ = writeln!(
            out,
            "  {:<12} {:>10} {:>10} {:>10} {:>10} {:>12} {:>9}",
            "date", "open", "high", "low", "close", "volume", "return%"
        );
        for row in &report.last_days {
            let return_pct = match row.return_pct {
                Some(v) => format!("{:.2}", v),
                None => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>9}",
                row.bar.date.format("%Y-%m-%d"),
                row.bar.open,
                row.bar.high,
                row.bar.low,
                row.bar.close,
                row.bar.volume,
                return_pct
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", report.comparison);

        out
    }
}

fn format_metric(result: &MetricResult) -> String {
    let tag = match result.tag {
        MetricTag::Favorable => "+",
        MetricTag::Unfavorable => "-",
    };
    format!(
        "  [{}] {:<20} {:>10.4}  {}",
        tag, result.metric.to_string(), result.value, result.interpretation
    )
}

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), TickerlensError> {
        fs::write(output_path, Self::render(report))?;
        Ok(())
    }
}
