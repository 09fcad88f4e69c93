//! Domain error types.

use chrono::NaiveDate;

use crate::domain::returns::ReturnUnit;

/// Top-level error type for tickerlens.
///
/// Every analytic failure is recoverable and reported through this enum;
/// computations never panic and never substitute a default number for a
/// mathematically undefined result.
#[derive(Debug, thiserror::Error)]
pub enum TickerlensError {
    #[error("insufficient history for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("no overlapping history between {subject} and {benchmark}")]
    NoOverlap { subject: String, benchmark: String },

    #[error("degenerate variance for {ticker}: divisor series is flat")]
    DegenerateVariance { ticker: String },

    #[error("undefined return for {ticker} on {date}")]
    UndefinedReturn { ticker: String, date: NaiveDate },

    #[error("return unit mismatch: expected {expected}, found {found}")]
    UnitMismatch {
        expected: ReturnUnit,
        found: ReturnUnit,
    },

    #[error("price series for {ticker} is not strictly date-ordered at {date}")]
    UnorderedSeries { ticker: String, date: NaiveDate },

    #[error("no data found for ticker {ticker}")]
    EmptySeries { ticker: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickerlensError> for std::process::ExitCode {
    fn from(err: &TickerlensError) -> Self {
        let code: u8 = match err {
            TickerlensError::Io(_) => 1,
            TickerlensError::ConfigParse { .. }
            | TickerlensError::ConfigMissing { .. }
            | TickerlensError::ConfigInvalid { .. } => 2,
            TickerlensError::Data { .. } | TickerlensError::EmptySeries { .. } => 3,
            TickerlensError::InsufficientHistory { .. }
            | TickerlensError::NoOverlap { .. }
            | TickerlensError::DegenerateVariance { .. }
            | TickerlensError::UndefinedReturn { .. }
            | TickerlensError::UnitMismatch { .. }
            | TickerlensError::UnorderedSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
