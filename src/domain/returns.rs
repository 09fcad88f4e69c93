//! Return series derivation and date alignment.
//!
//! Returns are tagged with an explicit unit so that percentage-scaled and
//! fraction-scaled series can never be mixed silently in one computation.
//! A return that is mathematically undefined (zero or non-finite prior
//! close) is carried as `None`, never coerced to 0.0.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

use crate::domain::error::TickerlensError;
use crate::domain::price::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnUnit {
    /// Raw fractional change, e.g. 0.0153. The risk model's unit.
    Fraction,
    /// Fractional change x100 rounded to 2 decimals, for display tables.
    Percent,
}

impl fmt::Display for ReturnUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnUnit::Fraction => write!(f, "fraction"),
            ReturnUnit::Percent => write!(f, "percent"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Close-to-close returns for one instrument.
///
/// Length is always source length - 1: the first bar has no prior close and
/// its entry is dropped, not imputed.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    ticker: String,
    unit: ReturnUnit,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Derive returns from a price series. Needs at least 2 bars.
    pub fn from_prices(
        series: &PriceSeries,
        unit: ReturnUnit,
    ) -> Result<Self, TickerlensError> {
        if series.len() < 2 {
            return Err(TickerlensError::InsufficientHistory {
                ticker: series.ticker().to_string(),
                bars: series.len(),
                minimum: 2,
            });
        }

        let points = series
            .bars()
            .windows(2)
            .map(|w| {
                let prev = w[0].close;
                let value = if prev != 0.0 && prev.is_finite() && w[1].close.is_finite() {
                    let fraction = (w[1].close - prev) / prev;
                    match unit {
                        ReturnUnit::Fraction => Some(fraction),
                        ReturnUnit::Percent => Some((fraction * 100.0 * 100.0).round() / 100.0),
                    }
                } else {
                    None
                };
                ReturnPoint {
                    date: w[1].date,
                    value,
                }
            })
            .collect();

        Ok(Self {
            ticker: series.ticker().to_string(),
            unit,
            points,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn unit(&self) -> ReturnUnit {
        self.unit
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build a return series from precomputed points, e.g. a non-price data
    /// source. Dates must already be strictly increasing.
    pub fn from_points(ticker: &str, unit: ReturnUnit, points: Vec<ReturnPoint>) -> Self {
        Self {
            ticker: ticker.to_string(),
            unit,
            points,
        }
    }
}

/// Two return series restricted to the dates present in both.
///
/// Both sides share length and dates index-for-index; values keep the
/// `Option` sentinel for undefined returns.
#[derive(Debug, Clone)]
pub struct AlignedReturns {
    pub subject_ticker: String,
    pub benchmark_ticker: String,
    pub unit: ReturnUnit,
    pub dates: Vec<NaiveDate>,
    pub subject: Vec<Option<f64>>,
    pub benchmark: Vec<Option<f64>>,
}

impl AlignedReturns {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner-join two return series by date, preserving date order.
///
/// Dates present in only one input are discarded. The join is explicit;
/// nothing is ever matched by position.
pub fn align(a: &ReturnSeries, b: &ReturnSeries) -> Result<AlignedReturns, TickerlensError> {
    if a.unit() != b.unit() {
        return Err(TickerlensError::UnitMismatch {
            expected: a.unit(),
            found: b.unit(),
        });
    }

    let b_by_date: HashMap<NaiveDate, Option<f64>> =
        b.points().iter().map(|p| (p.date, p.value)).collect();

    let mut dates = Vec::new();
    let mut subject = Vec::new();
    let mut benchmark = Vec::new();

    for point in a.points() {
        if let Some(&bench_value) = b_by_date.get(&point.date) {
            dates.push(point.date);
            subject.push(point.value);
            benchmark.push(bench_value);
        }
    }

    if dates.is_empty() {
        return Err(TickerlensError::NoOverlap {
            subject: a.ticker().to_string(),
            benchmark: b.ticker().to_string(),
        });
    }

    Ok(AlignedReturns {
        subject_ticker: a.ticker().to_string(),
        benchmark_ticker: b.ticker().to_string(),
        unit: a.unit(),
        dates,
        subject,
        benchmark,
    })
}
