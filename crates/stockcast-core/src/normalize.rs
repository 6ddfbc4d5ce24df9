//! Daily re-indexing with forward fill.
//!
//! The forecasting engine assumes a fixed daily cadence; irregular
//! trading-day gaps (weekends, holidays) would break its seasonal-lag
//! structure. Normalization re-indexes the observed range to one bar per
//! calendar day and carries the most recent bar forward across gaps.

use thiserror::Error;

use crate::{Bar, Interval, PriceSeries, ValidationError};

/// Failures while conditioning a series to daily cadence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("cannot normalize an empty series")]
    InsufficientData,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Re-index `series` to a strict daily cadence over its observed range.
///
/// Multiple observations on one calendar day collapse to the last one. Days
/// with no observation repeat the most recent prior bar, so the first element
/// is always observed. The result carries `Interval::OneDay`.
pub fn to_daily(series: &PriceSeries) -> Result<PriceSeries, NormalizeError> {
    let first = series.first().ok_or(NormalizeError::InsufficientData)?;
    let last = series.last().ok_or(NormalizeError::InsufficientData)?;

    let span_days = first.ts.calendar_days_until(last.ts);
    let mut daily = Vec::with_capacity(span_days as usize + 1);

    let mut observed = series.bars.iter().peekable();
    let mut carried = *first;

    for day in 0..=span_days {
        let cursor = first.ts.add_days(day);

        // Consume every observation falling on this calendar day; the last
        // one wins, matching a daily downsample of intraday rows.
        while let Some(bar) = observed.peek() {
            if bar.ts.same_day(cursor) {
                carried = **bar;
                observed.next();
            } else {
                break;
            }
        }

        daily.push(Bar {
            ts: cursor,
            ..carried
        });
    }

    PriceSeries::new(series.symbol.clone(), Interval::OneDay, daily).map_err(NormalizeError::from)
}
