use serde::{Deserialize, Serialize};

use crate::{Interval, TickerSymbol, UtcDateTime, ValidationError};

/// OHLC bar record for a given interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
        })
    }
}

/// Ordered price history for one ticker at one granularity.
///
/// Timestamps are strictly increasing with no duplicates. Created by
/// acquisition, re-shaped once by the normalizer, read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: TickerSymbol,
    pub interval: Interval,
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(
        symbol: TickerSymbol,
        interval: Interval,
        bars: Vec<Bar>,
    ) -> Result<Self, ValidationError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].ts <= pair[0].ts {
                return Err(ValidationError::NonMonotonicSeries { index: index + 1 });
            }
        }

        Ok(Self {
            symbol,
            interval,
            bars,
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Closing-price column in timestamp order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

/// Scalar price statistics shown alongside the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub day_high: f64,
    pub day_low: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub as_of: UtcDateTime,
}

impl StockSnapshot {
    pub fn new(
        day_high: f64,
        day_low: f64,
        fifty_two_week_high: f64,
        fifty_two_week_low: f64,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("day_high", day_high)?;
        validate_non_negative("day_low", day_low)?;
        validate_non_negative("fifty_two_week_high", fifty_two_week_high)?;
        validate_non_negative("fifty_two_week_low", fifty_two_week_low)?;

        Ok(Self {
            day_high,
            day_low,
            fifty_two_week_high,
            fifty_two_week_low,
            as_of,
        })
    }
}

/// Catalog entry mapping a company name to its bare listing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub code: String,
    pub name: String,
}

impl Listing {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Exchange;

    fn ts(input: &str) -> UtcDateTime {
        UtcDateTime::parse(input).expect("timestamp")
    }

    fn symbol() -> TickerSymbol {
        TickerSymbol::resolve("TCS", Exchange::Nse).expect("symbol")
    }

    #[test]
    fn rejects_invalid_bar_bounds() {
        let err = Bar::new(ts("2024-01-01T00:00:00Z"), 10.0, 12.0, 9.0, 12.5)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_inverted_bar_range() {
        let err =
            Bar::new(ts("2024-01-01T00:00:00Z"), 10.0, 9.0, 12.0, 10.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let bar = Bar::new(ts("2024-01-01T00:00:00Z"), 10.0, 11.0, 9.0, 10.5).expect("bar");
        let err = PriceSeries::new(symbol(), Interval::OneDay, vec![bar, bar])
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonMonotonicSeries { index: 1 }));
    }

    #[test]
    fn accepts_increasing_timestamps() {
        let first = Bar::new(ts("2024-01-01T00:00:00Z"), 10.0, 11.0, 9.0, 10.5).expect("bar");
        let second = Bar::new(ts("2024-01-02T00:00:00Z"), 10.5, 11.5, 10.0, 11.0).expect("bar");
        let series = PriceSeries::new(symbol(), Interval::OneDay, vec![first, second])
            .expect("series should validate");
        assert_eq!(series.closes(), vec![10.5, 11.0]);
    }
}
