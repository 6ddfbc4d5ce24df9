//! Explicit analysis flow: acquisition with a documented fallback, then
//! normalization, forecasting, and display formatting.
//!
//! Every stage takes and returns plain values; nothing here keeps
//! cross-request state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_source::{DataSource, HistoryRequest, SourceError, SourceErrorKind};
use crate::presentation::{self, ForecastOverlay, LineSeries};
use crate::{
    currency, forecast, normalize, Forecast, Interval, Period, PriceSeries, StockSnapshot,
    TickerSymbol, ValidationError,
};

/// Fallback (period, interval) used for the single retry after a collaborator
/// failure.
pub const FALLBACK_PERIOD: Period = Period::OneMonth;
pub const FALLBACK_INTERVAL: Interval = Interval::OneDay;

/// History request backing the forecast path.
pub const FORECAST_PERIOD: Period = Period::OneYear;
pub const FORECAST_INTERVAL: Interval = Interval::OneDay;

/// Pipeline-level failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Collaborator rejected the request outright; retrying cannot help.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Primary fetch and the fallback retry both failed.
    #[error("data unavailable for '{symbol}' after {attempts} attempts: {reason}")]
    DataUnavailable {
        symbol: TickerSymbol,
        attempts: usize,
        reason: String,
    },
}

/// History fetch result, recording whether the fallback pair was used.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFetch {
    pub series: PriceSeries,
    pub period: Period,
    pub interval: Interval,
    pub used_fallback: bool,
}

/// Fetch history with the documented fallback policy: attempt the primary
/// (period, interval); on a collaborator failure (transport or not-found)
/// retry exactly once with [`FALLBACK_PERIOD`]/[`FALLBACK_INTERVAL`]; a
/// second failure surfaces [`AnalysisError::DataUnavailable`]. Invalid
/// requests never trigger the fallback.
pub fn fetch_history(
    source: &dyn DataSource,
    symbol: &TickerSymbol,
    period: Period,
    interval: Interval,
) -> Result<HistoryFetch, AnalysisError> {
    let request = HistoryRequest::new(symbol.clone(), period, interval)?;

    let primary_failure = match source.history(&request) {
        Ok(series) => {
            return Ok(HistoryFetch {
                series,
                period,
                interval,
                used_fallback: false,
            });
        }
        Err(error) => error,
    };

    if !is_collaborator_failure(&primary_failure) {
        return Err(AnalysisError::Source(primary_failure));
    }

    let fallback = HistoryRequest::new(symbol.clone(), FALLBACK_PERIOD, FALLBACK_INTERVAL)?;
    match source.history(&fallback) {
        Ok(series) => Ok(HistoryFetch {
            series,
            period: FALLBACK_PERIOD,
            interval: FALLBACK_INTERVAL,
            used_fallback: true,
        }),
        Err(error) => Err(AnalysisError::DataUnavailable {
            symbol: symbol.clone(),
            attempts: 2,
            reason: error.to_string(),
        }),
    }
}

fn is_collaborator_failure(error: &SourceError) -> bool {
    matches!(
        error.kind(),
        SourceErrorKind::Transport | SourceErrorKind::NotFound
    )
}

/// Historical view of one (symbol, period, interval) selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub symbol: TickerSymbol,
    pub period: Period,
    pub interval: Interval,
    pub used_fallback: bool,
    pub series: PriceSeries,
}

impl Analysis {
    /// Full close-price line for charting.
    pub fn close_line(&self) -> LineSeries {
        presentation::close_line(&self.series)
    }
}

/// Validate, fetch (with fallback), and package the historical series.
pub fn run(
    source: &dyn DataSource,
    symbol: &TickerSymbol,
    period: Period,
    interval: Interval,
) -> Result<Analysis, AnalysisError> {
    let fetched = fetch_history(source, symbol, period, interval)?;

    Ok(Analysis {
        symbol: symbol.clone(),
        period: fetched.period,
        interval: fetched.interval,
        used_fallback: fetched.used_fallback,
        series: fetched.series,
    })
}

/// Forecast outcome: either the projection with its overlay views, or an
/// explicit unavailable state. Forecast failures are expected for
/// thinly-traded instruments and must never crash the surrounding flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Ready {
        history: PriceSeries,
        forecast: Forecast,
        overlay: ForecastOverlay,
    },
    Unavailable {
        reason: String,
    },
}

/// Forecast run over freshly acquired daily history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub symbol: TickerSymbol,
    pub used_fallback: bool,
    pub outcome: ForecastOutcome,
}

impl ForecastReport {
    pub fn is_available(&self) -> bool {
        matches!(self.outcome, ForecastOutcome::Ready { .. })
    }
}

/// Fetch a year of daily bars (with fallback), normalize to strict daily
/// cadence, fit, and project. Normalizer and forecaster failures map to
/// [`ForecastOutcome::Unavailable`].
pub fn run_forecast(
    source: &dyn DataSource,
    symbol: &TickerSymbol,
) -> Result<ForecastReport, AnalysisError> {
    let fetched = fetch_history(source, symbol, FORECAST_PERIOD, FORECAST_INTERVAL)?;

    let daily = match normalize::to_daily(&fetched.series) {
        Ok(daily) => daily,
        Err(error) => {
            return Ok(ForecastReport {
                symbol: symbol.clone(),
                used_fallback: fetched.used_fallback,
                outcome: ForecastOutcome::Unavailable {
                    reason: error.to_string(),
                },
            });
        }
    };

    let outcome = match forecast::predict(&daily) {
        Ok(forecast) => {
            let overlay = presentation::forecast_overlay(&daily, &forecast);
            ForecastOutcome::Ready {
                history: daily,
                forecast,
                overlay,
            }
        }
        Err(error) => ForecastOutcome::Unavailable {
            reason: error.to_string(),
        },
    };

    Ok(ForecastReport {
        symbol: symbol.clone(),
        used_fallback: fetched.used_fallback,
        outcome,
    })
}

/// Display-ready price statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub symbol: TickerSymbol,
    pub snapshot: StockSnapshot,
    pub day_high: String,
    pub day_low: String,
    pub fifty_two_week_high: String,
    pub fifty_two_week_low: String,
}

/// Fetch the snapshot and pass every statistic through the currency
/// formatter.
pub fn summary(
    source: &dyn DataSource,
    symbol: &TickerSymbol,
) -> Result<PriceSummary, AnalysisError> {
    let snapshot = source.snapshot(symbol)?;

    Ok(PriceSummary {
        symbol: symbol.clone(),
        snapshot,
        day_high: currency::format_amount(snapshot.day_high)?,
        day_low: currency::format_amount(snapshot.day_low)?,
        fifty_two_week_high: currency::format_amount(snapshot.fifty_two_week_high)?,
        fifty_two_week_low: currency::format_amount(snapshot.fifty_two_week_low)?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::YahooAdapter;
    use crate::data_source::{HealthStatus, ResolveRequest};
    use crate::{Exchange, ProviderId};

    /// Scripted source: plays back one response per call, in order.
    struct ScriptedSource {
        responses: Mutex<Vec<Result<PriceSeries, SourceError>>>,
        requests: Mutex<Vec<(Period, Interval)>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<PriceSeries, SourceError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(Period, Interval)> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl DataSource for ScriptedSource {
        fn id(&self) -> ProviderId {
            ProviderId::Yahoo
        }

        fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
            self.requests
                .lock()
                .expect("lock")
                .push((req.period, req.interval));
            let mut responses = self.responses.lock().expect("lock");
            if responses.is_empty() {
                return Err(SourceError::internal("script exhausted"));
            }
            responses.remove(0)
        }

        fn snapshot(&self, _symbol: &TickerSymbol) -> Result<StockSnapshot, SourceError> {
            Err(SourceError::internal("not scripted"))
        }

        fn resolve(&self, _req: &ResolveRequest) -> Result<TickerSymbol, SourceError> {
            Err(SourceError::internal("not scripted"))
        }

        fn health(&self) -> HealthStatus {
            HealthStatus::healthy()
        }
    }

    fn symbol() -> TickerSymbol {
        TickerSymbol::resolve("RELIANCE", Exchange::Nse).expect("symbol")
    }

    fn tiny_series() -> PriceSeries {
        let adapter = YahooAdapter::default();
        let req = HistoryRequest::new(symbol(), Period::OneMonth, Interval::OneDay)
            .expect("request");
        adapter.history(&req).expect("series")
    }

    #[test]
    fn transport_failure_retries_once_with_fallback() {
        let source = ScriptedSource::new(vec![
            Err(SourceError::transport("connection reset")),
            Ok(tiny_series()),
        ]);

        let fetched = fetch_history(&source, &symbol(), Period::OneYear, Interval::OneDay)
            .expect("fallback must succeed");

        assert!(fetched.used_fallback);
        assert_eq!(fetched.period, FALLBACK_PERIOD);
        assert_eq!(fetched.interval, FALLBACK_INTERVAL);
        assert_eq!(
            source.seen(),
            vec![
                (Period::OneYear, Interval::OneDay),
                (Period::OneMonth, Interval::OneDay),
            ]
        );
    }

    #[test]
    fn second_failure_surfaces_data_unavailable() {
        let source = ScriptedSource::new(vec![
            Err(SourceError::transport("timeout")),
            Err(SourceError::transport("timeout")),
        ]);

        let err = fetch_history(&source, &symbol(), Period::OneYear, Interval::OneDay)
            .expect_err("must fail");
        assert!(matches!(
            err,
            AnalysisError::DataUnavailable { attempts: 2, .. }
        ));
        assert_eq!(source.seen().len(), 2);
    }

    #[test]
    fn invalid_request_never_retries() {
        let source = ScriptedSource::new(vec![Err(SourceError::invalid_request("bad symbol"))]);

        let err = fetch_history(&source, &symbol(), Period::OneYear, Interval::OneDay)
            .expect_err("must fail");
        assert!(matches!(err, AnalysisError::Source(_)));
        assert_eq!(source.seen().len(), 1);
    }

    #[test]
    fn incompatible_pair_fails_before_any_fetch() {
        let source = ScriptedSource::new(Vec::new());

        let err = fetch_history(&source, &symbol(), Period::FiveDays, Interval::OneDay)
            .expect_err("must fail");
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::IncompatibleInterval { .. })
        ));
        assert!(source.seen().is_empty());
    }

    #[test]
    fn forecast_over_short_fallback_history_is_unavailable() {
        // Primary fails, fallback hands back a month of bars: too short for
        // the lag order, so the report must carry an explicit reason.
        let source = ScriptedSource::new(vec![
            Err(SourceError::transport("flaky upstream")),
            Ok(tiny_series()),
        ]);

        let report = run_forecast(&source, &symbol()).expect("pipeline must not fail");
        assert!(report.used_fallback);
        assert!(!report.is_available());
        match report.outcome {
            ForecastOutcome::Unavailable { reason } => {
                assert!(reason.contains("101"), "unexpected reason: {reason}");
            }
            ForecastOutcome::Ready { .. } => panic!("forecast must be unavailable"),
        }
    }

    #[test]
    fn end_to_end_forecast_with_deterministic_adapter() {
        let adapter = YahooAdapter::default();

        let report = run_forecast(&adapter, &symbol()).expect("pipeline must not fail");
        assert!(!report.used_fallback);
        match report.outcome {
            ForecastOutcome::Ready {
                history,
                forecast,
                overlay,
            } => {
                assert_eq!(forecast.points.len(), forecast::HORIZON + 1);
                assert_eq!(
                    forecast.points[0].ts,
                    history.last().expect("non-empty").ts
                );
                assert_eq!(
                    overlay.historical.points.len(),
                    history.len() - forecast.split_index
                );
            }
            ForecastOutcome::Unavailable { reason } => {
                panic!("forecast must be available: {reason}")
            }
        }
    }

    #[test]
    fn summary_formats_every_statistic() {
        let adapter = YahooAdapter::default();
        let summary = summary(&adapter, &symbol()).expect("must summarize");

        for text in [
            &summary.day_high,
            &summary.day_low,
            &summary.fifty_two_week_high,
            &summary.fifty_two_week_low,
        ] {
            assert!(text.starts_with('₹'), "missing glyph: {text}");
        }
    }
}
