//! Core contracts for stockcast.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The period/interval compatibility matrix
//! - Indian-convention currency formatting
//! - Daily normalization and the seasonal autoregressive forecaster
//! - Data source trait/adapter and the analysis pipeline
//! - Response envelope and structured errors

pub mod adapters;
pub mod compat;
pub mod currency;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod forecast;
pub mod normalize;
pub mod pipeline;
pub mod presentation;
pub mod source;

pub use adapters::YahooAdapter;
pub use data_source::{
    DataSource, HealthState, HealthStatus, HistoryRequest, ResolveRequest, SourceError,
    SourceErrorKind,
};
pub use domain::{
    Bar, Exchange, Interval, Listing, Period, PriceSeries, StockSnapshot, TickerSymbol,
    UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use forecast::{Forecast, ForecastError, ForecastPoint, HORIZON, LAG_ORDER};
pub use normalize::NormalizeError;
pub use pipeline::{
    Analysis, AnalysisError, ForecastOutcome, ForecastReport, HistoryFetch, PriceSummary,
};
pub use presentation::{ForecastOverlay, LinePoint, LineSeries};
pub use source::ProviderId;
