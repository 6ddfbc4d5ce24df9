use thiserror::Error;

use crate::{Interval, Period};

/// Validation and contract errors exposed by `stockcast-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid period '{value}', expected one of 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y")]
    InvalidPeriod { value: String },
    #[error("invalid interval '{value}', expected one of 5m, 15m, 30m, 1h, 1d, 1wk, 1mo, 3mo")]
    InvalidInterval { value: String },
    #[error("invalid exchange '{value}', expected one of bse, nse")]
    InvalidExchange { value: String },
    #[error("interval '{interval}' is not valid for period '{period}'")]
    IncompatibleInterval { period: Period, interval: Interval },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("series timestamps must be strictly increasing (violation at index {index})")]
    NonMonotonicSeries { index: usize },

    #[error("amount must be finite")]
    NonFiniteAmount,
    #[error("amount must be non-negative")]
    NegativeAmount,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source_chain must contain at least one source")]
    EmptySourceChain,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
