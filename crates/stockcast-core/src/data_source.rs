use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{compat, Exchange, Interval, Period, PriceSeries, ProviderId, StockSnapshot,
            TickerSymbol, ValidationError};

/// Health state reported by an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Runtime source health snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub state: HealthState,
    pub rate_available: bool,
}

impl HealthStatus {
    pub const fn new(state: HealthState, rate_available: bool) -> Self {
        Self {
            state,
            rate_available,
        }
    }

    pub const fn healthy() -> Self {
        Self::new(HealthState::Healthy, true)
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Transport,
    NotFound,
    InvalidRequest,
    Internal,
}

/// Structured source error consumed by the fallback policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Validated request for historical bars.
///
/// Construction enforces the compatibility matrix, so an incompatible
/// (period, interval) pair never reaches an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: TickerSymbol,
    pub period: Period,
    pub interval: Interval,
}

impl HistoryRequest {
    pub fn new(
        symbol: TickerSymbol,
        period: Period,
        interval: Interval,
    ) -> Result<Self, ValidationError> {
        if !compat::is_compatible(period, interval) {
            return Err(ValidationError::IncompatibleInterval { period, interval });
        }

        Ok(Self {
            symbol,
            period,
            interval,
        })
    }
}

/// Request to resolve a company name on an exchange to a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub company: String,
    pub exchange: Exchange,
}

impl ResolveRequest {
    pub fn new(company: impl Into<String>, exchange: Exchange) -> Result<Self, SourceError> {
        let company = company.into();
        if company.trim().is_empty() {
            return Err(SourceError::invalid_request(
                "resolve request requires a company name",
            ));
        }
        Ok(Self { company, exchange })
    }
}

/// Acquisition collaborator contract.
pub trait DataSource: Send + Sync {
    fn id(&self) -> ProviderId;
    fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError>;
    fn snapshot(&self, symbol: &TickerSymbol) -> Result<StockSnapshot, SourceError>;
    fn resolve(&self, req: &ResolveRequest) -> Result<TickerSymbol, SourceError>;
    fn health(&self) -> HealthStatus;
}
