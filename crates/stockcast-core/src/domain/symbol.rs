use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 20;

/// Stock exchanges the resolver knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Bse,
    Nse,
}

impl Exchange {
    pub const ALL: [Self; 2] = [Self::Bse, Self::Nse];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bse => "bse",
            Self::Nse => "nse",
        }
    }

    /// Ticker suffix appended to a listing code for this exchange.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Bse => ".BO",
            Self::Nse => ".NS",
        }
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bse" => Ok(Self::Bse),
            "nse" => Ok(Self::Nse),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}

/// Normalized ticker identifier, exchange suffix included.
///
/// Immutable once constructed; invalid symbols are rejected here, before any
/// data acquisition is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Parse and normalize a full ticker (e.g. `RELIANCE.NS`) to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '&';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Build a full ticker from a bare listing code and its exchange.
    pub fn resolve(base: &str, exchange: Exchange) -> Result<Self, ValidationError> {
        let mut full = base.trim().to_ascii_uppercase();
        full.push_str(exchange.suffix());
        Self::parse(&full)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}
