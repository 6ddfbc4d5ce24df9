//! Canonical domain types for the analysis pipeline.
//!
//! All models validate their invariants at construction time and carry full
//! serde support for machine-readable output.

mod interval;
mod models;
mod period;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{Bar, Listing, PriceSeries, StockSnapshot};
pub use period::Period;
pub use symbol::{Exchange, TickerSymbol};
pub use timestamp::UtcDateTime;
