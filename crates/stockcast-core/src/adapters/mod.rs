//! Acquisition adapters.

mod yahoo;

pub use yahoo::YahooAdapter;
