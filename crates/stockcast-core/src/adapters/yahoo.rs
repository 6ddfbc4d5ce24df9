use crate::data_source::{
    DataSource, HealthState, HealthStatus, HistoryRequest, ResolveRequest, SourceError,
};
use crate::{
    Bar, Listing, PriceSeries, ProviderId, StockSnapshot, TickerSymbol, UtcDateTime,
    ValidationError,
};

/// Most bars a single history response will carry.
const MAX_BARS: usize = 1_500;

/// Deterministic Yahoo-style adapter.
///
/// Synthesizes seeded OHLC history and snapshots so the pipeline runs
/// offline; the listing catalog stands in for the exchange's stock list used
/// by company-name resolution.
#[derive(Debug, Clone)]
pub struct YahooAdapter {
    health_state: HealthState,
    rate_available: bool,
    catalog: Vec<Listing>,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            health_state: HealthState::Healthy,
            rate_available: true,
            catalog: bse_catalog(),
        }
    }
}

impl YahooAdapter {
    pub fn with_health(health_state: HealthState, rate_available: bool) -> Self {
        Self {
            health_state,
            rate_available,
            ..Self::default()
        }
    }

    /// Companies known to the resolver.
    pub fn catalog(&self) -> &[Listing] {
        &self.catalog
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
        let step = req.interval.step();
        let step_minutes = step.whole_minutes().max(1);
        let span_minutes = (req.period.approx_days() as i64) * 24 * 60;
        let count = ((span_minutes / step_minutes) as usize).clamp(1, MAX_BARS);

        let now = UtcDateTime::now().into_inner();
        let seed = symbol_seed(&req.symbol);
        let mut bars = Vec::with_capacity(count);

        for index in 0..count {
            let offset = step * (count.saturating_sub(index + 1) as i32);
            let ts =
                UtcDateTime::from_offset_datetime(now - offset).map_err(validation_to_error)?;
            let mid = synthetic_price(seed, index);

            bars.push(
                Bar::new(ts, mid, mid + 1.20, mid - 0.80, mid + 0.30)
                    .map_err(validation_to_error)?,
            );
        }

        PriceSeries::new(req.symbol.clone(), req.interval, bars).map_err(validation_to_error)
    }

    fn snapshot(&self, symbol: &TickerSymbol) -> Result<StockSnapshot, SourceError> {
        let seed = symbol_seed(symbol);
        let price = 100.0 + (seed % 4_000) as f64 / 10.0;

        StockSnapshot::new(
            price + 4.5,
            price - 3.5,
            price * 1.4,
            price * 0.7,
            UtcDateTime::now(),
        )
        .map_err(validation_to_error)
    }

    fn resolve(&self, req: &ResolveRequest) -> Result<TickerSymbol, SourceError> {
        let wanted = req.company.trim();
        let listing = self
            .catalog
            .iter()
            .find(|listing| {
                listing.name.eq_ignore_ascii_case(wanted) || listing.code.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                SourceError::not_found(format!("no listing found for company '{wanted}'"))
            })?;

        TickerSymbol::resolve(&listing.code, req.exchange).map_err(validation_to_error)
    }

    fn health(&self) -> HealthStatus {
        HealthStatus::new(self.health_state, self.rate_available)
    }
}

/// Seeded mid price: a drifting pair of sinusoids plus hashed noise, so
/// synthesized series are reproducible per symbol yet rich enough for the
/// autoregression to fit.
fn synthetic_price(seed: u64, index: usize) -> f64 {
    let base = 120.0 + (seed % 3_000) as f64 / 10.0;
    let phase = (seed % 628) as f64 / 100.0;
    let t = index as f64;

    let swing = 12.0 * (t * 0.31 + phase).sin() + 5.0 * (t * 0.047 + phase).cos();
    let hashed = seed
        .wrapping_add(index as u64)
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    let noise = ((hashed >> 33) % 500) as f64 / 100.0 - 2.5;

    base + swing + noise
}

fn symbol_seed(symbol: &TickerSymbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn bse_catalog() -> Vec<Listing> {
    [
        ("RELIANCE", "Reliance Industries Limited"),
        ("TCS", "Tata Consultancy Services Limited"),
        ("INFY", "Infosys Limited"),
        ("HDFCBANK", "HDFC Bank Limited"),
        ("SBIN", "State Bank of India"),
        ("ITC", "ITC Limited"),
        ("TATAMOTORS", "Tata Motors Limited"),
        ("WIPRO", "Wipro Limited"),
        ("BAJFINANCE", "Bajaj Finance Limited"),
        ("ASIANPAINT", "Asian Paints Limited"),
    ]
    .into_iter()
    .map(|(code, name)| Listing::new(code, name))
    .collect()
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}
