use std::str::FromStr;

use serde_json::{json, Value};
use stockcast_core::pipeline::{self, AnalysisError};
use stockcast_core::{DataSource, EnvelopeError, Interval, Period, TickerSymbol};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &HistoryArgs, source: &dyn DataSource) -> Result<CommandResult, CliError> {
    let symbol = TickerSymbol::parse(&args.symbol)?;
    let period = Period::from_str(&args.period)?;
    let interval = Interval::from_str(&args.interval)?;

    let source_chain = vec![source.id()];

    match pipeline::run(source, &symbol, period, interval) {
        Ok(analysis) => {
            let used_fallback = analysis.used_fallback;
            let data = serde_json::to_value(&analysis)?;
            let mut result = CommandResult::ok(data, source_chain);
            if used_fallback {
                result = result.with_warning(format!(
                    "primary request failed; served {}/{} fallback history",
                    pipeline::FALLBACK_PERIOD,
                    pipeline::FALLBACK_INTERVAL
                ));
            }
            Ok(result)
        }
        Err(AnalysisError::Validation(error)) => Err(CliError::Validation(error)),
        Err(AnalysisError::Source(failure)) => {
            let error = EnvelopeError::new(failure.code(), failure.to_string())?
                .with_retryable(failure.retryable());
            Ok(CommandResult::ok(empty_data(&symbol), source_chain).with_error(error))
        }
        Err(failure @ AnalysisError::DataUnavailable { .. }) => {
            let error = EnvelopeError::new("pipeline.data_unavailable", failure.to_string())?
                .with_retryable(true);
            Ok(CommandResult::ok(empty_data(&symbol), source_chain).with_error(error))
        }
    }
}

fn empty_data(symbol: &TickerSymbol) -> Value {
    json!({
        "symbol": symbol,
        "series": Value::Null,
    })
}
