use serde_json::{json, Value};
use stockcast_core::pipeline::{self, AnalysisError, ForecastOutcome};
use stockcast_core::{DataSource, EnvelopeError, TickerSymbol};

use crate::cli::ForecastArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ForecastArgs, source: &dyn DataSource) -> Result<CommandResult, CliError> {
    let symbol = TickerSymbol::parse(&args.symbol)?;
    let source_chain = vec![source.id()];

    match pipeline::run_forecast(source, &symbol) {
        Ok(report) => {
            let used_fallback = report.used_fallback;
            let unavailable_reason = match &report.outcome {
                ForecastOutcome::Ready { .. } => None,
                ForecastOutcome::Unavailable { reason } => Some(reason.clone()),
            };

            let data = serde_json::to_value(&report)?;
            let mut result = CommandResult::ok(data, source_chain);
            if used_fallback {
                result = result.with_warning(format!(
                    "primary request failed; forecast ran over {}/{} fallback history",
                    pipeline::FALLBACK_PERIOD,
                    pipeline::FALLBACK_INTERVAL
                ));
            }
            if let Some(reason) = unavailable_reason {
                let error = EnvelopeError::new("forecast.unavailable", reason)?
                    .with_retryable(false);
                result = result.with_error(error);
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
        "outcome": Value::Null,
    })
}
