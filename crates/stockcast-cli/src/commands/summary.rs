use serde_json::{json, Value};
use stockcast_core::pipeline::{self, AnalysisError};
use stockcast_core::{DataSource, EnvelopeError, TickerSymbol};

use crate::cli::SummaryArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &SummaryArgs, source: &dyn DataSource) -> Result<CommandResult, CliError> {
    let symbol = TickerSymbol::parse(&args.symbol)?;
    let source_chain = vec![source.id()];

    match pipeline::summary(source, &symbol) {
        Ok(summary) => {
            let data = serde_json::to_value(&summary)?;
            Ok(CommandResult::ok(data, source_chain))
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
        "snapshot": Value::Null,
    })
}
