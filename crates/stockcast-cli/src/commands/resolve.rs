use std::str::FromStr;

use serde_json::{json, Value};
use stockcast_core::{DataSource, EnvelopeError, Exchange, ResolveRequest};

use crate::cli::ResolveArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ResolveArgs, source: &dyn DataSource) -> Result<CommandResult, CliError> {
    let exchange = Exchange::from_str(&args.exchange)?;
    let request = ResolveRequest::new(args.company.as_str(), exchange)
        .map_err(|error| CliError::Command(error.to_string()))?;

    let source_chain = vec![source.id()];

    match source.resolve(&request) {
        Ok(symbol) => {
            let data = json!({
                "company": request.company,
                "exchange": exchange,
                "symbol": symbol,
            });
            Ok(CommandResult::ok(data, source_chain))
        }
        Err(failure) => {
            let data = json!({
                "company": request.company,
                "exchange": exchange,
                "symbol": Value::Null,
            });
            let error = EnvelopeError::new(failure.code(), failure.to_string())?
                .with_retryable(failure.retryable());
            Ok(CommandResult::ok(data, source_chain).with_error(error))
        }
    }
}
