use std::str::FromStr;

use serde_json::json;
use stockcast_core::{compat, Period, ProviderId};

use crate::cli::IntervalsArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &IntervalsArgs) -> Result<CommandResult, CliError> {
    let periods: Vec<Period> = match &args.period {
        Some(value) => vec![Period::from_str(value)?],
        None => Period::ALL.to_vec(),
    };

    let rows: Vec<_> = periods
        .iter()
        .map(|&period| {
            json!({
                "period": period.as_str(),
                "intervals": compat::valid_intervals(period)
                    .iter()
                    .map(|interval| interval.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let data = json!({ "periods": rows });

    // Static configuration data; no provider is consulted, but the envelope
    // contract requires a non-empty source chain.
    Ok(CommandResult::ok(data, vec![ProviderId::Yahoo]))
}
