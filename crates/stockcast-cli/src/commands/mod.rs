mod forecast;
mod history;
mod intervals;
mod resolve;
mod summary;

use std::time::Instant;

use serde_json::Value;
use stockcast_core::{Envelope, EnvelopeError, EnvelopeMeta, ProviderId, YahooAdapter};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub source_chain: Vec<ProviderId>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<ProviderId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            source_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let adapter = YahooAdapter::default();
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Resolve(args) => resolve::run(args, &adapter)?,
        Command::Intervals(args) => intervals::run(args)?,
        Command::History(args) => history::run(args, &adapter)?,
        Command::Summary(args) => summary::run(args, &adapter)?,
        Command::Forecast(args) => forecast::run(args, &adapter)?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let CommandResult {
        data,
        warnings,
        errors,
        source_chain,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        "v1.0.0",
        source_chain,
        latency_ms,
    )?;

    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
