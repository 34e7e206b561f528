// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "PARAMFORM_LOG";

/// Picks the filter directive: `PARAMFORM_LOG` wins over the config value.
pub fn resolve_filter(env_value: Option<String>, configured: &str) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

/// Installs a stderr fmt subscriber. Stdout stays reserved for the REPL and
/// submission output.
pub fn init_logging(configured_filter: &str) -> Result<()> {
    let directive = resolve_filter(env::var(LOG_ENV).ok(), configured_filter);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}; set [log].filter or {LOG_ENV}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}
