// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty history inspector
//!
//! Opens the local workout store, rehydrates it, and prints the render
//! data for every workout as JSON.

use anyhow::Context;
use mapty::{config::Config, db::FileStore, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Opening workout store"
    );

    let store = FileStore::open(&config.data_dir).context("Failed to open workout store")?;
    let app = App::open(config, Box::new(store));

    let views = app.views();
    println!(
        "{}",
        serde_json::to_string_pretty(&views).context("Failed to encode workouts")?
    );
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mapty=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
