//! Logging initialization.
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use std::fs::{self, File};
use std::sync::Arc;

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Parse a log level string, falling back to `INFO`.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// `RUST_LOG`, when set and non-empty, replaces the configured level.
fn build_filter(level: &str, env: Option<&str>) -> EnvFilter {
    match env.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::default().add_directive(parse_level(level).into()),
    }
}

/// Install the global subscriber. Without a configured file this is a no-op.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&config.level, env.as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}
