use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{filter::EnvFilter, fmt};

const DEFAULT_LEVEL: &str = "warn";

/// Where log output should go.
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    /// Drop everything, e.g. while the TUI owns the terminal.
    Discard,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global tracing subscriber. Call once, early in `main`.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    let builder = fmt().with_env_filter(filter()).with_target(false);

    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };

    installed.map_err(|err| anyhow::anyhow!("Failed to initialise logging: {err}"))
}
