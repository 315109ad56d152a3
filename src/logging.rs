//! `tracing` subscriber setup shared by the binaries.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const ENV_LOG: &str = "SNIPDECK_LOG";

#[derive(Clone, Debug)]
pub enum LogTarget {
    Stderr,
    /// Append to a file. Used by the TUI, which owns the terminal.
    File(PathBuf),
    Off,
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. `default_filter` applies when
/// `SNIPDECK_LOG` is unset or invalid.
pub fn init(target: LogTarget, default_filter: &str) -> Result<()> {
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter(default_filter))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("install log subscriber"),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter(default_filter))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .context("install log subscriber")
        }
    }
}
