use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use snipdeck::logging::{self, LogTarget};
use snipdeck::model::{RemoteConfig, StoreConfig};
use snipdeck::settings::{self, ConfigDir};

use crate::Commands;

#[derive(Parser)]
#[command(name = "snipdeck")]
#[command(about = "Projects and code snippets kept in a hosted row store", long_about = None)]
pub(crate) struct Cli {
    /// Store base url (overrides config and SNIPDECK_STORE_URL)
    #[arg(long)]
    url: Option<String>,

    /// Store api key (overrides config and SNIPDECK_STORE_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Write TUI logs here (the TUI never logs to the terminal)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let target = match cli.log_file.clone() {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            logging::init(target, "snipdeck=info")?;
            let remote = require_remote(cli.url, cli.key)?;
            snipdeck::tui::run_with_options(snipdeck::tui::TuiRunOptions { remote })?;
        }
        Some(command) => {
            if cli.log_file.is_some() {
                anyhow::bail!("`--log-file` is only supported when running the TUI (no subcommand)");
            }
            logging::init(LogTarget::Stderr, "snipdeck=info")?;
            let flags = StoreConfig {
                base_url: cli.url,
                api_key: cli.key,
            };
            crate::cli_exec::handle_command(command, flags)?
        }
    }

    Ok(())
}

pub(crate) fn require_remote(url: Option<String>, key: Option<String>) -> Result<RemoteConfig> {
    let dir = ConfigDir::discover()?;
    let flags = StoreConfig {
        base_url: url,
        api_key: key,
    };
    resolve_with(&dir, flags)
}

pub(crate) fn resolve_with(dir: &ConfigDir, flags: StoreConfig) -> Result<RemoteConfig> {
    let file = dir.read_config()?;
    settings::resolve(file, settings::from_env(), flags)
}
