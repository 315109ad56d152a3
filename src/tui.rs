use anyhow::Result;

use crate::model::RemoteConfig;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub remote: RemoteConfig,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
