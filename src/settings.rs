//! Where the store endpoint comes from: config file, then environment, then flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{RemoteConfig, StoreConfig};

pub const ENV_CONFIG_DIR: &str = "SNIPDECK_CONFIG_DIR";
pub const ENV_STORE_URL: &str = "SNIPDECK_STORE_URL";
pub const ENV_STORE_KEY: &str = "SNIPDECK_STORE_KEY";

const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$SNIPDECK_CONFIG_DIR`, else `$XDG_CONFIG_HOME/snipdeck`, else
    /// `$HOME/.config/snipdeck`.
    pub fn discover() -> Result<Self> {
        Self::discover_with(|k| std::env::var(k).ok())
    }

    pub fn discover_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |k: &str| env(k).filter(|v| !v.trim().is_empty());
        if let Some(dir) = non_empty(ENV_CONFIG_DIR) {
            return Ok(Self::at(dir));
        }
        if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
            return Ok(Self::at(Path::new(&xdg).join("snipdeck")));
        }
        let home = non_empty("HOME")
            .context("cannot locate config dir (set SNIPDECK_CONFIG_DIR or HOME)")?;
        Ok(Self::at(Path::new(&home).join(".config").join("snipdeck")))
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Missing file reads as an empty config.
    pub fn read_config(&self) -> Result<StoreConfig> {
        let path = self.path();
        if !path.exists() {
            return Ok(StoreConfig::default());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: StoreConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &StoreConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.path(), &bytes).context("write config.json")?;
        Ok(())
    }
}

pub fn from_env() -> StoreConfig {
    from_env_with(|k| std::env::var(k).ok())
}

pub fn from_env_with(env: impl Fn(&str) -> Option<String>) -> StoreConfig {
    let non_empty = |k: &str| env(k).filter(|v| !v.trim().is_empty());
    StoreConfig {
        base_url: non_empty(ENV_STORE_URL),
        api_key: non_empty(ENV_STORE_KEY),
    }
}

/// Layer file, env and flag settings (later wins) into a usable endpoint.
pub fn resolve(file: StoreConfig, env: StoreConfig, flags: StoreConfig) -> Result<RemoteConfig> {
    let merged = file.merge(env).merge(flags);
    let base_url = merged.base_url.context(
        "no store url configured (run `snipdeck config set --url ... --key ...` or set SNIPDECK_STORE_URL)",
    )?;
    let api_key = merged.api_key.context(
        "no store key configured (run `snipdeck config set --url ... --key ...` or set SNIPDECK_STORE_KEY)",
    )?;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("store url must start with http:// or https:// (got {})", base_url);
    }
    Ok(RemoteConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key,
    })
}

/// Key with everything past the first four characters hidden.
pub fn mask_key(key: &str) -> String {
    let shown: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        return "*".repeat(key.chars().count());
    }
    format!("{}...", shown)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
