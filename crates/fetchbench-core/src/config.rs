use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a fetched body reaches its final file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Write `<name>.part`, rename on success, remove on failure.
    #[default]
    Atomic,
    /// Write `<name>` directly; a failed transfer may leave a partial file.
    InPlace,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Atomic => "atomic",
            WriteMode::InPlace => "in-place",
        }
    }
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "atomic" => Ok(WriteMode::Atomic),
            "in-place" => Ok(WriteMode::InPlace),
            other => Err(format!("unknown write mode {other:?} (expected atomic or in-place)")),
        }
    }
}

/// Global configuration loaded from `~/.config/fetchbench/config.toml`.
/// Missing fields take their `Default` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchBenchConfig {
    /// Worker threads for the threaded strategy.
    pub thread_workers: usize,
    /// Concurrent child processes for the multi-process strategy.
    pub process_workers: usize,
    /// In-flight fetches for the cooperative (async) strategy.
    pub async_tasks: usize,
    /// Connect timeout in seconds (None = wait indefinitely).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = wait indefinitely).
    pub request_timeout_secs: Option<u64>,
    /// "atomic" (default) or "in-place".
    pub write_mode: Option<WriteMode>,
    /// Replaces the built-in sample list when no locators are given.
    pub default_urls: Option<Vec<String>>,
}

impl Default for FetchBenchConfig {
    fn default() -> Self {
        Self {
            thread_workers: 8,
            process_workers: 4,
            async_tasks: 16,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            write_mode: None,
            default_urls: None,
        }
    }
}

impl FetchBenchConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchbench")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default XDG path, creating it if missing.
pub fn load_or_init() -> Result<FetchBenchConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing a default file there if none exists.
pub fn load_or_init_at(path: &Path) -> Result<FetchBenchConfig> {
    if !path.exists() {
        let default_cfg = FetchBenchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FetchBenchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
