use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Batch options, loaded from `~/.config/pdl/config.toml` and overridable per run.
///
/// Every numeric field uses `0` to mean "unbounded". Read-only for the lifetime
/// of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory that receives one file per target.
    pub output: PathBuf,
    /// Timeout for a single GET in seconds (0 = no timeout).
    pub request_timeout_secs: u64,
    /// Maximum number of concurrent requests (0 = one worker per target).
    pub max_concurrency: usize,
    /// Terminal failures tolerated before the whole batch is cancelled (0 = never cancel).
    pub max_error_budget: u64,
    /// Maximum transport calls per job (0 = retry retryable failures forever).
    ///
    /// With `max_error_budget = 0` as well, a target that keeps answering 5xx
    /// never terminates. Kept deliberately; callers must bound one of the two.
    pub max_attempts_per_job: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            request_timeout_secs: 0,
            max_concurrency: 0,
            max_error_budget: 0,
            max_attempts_per_job: 0,
        }
    }
}

impl Options {
    /// Per-request timeout, or `None` when unbounded.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Number of workers to start for `job_count` jobs.
    pub fn effective_concurrency(&self, job_count: usize) -> usize {
        match self.max_concurrency {
            0 => job_count,
            max => max.min(job_count),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Options> {
    let path = config_path()?;
    if !path.exists() {
        let default_opts = Options::default();
        let toml = toml::to_string_pretty(&default_opts)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_opts);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<Options> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let opts: Options =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(opts)
}
