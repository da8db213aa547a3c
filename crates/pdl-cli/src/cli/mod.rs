//! CLI for the PDL parallel downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pdl_core::config::{self, Options};
use std::path::PathBuf;

use commands::{read_targets, run_config, run_get};

/// Top-level CLI for the PDL parallel downloader.
#[derive(Debug, Parser)]
#[command(name = "pdl")]
#[command(about = "PDL: fetch many URLs concurrently with a global error budget", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every URL into the output directory.
    Get {
        /// URLs to fetch (duplicates are fetched independently).
        urls: Vec<String>,
        /// Read additional URLs from a file, one per line (`#` starts a comment).
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        overrides: OptionOverrides,
    },

    /// Show the config file location and effective options.
    Config {
        #[command(flatten)]
        overrides: OptionOverrides,
    },
}

/// Per-run overrides for values from config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionOverrides {
    /// Output directory (created if missing).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// Per-request timeout in seconds (0 = none).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Maximum concurrent requests (0 = one per URL).
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,
    /// Failed downloads tolerated before the batch is cancelled (0 = never cancel).
    #[arg(long, value_name = "N")]
    pub max_errors: Option<u64>,
    /// Attempts per URL (0 = retry 5xx and network errors forever).
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,
}

impl OptionOverrides {
    /// Apply the flags that were given on top of `base`.
    pub fn apply(&self, base: Options) -> Options {
        Options {
            output: self.output.clone().unwrap_or(base.output),
            request_timeout_secs: self.timeout.unwrap_or(base.request_timeout_secs),
            max_concurrency: self.max_concurrency.unwrap_or(base.max_concurrency),
            max_error_budget: self.max_errors.unwrap_or(base.max_error_budget),
            max_attempts_per_job: self.max_attempts.unwrap_or(base.max_attempts_per_job),
        }
    }
}

impl CliCommand {
    /// Parse arguments, run the command and return the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                mut urls,
                input,
                overrides,
            } => {
                if let Some(path) = input {
                    urls.extend(read_targets(&path)?);
                }
                run_get(overrides.apply(cfg), urls).await
            }
            CliCommand::Config { overrides } => {
                run_config(&overrides.apply(cfg))?;
                Ok(0)
            }
        }
    }
}
