//! `pdl get` – run one batch and report how many targets failed.

use anyhow::{bail, Context, Result};
use pdl_core::config::Options;
use pdl_core::Client;
use std::fs;
use std::path::Path;

/// Read targets from a file: one per line, blank lines and `#` comments skipped.
pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read input {}", path.display()))?;
    Ok(parse_targets(&data))
}

fn parse_targets(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Download `targets` with `opts`. Returns 0 when every target succeeded,
/// 2 when at least one failed. Ctrl-C cancels the batch.
pub async fn run_get(opts: Options, targets: Vec<String>) -> Result<i32> {
    if targets.is_empty() {
        bail!("no URLs given (pass them as arguments or with --input FILE)");
    }
    fs::create_dir_all(&opts.output)
        .with_context(|| format!("create output dir {}", opts.output.display()))?;

    let client = Client::new(opts)?;
    let dispatcher = client.dispatcher();
    let cancel = dispatcher.cancel_signal();

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling batch");
            eprintln!("interrupted, cancelling...");
            cancel.cancel();
        }
    });

    let result = tokio::task::spawn_blocking(move || dispatcher.run(&targets))
        .await
        .context("batch thread failed")?;
    interrupt.abort();

    for failure in &result.failures {
        eprintln!(
            "failed: {} after {} attempt(s): {}",
            failure.target, failure.attempts, failure.reason
        );
    }
    if result.cancelled {
        eprintln!("batch cancelled");
    }
    println!("{}", result.terminal_failure_count);

    Ok(if result.is_success() { 0 } else { 2 })
}
