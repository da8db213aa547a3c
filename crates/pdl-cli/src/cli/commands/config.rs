//! `pdl config` – show where options come from and their effective values.

use anyhow::Result;
use pdl_core::config::{self, Options};

pub fn run_config(opts: &Options) -> Result<()> {
    println!("config file: {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(opts)?);
    Ok(())
}
