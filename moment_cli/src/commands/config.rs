//! Show or write the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::ConfigOverrides;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Write the configuration to this file instead of printing it
    #[arg(long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let cfg = args.overrides.resolve()?;
    match &args.write {
        Some(path) => {
            cfg.save(path)?;
            println!("Configuration written to {}", path.display());
        }
        None => print!("{}", cfg.to_toml_string()?),
    }
    Ok(())
}
