//! Subcommands and the options they share

pub mod config;
pub mod plot;
pub mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use moment_core::config::load_or_default;
use moment_core::{DiagramConfig, LastLoadPolicy};
use tracing::debug;

/// Last-load policy as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// The load furthest along the beam contributes nothing
    SkipLast,
    /// Every point load contributes
    IncludeAll,
}

impl From<PolicyArg> for LastLoadPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SkipLast => LastLoadPolicy::SkipLast,
            PolicyArg::IncludeAll => LastLoadPolicy::IncludeAll,
        }
    }
}

/// Configuration file plus per-run overrides
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Beam length, in the configured length unit
    #[arg(long)]
    pub length: Option<f64>,

    /// Number of samples along the beam
    #[arg(long)]
    pub samples: Option<usize>,

    /// Which point loads contribute
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

impl ConfigOverrides {
    /// Load the configuration file and apply overrides on top
    pub fn resolve(&self) -> Result<DiagramConfig> {
        let mut cfg = load_or_default(self.config.as_deref())?;
        if let Some(length) = self.length {
            cfg.beam_length = length;
        }
        if let Some(samples) = self.samples {
            cfg.sample_count = samples;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy.into();
        }
        cfg.validate()?;
        debug!(?cfg, "effective configuration");
        Ok(cfg)
    }
}
