//! Command-line options for the terminal runner.

use anyhow::{anyhow, Result};

use crate::core::EngineConfig;

pub const USAGE: &str = "usage: classic-tetris [--seed N] [--tall] [--no-shadow]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliOptions {
    /// Fixed piece sequence seed; a time-based seed is used when absent
    pub seed: Option<u32>,
    pub tall: bool,
    pub no_shadow: bool,
    pub help: bool,
}

impl CliOptions {
    /// Apply the flags on top of an environment-derived configuration
    pub fn apply(&self, config: EngineConfig) -> EngineConfig {
        let mut config = config;
        if self.tall {
            config.height = EngineConfig::tall().height;
        }
        if self.no_shadow {
            config.shadow_enabled = false;
        }
        config
    }
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                options.seed = Some(seed);
            }
            "--tall" => options.tall = true,
            "--no-shadow" => options.no_shadow = true,
            "-h" | "--help" => options.help = true,
            other => return Err(anyhow!("unknown argument: {}\n{}", other, USAGE)),
        }
        i += 1;
    }
    Ok(options)
}
