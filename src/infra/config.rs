use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::threshold::{DEFAULT_THRESHOLD, ThresholdRow};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Default solver parameters (CLI flags win over these)
    pub solver: SolverConfig,

    /// Calibrated threshold rows, keyed by (source, metric, algorithm,
    /// strategy). Empty means "always use the default threshold".
    #[serde(default)]
    pub thresholds: Vec<ThresholdRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolverConfig {
    pub num_results: usize,
    pub search_space_multiplier: usize,
    pub avoid_margin: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                num_results: 10,
                search_space_multiplier: 10,
                avoid_margin: 2.0,
            },
            thresholds: vec![
                ThresholdRow {
                    source: "glove".to_string(),
                    metric: "cosine".to_string(),
                    algorithm: "mean-individual".to_string(),
                    strategy: "moderate".to_string(),
                    value: DEFAULT_THRESHOLD,
                },
            ],
        }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["clueword.toml", ".clueword.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with CLUEWORD_ prefix
    builder = builder.add_source(config::Environment::with_prefix("CLUEWORD").separator("_"));

    let cfg = builder.build().context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(args: InitArgs, ctx: &AppContext) -> Result<()> {
    let config_path = args.path.join("clueword.toml");

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();

        assert_eq!(back.solver.num_results, 10);
        assert_eq!(back.thresholds, config.thresholds);
    }
}
