use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "pzem-logger", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = "./config.toml")]
    pub config: PathBuf,

    /// Override remote telemetry endpoint (host:port)
    #[clap(long)]
    pub endpoint: Option<String>,

    /// Override output CSV file path
    #[clap(long)]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub endpoint: String,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("pzem_data.csv")
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let config_content = fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;

    let mut config: Config = toml::from_str(&config_content)
        .context("Failed to parse config file")?;

    // Apply CLI overrides
    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint = endpoint.clone();
    }

    if let Some(ref log_path) = cli.log_path {
        config.log_path = log_path.clone();
    }

    Ok(config)
}
