//! parley-hub configuration
//!
//! Resolution priority per setting:
//! 1. Command-line argument (highest)
//! 2. Environment variable (via clap `env` fallbacks)
//! 3. TOML config file (when `--config` is given)
//! 4. Compiled default

use clap::Parser;
use parley_common::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default listen port for the hub.
pub const DEFAULT_PORT: u16 = 5750;

const DEFAULT_TRANSCRIPT_BASE_URL: &str = "https://api.elevenlabs.io/v1/convai";
const DEFAULT_GENERATOR_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GENERATOR_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Command-line arguments for parley-hub
#[derive(Parser, Debug)]
#[command(name = "parley-hub")]
#[command(about = "Session telemetry hub and report synthesis service")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PARLEY_PORT")]
    pub port: Option<u16>,

    /// Shared secret for the write endpoints (unset disables auth)
    #[arg(long, env = "PARLEY_API_KEY")]
    pub api_key: Option<String>,

    /// Transcript provider base URL
    #[arg(long, env = "PARLEY_TRANSCRIPT_BASE_URL")]
    pub transcript_base_url: Option<String>,

    /// Transcript provider API key
    #[arg(long, env = "PARLEY_TRANSCRIPT_API_KEY")]
    pub transcript_api_key: Option<String>,

    /// Generation provider base URL
    #[arg(long, env = "PARLEY_GENERATOR_BASE_URL")]
    pub generator_base_url: Option<String>,

    /// Generation provider API key
    #[arg(long, env = "PARLEY_GENERATOR_API_KEY")]
    pub generator_api_key: Option<String>,

    /// Generation model name
    #[arg(long, env = "PARLEY_GENERATOR_MODEL")]
    pub generator_model: Option<String>,

    /// Optional TOML config file
    #[arg(long, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Optional TOML file settings (all keys optional)
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    port: Option<u16>,
    api_key: Option<String>,
    transcript_base_url: Option<String>,
    transcript_api_key: Option<String>,
    generator_base_url: Option<String>,
    generator_api_key: Option<String>,
    generator_model: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Resolved hub configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: Option<String>,
    pub transcript_base_url: String,
    pub transcript_api_key: String,
    pub generator_base_url: String,
    pub generator_api_key: String,
    pub generator_model: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Merge CLI/env arguments over an optional TOML file over defaults.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Internal(format!("Failed to read config {}: {e}", path.display()))
                })?;
                toml::from_str::<FileConfig>(&content).map_err(|e| {
                    Error::Internal(format!("Failed to parse config {}: {e}", path.display()))
                })?
            }
            None => FileConfig::default(),
        };

        Ok(Config {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            api_key: args.api_key.or(file.api_key).filter(|k| !k.is_empty()),
            transcript_base_url: args
                .transcript_base_url
                .or(file.transcript_base_url)
                .unwrap_or_else(|| DEFAULT_TRANSCRIPT_BASE_URL.to_string()),
            transcript_api_key: args
                .transcript_api_key
                .or(file.transcript_api_key)
                .unwrap_or_default(),
            generator_base_url: args
                .generator_base_url
                .or(file.generator_base_url)
                .unwrap_or_else(|| DEFAULT_GENERATOR_BASE_URL.to_string()),
            generator_api_key: args
                .generator_api_key
                .or(file.generator_api_key)
                .unwrap_or_default(),
            generator_model: args
                .generator_model
                .or(file.generator_model)
                .unwrap_or_else(|| DEFAULT_GENERATOR_MODEL.to_string()),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}
