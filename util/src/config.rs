//! This module contain application configuration related functionality.
//!
//! All the application configurations should be set in corresponding
//! TOML file in `config` directory.
use config::{Config, ConfigError, Environment, File};

use crate::str_util::mask_url_secrets;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::{
    fmt,
    path::{Path, PathBuf},
};

const DEFAULT_CONFIG_FILE_PREFIX: &str = "config";
const DEFAULT_CONFIG_FILE_NAME: &str = "default.toml";

/// Plain port override, as set by most hosting platforms.
const PORT_ENV_NAME: &str = "PORT";
/// Switches logging to `debug` regardless of the configured level.
const DEBUG_ENV_NAME: &str = "DEBUG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvProfile {
    Prod,
    Local,
    Dev,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestServer {
    pub port: u16,
    pub host: Ipv4Addr,
    pub log_level: String,
    #[serde(default)]
    pub debug: bool,
}

impl RestServer {
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}

/// Token launch API endpoints and the trade parameters sent with every create request.
#[derive(Debug, Deserialize, Clone)]
pub struct Upstream {
    pub ipfs_url: String,
    pub trade_local_url: String,
    /// Percent
    pub slippage: f64,
    /// SOL
    pub priority_fee: f64,
    pub pool: String,
}

#[derive(Deserialize, Clone)]
pub struct SolanaCfg {
    pub url: String,
    pub explorer_tx_url: String,
}

impl fmt::Debug for SolanaCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolanaCfg")
            .field("url", &mask_url_secrets(&self.url))
            .field("explorer_tx_url", &self.explorer_tx_url)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageCacheCfg {
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub rest_server: RestServer,
    pub upstream: Upstream,
    pub solana: SolanaCfg,
    pub image_cache: ImageCacheCfg,
    pub env: EnvProfile,
}

impl Settings {
    pub fn for_env(env_name: &str) -> Result<Self, ConfigError> {
        Settings::load(Some(env_name), None)
    }

    /// This method should be used for production.
    /// It loads application configuration based on the environment variables.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Result<Self, ConfigError> {
        Settings::load(None, None)
    }

    fn load(env_name: Option<&str>, config_path: Option<&str>) -> Result<Self, ConfigError> {
        let configs_path = config_path.map(|s| s.to_string()).unwrap_or(
            std::env::var("RUN_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_FILE_PREFIX.to_string()),
        );

        let env = env_name
            .map(|s| s.to_string())
            .unwrap_or(std::env::var("RUN_ENV").unwrap_or_else(|_| "local".into()));
        println!("Using profile: {}", &env);

        let raw_config = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::from(default_config_file_path(&configs_path).as_path()))
            // Add in the current environment file, Default to 'local' env
            // Note that this file is _optional_
            .add_source(File::with_name(&format!("{}/{}", configs_path, env)).required(false))
            // Add in settings from the environment (with a prefix of APP)
            // Eg.. `APP__REST_SERVER__PORT=8081 ./target/app` would set the `port` key
            .add_source(Environment::with_prefix("app").prefix_separator("__").separator("__"))
            .set_override_option("rest_server.port", std::env::var(PORT_ENV_NAME).ok())?
            .set_override_option("rest_server.debug", read_debug_flag())?
            .set_override("env", env)?
            .build()?;

        raw_config.try_deserialize()
    }
}

fn read_debug_flag() -> Option<bool> {
    std::env::var(DEBUG_ENV_NAME).ok().map(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn default_config_file_path(base_path: &str) -> PathBuf {
    // Check if the base path is a full path
    let full_path = Path::new(base_path);
    if full_path.is_file() {
        return full_path.to_owned();
    }

    // it's OK to unwrap(), since it's the initialization phase,
    // and it's better to fail fast in case of a problem.
    let current_dir = std::env::current_dir().unwrap();

    let mut config_dir = current_dir.join(base_path);
    if !config_dir.exists() {
        config_dir = current_dir.parent().unwrap().join(base_path);
    }

    config_dir.join(DEFAULT_CONFIG_FILE_NAME)
}
