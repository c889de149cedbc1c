//! Configuration for the position sizer service.
//!
//! Loads a YAML file, interpolates environment variables and validates the
//! result. A missing default file is not an error; built-in defaults apply.
//!
//! # Usage
//!
//! ```rust,ignore
//! use position_sizer::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::{FormulaMode, RawTradeInput, TradeInput};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "POSITION_SIZER_CONFIG";

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Sizing engine configuration.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Logging and metrics configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "bind_address '{}' is not a valid IP address",
                self.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

const fn default_http_port() -> u16 {
    50061
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Sizing engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Formulas used for the risk budget and loss percentage.
    #[serde(default)]
    pub formula_mode: FormulaMode,
    /// Values the calculator form starts with.
    #[serde(default = "default_form")]
    pub defaults: RawTradeInput,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            formula_mode: FormulaMode::default(),
            defaults: default_form(),
        }
    }
}

fn default_form() -> RawTradeInput {
    RawTradeInput {
        portfolio_size: "150000".to_string(),
        symbol_name: "AC".to_string(),
        max_percent_loss: "9".to_string(),
        entry_price: "115.54".to_string(),
        stop_exit_price: "88.1".to_string(),
        target_price: "150".to_string(),
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging and metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Colorize pretty output.
    #[serde(default)]
    pub ansi: bool,
    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            ansi: false,
            metrics_enabled: default_true(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Load configuration from a YAML file.
///
/// With `None`, reads `config.yaml` if it exists and falls back to defaults
/// otherwise. An explicit path must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: e,
            });
        }
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    config.server.socket_addr()?;

    TradeInput::try_from(config.sizing.defaults.clone())
        .map_err(|e| ConfigError::ValidationError(format!("sizing.defaults: {e}")))?;

    Ok(())
}
