//! Relay configuration, layered from built-in defaults, an optional TOML file,
//! `RELAY__`-prefixed environment variables and finally the `HF_API_TOKEN` /
//! `HF_MODEL` variables.

use crate::provider::DEFAULT_API_BASE;
use crate::server::StatusPolicy;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

/// Config file read when `RELAY_CONFIG` is not set. Missing is fine
pub const DEFAULT_CONFIG_FILE: &str = "relay.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub cors: CorsSettings,
    pub relay: RelaySettings,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings::default(),
            provider: ProviderSettings::default(),
            cors: CorsSettings::default(),
            relay: RelaySettings::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Number of HTTP workers. Defaults to actix's choice
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
        }
    }
}

/// Where and how to reach the inference provider. Token and model are not
/// validated here: a missing model only fails once a prediction is attempted
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_base: String,
    pub api_token: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: None,
            model: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins. Empty allows any origin
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        CorsSettings {
            allowed_origins: vec![],
            allow_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub status_policy: StatusPolicy,
    /// Reject uploads larger than this. Unlimited when unset
    pub max_upload_bytes: Option<usize>,
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match env::var("RELAY_CONFIG") {
            Ok(path) => (path, true),
            Err(_) => (DEFAULT_CONFIG_FILE.to_string(), false),
        };

        Self::from_sources(
            Some((&path, required)),
            non_empty_var("HF_API_TOKEN"),
            non_empty_var("HF_MODEL"),
        )
    }

    /// Build settings from an optional `(path, required)` config file plus
    /// `RELAY__` environment variables, with the provider token and model
    /// taking precedence over both
    pub fn from_sources(
        file: Option<(&str, bool)>,
        api_token: Option<String>,
        model: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some((path, required)) = file {
            builder = builder.add_source(File::new(path, FileFormat::Toml).required(required));
        }

        builder
            .add_source(
                Environment::with_prefix("RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .set_override_option("provider.api_token", api_token)?
            .set_override_option("provider.model", model)?
            .build()?
            .try_deserialize()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
