use crate::endpoint::Endpoints;
use crate::error::{BetfairError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

pub const CONFIG_FILE: &str = "config.toml";

/// Per-client settings. Every key is optional; any key outside this set is
/// rejected when the configuration is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default, alias = "certificatePath")]
    pub certificate_path: String,
    #[serde(default, alias = "keyPath")]
    pub key_path: String,
    #[serde(default, alias = "applicationKey")]
    pub application_key: String,
    #[serde(default, alias = "sessionToken")]
    pub session_token: String,
}

impl ClientConfig {
    /// Builds a configuration from a JSON object such as
    /// `{"certificatePath": "client.crt", "applicationKey": "abc"}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(BetfairError::Config(
                "Client configuration must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value.clone()).map_err(|err| BetfairError::Config(err.to_string()))
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Contents of `config.toml`:
///
/// ```toml
/// [client]
/// certificate_path = "/path/to/client-2048.crt"
/// key_path = "/path/to/client-2048.key"
/// application_key = "your_app_key"
///
/// [credentials]
/// username = "your_username"
/// password = "your_password"
///
/// [endpoints]
/// betting = "https://api.betfair.com/exchange/betting/rest/v1.0/"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

impl Config {
    /// Loads `config.toml` from the working directory.
    pub fn new() -> Result<Self> {
        Self::from_path(CONFIG_FILE)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .map_err(|err| BetfairError::Config(format!("{}: {}", path.display(), err)))?;
        let config = Self::from_toml_str(&config_str)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }
}
