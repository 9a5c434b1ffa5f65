//! Connection configuration for OneView appliances.
//!
//! Modules receive a `config` parameter pointing at a JSON file with the
//! appliance address and credentials, the same shape the vendor SDK uses:
//!
//! ```json
//! {
//!   "ip": "172.16.101.48",
//!   "api_version": 800,
//!   "credentials": {
//!     "userName": "administrator",
//!     "password": "secret"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading connection configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Credentials used to open an appliance session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Appliance user name (`userName` in the vendor config shape)
    #[serde(rename = "userName")]
    pub username: String,
    /// Appliance password
    pub password: String,
}

/// Connection configuration for a single appliance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneViewConfig {
    /// Appliance hostname or IP address
    pub ip: String,
    /// REST API version header value; the client default applies when unset
    #[serde(default)]
    pub api_version: Option<u32>,
    /// Session credentials
    pub credentials: Credentials,
}

impl OneViewConfig {
    /// Load configuration from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Base HTTPS URL of the appliance REST API.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.ip)
    }
}
