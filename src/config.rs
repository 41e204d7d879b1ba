use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::raster::RasterPolicy;

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "SKETCH_CLASSIFIER_CONFIG";
/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "SKETCH_CLASSIFIER_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct AppConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    /// Longest silence allowed while waiting on the server
    pub request_timeout_secs: u64,
    /// Upper limit for a whole request, upload included
    pub resource_timeout_secs: u64,
    /// Shape names offered for training
    pub labels: Vec<String>,
    pub canvas_height: f32,
    pub raster: RasterPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_owned(),
            connect_timeout_secs: 30,
            request_timeout_secs: 30,
            resource_timeout_secs: 300,
            labels: ["Circle", "Square", "Triangle", "Line"]
                .into_iter()
                .map(String::from)
                .collect(),
            canvas_height: 300.0,
            raster: RasterPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `SKETCH_CLASSIFIER_CONFIG` (if any), then apply the
    /// `SKETCH_CLASSIFIER_URL` override.
    pub fn load() -> ConfigResult<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            log::info!("Using server URL from {SERVER_URL_ENV}: {url}");
            config.server_url = url;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resource_timeout(&self) -> Duration {
        Duration::from_secs(self.resource_timeout_secs)
    }
}
