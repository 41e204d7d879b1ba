use thiserror::Error;

/// Errors from turning the canvas into an uploadable image
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Nothing has been drawn")]
    EmptyCanvas,

    #[error("Failed to encode drawing: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors from a train or predict request
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] RasterError),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Server returned status {status_code}")]
    ServerError { status_code: u16 },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(reqwest::Error),

    #[error("Request was dropped before it finished")]
    TaskDropped,
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClassifierError::Timeout
        } else {
            ClassifierError::Transport(err)
        }
    }
}

/// Result type for classifier operations
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors while loading the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
