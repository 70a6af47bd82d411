use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse value: {0}")]
    Parse(String),

    #[error("The second input must be a four digit number, got '{0}'")]
    InvalidYear(String),
}

pub type Result<T> = std::result::Result<T, RatingsError>;
