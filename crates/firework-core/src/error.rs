//! Error types for the firework crates

use thiserror::Error;

/// The main error type for firework operations
#[derive(Debug, Error)]
pub enum FireworkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid color '{0}': expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for firework operations
pub type Result<T> = std::result::Result<T, FireworkError>;

impl From<toml::de::Error> for FireworkError {
    fn from(err: toml::de::Error) -> Self {
        FireworkError::TomlParseError(err.to_string())
    }
}
