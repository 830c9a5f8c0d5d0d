//! Error types for the geocoder control builder

use thiserror::Error;

/// Result type alias for control construction and rendering
pub type GeocoderResult<T> = std::result::Result<T, GeocoderError>;

/// Everything that can go wrong before a fragment is emitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocoderError {
    /// An enumerated or structural option is outside its accepted set
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Custom provider fields supplied without their counterparts
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// A value cannot be represented as JSON
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Page-level misconfiguration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Template engine failure
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Generic error for unhandled cases
    #[error("Geocoder error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for GeocoderError {
    fn from(error: serde_json::Error) -> Self {
        GeocoderError::SerializationError(format!("JSON encoding failed: {error}"))
    }
}

impl From<handlebars::RenderError> for GeocoderError {
    fn from(error: handlebars::RenderError) -> Self {
        GeocoderError::TemplateError(error.to_string())
    }
}

impl From<handlebars::TemplateError> for GeocoderError {
    fn from(error: handlebars::TemplateError) -> Self {
        GeocoderError::TemplateError(error.to_string())
    }
}

impl From<std::io::Error> for GeocoderError {
    fn from(error: std::io::Error) -> Self {
        GeocoderError::Other(format!("IO error: {error}"))
    }
}
