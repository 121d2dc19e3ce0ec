use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for everything around the filter pipeline.
///
/// The pipeline itself never fails; these errors come from the I/O edges
/// (config files, Parquet, the comment store) and from capability calls,
/// which the stages turn into fail-open decisions.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Parquet error: {source}")]
    ParquetError {
        #[from]
        source: parquet::errors::ParquetError,
    },

    #[error("Arrow conversion error: {source}")]
    ArrowError {
        #[from]
        source: arrow::error::ArrowError,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("YAML error: {source}")]
    YamlError {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Comment store error at '{path}': {message}")]
    StoreError { path: String, message: String },

    #[error("Capability '{capability}' failed: {message}")]
    CapabilityError {
        capability: &'static str,
        message: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    pub fn capability(capability: &'static str, message: impl Into<String>) -> Self {
        PipelineError::CapabilityError {
            capability,
            message: message.into(),
        }
    }
}
