use storval_core_types::UnknownFeature;
use thiserror::Error;

/// Result type alias using StorvalError
pub type Result<T> = std::result::Result<T, StorvalError>;

/// Operational failures around the validation engine
///
/// Validation findings are never reported through this type; they are data
/// in an [`ErrorList`](crate::field::ErrorList). `StorvalError` covers what
/// happens before a descriptor reaches a validator: reading, decoding and
/// configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorvalError {
    /// The document could not be decoded into a typed descriptor
    #[error("Failed to decode {format} descriptor: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// The document names a kind this engine does not validate
    #[error("Unsupported descriptor kind: {kind}")]
    UnknownKind { kind: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A feature gate id was not recognised
    #[error("Unknown feature gate: {id}")]
    UnknownFeature { id: String },

    /// Reading an input failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl StorvalError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StorvalError::Decode { .. } => "ERR_DECODE",
            StorvalError::UnknownKind { .. } => "ERR_UNKNOWN_KIND",
            StorvalError::Config { .. } => "ERR_CONFIG",
            StorvalError::UnknownFeature { .. } => "ERR_UNKNOWN_FEATURE",
            StorvalError::Io { .. } => "ERR_IO",
        }
    }

    /// Build an I/O error tagged with the path that failed
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        StorvalError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorvalError {
    fn from(err: serde_json::Error) -> Self {
        StorvalError::Decode {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StorvalError {
    fn from(err: serde_yaml::Error) -> Self {
        StorvalError::Decode {
            format: "YAML",
            message: err.to_string(),
        }
    }
}

impl From<UnknownFeature> for StorvalError {
    fn from(err: UnknownFeature) -> Self {
        StorvalError::UnknownFeature { id: err.0 }
    }
}
