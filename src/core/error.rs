//! Error types for the facade

pub type Result<T> = std::result::Result<T, FacadeError>;

/// Errors surfaced at the configuration boundary.
///
/// Logging calls themselves never return errors; the worst outcome of a bad
/// argument or a failing sink is a degraded message. `FacadeError` only
/// exists where configuration is loaded or validated.
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// Unknown severity name in a config value
    #[error("invalid severity name: '{name}'")]
    InvalidSeverity { name: String },

    /// Unknown tag style name in a config value
    #[error("invalid tag style name: '{name}'")]
    InvalidTagStyle { name: String },

    /// Tag pattern with wrong token cardinality
    #[error("malformed tag pattern '{pattern}': {message}")]
    MalformedPattern { pattern: String, message: String },

    /// Config source could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Config document could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed entry in an environment variable
    #[error("invalid environment entry '{entry}' in {variable}")]
    InvalidEnvEntry { variable: String, entry: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl FacadeError {
    pub fn invalid_severity(name: impl Into<String>) -> Self {
        FacadeError::InvalidSeverity { name: name.into() }
    }

    pub fn invalid_tag_style(name: impl Into<String>) -> Self {
        FacadeError::InvalidTagStyle { name: name.into() }
    }

    pub fn malformed_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        FacadeError::MalformedPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_env_entry(variable: impl Into<String>, entry: impl Into<String>) -> Self {
        FacadeError::InvalidEnvEntry {
            variable: variable.into(),
            entry: entry.into(),
        }
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        FacadeError::Other(msg.into())
    }
}
