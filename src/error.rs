//! Error types for the mechdraw library

use std::io;
use thiserror::Error;

/// Main error type for mechdraw operations
#[derive(Debug, Error)]
pub enum DraftError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Standard definition source could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Standard definition parsed but is semantically broken
    #[error("Invalid standard definition: {0}")]
    Config(String),

    /// A standard-definition key required at use time is absent
    #[error("No entry '{key}' in {table}")]
    Lookup {
        /// Which definition table was queried
        table: &'static str,
        /// The key that failed to resolve
        key: String,
    },

    /// A drawing parameter violates a strategy precondition
    #[error("Invalid parameter '{parameter}': {constraint}")]
    InvalidParameter {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The constraint that was violated
        constraint: String,
    },

    /// Strategy name was never registered
    #[error("Unknown strategy '{name}', registered: [{registered}]")]
    UnknownStrategy {
        name: String,
        registered: String,
    },

    /// Strategy name is already registered
    #[error("Strategy '{0}' is already registered")]
    DuplicateStrategy(String),

    /// A template generation phase failed
    #[error("Drawing generation failed in phase '{phase}': {source}")]
    Template {
        /// Name of the phase that failed
        phase: &'static str,
        /// The originating error
        #[source]
        source: Box<DraftError>,
    },
}

impl DraftError {
    /// Shorthand for an invalid-parameter error
    pub fn invalid_parameter(parameter: &'static str, constraint: impl Into<String>) -> Self {
        DraftError::InvalidParameter {
            parameter,
            constraint: constraint.into(),
        }
    }

    /// Shorthand for a lookup failure
    pub fn lookup(table: &'static str, key: impl Into<String>) -> Self {
        DraftError::Lookup {
            table,
            key: key.into(),
        }
    }

    /// Wrap an error as a template phase failure
    pub fn in_phase(phase: &'static str, source: DraftError) -> Self {
        DraftError::Template {
            phase,
            source: Box::new(source),
        }
    }
}

/// Result type alias for mechdraw operations
pub type Result<T> = std::result::Result<T, DraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_display() {
        let err = DraftError::lookup("layer_mapping", "VISIBLE");
        assert_eq!(err.to_string(), "No entry 'VISIBLE' in layer_mapping");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = DraftError::invalid_parameter("radius", "must be > 0, got -5");
        assert!(err.to_string().contains("radius"));
        assert!(err.to_string().contains("must be > 0"));
    }

    #[test]
    fn test_template_wraps_cause() {
        let cause = DraftError::lookup("text_heights", "NORMAL");
        let err = DraftError::in_phase("main_view", cause);
        assert!(err.to_string().contains("main_view"));
        assert!(err.to_string().contains("NORMAL"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DraftError = io_err.into();
        assert!(matches!(err, DraftError::Io(_)));
    }
}
