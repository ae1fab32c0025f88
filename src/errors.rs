//! Typed error hierarchy for the console core.
//!
//! - `PollError`: async task polling failures (transport or task-reported)
//! - `SchemaError`: loading a dynamic form schema
//! - `StoreError`: reading or writing persisted preferences

use thiserror::Error;

/// Message used when a transport failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Terminal failure of a poll session. Neither variant is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    /// The status request itself failed (network, HTTP status, bad body).
    #[error("{0}")]
    Transport(String),

    /// The task finished and reported an exception.
    #[error("{0}")]
    Task(String),
}

impl PollError {
    /// Build a transport error, substituting [`UNKNOWN_ERROR`] for an empty message.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(UNKNOWN_ERROR.to_string())
        } else {
            Self::Transport(message)
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transport(msg) | Self::Task(msg) => msg,
        }
    }
}

/// Errors from loading a dynamic form schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file at {path}: {source}")]
    ReadFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors from the key-value preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access preference file at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_error_transport_falls_back_to_unknown() {
        let err = PollError::transport("");
        assert_eq!(err, PollError::Transport("Unknown error".to_string()));
        assert_eq!(err.to_string(), "Unknown error");

        let err = PollError::transport("   ");
        assert_eq!(err.message(), UNKNOWN_ERROR);
    }

    #[test]
    fn poll_error_keeps_message() {
        let err = PollError::transport("connection refused");
        assert_eq!(err.message(), "connection refused");

        let err = PollError::Task("boom".into());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn poll_error_variants_are_distinct() {
        let transport = PollError::transport("x");
        let task = PollError::Task("x".into());
        assert!(matches!(transport, PollError::Transport(_)));
        assert!(matches!(task, PollError::Task(_)));
        assert_ne!(transport, task);
    }

    #[test]
    fn schema_error_read_failed_carries_path() {
        use std::path::PathBuf;
        let path = PathBuf::from("/tmp/schema.json");
        let err = SchemaError::ReadFailed {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        match &err {
            SchemaError::ReadFailed { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected ReadFailed"),
        }
        assert!(err.to_string().contains("/tmp/schema.json"));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&PollError::Task("x".into()));
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_std_error(&SchemaError::Json(json_err));
        let toml_err = toml::from_str::<toml::Table>("=").unwrap_err();
        assert_std_error(&StoreError::Parse(toml_err));
    }
}
