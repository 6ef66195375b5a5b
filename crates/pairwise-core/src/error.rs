//! Error types for Pairwise.

use thiserror::Error;

/// A shared error type for the whole Pairwise workspace.
///
/// Variants mirror the outcomes the scoring service can produce plus the local
/// failure modes (parsing, configuration, transport). Callers are expected to
/// branch on `Unauthenticated`, `NotFound` and `Conflict` separately; they are
/// not interchangeable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairwiseError {
    /// Malformed identifier or URL. Raised locally, no request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or expired credential.
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// The service has no such entity
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The service already holds this entity
    #[error("Entity already exists: {entity_type} '{id}'")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },

    /// Transport-level failure (DNS, connect, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other non-success HTTP status
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// A payload or file could not be encoded or decoded
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file access failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// Broken internal invariant
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PairwiseError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity_type,
            id: id.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps a non-success HTTP status to the matching variant.
    ///
    /// 401 and 403 both mean the credential was refused, so they collapse into
    /// `Unauthenticated`.
    pub fn from_status(
        status: u16,
        entity_type: &'static str,
        id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        match status {
            401 | 403 => Self::Unauthenticated(body.into()),
            404 => Self::not_found(entity_type, id),
            409 => Self::conflict(entity_type, id),
            _ => Self::Http {
                status,
                message: body.into(),
            },
        }
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is an Unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is a transport failure (network or timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

impl From<std::io::Error> for PairwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PairwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PairwiseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PairwiseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for PairwiseError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {}", err))
    }
}

impl From<reqwest::Error> for PairwiseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A type alias for `Result<T, PairwiseError>`.
pub type Result<T> = std::result::Result<T, PairwiseError>;
