//! Data source errors

use serde::{Deserialize, Serialize};

/// Common result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Why a data source call failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceError {
    /// The host could not be reached or the call threw
    Transport(String),
    /// The host refused the change
    Rejected(String),
    /// The point is unknown to the data source
    NotFound(String),
    /// The host answered with something we could not read
    Decode(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SourceError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            SourceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            SourceError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}
