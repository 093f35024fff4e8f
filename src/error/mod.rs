use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Quiz graph loading errors
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to read quiz graph {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed quiz graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Quiz graph has no question nodes")]
    Empty,

    #[error("Start node not found: {node_id}")]
    MissingStart { node_id: String },
}

/// Engine errors.
///
/// Both variants are invalid references supplied by the caller. The session
/// is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Question node not found: {node_id}")]
    UnknownNode { node_id: String },

    #[error("Option index {index} out of range for {node_id} ({available} options)")]
    OptionOutOfRange {
        node_id: String,
        index: usize,
        available: usize,
    },
}

impl EngineError {
    /// Whether this error is an invalid node or option reference.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownNode { .. } | EngineError::OptionOutOfRange { .. }
        )
    }
}

/// Stdio driver protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown method: {method}")]
    UnknownMethod { method: String },

    #[error("Invalid parameters for {method}: {message}")]
    InvalidParameters { method: String, message: String },

    #[error("Cannot proceed: {0}")]
    InvalidReference(#[from] EngineError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for graph loading
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for driver protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
