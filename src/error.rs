//! Error types for diagram rebuilds

use std::fmt;

/// Errors that can occur while configuring or rebuilding a diagram
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The triangulator rejected its input
    TriangulationFailed(String),
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            DiagramError::TriangulationFailed(msg) => write!(f, "triangulation failed: {}", msg),
        }
    }
}

impl std::error::Error for DiagramError {}

/// Result type alias for diagram operations
pub type Result<T> = std::result::Result<T, DiagramError>;
