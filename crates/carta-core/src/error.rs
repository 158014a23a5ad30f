//! Unified error types for the carta ecosystem
//!
//! This module provides a common error type [`CartaError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `CartaError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use carta_core::{CartaError, CartaResult};
//!
//! fn process_graph(path: &str) -> CartaResult<()> {
//!     let graph = load_graph(path)?;
//!     sweep_selections(&graph)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all carta operations.
///
/// This enum provides a common error representation for the carta ecosystem,
/// allowing errors from I/O, parsing, solving, and validation to be handled
/// uniformly.
#[derive(Error, Debug)]
pub enum CartaError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver/algorithm errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using CartaError.
pub type CartaResult<T> = Result<T, CartaError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for CartaError {
    fn from(err: anyhow::Error) -> Self {
        CartaError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for CartaError {
    fn from(s: String) -> Self {
        CartaError::Other(s)
    }
}

impl From<&str> for CartaError {
    fn from(s: &str) -> Self {
        CartaError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for CartaError {
    fn from(err: serde_json::Error) -> Self {
        CartaError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CartaError::Solver("bracketing failed".into());
        assert!(err.to_string().contains("Solver error"));
        assert!(err.to_string().contains("bracketing failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let carta_err: CartaError = io_err.into();
        assert!(matches!(carta_err, CartaError::Io(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> CartaResult<()> {
            Err(CartaError::Validation("test".into()))
        }

        fn outer() -> CartaResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
