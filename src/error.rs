//! Error types for memokit
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Memo Error Enum ==
/// Error returned by a memoized call.
///
/// The wrapped function's own error travels unchanged inside
/// [`MemoError::Computation`]; nothing is cached when either variant is returned.
#[derive(Error, Debug)]
pub enum MemoError<E> {
    /// The wrapped function failed
    #[error("Computation failed: {0}")]
    Computation(E),

    /// The key function (or default argument serialization) failed
    #[error("Key derivation failed: {0}")]
    KeyDerivation(anyhow::Error),
}

impl<E> MemoError<E> {
    /// Returns the wrapped function's error, if that is what failed.
    pub fn into_computation(self) -> Option<E> {
        match self {
            MemoError::Computation(err) => Some(err),
            MemoError::KeyDerivation(_) => None,
        }
    }

    /// True when the key could not be derived.
    pub fn is_key_derivation(&self) -> bool {
        matches!(self, MemoError::KeyDerivation(_))
    }
}

// == Shape Error Enum ==
/// Errors raised by the data-shaping helpers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// group_n was asked for groups of zero elements
    #[error("Group size must be greater than zero")]
    ZeroGroupSize,

    /// pick/omit was handed something other than a JSON object
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(String),
}

// == Result Type Aliases ==
/// Convenience Result type for memoized calls.
pub type MemoResult<T, E> = std::result::Result<T, MemoError<E>>;

/// Convenience Result type for the shape helpers.
pub type Result<T> = std::result::Result<T, ShapeError>;
