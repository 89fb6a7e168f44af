//! Error handling for arithmetic primitives

use std::borrow::Cow;
use std::fmt;

use pqe_api::Error as CoreError;

/// The error type for arithmetic primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Structurally invalid encoding (out-of-range coefficient, invalid
    /// permutation, non-canonical braid, non-zero padding)
    Encoding {
        /// Object being decoded
        context: &'static str,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Processing error during an arithmetic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<R: Into<Cow<'static, str>>>(name: &'static str, reason: R) -> Self {
        Error::Parameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand to create an Encoding error
    pub fn encoding(context: &'static str, reason: &'static str) -> Self {
        Error::Encoding { context, reason }
    }
}

/// Result type for primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Encoding { context, reason } => {
                write!(f, "Invalid encoding of {}: {}", context, reason)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

// Implement conversion to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                message: reason.into_owned(),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::Encoding { context, reason } => CoreError::MalformedInput {
                context,
                message: reason.to_string(),
            },
            Error::Processing { operation, details } => CoreError::InvalidParameter {
                context: operation,
                message: details.to_string(),
            },
        }
    }
}

// Include the validation submodule
pub mod validate;
