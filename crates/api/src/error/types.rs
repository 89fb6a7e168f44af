//! Error type definitions for cryptographic operations

use thiserror::Error as ThisError;

/// Primary error type for cryptographic operations
///
/// Decryption and verification failures are reported without saying which
/// layer or sub-check rejected the input. Callers must not try to recover
/// more detail from the `context` strings, which only name the operation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A security level outside {128, 192, 256} was requested
    #[error("unsupported security level: {level}")]
    UnsupportedLevel {
        level: u16,
    },

    /// The lattice layer rejected a ciphertext (decoding threshold exceeded
    /// or re-encryption mismatch)
    #[error("decapsulation failed: {context}")]
    DecapsulationFailed {
        context: &'static str,
    },

    /// Tag or MAC mismatch; no plaintext is ever released with this error
    #[error("authentication failed: {context}")]
    AuthenticationFailed {
        context: &'static str,
    },

    /// Structurally invalid input, rejected before any secret-dependent work
    #[error("malformed input in {context}: {message}")]
    MalformedInput {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Unknown level or format-version tag in serialized data
    #[error("unsupported format in {context}: tag 0x{tag:02x}")]
    UnsupportedFormat {
        context: &'static str,
        tag: u8,
    },

    /// The entropy source failed; the operation must not continue
    #[error("insufficient randomness in {context}: {message}")]
    InsufficientRandomness {
        context: &'static str,
        message: String,
    },

    /// Signature verification failed
    #[error("invalid signature: {context}")]
    InvalidSignature {
        context: &'static str,
    },

    /// The signing rejection loop did not terminate within its bound
    #[error("signing failed in {context}: {message}")]
    SigningFailed {
        context: &'static str,
        message: String,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create a `MalformedInput` error
    pub fn malformed(context: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `InvalidParameter` error
    pub fn param(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }

    /// Whether this error belongs to the decoding family (structural
    /// problems detected while parsing, before any key is touched)
    pub fn is_decoding_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::InvalidLength { .. } | Self::UnsupportedFormat { .. }
        )
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self::InsufficientRandomness {
            context: "entropy source",
            message: e.to_string(),
        }
    }
}
