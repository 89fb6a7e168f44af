//! Pure data model for known-answer vectors
//! No dependency on the rest of the harness.

use pqe_params::SecurityLevel;
use serde::{Deserialize, Serialize};

/// Operation a vector exercises
///
/// Every operation starts from a `ChaCha20Rng` seeded with the vector's
/// seed and generates a key pair from it; the same generator then feeds
/// the operation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KatOperation {
    /// Output: public key ‖ secret key
    Keygen,
    /// Output: ciphertext of the input
    Encrypt,
    /// Output: signature of the input
    Sign,
}

/// One known-answer vector
///
/// `input` is the hex message, `expected_output` the hex SHA3-256 of the
/// produced bytes. Byte-exact operations carry zero tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVector {
    pub label: String,
    pub level: SecurityLevel,
    pub operation: KatOperation,
    /// 32-byte generator seed, hex
    pub seed: String,
    #[serde(default)]
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub tolerance: f64,
}

/// Recipe for generating a vector
#[derive(Debug, Clone, PartialEq)]
pub struct KatSeed {
    pub label: String,
    pub level: SecurityLevel,
    pub operation: KatOperation,
    pub seed: [u8; 32],
    pub input: Vec<u8>,
}

impl KatSeed {
    pub fn new(label: impl Into<String>, level: SecurityLevel, operation: KatOperation, seed: [u8; 32]) -> Self {
        Self {
            label: label.into(),
            level,
            operation,
            seed,
            input: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: &[u8]) -> Self {
        self.input = input.to_vec();
        self
    }
}

/// Top-level layout of a vector file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorFile {
    #[serde(default)]
    pub description: Option<String>,
    pub vectors: Vec<TestVector>,
}
