//! Public API traits and error types for the pqe hybrid cryptosystem
//!
//! This crate provides the public API surface shared by every layer of the
//! workspace: the error taxonomy, the `Kem`, `Pke` and `Signature` traits,
//! and the byte serialization contracts for public and secret material.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};

pub use traits::{Kem, Pke, Serialize, SerializeSecret, Signature};

// Re-export trait modules for direct access
pub use traits::{kem, pke, serialize, signature};
