//! # pqe
//!
//! A hybrid post-quantum cryptosystem: a module-LWE lattice layer and a
//! braid-group conjugacy layer, bound together by an HKDF/HMAC combiner.
//! Encryption and signatures are available at 128, 192 and 256-bit levels.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pqe::prelude::*;
//!
//! let (pk, sk) = pqe::generate_keypair(SecurityLevel::L192)?;
//! let ct = pqe::encrypt(&pk, b"hello")?;
//! assert_eq!(pqe::decrypt(&sk, &ct)?, b"hello");
//!
//! let sig = pqe::sign(&sk, b"hello")?;
//! assert!(pqe::verify(&pk, b"hello", &sig));
//! # Ok::<(), pqe::api::Error>(())
//! ```
//!
//! The top-level functions draw randomness from the process-wide source in
//! [`rng`]; tests can install a deterministic generator there. The trait
//! front ends (`Pqe128`, `Pqe192Signature`, ...) take an explicit RNG.
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `layers`: re-export the primitive, lattice and group crates
//! - `serde`: serde support for `SecurityLevel`
//! - `full`: all of the above
//!
//! ## Crate Structure
//!
//! - [`pqe-params`]: parameter sets
//! - [`pqe-algorithms`]: polynomial ring, NTT and braid normal forms
//! - [`pqe-lattice`]: module-LWE KEM and signing pieces
//! - [`pqe-group`]: braid KEM and Sibert-Dehornoy-Girault proof
//! - [`pqe-hybrid`]: the combined scheme

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use pqe_api as api;
pub use pqe_common as common;
pub use pqe_hybrid as hybrid;
pub use pqe_internal as internal;
pub use pqe_params as params;

// Feature-gated re-exports
#[cfg(feature = "layers")]
pub use pqe_algorithms as algorithms;

#[cfg(feature = "layers")]
pub use pqe_group as group;

#[cfg(feature = "layers")]
pub use pqe_lattice as lattice;

pub use rand;
pub use zeroize;

pub use pqe_hybrid::{
    Ciphertext, HybridPublicKey, HybridSecretKey, Pqe128, Pqe128Signature, Pqe192,
    Pqe192Signature, Pqe256, Pqe256Signature, Signature,
};
pub use pqe_params::SecurityLevel;

/// Injection points for the process-wide randomness source
pub mod rng {
    pub use pqe_common::rng::{install, reset, GlobalRng};
}

use pqe_api::Result;
use pqe_common::GlobalRng;

/// Generate a hybrid key pair at `level`
pub fn generate_keypair(level: SecurityLevel) -> Result<(HybridPublicKey, HybridSecretKey)> {
    pqe_hybrid::generate_keypair(level, &mut GlobalRng)
}

/// Encrypt `plaintext` to `public_key`
pub fn encrypt(public_key: &HybridPublicKey, plaintext: &[u8]) -> Result<Ciphertext> {
    pqe_hybrid::encrypt(public_key, plaintext, &mut GlobalRng)
}

/// Decrypt `ciphertext`
///
/// Fails with `Error::AuthenticationFailed` whatever went wrong after
/// parsing.
pub fn decrypt(secret_key: &HybridSecretKey, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
    pqe_hybrid::decrypt(secret_key, ciphertext)
}

/// Sign `message`
pub fn sign(secret_key: &HybridSecretKey, message: &[u8]) -> Result<Signature> {
    pqe_hybrid::sign(secret_key, message, &mut GlobalRng)
}

/// Verify `signature` on `message`
pub fn verify(public_key: &HybridPublicKey, message: &[u8], signature: &Signature) -> bool {
    match pqe_hybrid::verify(public_key, message, signature) {
        Ok(()) => true,
        Err(e) => {
            log::trace!("signature rejected: {}", e);
            false
        }
    }
}

/// Common imports for pqe users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Kem, Pke, Serialize, SerializeSecret, Signature as SignatureScheme};

    pub use crate::hybrid::{Ciphertext, HybridPublicKey, HybridSecretKey, Signature};
    pub use crate::params::SecurityLevel;
}
