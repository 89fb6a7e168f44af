//! Hybrid combiner of the pqe cryptosystem
//!
//! Binds the module-LWE layer and the braid-group layer into one scheme:
//!
//! - encryption runs both KEMs, feeds both secrets through HKDF-SHA256,
//!   encrypts the payload with a SHAKE256 keystream and authenticates the
//!   whole ciphertext with HMAC-SHA256;
//! - signatures share one Fiat-Shamir challenge between the lattice
//!   response and the group proof.
//!
//! Decryption reports every failure after parsing as
//! `Error::AuthenticationFailed` and never releases unauthenticated
//! plaintext.

#![forbid(unsafe_code)]

pub mod ciphertext;
pub mod combiner;
pub mod engine;
pub mod format;
pub mod keys;
pub mod scheme;
pub mod signature;

pub use ciphertext::Ciphertext;
pub use engine::{decrypt, encrypt, sign, verify};
pub use keys::{generate_keypair, keypair_from_seed, HybridPublicKey, HybridSecretKey};
pub use scheme::{
    HybridKem, HybridPke, HybridSharedSecret, HybridSignature, Level128, Level192, Level256,
    LevelMarker, Pqe128, Pqe128Signature, Pqe192, Pqe192Signature, Pqe256, Pqe256Signature,
};
pub use signature::Signature;
