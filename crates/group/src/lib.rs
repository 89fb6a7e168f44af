//! Braid-group layer of the pqe hybrid cryptosystem
//!
//! Public key `(x, y = a·x·a⁻¹)` with `a` drawn from the left subgroup of
//! B_m. Encryption conjugates with `b` from the right subgroup, which
//! commutes with `a`, so both sides reach the same normal form
//! `a·b·x·b⁻¹·a⁻¹` (Ko-Lee). Signatures prove knowledge of `a` with
//! Sibert-Dehornoy-Girault rounds whose challenge bits are derived from the
//! combined Fiat-Shamir challenge.
//!
//! Braid arithmetic is not constant time; see `pqe_algorithms::braid`.

#![forbid(unsafe_code)]

pub mod kem;
pub mod keys;
pub mod sdg;

pub use kem::{decapsulate, encapsulate, transform, GroupCiphertext, SharedSecret};
pub use keys::{keygen, keygen_from_seed, GroupKeyPair, GroupPublicKey, GroupSecretKey};
pub use sdg::{challenge_bits, commit, prove, verify, GroupProof, ProofCommitments, RoundResponse};

/// Domain separation labels for every XOF and hash in this layer
pub(crate) mod domain {
    pub const KEYGEN: &[u8] = b"pqe-group-keygen";
    pub const BASE: &[u8] = b"pqe-group-base";
    pub const SECRET: &[u8] = b"pqe-group-secret";
    pub const EPHEMERAL: &[u8] = b"pqe-group-ephemeral";
    pub const SHARED: &[u8] = b"pqe-group-shared";
    pub const MASK: &[u8] = b"pqe-sdg-mask";
    pub const COMMIT: &[u8] = b"pqe-sdg-commit";
    pub const CHALLENGE: &[u8] = b"pqe-sdg-challenge";
}
