//! Module-LWE layer of the pqe hybrid cryptosystem
//!
//! One key pair serves two purposes:
//!
//! - a Fujisaki-Okamoto transformed KEM whose decapsulation never branches
//!   on the validity of the ciphertext ([`kem`]),
//! - the lattice half of the hybrid signature: Fiat-Shamir with aborts over
//!   the same `t = A·s1 + s2`, without the `t0`/hint split ([`sign`]).
//!
//! The Fiat-Shamir challenge itself is formed by the combiner, which binds
//! the group-layer proof into it.

#![forbid(unsafe_code)]

pub mod kem;
pub mod keys;
pub mod polyvec;
pub mod rounding;
pub mod sampling;
pub mod sign;

pub use kem::{decapsulate, decapsulate_masked, encapsulate, LweCiphertext};
pub use keys::{keygen, keygen_from_seed, LweKeyPair, LwePublicKey, LweSecretKey};
pub use sign::{commit, mask_seed, respond, verify_response, Commitment};

use pqe_algorithms::{Polynomial, PqeModulus};

/// Ring element of Z_q[X]/(X^256 + 1)
pub type Poly = Polynomial<PqeModulus>;
