//! Arithmetic primitives for the pqe hybrid cryptosystem
//!
//! Two independent families live here:
//!
//! - [`poly`]: the ring Z_q[X]/(X^256 + 1) with an NTT, deterministic
//!   samplers driven by SHAKE and bit-exact coefficient packing.
//! - [`braid`]: the Artin braid group B_m with Garside left normal forms,
//!   word sampling and strict fixed-width and compact encodings.
//!
//! The polynomial code is written to be constant-time with respect to
//! coefficient values. The braid code is not: normal-form computation
//! branches on the permutations it processes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

pub mod braid;
pub mod poly;
pub mod xof;

pub use braid::{Braid, Permutation};
pub use poly::params::{Modulus, NttModulus, PqeModulus};
pub use poly::polynomial::Polynomial;
