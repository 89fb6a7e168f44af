//! Constant parameter sets for the pqe hybrid cryptosystem
//!
//! Every value here is a compile-time constant selected by [`SecurityLevel`].
//! Nothing is derived from untrusted input at runtime; decoders look sizes up
//! from the level tag and reject anything that does not match exactly.

pub mod bound;
pub mod level;
pub mod pqe;

pub use level::SecurityLevel;
pub use pqe::{parameters_for, Parameters, LEVEL128, LEVEL192, LEVEL256};

/// Serialized format version shared by every hybrid object
pub const FORMAT_VERSION: u8 = 0x01;

/// Length of every seed, hash-based key and challenge in bytes
pub const SEED_BYTES: usize = 32;

/// Length of the combiner's HMAC-SHA256 tag in bytes
pub const TAG_BYTES: usize = 32;
