//! Trait definitions shared across the layer crates.

pub mod kem;
pub mod pke;
pub mod serialize;
pub mod signature;

pub use kem::Kem;
pub use pke::Pke;
pub use serialize::{Serialize, SerializeSecret};
pub use signature::Signature;
