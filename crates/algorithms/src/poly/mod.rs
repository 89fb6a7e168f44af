//! Polynomial ring engine
//!
//! Arithmetic over Z_Q[X]/(X^N + 1), shared by the lattice KEM and the
//! lattice signature.

pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod sampling;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and traits.
pub mod prelude {
    pub use super::ntt::{CooleyTukeyNtt, InverseNttOperator, NttOperator};
    pub use super::params::{Modulus, NttModulus, PqeModulus};
    pub use super::polynomial::Polynomial;
    pub use super::sampling::{CbdSampler, DefaultSamplers, UniformSampler};
    pub use super::serialize::{
        CoefficientPacker, CoefficientUnpacker, DefaultCoefficientSerde,
    };
}
