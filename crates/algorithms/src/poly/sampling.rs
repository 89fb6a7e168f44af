//! sampling.rs - Deterministic polynomial samplers
//!
//! Every sampler consumes an extendable-output stream, so the same seed
//! always yields the same polynomial. Fresh randomness enters only through
//! the seeds the callers derive.

use super::params::Modulus;
use super::polynomial::Polynomial;
use crate::error::{Error, Result};
use crate::xof::XofReader;

/// Trait for sampling polynomials uniformly from a byte stream
pub trait UniformSampler<M: Modulus> {
    /// Samples a polynomial with coefficients uniformly random in [0, Q-1]
    fn sample_uniform<X: XofReader>(xof: &mut X) -> Result<Polynomial<M>>;
}

/// Trait for sampling polynomials from a Centered Binomial Distribution (CBD)
pub trait CbdSampler<M: Modulus> {
    /// Samples a polynomial with coefficients from CBD(eta)
    fn sample_cbd<X: XofReader>(xof: &mut X, eta: u32) -> Result<Polynomial<M>>;
}

/// Default implementation of the samplers
pub struct DefaultSamplers;

/// Bits drawn per uniform candidate
fn candidate_bits<M: Modulus>() -> u32 {
    32 - M::Q.leading_zeros()
}

impl<M: Modulus> UniformSampler<M> for DefaultSamplers {
    fn sample_uniform<X: XofReader>(xof: &mut X) -> Result<Polynomial<M>> {
        let bits = candidate_bits::<M>();
        if bits > 24 {
            return Err(Error::param(
                "uniform sampling",
                format!("modulus needs {} bits, at most 24 supported", bits),
            ));
        }
        let mask = (1u32 << bits) - 1;

        let mut poly = Polynomial::<M>::zero();
        let mut filled = 0usize;
        let mut block = [0u8; 168];

        // Rejection sampling on 3-byte little-endian candidates masked to
        // the bit length of Q
        while filled < M::N {
            xof.read(&mut block);
            for chunk in block.chunks_exact(3) {
                let candidate = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]) & mask;
                if candidate < M::Q {
                    poly.coeffs[filled] = candidate;
                    filled += 1;
                    if filled == M::N {
                        break;
                    }
                }
            }
        }

        Ok(poly)
    }
}

impl<M: Modulus> CbdSampler<M> for DefaultSamplers {
    fn sample_cbd<X: XofReader>(xof: &mut X, eta: u32) -> Result<Polynomial<M>> {
        if eta == 0 || eta > 8 {
            return Err(Error::param(
                "CBD sampling",
                format!("eta must be in range [1, 8], got {}", eta),
            ));
        }

        let bits_per_sample = 2 * eta as usize;
        let mut buffer = vec![0u8; (M::N * bits_per_sample).div_ceil(8)];
        xof.read(&mut buffer);

        let bit = |pos: usize| ((buffer[pos / 8] >> (pos % 8)) & 1) as i32;

        let mut poly = Polynomial::<M>::zero();
        for (i, coeff) in poly.coeffs.iter_mut().enumerate() {
            let base = i * bits_per_sample;
            let mut a = 0i32;
            let mut b = 0i32;
            for j in 0..eta as usize {
                a += bit(base + j);
                b += bit(base + eta as usize + j);
            }
            // a - b lies in [-eta, eta]
            *coeff = Polynomial::<M>::from_signed((a - b) as i64);
        }

        Ok(poly)
    }
}
