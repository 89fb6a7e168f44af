//! ntt.rs - Number Theoretic Transform over Z_Q[X]/(X^256 + 1)
//!
//! Cooley-Tukey forward transform and Gentleman-Sande inverse with the
//! bit-reversed twiddle table of the modulus. Coefficients stay in plain
//! form (no Montgomery representation): every product is formed in `u64`
//! and reduced with `%` immediately, so no value wraps. Output of the forward
//! transform is in bit-reversed order, which pointwise multiplication does
//! not care about.

use super::params::NttModulus;
use super::polynomial::Polynomial;
use crate::error::{Error, Result};

/// Trait for forward Number Theoretic Transform
pub trait NttOperator<M: NttModulus> {
    /// Performs the forward NTT on a polynomial in place
    fn ntt(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Trait for inverse Number Theoretic Transform
pub trait InverseNttOperator<M: NttModulus> {
    /// Performs the inverse NTT on a polynomial in place, including the
    /// final scaling by N^-1
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Cooley-Tukey NTT implementation
pub struct CooleyTukeyNtt;

#[inline(always)]
fn mul_mod<M: NttModulus>(a: u32, b: u32) -> u32 {
    ((a as u64 * b as u64) % M::Q as u64) as u32
}

fn check_degree<M: NttModulus>() -> Result<()> {
    if M::N != 256 || M::ZETAS.len() != 256 {
        return Err(Error::param("ntt", "transform is defined for N = 256 only"));
    }
    Ok(())
}

impl<M: NttModulus> NttOperator<M> for CooleyTukeyNtt {
    fn ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_degree::<M>()?;
        let q = M::Q;
        let a = poly.as_mut_coeffs_slice();

        let mut k = 0usize;
        let mut len = 128usize;
        while len > 0 {
            let mut start = 0usize;
            while start < 256 {
                k += 1;
                let zeta = M::ZETAS[k];
                for j in start..start + len {
                    let t = mul_mod::<M>(zeta, a[j + len]);
                    a[j + len] = (a[j] + q - t) % q;
                    a[j] = (a[j] + t) % q;
                }
                start += 2 * len;
            }
            len >>= 1;
        }

        Ok(())
    }
}

impl<M: NttModulus> InverseNttOperator<M> for CooleyTukeyNtt {
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_degree::<M>()?;
        let q = M::Q;
        let a = poly.as_mut_coeffs_slice();

        let mut k = 256usize;
        let mut len = 1usize;
        while len < 256 {
            let mut start = 0usize;
            while start < 256 {
                k -= 1;
                let zeta = q - M::ZETAS[k];
                for j in start..start + len {
                    let t = a[j];
                    a[j] = (t + a[j + len]) % q;
                    a[j + len] = mul_mod::<M>(zeta, (t + q - a[j + len]) % q);
                }
                start += 2 * len;
            }
            len <<= 1;
        }

        for c in a.iter_mut() {
            *c = mul_mod::<M>(*c, M::N_INV);
        }

        Ok(())
    }
}

/// Extension methods for Polynomial to support NTT operations
impl<M: NttModulus> Polynomial<M> {
    /// Convert polynomial to NTT domain in-place
    pub fn ntt_inplace(&mut self) -> Result<()> {
        CooleyTukeyNtt::ntt(self)
    }

    /// Convert polynomial from NTT domain in-place
    pub fn from_ntt_inplace(&mut self) -> Result<()> {
        CooleyTukeyNtt::inv_ntt(self)
    }

    /// Negacyclic product of two coefficient-domain polynomials
    pub fn ntt_mul(&self, other: &Self) -> Result<Self> {
        let mut a = self.clone();
        let mut b = other.clone();
        a.ntt_inplace()?;
        b.ntt_inplace()?;
        let mut c = a.pointwise_mul(&b);
        c.from_ntt_inplace()?;
        Ok(c)
    }
}
