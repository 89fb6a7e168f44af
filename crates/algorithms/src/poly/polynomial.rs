//! polynomial.rs - Ring elements of Z_Q[X]/(X^N + 1)

use core::marker::PhantomData;

use super::params::Modulus;
use crate::error::{Error, Result};
use zeroize::Zeroize;

/// A polynomial in a ring R_Q = Z_Q[X]/(X^N + 1)
///
/// Coefficients are kept fully reduced in `[0, Q)`. Whether a value is in
/// the coefficient or the NTT domain is tracked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Polynomial<M: Modulus> {
    /// Coefficients of the polynomial, stored in standard representation
    pub coeffs: Vec<u32>,
    _marker: PhantomData<M>,
}

impl<M: Modulus> Polynomial<M> {
    /// Creates a new polynomial with all coefficients set to zero
    pub fn zero() -> Self {
        Self {
            coeffs: vec![0; M::N],
            _marker: PhantomData,
        }
    }

    /// Creates a polynomial from a slice of reduced coefficients
    pub fn from_coeffs(coeffs_slice: &[u32]) -> Result<Self> {
        if coeffs_slice.len() != M::N {
            return Err(Error::Length {
                context: "Polynomial::from_coeffs",
                expected: M::N,
                actual: coeffs_slice.len(),
            });
        }
        if coeffs_slice.iter().any(|&c| c >= M::Q) {
            return Err(Error::encoding("polynomial", "coefficient not reduced"));
        }

        Ok(Self {
            coeffs: coeffs_slice.to_vec(),
            _marker: PhantomData,
        })
    }

    /// Creates a polynomial from signed coefficients of small magnitude
    ///
    /// Each value must satisfy `|c| < Q`.
    pub fn from_centered(values: &[i32]) -> Self {
        let mut result = Self::zero();
        for (dst, &v) in result.coeffs.iter_mut().zip(values.iter()) {
            *dst = Self::from_signed(v as i64);
        }
        result
    }

    /// Returns the degree N of the polynomial
    pub fn degree() -> usize {
        M::N
    }

    /// Returns the modulus Q for coefficient arithmetic
    pub fn modulus_q() -> u32 {
        M::Q
    }

    /// Returns a slice view of the coefficients
    pub fn as_coeffs_slice(&self) -> &[u32] {
        &self.coeffs[..M::N]
    }

    /// Returns a mutable slice view of the coefficients
    pub fn as_mut_coeffs_slice(&mut self) -> &mut [u32] {
        &mut self.coeffs[..M::N]
    }

    /// Branch-free modular reduction of a value in `[0, 2Q)`
    #[inline(always)]
    fn reduce_coefficient(a: u32) -> u32 {
        let q = M::Q;
        let mask = ((a >= q) as u32).wrapping_neg();
        a.wrapping_sub(q & mask)
    }

    /// Branch-free map of a value in `(-Q, Q)` into `[0, Q)`
    #[inline(always)]
    pub fn from_signed(a: i64) -> u32 {
        let q = M::Q as i64;
        let neg_mask = a >> 63;
        (a + (q & neg_mask)) as u32
    }

    /// Centered representative of a reduced coefficient, in
    /// `[-(Q-1)/2, (Q-1)/2]`
    #[inline(always)]
    pub fn centered(c: u32) -> i32 {
        let q = M::Q as i32;
        let c = c as i32;
        let over_mask = ((q - 1) / 2 - c) >> 31;
        c - (q & over_mask)
    }

    /// Largest centered absolute value over all coefficients
    ///
    /// Runs over every coefficient without early exit.
    pub fn infinity_norm(&self) -> u32 {
        let mut norm = 0u32;
        for &c in self.as_coeffs_slice() {
            let v = Self::centered(c);
            let sign = v >> 31;
            let abs = ((v ^ sign) - sign) as u32;
            let bigger = ((norm < abs) as u32).wrapping_neg();
            norm = (abs & bigger) | (norm & !bigger);
        }
        norm
    }

    /// Polynomial addition modulo Q
    pub fn add(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for ((r, &a), &b) in result.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
            *r = Self::reduce_coefficient(a + b);
        }
        result
    }

    /// Polynomial subtraction modulo Q
    pub fn sub(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for ((r, &a), &b) in result.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
            *r = Self::from_signed(a as i64 - b as i64);
        }
        result
    }

    /// Polynomial negation modulo Q
    pub fn neg(&self) -> Self {
        let mut result = Self::zero();
        for (r, &a) in result.coeffs.iter_mut().zip(&self.coeffs) {
            // Mask is 0xFFFF_FFFF when coeff ≠ 0, 0 otherwise
            let mask = ((a != 0) as u32).wrapping_neg();
            *r = (M::Q - a) & mask;
        }
        result
    }

    /// Scalar multiplication
    pub fn scalar_mul(&self, scalar: u32) -> Self {
        let mut result = Self::zero();
        for (r, &a) in result.coeffs.iter_mut().zip(&self.coeffs) {
            *r = ((a as u64 * scalar as u64) % M::Q as u64) as u32;
        }
        result
    }

    /// Coefficient-wise product, used on NTT-domain operands
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for ((r, &a), &b) in result.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
            *r = ((a as u64 * b as u64) % M::Q as u64) as u32;
        }
        result
    }

    /// Schoolbook negacyclic multiplication (for correctness testing)
    pub fn schoolbook_mul(&self, other: &Self) -> Self {
        let q = M::Q as u64;
        let n = M::N;
        // accumulate positive and wrapped (negated) products separately
        let mut pos = vec![0u64; n];
        let mut neg = vec![0u64; n];

        for i in 0..n {
            for j in 0..n {
                let prod = (self.coeffs[i] as u64) * (other.coeffs[j] as u64) % q;
                let idx = i + j;
                if idx < n {
                    pos[idx] = (pos[idx] + prod) % q;
                } else {
                    neg[idx - n] = (neg[idx - n] + prod) % q;
                }
            }
        }

        let mut result = Self::zero();
        for (r, (&p, &m)) in result.coeffs.iter_mut().zip(pos.iter().zip(neg.iter())) {
            *r = ((p + q - m) % q) as u32;
        }
        result
    }

    /// In-place coefficient reduction to ensure all coefficients are < Q
    pub fn reduce_coeffs(&mut self) {
        for c in self.as_mut_coeffs_slice() {
            *c %= M::Q;
        }
    }
}
