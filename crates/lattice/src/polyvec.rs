//! Vectors and matrices over the ring

use pqe_algorithms::poly::prelude::*;
use pqe_algorithms::xof::shake128_reader;
use pqe_api::Result;
use zeroize::Zeroize;

use crate::Poly;

/// A vector of ring elements
///
/// Whether the entries are in the coefficient or the NTT domain is tracked
/// by the caller, as for [`Polynomial`].
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct PolyVec {
    pub(crate) polys: Vec<Poly>,
}

impl PolyVec {
    /// Zero vector of dimension `len`
    pub fn zero(len: usize) -> Self {
        Self {
            polys: vec![Poly::zero(); len],
        }
    }

    /// Wrap existing polynomials
    pub fn from_polys(polys: Vec<Poly>) -> Self {
        Self { polys }
    }

    /// Dimension
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Whether the vector has no entries
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Entries
    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    /// Forward NTT on every entry
    pub fn ntt_inplace(&mut self) -> Result<()> {
        for p in self.polys.iter_mut() {
            p.ntt_inplace()?;
        }
        Ok(())
    }

    /// Inverse NTT on every entry
    pub fn inv_ntt_inplace(&mut self) -> Result<()> {
        for p in self.polys.iter_mut() {
            p.from_ntt_inplace()?;
        }
        Ok(())
    }

    /// Entry-wise sum
    pub fn add(&self, other: &Self) -> Self {
        Self {
            polys: self
                .polys
                .iter()
                .zip(other.polys.iter())
                .map(|(a, b)| a.add(b))
                .collect(),
        }
    }

    /// Entry-wise difference
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            polys: self
                .polys
                .iter()
                .zip(other.polys.iter())
                .map(|(a, b)| a.sub(b))
                .collect(),
        }
    }

    /// Multiply every entry by one ring element; all operands in NTT domain
    pub fn scale_ntt(&self, c_hat: &Poly) -> Self {
        Self {
            polys: self.polys.iter().map(|p| p.pointwise_mul(c_hat)).collect(),
        }
    }

    /// `Σ self[i]·other[i]`; both operands and the result in NTT domain
    pub fn inner_product_ntt(&self, other: &Self) -> Poly {
        let mut acc = Poly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc = acc.add(&a.pointwise_mul(b));
        }
        acc
    }

    /// Largest centered coefficient over all entries
    pub fn infinity_norm(&self) -> u32 {
        self.polys
            .iter()
            .map(|p| p.infinity_norm())
            .fold(0, u32::max)
    }

    /// Copy with every entry transformed into the NTT domain
    pub fn to_ntt(&self) -> Result<Self> {
        let mut out = self.clone();
        out.ntt_inplace()?;
        Ok(out)
    }
}

/// The public k×l matrix A, kept in the NTT domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<PolyVec>,
}

impl Matrix {
    /// Expand A from ρ: entry (i, j) is sampled from SHAKE128(ρ ‖ j ‖ i)
    pub fn expand(rho: &[u8; 32], k: usize, l: usize) -> Result<Self> {
        let mut rows = Vec::with_capacity(k);
        for i in 0..k {
            let mut row = Vec::with_capacity(l);
            for j in 0..l {
                let mut xof = shake128_reader(&[rho, &[j as u8, i as u8]]);
                let mut a = <DefaultSamplers as UniformSampler<PqeModulus>>::sample_uniform(&mut xof)?;
                // a uniform polynomial is uniform in either domain; the
                // transform keeps the layout aligned with the reference
                a.ntt_inplace()?;
                row.push(a);
            }
            rows.push(PolyVec::from_polys(row));
        }
        Ok(Self { rows })
    }

    /// Number of rows k
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// `A·v` for `v` of dimension l in NTT domain; result in NTT domain
    pub fn mul_vec(&self, v_hat: &PolyVec) -> PolyVec {
        PolyVec::from_polys(
            self.rows
                .iter()
                .map(|row| row.inner_product_ntt(v_hat))
                .collect(),
        )
    }

    /// `Aᵀ·v` for `v` of dimension k in NTT domain; result in NTT domain
    pub fn transpose_mul_vec(&self, v_hat: &PolyVec) -> PolyVec {
        let l = self.rows.first().map_or(0, PolyVec::len);
        let mut out = PolyVec::zero(l);
        for (row, vi) in self.rows.iter().zip(v_hat.polys.iter()) {
            for (acc, a) in out.polys.iter_mut().zip(row.polys.iter()) {
                *acc = acc.add(&a.pointwise_mul(vi));
            }
        }
        out
    }
}
