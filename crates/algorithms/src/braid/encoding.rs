//! Byte encodings of normal forms
//!
//! The compact form is `inf (i16 LE) ‖ r (u16 LE) ‖ A_1 … A_r`, one byte
//! per strand image; its length follows from the header. The fixed form
//! pads it with zeros up to a declared factor capacity. The canonical form
//! widens the header to 32 bits; it is only ever hashed or fed to a KDF.

use super::normal_form::{check_strands, Braid};
use super::permutation::{make_left_weighted, Permutation};
use crate::error::{validate, Error, Result};

const HEADER: usize = 4;

impl Braid {
    /// Size of the fixed encoding
    pub const fn fixed_len(strands: usize, max_factors: usize) -> usize {
        HEADER + max_factors * strands
    }

    /// Size of the compact encoding of this braid
    pub fn compact_len(&self) -> usize {
        HEADER + self.canonical_length() * self.strands()
    }

    /// `inf ‖ r ‖ A_1 … A_r` without padding
    ///
    /// Fails if the normal form does not fit `max_factors`.
    pub fn to_compact_bytes(&self, max_factors: usize) -> Result<Vec<u8>> {
        let r = self.canonical_length();
        if r > max_factors || self.infimum().unsigned_abs() as usize > max_factors {
            return Err(Error::Processing {
                operation: "braid encoding",
                details: "normal form exceeds factor capacity",
            });
        }
        let mut out = Vec::with_capacity(Self::fixed_len(self.strands(), max_factors));
        out.extend_from_slice(&(self.infimum() as i16).to_le_bytes());
        out.extend_from_slice(&(r as u16).to_le_bytes());
        for f in self.factors() {
            out.extend_from_slice(f.images());
        }
        Ok(out)
    }

    /// Fixed-width encoding padded to `max_factors` factors
    pub fn to_fixed_bytes(&self, max_factors: usize) -> Result<Vec<u8>> {
        let mut out = self.to_compact_bytes(max_factors)?;
        out.resize(Self::fixed_len(self.strands(), max_factors), 0);
        Ok(out)
    }

    /// Strict inverse of [`Braid::to_fixed_bytes`]
    ///
    /// Rejects anything that is not the encoding of a normal form: bad
    /// header bounds, non-permutations, trivial or Δ factors, pairs that are
    /// not left-weighted and non-zero padding.
    pub fn from_fixed_bytes(bytes: &[u8], strands: usize, max_factors: usize) -> Result<Self> {
        check_strands(strands)?;
        validate::length("braid", bytes.len(), Self::fixed_len(strands, max_factors))?;
        let (braid, used) = Self::read_compact(bytes, strands, max_factors)?;
        validate::encoding(
            bytes[used..].iter().all(|&b| b == 0),
            "braid",
            "non-zero padding",
        )?;
        Ok(braid)
    }

    /// Decode one compact braid from the front of `bytes`
    ///
    /// Returns the braid and the number of bytes it occupied. Applies the
    /// same normal-form checks as [`Braid::from_fixed_bytes`].
    pub fn read_compact(bytes: &[u8], strands: usize, max_factors: usize) -> Result<(Self, usize)> {
        check_strands(strands)?;
        validate::min_length("braid", bytes.len(), HEADER)?;

        let inf = i16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let r = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
        validate::encoding(
            inf.unsigned_abs() as usize <= max_factors,
            "braid",
            "infimum out of range",
        )?;
        validate::encoding(r <= max_factors, "braid", "too many factors")?;
        let used = HEADER + r * strands;
        validate::min_length("braid", bytes.len(), used)?;

        let mut factors: Vec<Permutation> = Vec::with_capacity(r);
        for chunk in bytes[HEADER..used].chunks_exact(strands) {
            let f = Permutation::from_images(chunk)?;
            validate::encoding(!f.is_identity() && !f.is_delta(), "braid", "improper factor")?;
            if let Some(prev) = factors.last() {
                let (mut a, mut b) = (prev.clone(), f.clone());
                validate::encoding(
                    !make_left_weighted(&mut a, &mut b),
                    "braid",
                    "factors not left-weighted",
                )?;
            }
            factors.push(f);
        }
        Ok((Self::from_parts(strands, inf, factors), used))
    }

    /// Unpadded encoding of the normal form
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.canonical_length() * self.strands());
        out.extend_from_slice(&self.infimum().to_le_bytes());
        out.extend_from_slice(&(self.canonical_length() as u32).to_le_bytes());
        for f in self.factors() {
            out.extend_from_slice(f.images());
        }
        out
    }
}
