//! serialize.rs - Polynomial coefficient packing and unpacking
//!
//! Coefficients are packed little-endian, least significant bit first, with
//! no padding between coefficients. Unpacking never masks: the caller states
//! the largest admissible value, and any coefficient above it is an error.

use super::params::Modulus;
use super::polynomial::Polynomial;
use crate::error::{Error, Result};

/// Trait for packing polynomial coefficients into a byte array
pub trait CoefficientPacker<M: Modulus> {
    /// Packs the polynomial's coefficients into a byte vector
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>>;
}

/// Trait for unpacking polynomial coefficients from a byte array
pub trait CoefficientUnpacker<M: Modulus> {
    /// Unpacks coefficients, rejecting any value above `max_value`
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize, max_value: u32)
        -> Result<Polynomial<M>>;
}

/// Default implementation for coefficient serialization
pub struct DefaultCoefficientSerde;

fn check_width(bits_per_coeff: usize, context: &'static str) -> Result<()> {
    if bits_per_coeff == 0 || bits_per_coeff > 24 {
        return Err(Error::param(
            context,
            format!("bits_per_coeff must be in range [1, 24], got {}", bits_per_coeff),
        ));
    }
    Ok(())
}

/// Pack arbitrary values of `bits` bits each
///
/// Values are masked to `bits` bits; callers check ranges beforehand.
pub fn pack_bits(values: &[u32], bits: usize, out: &mut Vec<u8>) {
    let mask = ((1u64 << bits) - 1) as u32;
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    for &v in values {
        acc |= ((v & mask) as u64) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
}

/// Inverse of [`pack_bits`] for exactly `count` values
///
/// `bytes` must be exactly `bytes_required(bits, count)` long.
pub fn unpack_bits(bytes: &[u8], bits: usize, count: usize) -> Result<Vec<u32>> {
    let expected = bytes_required(bits, count);
    if bytes.len() != expected {
        return Err(Error::Length {
            context: "coefficient unpacking",
            expected,
            actual: bytes.len(),
        });
    }

    let mask = (1u64 << bits) - 1;
    let mut values = Vec::with_capacity(count);
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    let mut iter = bytes.iter();
    while values.len() < count {
        while acc_bits < bits {
            // length was checked above, so the stream cannot run dry
            let byte = iter.next().copied().unwrap_or(0);
            acc |= (byte as u64) << acc_bits;
            acc_bits += 8;
        }
        values.push((acc & mask) as u32);
        acc >>= bits;
        acc_bits -= bits;
    }

    // unused trailing bits must be zero
    if acc != 0 {
        return Err(Error::encoding("packed coefficients", "non-zero padding bits"));
    }
    Ok(values)
}

impl<M: Modulus> CoefficientPacker<M> for DefaultCoefficientSerde {
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>> {
        check_width(bits_per_coeff, "coefficient packing")?;
        let mut packed = Vec::with_capacity(bytes_required(bits_per_coeff, M::N));
        pack_bits(poly.as_coeffs_slice(), bits_per_coeff, &mut packed);
        Ok(packed)
    }
}

impl<M: Modulus> CoefficientUnpacker<M> for DefaultCoefficientSerde {
    fn unpack_coeffs(
        bytes: &[u8],
        bits_per_coeff: usize,
        max_value: u32,
    ) -> Result<Polynomial<M>> {
        check_width(bits_per_coeff, "coefficient unpacking")?;
        let values = unpack_bits(bytes, bits_per_coeff, M::N)?;
        if values.iter().any(|&v| v > max_value) {
            return Err(Error::encoding("packed coefficients", "coefficient out of range"));
        }

        let mut poly = Polynomial::<M>::zero();
        poly.coeffs.copy_from_slice(&values);
        Ok(poly)
    }
}

/// Helper function to calculate the number of bytes required for packing
#[allow(clippy::manual_div_ceil)]
pub const fn bytes_required(bits_per_coeff: usize, n: usize) -> usize {
    (n * bits_per_coeff + 7) / 8
}
