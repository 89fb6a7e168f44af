//! Compression and high/low-bit decomposition of coefficients

use pqe_params::pqe::PQE_Q;

use crate::polyvec::PolyVec;
use crate::Poly;

const Q: u32 = PQE_Q;

/// `round(2^d · x / q) mod 2^d`
#[inline]
pub fn compress(x: u32, d: usize) -> u32 {
    let t = ((x as u64) << d) + (Q as u64 / 2);
    ((t / Q as u64) as u32) & ((1u32 << d) - 1)
}

/// `round(q · y / 2^d)`
#[inline]
pub fn decompress(y: u32, d: usize) -> u32 {
    ((y as u64 * Q as u64 + (1u64 << (d - 1))) >> d) as u32
}

/// Compress every coefficient of every entry into one flat list
pub fn compress_vec(v: &PolyVec, d: usize) -> Vec<u32> {
    v.polys()
        .iter()
        .flat_map(|p| p.as_coeffs_slice().iter().map(move |&c| compress(c, d)))
        .collect()
}

/// Inverse of [`compress_poly`] up to rounding
pub fn decompress_poly(values: &[u32], d: usize) -> Poly {
    let mut p = Poly::zero();
    for (dst, &v) in p.coeffs.iter_mut().zip(values.iter()) {
        *dst = decompress(v, d);
    }
    p
}

/// Compress one polynomial
pub fn compress_poly(p: &Poly, d: usize) -> Vec<u32> {
    p.as_coeffs_slice().iter().map(|&c| compress(c, d)).collect()
}

/// Split `r` into `(r0, r1)` with `r ≡ r1·α + r0`, `r0 ∈ (-α/2, α/2]`
///
/// `q - 1` maps to `r1 = 0` so that the high part stays below `(q-1)/α`.
/// Branch-free on `r`.
#[inline]
pub fn decompose(r: u32, alpha: u32) -> (i32, u32) {
    let r = r % Q;
    let half = (alpha / 2) as i32;
    let mut r0 = (r % alpha) as i32;
    // r0 > α/2  →  r0 -= α
    r0 -= (alpha as i32) & ((half - r0) >> 31);

    let r1 = ((r as i64 - r0 as i64) / alpha as i64) as u32;
    // r - r0 == q - 1  →  (r0 - 1, 0)
    let wrap = (((r as i64 - r0 as i64) == (Q - 1) as i64) as u32).wrapping_neg();
    let r1 = r1 & !wrap;
    let r0 = r0 - (wrap & 1) as i32;
    (r0, r1)
}

/// High part of [`decompose`]
#[inline]
pub fn high_bits(r: u32, alpha: u32) -> u32 {
    decompose(r, alpha).1
}

/// Low part of [`decompose`]
#[inline]
pub fn low_bits(r: u32, alpha: u32) -> i32 {
    decompose(r, alpha).0
}

/// High parts of every coefficient, flattened
pub fn high_bits_vec(v: &PolyVec, alpha: u32) -> Vec<u32> {
    v.polys()
        .iter()
        .flat_map(|p| p.as_coeffs_slice().iter().map(move |&c| high_bits(c, alpha)))
        .collect()
}

/// Largest `|LowBits(c)|` over every coefficient, without early exit
pub fn low_bits_norm(v: &PolyVec, alpha: u32) -> u32 {
    let mut norm = 0u32;
    for p in v.polys() {
        for &c in p.as_coeffs_slice() {
            let lo = low_bits(c, alpha);
            let sign = lo >> 31;
            let abs = ((lo ^ sign) - sign) as u32;
            norm = norm.max(abs);
        }
    }
    norm
}
