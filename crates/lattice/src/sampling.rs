//! Seeded samplers for secrets, noise, masks and challenges

use pqe_algorithms::poly::prelude::*;
use pqe_algorithms::poly::serialize::unpack_bits;
use pqe_algorithms::xof::{shake256_reader, XofReader};
use pqe_api::Result;
use zeroize::Zeroize;

use crate::polyvec::PolyVec;
use crate::Poly;

/// `len` polynomials from CBD(η), entry `i` drawn from SHAKE256(seed ‖ nonce+i)
pub fn cbd_vec(seed: &[u8; 32], nonce: u8, len: usize, eta: u32) -> Result<PolyVec> {
    let mut polys = Vec::with_capacity(len);
    for i in 0..len {
        polys.push(cbd_poly(seed, nonce + i as u8, eta)?);
    }
    Ok(PolyVec::from_polys(polys))
}

/// One polynomial from CBD(η)
pub fn cbd_poly(seed: &[u8; 32], nonce: u8, eta: u32) -> Result<Poly> {
    let mut xof = shake256_reader(&[seed, &[nonce]]);
    Ok(<DefaultSamplers as CbdSampler<PqeModulus>>::sample_cbd(&mut xof, eta)?)
}

/// Signing mask y with coefficients in `[-γ1 + 1, γ1]`
///
/// Entry `i` of attempt `κ` reads SHAKE256(ρ' ‖ κ·l + i) as `z_bits`-bit
/// values `v` and maps them to `γ1 - v`; `2^z_bits = 2γ1`, so no value is
/// rejected.
pub fn mask_vec(
    rho_prime: &[u8; 64],
    kappa: u16,
    l: usize,
    gamma1: u32,
    z_bits: usize,
) -> Result<PolyVec> {
    let mut polys = Vec::with_capacity(l);
    let mut buf = vec![0u8; bytes_required(z_bits)];
    for i in 0..l {
        let nonce = kappa.wrapping_mul(l as u16).wrapping_add(i as u16);
        let mut xof = shake256_reader(&[rho_prime, &nonce.to_le_bytes()]);
        xof.read(&mut buf);
        let mut values = unpack_bits(&buf, z_bits, PqeModulus::N)?;
        let mut p = Poly::zero();
        for (dst, &v) in p.coeffs.iter_mut().zip(values.iter()) {
            *dst = Poly::from_signed(gamma1 as i64 - v as i64);
        }
        values.zeroize();
        polys.push(p);
    }
    buf.zeroize();
    Ok(PolyVec::from_polys(polys))
}

fn bytes_required(bits: usize) -> usize {
    pqe_algorithms::poly::serialize::bytes_required(bits, PqeModulus::N)
}

/// Challenge polynomial with exactly `τ` coefficients in {-1, +1}
///
/// Fisher-Yates over SHAKE256(c̃): the first 8 bytes supply the signs, then
/// one byte per position with rejection above the current index.
pub fn sample_in_ball(c_tilde: &[u8], tau: usize) -> Poly {
    let n = PqeModulus::N;
    let mut xof = shake256_reader(&[c_tilde]);
    let mut sign_bytes = [0u8; 8];
    xof.read(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = vec![0i32; n];
    let mut byte = [0u8; 1];
    for i in (n - tau)..n {
        let j = loop {
            xof.read(&mut byte);
            if (byte[0] as usize) <= i {
                break byte[0] as usize;
            }
        };
        c[i] = c[j];
        c[j] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    Poly::from_centered(&c)
}
