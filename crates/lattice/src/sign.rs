//! Lattice half of the hybrid signature (Fiat-Shamir with aborts)
//!
//! `commit` draws the mask for attempt `κ` and publishes
//! `w1 = HighBits(A·y, 2γ2)`. The combiner hashes `w1` with the message and
//! the group proof digest into `c̃`, then calls `respond`, which either
//! returns `z = y + c·s1` or rejects. A rejection is retried with `κ + 1`,
//! so no mask is ever reused.
//!
//! Critical invariants:
//! - `‖z‖∞ < γ1 - β` on every released response
//! - `‖LowBits(w - c·s2)‖∞ < γ2 - β`, so `HighBits(A·z - c·t) = w1`

use pqe_algorithms::poly::serialize::{pack_bits, unpack_bits};
use pqe_algorithms::xof::shake256;
use pqe_api::error::validation;
use pqe_api::Result;
use pqe_params::pqe::PQE_N;
use pqe_params::Parameters;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::keys::{LwePublicKey, LweSecretKey};
use crate::polyvec::PolyVec;
use crate::rounding::{high_bits_vec, low_bits_norm};
use crate::sampling::{mask_vec, sample_in_ball};
use crate::Poly;

/// One signing attempt's mask and commitment
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Commitment {
    y: PolyVec,
    w: PolyVec,
    w1: Vec<u32>,
    kappa: u16,
}

impl Commitment {
    /// `HighBits(w, 2γ2)`, flattened over the k entries
    pub fn w1(&self) -> &[u32] {
        &self.w1
    }

    /// Attempt counter this commitment was drawn with
    pub fn attempt(&self) -> u16 {
        self.kappa
    }
}

/// Hedged mask seed `ρ' = SHAKE256(K ‖ rnd ‖ μ)`
pub fn mask_seed(sk: &LweSecretKey, rnd: &[u8; 32], mu: &[u8; 64]) -> Zeroizing<[u8; 64]> {
    let mut rho_prime = Zeroizing::new([0u8; 64]);
    shake256(&[sk.signing_key(), rnd, mu], &mut rho_prime[..]);
    rho_prime
}

/// Draw the mask for attempt `κ` and commit to it
pub fn commit(sk: &LweSecretKey, rho_prime: &[u8; 64], kappa: u16) -> Result<Commitment> {
    let p = sk.params();
    let y = mask_vec(rho_prime, kappa, p.l, p.gamma1, p.z_bits())?;
    let mut w = sk.public_key().matrix().mul_vec(&y.to_ntt()?);
    w.inv_ntt_inplace()?;
    let w1 = high_bits_vec(&w, 2 * p.gamma2);
    Ok(Commitment { y, w, w1, kappa })
}

fn challenge_ntt(c_tilde: &[u8], tau: usize) -> Result<Poly> {
    let mut c = sample_in_ball(c_tilde, tau);
    c.ntt_inplace()?;
    Ok(c)
}

/// Answer challenge `c̃`, or `None` if either rejection check fires
pub fn respond(sk: &LweSecretKey, commitment: &Commitment, c_tilde: &[u8]) -> Result<Option<PolyVec>> {
    let p = sk.params();
    let c_hat = challenge_ntt(c_tilde, p.tau)?;

    let mut cs1 = sk.s1_hat().scale_ntt(&c_hat);
    cs1.inv_ntt_inplace()?;
    let mut z = commitment.y.add(&cs1);

    let mut cs2 = sk.s2_hat().scale_ntt(&c_hat);
    cs2.inv_ntt_inplace()?;
    let mut r0 = commitment.w.sub(&cs2);

    let z_ok = z.infinity_norm() < p.gamma1 - p.beta;
    let r0_ok = low_bits_norm(&r0, 2 * p.gamma2) < p.gamma2 - p.beta;

    cs1.zeroize();
    cs2.zeroize();
    r0.zeroize();

    if z_ok && r0_ok {
        Ok(Some(z))
    } else {
        z.zeroize();
        Ok(None)
    }
}

/// Check `‖z‖∞ < γ1 - β` and `HighBits(A·z - c·t, 2γ2) = w1`
pub fn verify_response(pk: &LwePublicKey, w1: &[u32], c_tilde: &[u8], z: &PolyVec) -> Result<bool> {
    let p = pk.params();
    if z.len() != p.l || w1.len() != p.k * PQE_N {
        return Ok(false);
    }
    if z.infinity_norm() >= p.gamma1 - p.beta {
        return Ok(false);
    }

    let c_hat = challenge_ntt(c_tilde, p.tau)?;
    let az = pk.matrix().mul_vec(&z.to_ntt()?);
    let ct = pk.t_hat().scale_ntt(&c_hat);
    let mut w_approx = az.sub(&ct);
    w_approx.inv_ntt_inplace()?;

    Ok(high_bits_vec(&w_approx, 2 * p.gamma2) == w1)
}

/// Pack `w1` at `w1_bits` per coefficient
pub fn pack_w1(params: &Parameters, w1: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(params.w1_bytes());
    pack_bits(w1, params.w1_bits(), &mut out);
    out
}

/// Unpack `w1`, rejecting values outside `[0, (q-1)/(2γ2))`
pub fn unpack_w1(params: &Parameters, bytes: &[u8]) -> Result<Vec<u32>> {
    validation::length("signature commitment", bytes.len(), params.w1_bytes())?;
    let values = unpack_bits(bytes, params.w1_bits(), params.k * PQE_N)?;
    let limit = (params.q - 1) / (2 * params.gamma2);
    validation::well_formed(
        values.iter().all(|&v| v < limit),
        "signature commitment",
        "high bits out of range",
    )?;
    Ok(values)
}

/// Pack `z` as `γ1 - z` at `z_bits` per coefficient
pub fn pack_z(params: &Parameters, z: &PolyVec) -> Vec<u8> {
    let mut out = Vec::with_capacity(params.z_bytes());
    for poly in z.polys() {
        let stored: Vec<u32> = poly
            .as_coeffs_slice()
            .iter()
            .map(|&c| (params.gamma1 as i64 - Poly::centered(c) as i64) as u32)
            .collect();
        pack_bits(&stored, params.z_bits(), &mut out);
    }
    out
}

/// Inverse of [`pack_z`]; the norm bound is checked by [`verify_response`]
pub fn unpack_z(params: &Parameters, bytes: &[u8]) -> Result<PolyVec> {
    validation::length("signature response", bytes.len(), params.z_bytes())?;
    let per_poly = PQE_N * params.z_bits() / 8;
    let mut polys = Vec::with_capacity(params.l);
    for chunk in bytes.chunks_exact(per_poly) {
        let values = unpack_bits(chunk, params.z_bits(), PQE_N)?;
        let mut poly = Poly::zero();
        for (dst, &v) in poly.coeffs.iter_mut().zip(values.iter()) {
            *dst = Poly::from_signed(params.gamma1 as i64 - v as i64);
        }
        polys.push(poly);
    }
    Ok(PolyVec::from_polys(polys))
}
