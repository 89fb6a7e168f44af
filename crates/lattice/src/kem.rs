//! FO-transformed module-LWE KEM
//!
//! Encapsulation hashes a random message together with `H(pk)` into the
//! seed `K̄` and the encryption coins. Decapsulation decrypts, re-encrypts
//! and compares in constant time, then selects between `K̄'` and the
//! implicit-rejection key `SHAKE256(z ‖ ct)`. The outcome is only turned
//! into an error after all of that work is done.

use pqe_algorithms::poly::serialize::{pack_bits, unpack_bits};
use pqe_algorithms::xof::{sha3_512, shake256};
use pqe_api::error::validation;
use pqe_api::{Error, Result};
use pqe_common::fill_random;
use pqe_internal::constant_time::{ct_assign, ct_eq_choice};
use pqe_params::pqe::{PQE_N, PQE_Q};
use pqe_params::{parameters_for, SecurityLevel};
use rand::{CryptoRng, RngCore};
use subtle::Choice;
use zeroize::{Zeroize, Zeroizing};

use crate::keys::{LwePublicKey, LweSecretKey};
use crate::polyvec::PolyVec;
use crate::rounding::{compress, compress_poly, compress_vec, decompress_poly};
use crate::sampling::{cbd_poly, cbd_vec};
use crate::Poly;

/// Encapsulated 32-byte seed
pub type Seed = Zeroizing<[u8; 32]>;

/// Compressed ciphertext `(u, v)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LweCiphertext {
    level: SecurityLevel,
    u: Vec<u32>,
    v: Vec<u32>,
}

impl LweCiphertext {
    /// Security level
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Encode as `u ‖ v` packed at `d_u` and `d_v` bits
    pub fn to_bytes(&self) -> Vec<u8> {
        let p = parameters_for(self.level);
        let mut out = Vec::with_capacity(p.lwe_ciphertext_bytes());
        pack_bits(&self.u, p.du, &mut out);
        pack_bits(&self.v, p.dv, &mut out);
        out
    }

    /// Decode; every bit pattern of the right length is a ciphertext
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        validation::length("lattice ciphertext", bytes.len(), p.lwe_ciphertext_bytes())?;
        let split = p.l * PQE_N * p.du / 8;
        let u = unpack_bits(&bytes[..split], p.du, p.l * PQE_N)?;
        let v = unpack_bits(&bytes[split..], p.dv, PQE_N)?;
        Ok(Self { level, u, v })
    }
}

/// Message polynomial: bit `i` becomes `⌈q/2⌋` in coefficient `i`
fn encode_message(m: &[u8; 32]) -> Poly {
    let half = (PQE_Q + 1) / 2;
    let mut p = Poly::zero();
    for (i, c) in p.coeffs.iter_mut().enumerate() {
        let bit = ((m[i / 8] >> (i % 8)) & 1) as u32;
        *c = bit.wrapping_neg() & half;
    }
    p
}

fn decode_message(p: &Poly) -> Zeroizing<[u8; 32]> {
    let mut m = Zeroizing::new([0u8; 32]);
    for (i, &c) in p.as_coeffs_slice().iter().enumerate() {
        m[i / 8] |= (compress(c, 1) as u8) << (i % 8);
    }
    m
}

/// CPA encryption of `m` with explicit coins
pub(crate) fn encrypt(pk: &LwePublicKey, m: &[u8; 32], coins: &[u8; 32]) -> Result<LweCiphertext> {
    let p = pk.params();
    let mut r = cbd_vec(coins, 0, p.k, p.eta)?;
    let mut e1 = cbd_vec(coins, p.k as u8, p.l, p.eta)?;
    let mut e2 = cbd_poly(coins, (p.k + p.l) as u8, p.eta)?;
    let mut r_hat = r.to_ntt()?;

    let mut u = pk.matrix().transpose_mul_vec(&r_hat);
    u.inv_ntt_inplace()?;
    let u = u.add(&e1);

    let mut v = pk.t_hat().inner_product_ntt(&r_hat);
    v.from_ntt_inplace()?;
    let mut msg = encode_message(m);
    let v = v.add(&e2).add(&msg);

    let ct = LweCiphertext {
        level: pk.level(),
        u: compress_vec(&u, p.du),
        v: compress_poly(&v, p.dv),
    };

    r.zeroize();
    r_hat.zeroize();
    e1.zeroize();
    e2.zeroize();
    msg.zeroize();
    Ok(ct)
}

/// CPA decryption: `Compress_1(v - ⟨s1, u⟩)`
pub(crate) fn decrypt(sk: &LweSecretKey, ct: &LweCiphertext) -> Result<Zeroizing<[u8; 32]>> {
    let p = sk.params();
    let u = PolyVec::from_polys(
        ct.u.chunks_exact(PQE_N)
            .map(|chunk| decompress_poly(chunk, p.du))
            .collect(),
    );
    let v = decompress_poly(&ct.v, p.dv);

    let mut su = sk.s1_hat().inner_product_ntt(&u.to_ntt()?);
    su.from_ntt_inplace()?;
    let mut w = v.sub(&su);
    let m = decode_message(&w);
    su.zeroize();
    w.zeroize();
    Ok(m)
}

/// `(K̄, coins) = SHA3-512(m ‖ H(pk))`
fn derive(m: &[u8; 32], pk: &LwePublicKey) -> (Seed, Zeroizing<[u8; 32]>) {
    let mut g = sha3_512(&[m, pk.digest()]);
    let mut seed = Zeroizing::new([0u8; 32]);
    let mut coins = Zeroizing::new([0u8; 32]);
    seed.copy_from_slice(&g[..32]);
    coins.copy_from_slice(&g[32..]);
    g.zeroize();
    (seed, coins)
}

/// Encapsulate a fresh 32-byte seed to `pk`
pub fn encapsulate<R: RngCore + CryptoRng>(
    pk: &LwePublicKey,
    rng: &mut R,
) -> Result<(Seed, LweCiphertext)> {
    let mut m = Zeroizing::new([0u8; 32]);
    fill_random(rng, &mut m[..])?;
    let (seed, coins) = derive(&m, pk);
    let ct = encrypt(pk, &m, &coins)?;
    Ok((seed, ct))
}

/// Decapsulate without revealing validity through control flow
///
/// Returns the selected seed and a `Choice` that is 1 when the ciphertext
/// re-encrypted correctly. On failure the seed is the implicit-rejection
/// key, so it is still a deterministic function of the ciphertext.
pub fn decapsulate_masked(sk: &LweSecretKey, ct: &LweCiphertext) -> Result<(Seed, Choice)> {
    if ct.level() != sk.level() {
        return Err(Error::param("lattice ciphertext", "security level mismatch"));
    }
    let ct_bytes = ct.to_bytes();

    let m = decrypt(sk, ct)?;
    let (seed_prime, coins) = derive(&m, sk.public_key());
    let ct_prime = encrypt(sk.public_key(), &m, &coins)?;
    let valid = ct_eq_choice(&ct_bytes, ct_prime.to_bytes());

    let mut seed = Zeroizing::new([0u8; 32]);
    shake256(&[sk.rejection_key(), &ct_bytes], &mut seed[..]);
    ct_assign(&mut seed[..], &seed_prime[..], valid);
    Ok((seed, valid))
}

/// Decapsulate, reporting an invalid ciphertext as `DecapsulationFailed`
pub fn decapsulate(sk: &LweSecretKey, ct: &LweCiphertext) -> Result<Seed> {
    let (seed, valid) = decapsulate_masked(sk, ct)?;
    if bool::from(valid) {
        Ok(seed)
    } else {
        Err(Error::DecapsulationFailed {
            context: "lattice decapsulation",
        })
    }
}
