//! Lattice key pairs and their encodings
//!
//! Public key: `ρ ‖ t` with 23-bit coefficients.
//! Secret key: `ρ ‖ K ‖ z ‖ s1 ‖ s2` with 3-bit coefficients stored as
//! `η - c`. The public key is recomputed from the secret key on decoding,
//! so the secret encoding never carries `t`.

use core::fmt;

use pqe_algorithms::poly::serialize::{pack_bits, unpack_bits};
use pqe_algorithms::xof::{sha3_256, shake256};
use pqe_api::error::validation;
use pqe_api::{Error, Result};
use pqe_common::fill_random;
use pqe_params::pqe::{PQE_N, PQE_Q, PQE_Q_BITS, SECRET_COEFF_BITS};
use pqe_params::{parameters_for, Parameters, SecurityLevel, SEED_BYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::polyvec::{Matrix, PolyVec};
use crate::sampling::cbd_vec;
use crate::Poly;

/// Public half of a lattice key pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LwePublicKey {
    level: SecurityLevel,
    rho: [u8; 32],
    t: PolyVec,
    a_hat: Matrix,
    t_hat: PolyVec,
    digest: [u8; 32],
}

impl LwePublicKey {
    fn from_parts(level: SecurityLevel, rho: [u8; 32], t: PolyVec) -> Result<Self> {
        let p = parameters_for(level);
        let a_hat = Matrix::expand(&rho, p.k, p.l)?;
        let t_hat = t.to_ntt()?;
        let mut pk = Self {
            level,
            rho,
            t,
            a_hat,
            t_hat,
            digest: [0u8; 32],
        };
        pk.digest = sha3_256(&[&pk.to_bytes()]);
        Ok(pk)
    }

    /// Security level this key was generated for
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Parameter set of this key's level
    pub fn params(&self) -> &'static Parameters {
        parameters_for(self.level)
    }

    /// Matrix seed ρ
    pub fn rho(&self) -> &[u8; 32] {
        &self.rho
    }

    /// `t = A·s1 + s2`
    pub fn t(&self) -> &PolyVec {
        &self.t
    }

    /// SHA3-256 of the encoded key, `H(pk)` in the FO transform
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    pub(crate) fn matrix(&self) -> &Matrix {
        &self.a_hat
    }

    pub(crate) fn t_hat(&self) -> &PolyVec {
        &self.t_hat
    }

    /// Encode as `ρ ‖ t`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.params().lwe_public_key_bytes());
        out.extend_from_slice(&self.rho);
        for p in self.t.polys() {
            pack_bits(p.as_coeffs_slice(), PQE_Q_BITS, &mut out);
        }
        out
    }

    /// Decode, rejecting wrong lengths and unreduced coefficients
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        validation::length("lattice public key", bytes.len(), p.lwe_public_key_bytes())?;

        let mut rho = [0u8; 32];
        rho.copy_from_slice(&bytes[..SEED_BYTES]);
        let poly_bytes = PQE_N * PQE_Q_BITS / 8;
        let mut polys = Vec::with_capacity(p.k);
        for chunk in bytes[SEED_BYTES..].chunks_exact(poly_bytes) {
            let values = unpack_bits(chunk, PQE_Q_BITS, PQE_N)?;
            validation::well_formed(
                values.iter().all(|&v| v < PQE_Q),
                "lattice public key",
                "coefficient not reduced",
            )?;
            polys.push(Poly::from_coeffs(&values)?);
        }
        Self::from_parts(level, rho, PolyVec::from_polys(polys))
    }
}

/// Secret half of a lattice key pair
///
/// Zeroized on drop. `Debug` never prints key material.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LweSecretKey {
    #[zeroize(skip)]
    public: LwePublicKey,
    key: [u8; 32],
    z: [u8; 32],
    s1: PolyVec,
    s2: PolyVec,
    s1_hat: PolyVec,
    s2_hat: PolyVec,
}

impl LweSecretKey {
    fn from_parts(
        public: LwePublicKey,
        key: [u8; 32],
        z: [u8; 32],
        s1: PolyVec,
        s2: PolyVec,
    ) -> Result<Self> {
        let s1_hat = s1.to_ntt()?;
        let s2_hat = s2.to_ntt()?;
        Ok(Self {
            public,
            key,
            z,
            s1,
            s2,
            s1_hat,
            s2_hat,
        })
    }

    /// Security level
    pub fn level(&self) -> SecurityLevel {
        self.public.level
    }

    /// Parameter set of this key's level
    pub fn params(&self) -> &'static Parameters {
        self.public.params()
    }

    /// The matching public key
    pub fn public_key(&self) -> &LwePublicKey {
        &self.public
    }

    /// Signing key K
    pub(crate) fn signing_key(&self) -> &[u8; 32] {
        &self.key
    }

    /// Implicit-rejection secret z
    pub(crate) fn rejection_key(&self) -> &[u8; 32] {
        &self.z
    }

    pub(crate) fn s1_hat(&self) -> &PolyVec {
        &self.s1_hat
    }

    pub(crate) fn s2_hat(&self) -> &PolyVec {
        &self.s2_hat
    }

    /// Encode as `ρ ‖ K ‖ z ‖ s1 ‖ s2`
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let p = self.params();
        let eta = p.eta as i32;
        let mut out = Zeroizing::new(Vec::with_capacity(p.lwe_secret_key_bytes()));
        out.extend_from_slice(&self.public.rho);
        out.extend_from_slice(&self.key);
        out.extend_from_slice(&self.z);
        for poly in self.s1.polys().iter().chain(self.s2.polys()) {
            let mut stored: Vec<u32> = poly
                .as_coeffs_slice()
                .iter()
                .map(|&c| (eta - Poly::centered(c)) as u32)
                .collect();
            pack_bits(&stored, SECRET_COEFF_BITS, &mut out);
            stored.zeroize();
        }
        out
    }

    /// Decode and recompute the public key
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        validation::length("lattice secret key", bytes.len(), p.lwe_secret_key_bytes())?;

        let mut rho = [0u8; 32];
        let mut key = [0u8; 32];
        let mut z = [0u8; 32];
        rho.copy_from_slice(&bytes[..32]);
        key.copy_from_slice(&bytes[32..64]);
        z.copy_from_slice(&bytes[64..96]);

        let poly_bytes = PQE_N * SECRET_COEFF_BITS / 8;
        let eta = p.eta as i64;
        let mut polys = Vec::with_capacity(p.k + p.l);
        for chunk in bytes[3 * SEED_BYTES..].chunks_exact(poly_bytes) {
            let mut values = unpack_bits(chunk, SECRET_COEFF_BITS, PQE_N)?;
            let in_range = values.iter().all(|&v| v <= 2 * p.eta);
            if !in_range {
                values.zeroize();
                return Err(Error::malformed("lattice secret key", "coefficient out of range"));
            }
            let mut poly = Poly::zero();
            for (dst, &v) in poly.coeffs.iter_mut().zip(values.iter()) {
                *dst = Poly::from_signed(eta - v as i64);
            }
            values.zeroize();
            polys.push(poly);
        }
        let s2 = PolyVec::from_polys(polys.split_off(p.l));
        let s1 = PolyVec::from_polys(polys);

        let t = compute_t(&Matrix::expand(&rho, p.k, p.l)?, &s1, &s2)?;
        let public = LwePublicKey::from_parts(level, rho, t)?;
        Self::from_parts(public, key, z, s1, s2)
    }
}

impl fmt::Debug for LweSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LweSecretKey")
            .field("level", &self.public.level)
            .finish_non_exhaustive()
    }
}

/// A lattice key pair
#[derive(Clone, Debug)]
pub struct LweKeyPair {
    /// Public half
    pub public: LwePublicKey,
    /// Secret half
    pub secret: LweSecretKey,
}

fn compute_t(a_hat: &Matrix, s1: &PolyVec, s2: &PolyVec) -> Result<PolyVec> {
    let mut t = a_hat.mul_vec(&s1.to_ntt()?);
    t.inv_ntt_inplace()?;
    Ok(t.add(s2))
}

/// Generate a key pair from fresh randomness
pub fn keygen<R: RngCore + CryptoRng>(params: &Parameters, rng: &mut R) -> Result<LweKeyPair> {
    let mut seed = Zeroizing::new([0u8; 32]);
    fill_random(rng, &mut seed[..])?;
    keygen_from_seed(params, &seed)
}

/// Deterministic key generation
///
/// `SHAKE256(seed ‖ k ‖ l)` is split into ρ, the noise seed σ, the signing
/// key K and the implicit-rejection secret z.
pub fn keygen_from_seed(params: &Parameters, seed: &[u8; 32]) -> Result<LweKeyPair> {
    let mut expanded = Zeroizing::new([0u8; 4 * SEED_BYTES]);
    shake256(&[seed, &[params.k as u8, params.l as u8]], &mut expanded[..]);

    let mut rho = [0u8; 32];
    let mut sigma = Zeroizing::new([0u8; 32]);
    let mut key = [0u8; 32];
    let mut z = [0u8; 32];
    rho.copy_from_slice(&expanded[..32]);
    sigma.copy_from_slice(&expanded[32..64]);
    key.copy_from_slice(&expanded[64..96]);
    z.copy_from_slice(&expanded[96..]);

    let s1 = cbd_vec(&sigma, 0, params.l, params.eta)?;
    let s2 = cbd_vec(&sigma, params.l as u8, params.k, params.eta)?;

    let a_hat = Matrix::expand(&rho, params.k, params.l)?;
    let t = compute_t(&a_hat, &s1, &s2)?;
    let public = LwePublicKey::from_parts(params.level, rho, t)?;
    let secret = LweSecretKey::from_parts(public.clone(), key, z, s1, s2)?;
    key.zeroize();
    z.zeroize();
    Ok(LweKeyPair { public, secret })
}
