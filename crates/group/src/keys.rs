//! Group-layer key pairs
//!
//! Public key: `base_seed ‖ y` with `y` in the fixed braid encoding; `x` is
//! re-derived from the base seed. Secret key: `keygen_seed ‖ proof_key`;
//! base seed and `a` are re-derived from the keygen seed.

use core::fmt;
use core::ops::Range;

use pqe_algorithms::braid::{all_generators, left_generators, sample_word, Braid};
use pqe_algorithms::xof::{shake256, shake256_reader};
use pqe_api::error::validation;
use pqe_api::Result;
use pqe_common::fill_random;
use pqe_params::{parameters_for, Parameters, SecurityLevel, SEED_BYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::domain;

/// Normal form of `len` letters over `range`, sampled from SHAKE256(seed ‖ label)
pub(crate) fn braid_from_seed(
    strands: usize,
    seed: &[u8; 32],
    label: &[u8],
    range: Range<u8>,
    len: usize,
) -> Result<Braid> {
    let mut xof = shake256_reader(&[seed, label]);
    let mut word = sample_word(&mut xof, range, len)?;
    let braid = Braid::from_word(strands, &word)?;
    word.zeroize();
    Ok(braid)
}

pub(crate) fn base_braid(params: &Parameters, base_seed: &[u8; 32]) -> Result<Braid> {
    braid_from_seed(
        params.strands,
        base_seed,
        domain::BASE,
        all_generators(params.strands),
        params.base_word_len,
    )
}

/// Public half of a group key pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPublicKey {
    level: SecurityLevel,
    base_seed: [u8; 32],
    x: Braid,
    y: Braid,
}

impl GroupPublicKey {
    /// Security level
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Parameter set of this key's level
    pub fn params(&self) -> &'static Parameters {
        parameters_for(self.level)
    }

    /// Seed of the base braid
    pub fn base_seed(&self) -> &[u8; 32] {
        &self.base_seed
    }

    /// Base braid `x`
    pub fn base(&self) -> &Braid {
        &self.x
    }

    /// `y = a·x·a⁻¹`
    pub fn conjugate(&self) -> &Braid {
        &self.y
    }

    /// Encode as `base_seed ‖ y`
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let p = self.params();
        let mut out = Vec::with_capacity(p.group_public_key_bytes());
        out.extend_from_slice(&self.base_seed);
        out.extend_from_slice(&self.y.to_fixed_bytes(p.max_factors())?);
        Ok(out)
    }

    /// Decode, rejecting any `y` that is not a normal form encoding
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        validation::length("group public key", bytes.len(), p.group_public_key_bytes())?;
        let mut base_seed = [0u8; 32];
        base_seed.copy_from_slice(&bytes[..SEED_BYTES]);
        let y = Braid::from_fixed_bytes(&bytes[SEED_BYTES..], p.strands, p.max_factors())?;
        let x = base_braid(p, &base_seed)?;
        Ok(Self {
            level,
            base_seed,
            x,
            y,
        })
    }
}

/// Secret half of a group key pair
///
/// Zeroized on drop; `Debug` is redacted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GroupSecretKey {
    #[zeroize(skip)]
    public: GroupPublicKey,
    keygen_seed: [u8; 32],
    proof_key: [u8; 32],
    a: Braid,
}

impl GroupSecretKey {
    /// Security level
    pub fn level(&self) -> SecurityLevel {
        self.public.level
    }

    /// Parameter set of this key's level
    pub fn params(&self) -> &'static Parameters {
        self.public.params()
    }

    /// The matching public key
    pub fn public_key(&self) -> &GroupPublicKey {
        &self.public
    }

    pub(crate) fn secret_braid(&self) -> &Braid {
        &self.a
    }

    pub(crate) fn proof_key(&self) -> &[u8; 32] {
        &self.proof_key
    }

    /// Encode as `keygen_seed ‖ proof_key`
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(2 * SEED_BYTES));
        out.extend_from_slice(&self.keygen_seed);
        out.extend_from_slice(&self.proof_key);
        out
    }

    /// Decode and re-derive the key pair
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        validation::length("group secret key", bytes.len(), p.group_secret_key_bytes())?;
        let mut keygen_seed = Zeroizing::new([0u8; 32]);
        let mut proof_key = Zeroizing::new([0u8; 32]);
        keygen_seed.copy_from_slice(&bytes[..SEED_BYTES]);
        proof_key.copy_from_slice(&bytes[SEED_BYTES..]);
        derive(p, &keygen_seed, &proof_key).map(|kp| kp.secret)
    }
}

impl fmt::Debug for GroupSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupSecretKey")
            .field("level", &self.public.level)
            .finish_non_exhaustive()
    }
}

/// A group key pair
#[derive(Clone, Debug)]
pub struct GroupKeyPair {
    /// Public half
    pub public: GroupPublicKey,
    /// Secret half
    pub secret: GroupSecretKey,
}

fn derive(params: &Parameters, keygen_seed: &[u8; 32], proof_key: &[u8; 32]) -> Result<GroupKeyPair> {
    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES]);
    shake256(&[keygen_seed, domain::KEYGEN], &mut expanded[..]);
    let mut base_seed = [0u8; 32];
    let mut secret_seed = Zeroizing::new([0u8; 32]);
    base_seed.copy_from_slice(&expanded[..SEED_BYTES]);
    secret_seed.copy_from_slice(&expanded[SEED_BYTES..]);

    let x = base_braid(params, &base_seed)?;
    let a = braid_from_seed(
        params.strands,
        &secret_seed,
        domain::SECRET,
        left_generators(params.strands),
        params.secret_word_len,
    )?;
    let y = x.conjugate_by(&a)?;

    let public = GroupPublicKey {
        level: params.level,
        base_seed,
        x,
        y,
    };
    let secret = GroupSecretKey {
        public: public.clone(),
        keygen_seed: *keygen_seed,
        proof_key: *proof_key,
        a,
    };
    Ok(GroupKeyPair { public, secret })
}

/// Generate a key pair from fresh randomness
pub fn keygen<R: RngCore + CryptoRng>(params: &Parameters, rng: &mut R) -> Result<GroupKeyPair> {
    let mut seed = Zeroizing::new([0u8; 32]);
    fill_random(rng, &mut seed[..])?;
    keygen_from_seed(params, &seed)
}

/// Deterministic key generation; the proof key is derived from the seed too
pub fn keygen_from_seed(params: &Parameters, seed: &[u8; 32]) -> Result<GroupKeyPair> {
    let mut proof_key = Zeroizing::new([0u8; 32]);
    shake256(&[seed, b"proof"], &mut proof_key[..]);
    derive(params, seed, &proof_key)
}
