//! Hybrid key pairs
//!
//! Public key: `level ‖ version ‖ lattice pk ‖ group pk`.
//! Secret key: `level ‖ version ‖ lattice sk ‖ group sk ‖ SHA3-256(public key)`.
//!
//! Both layer secrets re-derive their public halves, so a decoded secret key
//! rebuilds the full public key and checks it against the stored digest.

use core::fmt;

use pqe_algorithms::xof::{sha3_256, shake256};
use pqe_api::error::validation;
use pqe_api::{Error, Result, Serialize, SerializeSecret};
use pqe_common::fill_random;
use pqe_group::{GroupPublicKey, GroupSecretKey};
use pqe_internal::constant_time::ct_eq;
use pqe_lattice::{LwePublicKey, LweSecretKey};
use pqe_params::{parameters_for, Parameters, SecurityLevel, SEED_BYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::format::{header, read_header};

/// Hybrid public key
#[derive(Clone)]
pub struct HybridPublicKey {
    level: SecurityLevel,
    lwe: LwePublicKey,
    group: GroupPublicKey,
    encoded: Vec<u8>,
    tr: [u8; 64],
}

impl HybridPublicKey {
    fn new(lwe: LwePublicKey, group: GroupPublicKey) -> Result<Self> {
        let level = lwe.level();
        if group.level() != level {
            return Err(Error::param("public key", "layer levels differ"));
        }
        let lwe_bytes = lwe.to_bytes();
        let group_bytes = group.to_bytes()?;
        let mut encoded = Vec::with_capacity(parameters_for(level).public_key_bytes());
        encoded.extend_from_slice(&header(level));
        encoded.extend_from_slice(&lwe_bytes);
        encoded.extend_from_slice(&group_bytes);

        let mut tr = [0u8; 64];
        shake256(&[&encoded], &mut tr);
        Ok(Self {
            level,
            lwe,
            group,
            encoded,
            tr,
        })
    }

    /// Security level of this key
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Parameter set of this key
    pub fn params(&self) -> &'static Parameters {
        parameters_for(self.level)
    }

    /// Lattice layer key
    pub fn lwe(&self) -> &LwePublicKey {
        &self.lwe
    }

    /// Group layer key
    pub fn group(&self) -> &GroupPublicKey {
        &self.group
    }

    /// `SHAKE256(encoding)`, bound into every signed message
    pub(crate) fn tr(&self) -> &[u8; 64] {
        &self.tr
    }

    /// SHA3-256 of the encoding
    pub fn digest(&self) -> [u8; 32] {
        sha3_256(&[&self.encoded])
    }
}

impl Serialize for HybridPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.encoded.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (level, body) = read_header("hybrid public key", bytes)?;
        let p = parameters_for(level);
        validation::length("hybrid public key", bytes.len(), p.public_key_bytes())?;

        let (lwe_bytes, group_bytes) = body.split_at(p.lwe_public_key_bytes());
        let lwe = LwePublicKey::from_bytes(level, lwe_bytes)?;
        let group = GroupPublicKey::from_bytes(level, group_bytes)?;
        Self::new(lwe, group)
    }
}

impl PartialEq for HybridPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for HybridPublicKey {}

impl fmt::Debug for HybridPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridPublicKey")
            .field("level", &self.level)
            .field("len", &self.encoded.len())
            .finish()
    }
}

/// Hybrid secret key
///
/// Wiped on drop. `Debug` never prints key material.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HybridSecretKey {
    #[zeroize(skip)]
    public: HybridPublicKey,
    lwe: LweSecretKey,
    group: GroupSecretKey,
}

impl HybridSecretKey {
    fn new(lwe: LweSecretKey, group: GroupSecretKey) -> Result<Self> {
        let public = HybridPublicKey::new(lwe.public_key().clone(), group.public_key().clone())?;
        Ok(Self { public, lwe, group })
    }

    /// Security level of this key
    pub fn level(&self) -> SecurityLevel {
        self.public.level
    }

    /// Parameter set of this key
    pub fn params(&self) -> &'static Parameters {
        self.public.params()
    }

    /// Matching public key
    pub fn public_key(&self) -> &HybridPublicKey {
        &self.public
    }

    pub(crate) fn lwe(&self) -> &LweSecretKey {
        &self.lwe
    }

    pub(crate) fn group(&self) -> &GroupSecretKey {
        &self.group
    }
}

impl SerializeSecret for HybridSecretKey {
    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(self.params().secret_key_bytes()));
        out.extend_from_slice(&header(self.level()));
        out.extend_from_slice(&self.lwe.to_bytes());
        out.extend_from_slice(&self.group.to_bytes());
        out.extend_from_slice(&self.public.digest());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (level, body) = read_header("hybrid secret key", bytes)?;
        let p = parameters_for(level);
        validation::length("hybrid secret key", bytes.len(), p.secret_key_bytes())?;

        let (lwe_bytes, rest) = body.split_at(p.lwe_secret_key_bytes());
        let (group_bytes, digest) = rest.split_at(p.group_secret_key_bytes());
        let lwe = LweSecretKey::from_bytes(level, lwe_bytes)?;
        let group = GroupSecretKey::from_bytes(level, group_bytes)?;
        let sk = Self::new(lwe, group)?;

        validation::well_formed(
            ct_eq(sk.public.digest(), digest),
            "hybrid secret key",
            "public key digest mismatch",
        )?;
        Ok(sk)
    }
}

impl fmt::Debug for HybridSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridSecretKey")
            .field("level", &self.level())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a hybrid key pair at `level`
///
/// Both layers are seeded from one 32-byte draw, split by SHAKE256 under
/// distinct labels.
pub fn generate_keypair<R: RngCore + CryptoRng>(
    level: SecurityLevel,
    rng: &mut R,
) -> Result<(HybridPublicKey, HybridSecretKey)> {
    let mut seed = Zeroizing::new([0u8; SEED_BYTES]);
    fill_random(rng, &mut seed[..])?;
    keypair_from_seed(level, &seed)
}

/// Deterministic key generation from a 32-byte seed
pub fn keypair_from_seed(
    level: SecurityLevel,
    seed: &[u8; SEED_BYTES],
) -> Result<(HybridPublicKey, HybridSecretKey)> {
    let p = parameters_for(level);
    let mut lwe_seed = Zeroizing::new([0u8; SEED_BYTES]);
    let mut group_seed = Zeroizing::new([0u8; SEED_BYTES]);
    shake256(&[seed, b"pqe-hybrid-keygen-lattice"], &mut lwe_seed[..]);
    shake256(&[seed, b"pqe-hybrid-keygen-group"], &mut group_seed[..]);

    let lwe = pqe_lattice::keygen_from_seed(p, &lwe_seed)?;
    let group = pqe_group::keygen_from_seed(p, &group_seed)?;
    let sk = HybridSecretKey::new(lwe.secret, group.secret)?;
    log::debug!("generated hybrid key pair at {}-bit level", level.bits());
    Ok((sk.public.clone(), sk))
}
