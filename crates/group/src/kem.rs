//! Ko-Lee key agreement used as a KEM

use pqe_algorithms::braid::{right_generators, Braid};
use pqe_algorithms::xof::sha3_256;
use pqe_api::{Error, Result};
use pqe_common::fill_random;
use pqe_params::{parameters_for, SecurityLevel};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::domain;
use crate::keys::{braid_from_seed, GroupPublicKey, GroupSecretKey};

/// 32-byte digest of the shared normal form
pub type SharedSecret = Zeroizing<[u8; 32]>;

/// The transmitted element `b·x·b⁻¹`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCiphertext {
    level: SecurityLevel,
    element: Braid,
}

impl GroupCiphertext {
    /// Security level
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// The conjugated base braid
    pub fn element(&self) -> &Braid {
        &self.element
    }

    /// Fixed-width braid encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self
            .element
            .to_fixed_bytes(parameters_for(self.level).max_factors())?)
    }

    /// Strict decoding; anything but a normal form is `MalformedInput`
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let p = parameters_for(level);
        let element = Braid::from_fixed_bytes(bytes, p.strands, p.max_factors())?;
        Ok(Self { level, element })
    }
}

fn shared_digest(shared: &Braid) -> SharedSecret {
    let mut encoded = shared.to_canonical_bytes();
    let digest = Zeroizing::new(sha3_256(&[domain::SHARED, &encoded]));
    encoded.zeroize();
    digest
}

/// Conjugate `b·x·b⁻¹` with a fresh ephemeral `b` and derive the shared value
pub fn encapsulate<R: RngCore + CryptoRng>(
    pk: &GroupPublicKey,
    rng: &mut R,
) -> Result<(SharedSecret, GroupCiphertext)> {
    let p = pk.params();
    let mut seed = Zeroizing::new([0u8; 32]);
    fill_random(rng, &mut seed[..])?;
    let mut b = braid_from_seed(
        p.strands,
        &seed,
        domain::EPHEMERAL,
        right_generators(p.strands),
        p.ephemeral_word_len(),
    )?;

    let element = pk.base().conjugate_by(&b)?;
    let mut shared = pk.conjugate().conjugate_by(&b)?;
    let secret = shared_digest(&shared);
    b.zeroize();
    shared.zeroize();

    Ok((
        secret,
        GroupCiphertext {
            level: pk.level(),
            element,
        },
    ))
}

/// Apply the secret conjugator: `a·c·a⁻¹`, hashed
pub fn transform(sk: &GroupSecretKey, element: &Braid) -> Result<SharedSecret> {
    let mut shared = element.conjugate_by(sk.secret_braid())?;
    let secret = shared_digest(&shared);
    shared.zeroize();
    Ok(secret)
}

/// Recover the shared value from a ciphertext
///
/// A well-formed but foreign element yields an unrelated value; the
/// combiner's tag check is what rejects it.
pub fn decapsulate(sk: &GroupSecretKey, ct: &GroupCiphertext) -> Result<SharedSecret> {
    if ct.level() != sk.level() {
        return Err(Error::param("group ciphertext", "security level mismatch"));
    }
    transform(sk, ct.element())
}
