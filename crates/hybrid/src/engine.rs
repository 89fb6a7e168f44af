//! Hybrid encryption and signing
//!
//! Encryption: `(seed, u‖v) ← lattice encaps`, `(k_g, b·x·b⁻¹) ← group
//! encaps`, `(K_enc, K_mac) ← HKDF(seed ‖ k_g)`, payload `= M ⊕ SHAKE256(K_enc)`,
//! tag `= HMAC(K_mac, everything before it)`.
//!
//! Decryption recomputes the tag from the implicitly rejected lattice seed,
//! folds the lattice validity bit into the tag comparison and only then
//! strips the keystream. Every failure after parsing is reported as the
//! same `AuthenticationFailed`.
//!
//! Signing: `μ = SHAKE256(SHAKE256(pk) ‖ M)`. The group proof is committed
//! once; each lattice attempt hashes `μ ‖ w1 ‖ proof digest` into `c̃`, and
//! the first accepted response fixes the challenge for both layers.

use pqe_algorithms::xof::shake256;
use pqe_api::{Error, Result};
use pqe_common::fill_random;
use pqe_lattice::sign::pack_w1;
use pqe_params::pqe::{CHALLENGE_BYTES, MAX_SIGN_ATTEMPTS};
use pqe_params::SEED_BYTES;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::ciphertext::Ciphertext;
use crate::combiner::{apply_keystream, check_tag, compute_tag, derive_keys, SessionKeys};
use crate::format::header;
use crate::keys::{HybridPublicKey, HybridSecretKey};
use crate::signature::Signature;

/// Domain label for the group proof mask key
const SIGN_MASK_DOMAIN: &[u8] = b"pqe-hybrid-sign-mask";

/// Encrypt `plaintext` to `pk`
pub fn encrypt<R: RngCore + CryptoRng>(
    pk: &HybridPublicKey,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Ciphertext> {
    seal(pk, plaintext, rng).map(|(ct, _)| ct)
}

/// Decrypt and authenticate `ct`
///
/// Returns `Error::AuthenticationFailed` for a wrong key, a tampered
/// ciphertext and a ciphertext from another level alike.
pub fn decrypt(sk: &HybridSecretKey, ct: &Ciphertext) -> Result<Vec<u8>> {
    open(sk, ct).map(|(plaintext, _)| plaintext)
}

/// Encrypt and also return the session keys
pub(crate) fn seal<R: RngCore + CryptoRng>(
    pk: &HybridPublicKey,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<(Ciphertext, SessionKeys)> {
    let level = pk.level();
    log::debug!(
        "encrypting {} bytes at {}-bit level",
        plaintext.len(),
        level.bits()
    );

    let (lwe_seed, lwe_ct) = pqe_lattice::encapsulate(pk.lwe(), rng)?;
    let (group_secret, group_ct) = pqe_group::encapsulate(pk.group(), rng)?;
    let lwe_bytes = lwe_ct.to_bytes();
    let group_bytes = group_ct.to_bytes()?;

    let keys = derive_keys(level, &lwe_seed, &group_secret, &lwe_bytes, &group_bytes)?;
    let mut payload = plaintext.to_vec();
    apply_keystream(&keys, &mut payload);
    let tag = compute_tag(
        &keys,
        &[&header(level), &lwe_bytes, &group_bytes, &payload],
    )?;

    let ct = Ciphertext::new(lwe_ct, group_ct, payload, tag)?;
    Ok((ct, keys))
}

/// Decrypt and also return the session keys
pub(crate) fn open(sk: &HybridSecretKey, ct: &Ciphertext) -> Result<(Vec<u8>, SessionKeys)> {
    match open_inner(sk, ct) {
        Ok(Some(opened)) => Ok(opened),
        Ok(None) | Err(_) => {
            log::debug!("hybrid ciphertext rejected");
            Err(Error::AuthenticationFailed {
                context: "hybrid decryption",
            })
        }
    }
}

fn open_inner(sk: &HybridSecretKey, ct: &Ciphertext) -> Result<Option<(Vec<u8>, SessionKeys)>> {
    let level = sk.level();
    if ct.level() != level {
        return Ok(None);
    }

    let (lwe_seed, lwe_valid) = pqe_lattice::decapsulate_masked(sk.lwe(), ct.lwe())?;
    let group_secret = pqe_group::decapsulate(sk.group(), ct.group())?;
    let keys = derive_keys(
        level,
        &lwe_seed,
        &group_secret,
        ct.lwe_bytes(),
        ct.group_bytes(),
    )?;

    let tag_valid = check_tag(
        &keys,
        &[&header(level), ct.lwe_bytes(), ct.group_bytes(), ct.payload()],
        ct.tag(),
    )?;
    if !bool::from(tag_valid & lwe_valid) {
        return Ok(None);
    }

    let mut plaintext = ct.payload().to_vec();
    apply_keystream(&keys, &mut plaintext);
    Ok(Some((plaintext, keys)))
}

fn message_representative(pk: &HybridPublicKey, message: &[u8]) -> Zeroizing<[u8; 64]> {
    let mut mu = Zeroizing::new([0u8; 64]);
    shake256(&[pk.tr(), message], &mut mu[..]);
    mu
}

fn challenge(mu: &[u8; 64], w1_bytes: &[u8], digest: &[u8; SEED_BYTES]) -> [u8; CHALLENGE_BYTES] {
    let mut c_tilde = [0u8; CHALLENGE_BYTES];
    shake256(&[mu, w1_bytes, digest], &mut c_tilde);
    c_tilde
}

/// Sign `message` with `sk`
///
/// Fails with `Error::SigningFailed` if every attempt up to the attempt
/// bound is rejected.
pub fn sign<R: RngCore + CryptoRng>(
    sk: &HybridSecretKey,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let p = sk.params();
    let mu = message_representative(sk.public_key(), message);

    let mut rnd = Zeroizing::new([0u8; SEED_BYTES]);
    fill_random(rng, &mut rnd[..])?;
    let mut mask_key = Zeroizing::new([0u8; SEED_BYTES]);
    shake256(&[SIGN_MASK_DOMAIN, &rnd[..], &mu[..]], &mut mask_key[..]);

    let commitments = pqe_group::commit(sk.group(), &mask_key)?;
    let rho_prime = pqe_lattice::mask_seed(sk.lwe(), &rnd, &mu);

    for attempt in 0..MAX_SIGN_ATTEMPTS {
        let kappa = attempt as u16;
        let commitment = pqe_lattice::commit(sk.lwe(), &rho_prime, kappa)?;
        let w1_bytes = pack_w1(p, commitment.w1());
        let c_tilde = challenge(&mu, &w1_bytes, commitments.digest());

        if let Some(z) = pqe_lattice::respond(sk.lwe(), &commitment, &c_tilde)? {
            let proof = pqe_group::prove(sk.group(), &commitments, &c_tilde)?;
            log::debug!("signature accepted after {} attempts", attempt + 1);
            return Signature::new(
                sk.level(),
                c_tilde,
                commitment.w1().to_vec(),
                z,
                *commitments.digest(),
                proof,
            );
        }
    }

    log::warn!("signing exhausted {} attempts", MAX_SIGN_ATTEMPTS);
    Err(Error::SigningFailed {
        context: "hybrid signing",
        message: format!("no response accepted within {} attempts", MAX_SIGN_ATTEMPTS),
    })
}

/// Verify `signature` on `message` under `pk`
///
/// Returns `Error::InvalidSignature` on any mismatch.
pub fn verify(pk: &HybridPublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    let invalid = Error::InvalidSignature {
        context: "hybrid verification",
    };
    if signature.level() != pk.level() {
        return Err(invalid);
    }
    let p = pk.params();
    let mu = message_representative(pk, message);

    let expected = challenge(&mu, &pack_w1(p, signature.w1()), signature.proof_digest());
    if !pqe_internal::constant_time::ct_eq(expected, signature.challenge()) {
        return Err(invalid);
    }

    let lattice_ok = matches!(
        pqe_lattice::verify_response(pk.lwe(), signature.w1(), signature.challenge(), signature.z()),
        Ok(true)
    );
    let group_ok = matches!(
        pqe_group::verify(
            pk.group(),
            signature.proof_digest(),
            signature.challenge(),
            signature.proof(),
        ),
        Ok(true)
    );

    if lattice_ok && group_ok {
        Ok(())
    } else {
        Err(invalid)
    }
}
