//! Key combiner and payload protection
//!
//! Both layer secrets enter HKDF-SHA256 as one input key. The info string
//! binds the level, the format version and a hash of both layer
//! ciphertexts, so neither layer's ciphertext can be swapped without
//! changing the derived keys. The 64-byte output is split into a keystream
//! key and a MAC key.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use pqe_algorithms::xof::{sha3_256, shake256_reader, XofReader};
use pqe_api::{Error, Result};
use pqe_params::{SecurityLevel, FORMAT_VERSION, SEED_BYTES, TAG_BYTES};
use sha2::Sha256;
use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use pqe_internal::constant_time::ct_eq_choice;

type HmacSha256 = Hmac<Sha256>;

/// HKDF info prefix
pub const KDF_DOMAIN: &[u8] = b"pqe-hybrid-kdf";

/// Keystream domain label
pub const STREAM_DOMAIN: &[u8] = b"pqe-hybrid-stream";

/// Keys derived for one ciphertext
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    enc_key: [u8; SEED_BYTES],
    mac_key: [u8; SEED_BYTES],
}

impl SessionKeys {
    /// Keystream key; doubles as the KEM shared secret
    pub fn enc_key(&self) -> &[u8; SEED_BYTES] {
        &self.enc_key
    }
}

/// Derive the session keys from both layer secrets
pub fn derive_keys(
    level: SecurityLevel,
    lwe_seed: &[u8; SEED_BYTES],
    group_secret: &[u8; SEED_BYTES],
    lwe_ct: &[u8],
    group_ct: &[u8],
) -> Result<SessionKeys> {
    let mut ikm = Zeroizing::new([0u8; 2 * SEED_BYTES]);
    ikm[..SEED_BYTES].copy_from_slice(lwe_seed);
    ikm[SEED_BYTES..].copy_from_slice(group_secret);

    let transcript = sha3_256(&[lwe_ct, group_ct]);
    let mut info = Vec::with_capacity(KDF_DOMAIN.len() + 2 + transcript.len());
    info.extend_from_slice(KDF_DOMAIN);
    info.push(level.tag());
    info.push(FORMAT_VERSION);
    info.extend_from_slice(&transcript);

    let mut okm = Zeroizing::new([0u8; 2 * SEED_BYTES]);
    Hkdf::<Sha256>::new(None, &ikm[..])
        .expand(&info, &mut okm[..])
        .map_err(|_| Error::param("hybrid kdf", "output length rejected by HKDF"))?;

    let mut keys = SessionKeys {
        enc_key: [0u8; SEED_BYTES],
        mac_key: [0u8; SEED_BYTES],
    };
    keys.enc_key.copy_from_slice(&okm[..SEED_BYTES]);
    keys.mac_key.copy_from_slice(&okm[SEED_BYTES..]);
    Ok(keys)
}

/// XOR `data` in place with `SHAKE256(domain ‖ enc_key)`
pub fn apply_keystream(keys: &SessionKeys, data: &mut [u8]) {
    let mut reader = shake256_reader(&[STREAM_DOMAIN, &keys.enc_key]);
    let mut block = Zeroizing::new([0u8; 136]);
    for chunk in data.chunks_mut(136) {
        reader.read(&mut block[..chunk.len()]);
        for (d, k) in chunk.iter_mut().zip(block.iter()) {
            *d ^= k;
        }
    }
}

/// HMAC-SHA256 over every part, in order
pub fn compute_tag(keys: &SessionKeys, parts: &[&[u8]]) -> Result<[u8; TAG_BYTES]> {
    let mut mac = HmacSha256::new_from_slice(&keys.mac_key)
        .map_err(|_| Error::param("hybrid mac", "invalid key length"))?;
    for part in parts {
        mac.update(part);
    }
    let mut tag = [0u8; TAG_BYTES];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Recompute the tag and compare without branching on the result
pub fn check_tag(keys: &SessionKeys, parts: &[&[u8]], tag: &[u8; TAG_BYTES]) -> Result<Choice> {
    let expected = compute_tag(keys, parts)?;
    Ok(ct_eq_choice(expected, tag))
}
