//! Trait front ends for the hybrid scheme
//!
//! One generic type per trait, parameterized by a zero-sized level marker.
//! Keys and ciphertexts carry their own level tag; a key of another level
//! is rejected with `Error::InvalidParameter` before any work is done.

use core::marker::PhantomData;

use pqe_api::{
    Error, Kem, Pke, Result, SerializeSecret, Signature as SignatureTrait,
};
use pqe_params::{SecurityLevel, SEED_BYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::ciphertext::Ciphertext;
use crate::engine::{self, open, seal};
use crate::keys::{generate_keypair, HybridPublicKey, HybridSecretKey};
use crate::signature::Signature;

/// Compile-time selection of a security level
pub trait LevelMarker: Send + Sync + 'static {
    /// The selected level
    const LEVEL: SecurityLevel;
    /// Name reported by the KEM and PKE front ends
    const NAME: &'static str;
    /// Name reported by the signature front end
    const SIGNATURE_NAME: &'static str;
}

/// 128-bit level marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Level128;

/// 192-bit level marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Level192;

/// 256-bit level marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Level256;

impl LevelMarker for Level128 {
    const LEVEL: SecurityLevel = SecurityLevel::L128;
    const NAME: &'static str = "PQE-128";
    const SIGNATURE_NAME: &'static str = "PQE-SIG-128";
}

impl LevelMarker for Level192 {
    const LEVEL: SecurityLevel = SecurityLevel::L192;
    const NAME: &'static str = "PQE-192";
    const SIGNATURE_NAME: &'static str = "PQE-SIG-192";
}

impl LevelMarker for Level256 {
    const LEVEL: SecurityLevel = SecurityLevel::L256;
    const NAME: &'static str = "PQE-256";
    const SIGNATURE_NAME: &'static str = "PQE-SIG-256";
}

fn check_level<L: LevelMarker>(context: &'static str, level: SecurityLevel) -> Result<()> {
    if level != L::LEVEL {
        return Err(Error::param(
            context,
            format!("expected {}-bit key, got {}-bit", L::LEVEL.bits(), level.bits()),
        ));
    }
    Ok(())
}

/// 32-byte shared secret of the hybrid KEM
#[derive(Clone, Zeroize)]
pub struct HybridSharedSecret(Zeroizing<[u8; SEED_BYTES]>);

impl HybridSharedSecret {
    /// Raw secret bytes
    pub fn as_bytes(&self) -> &[u8; SEED_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for HybridSharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl core::fmt::Debug for HybridSharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("HybridSharedSecret([REDACTED])")
    }
}

impl SerializeSecret for HybridSharedSecret {
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        pqe_api::error::validation::length("hybrid shared secret", bytes.len(), SEED_BYTES)?;
        let mut secret = Zeroizing::new([0u8; SEED_BYTES]);
        secret.copy_from_slice(bytes);
        Ok(Self(secret))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.to_vec())
    }
}

/// Hybrid KEM: an encryption of the empty message whose keystream key is
/// the shared secret
pub struct HybridKem<L: LevelMarker> {
    _level: PhantomData<L>,
}

/// Hybrid public-key encryption
pub struct HybridPke<L: LevelMarker> {
    _level: PhantomData<L>,
}

/// Hybrid signature
pub struct HybridSignature<L: LevelMarker> {
    _level: PhantomData<L>,
}

impl<L: LevelMarker> Kem for HybridKem<L> {
    type PublicKey = HybridPublicKey;
    type SecretKey = HybridSecretKey;
    type SharedSecret = HybridSharedSecret;
    type Ciphertext = Ciphertext;
    type KeyPair = (HybridPublicKey, HybridSecretKey);

    fn name() -> &'static str {
        L::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair> {
        generate_keypair(L::LEVEL, rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn encapsulate<R: CryptoRng + RngCore>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        check_level::<L>("hybrid encapsulation", public_key.level())?;
        let (ct, keys) = seal(public_key, &[], rng)?;
        Ok((ct, HybridSharedSecret(Zeroizing::new(*keys.enc_key()))))
    }

    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::SharedSecret> {
        check_level::<L>("hybrid decapsulation", secret_key.level())?;
        let (plaintext, keys) = open(secret_key, ciphertext)?;
        if !plaintext.is_empty() {
            return Err(Error::AuthenticationFailed {
                context: "hybrid decapsulation",
            });
        }
        Ok(HybridSharedSecret(Zeroizing::new(*keys.enc_key())))
    }
}

impl<L: LevelMarker> Pke for HybridPke<L> {
    type PublicKey = HybridPublicKey;
    type SecretKey = HybridSecretKey;
    type Ciphertext = Ciphertext;

    fn name() -> &'static str {
        L::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)> {
        generate_keypair(L::LEVEL, rng)
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Self::Ciphertext> {
        check_level::<L>("hybrid encryption", pk_recipient.level())?;
        engine::encrypt(pk_recipient, plaintext, rng)
    }

    fn decrypt(sk_recipient: &Self::SecretKey, ciphertext: &Self::Ciphertext) -> Result<Vec<u8>> {
        check_level::<L>("hybrid decryption", sk_recipient.level())?;
        engine::decrypt(sk_recipient, ciphertext)
    }
}

impl<L: LevelMarker> SignatureTrait for HybridSignature<L> {
    type PublicKey = HybridPublicKey;
    type SecretKey = HybridSecretKey;
    type SignatureData = Signature;
    type KeyPair = (HybridPublicKey, HybridSecretKey);

    fn name() -> &'static str {
        L::SIGNATURE_NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair> {
        generate_keypair(L::LEVEL, rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData> {
        check_level::<L>("hybrid signing", secret_key.level())?;
        engine::sign(secret_key, message, rng)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()> {
        check_level::<L>("hybrid verification", public_key.level())?;
        engine::verify(public_key, message, signature)
    }
}

/// Hybrid KEM at the 128-bit level
pub type Pqe128 = HybridKem<Level128>;
/// Hybrid KEM at the 192-bit level
pub type Pqe192 = HybridKem<Level192>;
/// Hybrid KEM at the 256-bit level
pub type Pqe256 = HybridKem<Level256>;

/// Hybrid signature at the 128-bit level
pub type Pqe128Signature = HybridSignature<Level128>;
/// Hybrid signature at the 192-bit level
pub type Pqe192Signature = HybridSignature<Level192>;
/// Hybrid signature at the 256-bit level
pub type Pqe256Signature = HybridSignature<Level256>;
