//! Digital signature traits
//!
//! Signing is randomized (hedged): implementations mix fresh randomness into
//! the per-signature nonce, so `sign` takes an RNG.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque types that cannot be directly manipulated as bytes.
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key
    ///
    /// # Errors
    ///
    /// `Error::SigningFailed` if the rejection loop hits its attempt bound,
    /// `Error::InsufficientRandomness` if the RNG fails.
    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Returns `Error::InvalidSignature` without saying which check failed.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
