//! Trait definition for Public Key Encryption (PKE) schemes.

use crate::error::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Trait for authenticated public key encryption of arbitrary-length messages.
pub trait Pke {
    /// Public key type for the PKE scheme.
    type PublicKey: Clone;

    /// Secret key type for the PKE scheme.
    type SecretKey: Zeroize + Clone;

    /// Ciphertext type produced by the PKE scheme.
    type Ciphertext: Clone;

    /// Returns the PKE algorithm name.
    fn name() -> &'static str;

    /// Generates a new key pair for the PKE scheme.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encrypts a plaintext message using the recipient's public key.
    ///
    /// # Arguments
    /// * `pk_recipient` - The recipient's public key.
    /// * `plaintext` - The message to encrypt; may be empty.
    /// * `rng` - A cryptographically secure random number generator.
    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Self::Ciphertext>;

    /// Decrypts a ciphertext using the recipient's secret key.
    ///
    /// Returns the plaintext only after the ciphertext has been authenticated.
    /// Every failure after parsing is reported as
    /// `Error::AuthenticationFailed`.
    fn decrypt(sk_recipient: &Self::SecretKey, ciphertext: &Self::Ciphertext) -> Result<Vec<u8>>;
}
