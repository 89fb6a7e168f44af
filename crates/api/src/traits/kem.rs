//! Trait definition for Key Encapsulation Mechanisms (KEM)
//!
//! Both layers of the hybrid scheme, and the hybrid combination itself, are
//! exposed through this interface. The shared secret of the combined KEM is
//! the KDF output over both layer secrets.

use super::serialize::{Serialize, SerializeSecret};
use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Trait for Key Encapsulation Mechanism (KEM) with domain-specific types.
pub trait Kem {
    /// Public key type.
    type PublicKey: Clone + Serialize;

    /// Secret key type, zeroized on drop by implementors.
    type SecretKey: Zeroize + Clone + SerializeSecret;

    /// Shared secret type.
    ///
    /// # Security Note
    /// Should be converted to application keys immediately after generation.
    type SharedSecret: Zeroize + Clone + SerializeSecret;

    /// Ciphertext type for the encapsulated key.
    type Ciphertext: Clone + Serialize;

    /// Keypair type for efficient storage of related keys.
    type KeyPair: Clone;

    /// Returns the KEM algorithm name.
    fn name() -> &'static str;

    /// Generate a new keypair.
    ///
    /// # Security Requirements
    /// - Must use the provided CSPRNG for all randomness.
    /// - Must fail with `Error::InsufficientRandomness` if the RNG fails.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract public key from keypair.
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract secret key from keypair.
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Encapsulate a shared secret using the recipient's public key.
    fn encapsulate<R: CryptoRng + RngCore>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the private key.
    ///
    /// # Security Requirements
    /// - Must not branch on secret data before the final accept/reject.
    /// - Uses implicit rejection where the layer supports it.
    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::SharedSecret>;
}
