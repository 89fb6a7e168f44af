//! End-to-end properties of hybrid signatures

use pqe_api::{Error, Serialize};
use pqe_hybrid::{generate_keypair, sign, verify, HybridPublicKey, HybridSecretKey, Signature};
use pqe_params::SecurityLevel;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn keys(level: SecurityLevel, seed: u64) -> (HybridPublicKey, HybridSecretKey) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    generate_keypair(level, &mut rng).expect("keygen failed")
}

fn sign_bytes(sk: &HybridSecretKey, message: &[u8], seed: u64) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    sign(sk, message, &mut rng).expect("signing failed").to_bytes()
}

#[test]
fn signatures_verify_at_every_level() {
    for level in SecurityLevel::ALL {
        let (pk, sk) = keys(level, 200);
        let bytes = sign_bytes(&sk, b"every level", 201);
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.level(), level);
        verify(&pk, b"every level", &sig).unwrap();
    }
}

#[test]
fn signatures_bind_the_message() {
    let (pk, sk) = keys(SecurityLevel::L128, 202);
    let sig = Signature::from_bytes(&sign_bytes(&sk, b"original", 203)).unwrap();
    for other in [&b"original "[..], b"Original", b""] {
        assert!(matches!(
            verify(&pk, other, &sig),
            Err(Error::InvalidSignature { .. })
        ));
    }
}

#[test]
fn level256_ping_signature() {
    let (pk, sk) = keys(SecurityLevel::L256, 214);
    let sig = Signature::from_bytes(&sign_bytes(&sk, b"ping", 215)).unwrap();
    assert_eq!(sig.level(), SecurityLevel::L256);
    verify(&pk, b"ping", &sig).unwrap();
    assert!(matches!(
        verify(&pk, b"pong", &sig),
        Err(Error::InvalidSignature { .. })
    ));
}

#[test]
fn signatures_bind_the_key() {
    let (_, sk) = keys(SecurityLevel::L128, 204);
    let (other_pk, _) = keys(SecurityLevel::L128, 205);
    let sig = Signature::from_bytes(&sign_bytes(&sk, b"mine", 206)).unwrap();
    assert!(verify(&other_pk, b"mine", &sig).is_err());
}

#[test]
fn signing_is_hedged() {
    let (pk, sk) = keys(SecurityLevel::L128, 207);
    let a = sign_bytes(&sk, b"same message", 208);
    let b = sign_bytes(&sk, b"same message", 209);
    assert_ne!(a, b);
    assert_eq!(a, sign_bytes(&sk, b"same message", 208));
    verify(&pk, b"same message", &Signature::from_bytes(&b).unwrap()).unwrap();
}

#[test]
fn flipped_bytes_are_rejected() {
    let (pk, sk) = keys(SecurityLevel::L128, 210);
    let bytes = sign_bytes(&sk, b"tamper", 211);
    for position in (2..bytes.len()).step_by(509) {
        let mut tampered = bytes.clone();
        tampered[position] ^= 0x10;
        if let Ok(sig) = Signature::from_bytes(&tampered) {
            assert!(verify(&pk, b"tamper", &sig).is_err(), "flip at {} accepted", position);
        }
    }
}

#[test]
fn truncated_signature_is_a_decoding_error() {
    let (_, sk) = keys(SecurityLevel::L128, 212);
    let bytes = sign_bytes(&sk, b"short", 213);
    let err = Signature::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(err.is_decoding_error());
}
