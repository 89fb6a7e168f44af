//! End-to-end properties of hybrid encryption

use std::collections::HashSet;

use pqe_api::{Error, Serialize, SerializeSecret};
use pqe_hybrid::{decrypt, encrypt, generate_keypair, Ciphertext, HybridPublicKey, HybridSecretKey};
use pqe_params::{parameters_for, SecurityLevel};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn keys(level: SecurityLevel, seed: u64) -> (HybridPublicKey, HybridSecretKey) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    generate_keypair(level, &mut rng).expect("keygen failed")
}

fn seal(pk: &HybridPublicKey, plaintext: &[u8], seed: u64) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    encrypt(pk, plaintext, &mut rng).expect("encryption failed").to_bytes()
}

#[test]
fn round_trip_through_bytes_at_every_level() {
    for level in SecurityLevel::ALL {
        let (pk, sk) = keys(level, 100);
        let pk = HybridPublicKey::from_bytes(&pk.to_bytes()).unwrap();
        let sk = HybridSecretKey::from_bytes(&sk.to_bytes_zeroizing()).unwrap();
        for len in [0usize, 1, 135, 136, 137, 1000] {
            let message: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
            let bytes = seal(&pk, &message, len as u64);
            let ct = Ciphertext::from_bytes(&bytes).unwrap();
            assert_eq!(decrypt(&sk, &ct).unwrap(), message, "{} at length {}", level, len);
        }
    }
}

#[test]
fn single_bit_flips_never_decrypt() {
    let (pk, sk) = keys(SecurityLevel::L128, 101);
    let bytes = seal(&pk, b"sixteen byte msg", 102);
    let step = 97;
    for position in (0..bytes.len()).step_by(step).chain([bytes.len() - 1]) {
        for bit in [0u8, 7] {
            let mut tampered = bytes.clone();
            tampered[position] ^= 1 << bit;
            match Ciphertext::from_bytes(&tampered) {
                Err(e) => assert!(e.is_decoding_error(), "byte {}: {:?}", position, e),
                Ok(ct) => assert!(
                    matches!(decrypt(&sk, &ct), Err(Error::AuthenticationFailed { .. })),
                    "flip at byte {} bit {} accepted",
                    position,
                    bit
                ),
            }
        }
    }
}

#[test]
fn level256_ping_pong() {
    let (pk, sk) = keys(SecurityLevel::L256, 103);
    for (i, word) in [b"ping", b"pong"].iter().enumerate() {
        let ct = Ciphertext::from_bytes(&seal(&pk, *word, 104 + i as u64)).unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), word.to_vec());
    }
}

#[test]
fn level128_zero_block() {
    let (pk, sk) = keys(SecurityLevel::L128, 105);
    let (_, other) = keys(SecurityLevel::L128, 106);
    let bytes = seal(&pk, &[0u8; 32], 107);
    assert_eq!(bytes.len(), parameters_for(SecurityLevel::L128).ciphertext_bytes(32));
    assert_eq!(bytes.len(), 2886);

    let ct = Ciphertext::from_bytes(&bytes).unwrap();
    assert_eq!(decrypt(&sk, &ct).unwrap(), vec![0u8; 32]);
    assert!(matches!(
        decrypt(&other, &ct),
        Err(Error::AuthenticationFailed { .. })
    ));
}

const INDEPENDENT_KEYS: u64 = 64;

#[test]
fn independent_keys() {
    for level in SecurityLevel::ALL {
        let mut secret_keys = HashSet::new();
        let mut lattice_keys = HashSet::new();
        let mut group_keys = HashSet::new();
        for i in 0..INDEPENDENT_KEYS {
            let (pk, sk) = keys(level, 1_000 + i);
            assert!(secret_keys.insert(sk.to_bytes_zeroizing().to_vec()), "{} key {} repeats", level, i);
            assert!(lattice_keys.insert(pk.lwe().to_bytes()), "{} lattice key {} repeats", level, i);
            assert!(group_keys.insert(pk.group().to_bytes().unwrap()), "{} group key {} repeats", level, i);
        }
    }

    let (pk_a, sk_a) = keys(SecurityLevel::L192, 108);
    let (_, sk_b) = keys(SecurityLevel::L192, 109);
    let ct = Ciphertext::from_bytes(&seal(&pk_a, b"for a only", 110)).unwrap();
    assert!(decrypt(&sk_a, &ct).is_ok());
    assert!(matches!(
        decrypt(&sk_b, &ct),
        Err(Error::AuthenticationFailed { .. })
    ));
}

#[test]
fn unknown_tags_are_unsupported() {
    let (pk, sk) = keys(SecurityLevel::L128, 111);
    let ct = seal(&pk, b"tags", 112);
    let sk_bytes = sk.to_bytes_zeroizing().to_vec();

    for (position, value) in [(0usize, 0x00u8), (0, 0x04), (1, 0x00), (1, 0xFF)] {
        let mut bad_pk = pk.to_bytes();
        bad_pk[position] = value;
        assert!(matches!(
            HybridPublicKey::from_bytes(&bad_pk),
            Err(Error::UnsupportedFormat { .. })
        ));

        let mut bad_sk = sk_bytes.clone();
        bad_sk[position] = value;
        assert!(matches!(
            HybridSecretKey::from_bytes(&bad_sk),
            Err(Error::UnsupportedFormat { .. })
        ));

        let mut bad_ct = ct.clone();
        bad_ct[position] = value;
        assert!(matches!(
            Ciphertext::from_bytes(&bad_ct),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}

#[test]
fn relabelled_level_is_rejected() {
    // a 128-bit key claiming to be 192-bit has the wrong length
    let (pk, _) = keys(SecurityLevel::L128, 113);
    let mut bytes = pk.to_bytes();
    bytes[0] = SecurityLevel::L192.tag();
    assert!(matches!(
        HybridPublicKey::from_bytes(&bytes),
        Err(Error::InvalidLength { .. })
    ));
}
