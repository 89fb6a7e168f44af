//! Known-answer tests
//!
//! A vector fixes a seed, an operation and an input; the harness replays
//! the operation from a `ChaCha20Rng` seeded with that seed and compares
//! the SHA3-256 of the produced bytes with the recorded digest. Any
//! mismatch is a failure entry, never a warning.

use std::fs;
use std::path::Path;

use pqe_api::{Serialize, SerializeSecret};
use pqe_hybrid::{encrypt, generate_keypair, sign};
use pqe_params::SecurityLevel;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use sha3::{Digest, Sha3_256};

use crate::cancel::CancellationToken;
use crate::error::{HarnessError, Result};
use crate::model::{KatOperation, KatSeed, TestVector, VectorFile};

/// One failed vector
#[derive(Debug, Clone, PartialEq)]
pub struct KatFailure {
    pub label: String,
    pub expected: String,
    /// Produced digest, or the error that stopped the vector
    pub actual: String,
}

/// Outcome of a known-answer run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KatReport {
    pub total: usize,
    pub passed: usize,
    pub skipped: usize,
    pub failures: Vec<KatFailure>,
    /// False when the run was cancelled before every vector was checked
    pub complete: bool,
}

impl KatReport {
    pub fn all_passed(&self) -> bool {
        self.complete && self.failures.is_empty() && self.passed == self.total
    }
}

enum Outcome {
    Passed,
    Failed(KatFailure),
    Skipped,
}

fn produce(level: SecurityLevel, operation: KatOperation, seed: [u8; 32], input: &[u8]) -> Result<Vec<u8>> {
    let mut rng = ChaCha20Rng::from_seed(seed);
    let (pk, sk) = generate_keypair(level, &mut rng)?;
    let bytes = match operation {
        KatOperation::Keygen => {
            let mut out = pk.to_bytes();
            out.extend_from_slice(&sk.to_bytes_zeroizing());
            out
        }
        KatOperation::Encrypt => encrypt(&pk, input, &mut rng)?.to_bytes(),
        KatOperation::Sign => sign(&sk, input, &mut rng)?.to_bytes(),
    };
    Ok(bytes)
}

fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha3_256::digest(bytes))
}

fn decode_seed(vector: &TestVector) -> Result<[u8; 32]> {
    let raw = hex::decode(&vector.seed)?;
    raw.as_slice().try_into().map_err(|_| HarnessError::InvalidVector {
        label: vector.label.clone(),
        reason: format!("seed must be 32 bytes, got {}", raw.len()),
    })
}

fn replay(vector: &TestVector) -> Result<String> {
    if vector.tolerance != 0.0 {
        return Err(HarnessError::InvalidVector {
            label: vector.label.clone(),
            reason: "byte-exact vectors must carry zero tolerance".into(),
        });
    }
    let seed = decode_seed(vector)?;
    let input = hex::decode(&vector.input)?;
    let bytes = produce(vector.level, vector.operation, seed, &input)?;
    Ok(digest_hex(&bytes))
}

fn check(vector: &TestVector, token: &CancellationToken) -> Outcome {
    if token.is_cancelled() {
        return Outcome::Skipped;
    }
    let expected = vector.expected_output.to_ascii_lowercase();
    match replay(vector) {
        Ok(actual) if actual == expected => Outcome::Passed,
        Ok(actual) => Outcome::Failed(KatFailure {
            label: vector.label.clone(),
            expected,
            actual,
        }),
        Err(e) => Outcome::Failed(KatFailure {
            label: vector.label.clone(),
            expected,
            actual: e.to_string(),
        }),
    }
}

/// Replay every vector in parallel and tally the results
pub fn run_known_answer_tests(vectors: &[TestVector], token: &CancellationToken) -> KatReport {
    log::info!("running {} known-answer vectors", vectors.len());
    let outcomes: Vec<Outcome> = vectors.par_iter().map(|v| check(v, token)).collect();

    let mut report = KatReport {
        total: vectors.len(),
        ..KatReport::default()
    };
    for outcome in outcomes {
        match outcome {
            Outcome::Passed => report.passed += 1,
            Outcome::Skipped => report.skipped += 1,
            Outcome::Failed(failure) => {
                log::debug!("known-answer vector {} failed", failure.label);
                report.failures.push(failure);
            }
        }
    }
    report.complete = report.skipped == 0;
    report
}

/// Record vectors from seeds with the current implementation
pub fn generate_known_answers(seeds: &[KatSeed]) -> Result<Vec<TestVector>> {
    seeds
        .par_iter()
        .map(|s| {
            let bytes = produce(s.level, s.operation, s.seed, &s.input)?;
            Ok(TestVector {
                label: s.label.clone(),
                level: s.level,
                operation: s.operation,
                seed: hex::encode(s.seed),
                input: hex::encode(&s.input),
                expected_output: digest_hex(&bytes),
                tolerance: 0.0,
            })
        })
        .collect()
}

/// Parse a JSON vector file
pub fn vectors_from_json(text: &str) -> Result<Vec<TestVector>> {
    let file: VectorFile = serde_json::from_str(text)?;
    Ok(file.vectors)
}

/// Serialize vectors as a JSON vector file
pub fn vectors_to_json(vectors: &[TestVector], description: Option<&str>) -> Result<String> {
    let file = VectorFile {
        description: description.map(str::to_string),
        vectors: vectors.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Read a JSON vector file from disk
pub fn load_vectors(path: impl AsRef<Path>) -> Result<Vec<TestVector>> {
    let text = fs::read_to_string(path.as_ref())?;
    vectors_from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> Vec<KatSeed> {
        vec![
            KatSeed::new("keygen-128", SecurityLevel::L128, KatOperation::Keygen, [1; 32]),
            KatSeed::new("encrypt-128", SecurityLevel::L128, KatOperation::Encrypt, [2; 32])
                .with_input(b"known answer"),
        ]
    }

    #[test]
    fn test_generated_vectors_replay() {
        let vectors = generate_known_answers(&seeds()).unwrap();
        assert_eq!(vectors[0].expected_output.len(), 64);
        let report = run_known_answer_tests(&vectors, &CancellationToken::new());
        assert!(report.all_passed(), "{:?}", report.failures);
    }

    #[test]
    fn test_mismatch_is_a_failure() {
        let mut vectors = generate_known_answers(&seeds()).unwrap();
        vectors[1].expected_output = "00".repeat(32);
        let report = run_known_answer_tests(&vectors, &CancellationToken::new());
        assert_eq!(report.passed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "encrypt-128");
        assert!(!report.all_passed());
    }

    #[test]
    fn test_nonzero_tolerance_is_rejected() {
        let mut vectors = generate_known_answers(&seeds()[..1]).unwrap();
        vectors[0].tolerance = 0.5;
        let report = run_known_answer_tests(&vectors, &CancellationToken::new());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].actual.contains("zero tolerance"));
    }

    #[test]
    fn test_cancelled_run_is_incomplete() {
        let vectors = generate_known_answers(&seeds()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let report = run_known_answer_tests(&vectors, &token);
        assert_eq!(report.skipped, 2);
        assert!(!report.complete);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_json_round_trip() {
        let vectors = generate_known_answers(&seeds()).unwrap();
        let text = vectors_to_json(&vectors, Some("unit test")).unwrap();
        assert!(text.contains("\"operation\": \"encrypt\""));
        assert_eq!(vectors_from_json(&text).unwrap(), vectors);
    }
}
