//! The harness driven end to end from its on-disk configuration

use std::path::PathBuf;

use pqe_params::SecurityLevel;
use pqe_tests::ind::PayloadBitDistinguisher;
use pqe_tests::kat::{load_vectors, vectors_from_json, vectors_to_json};
use pqe_tests::{
    collect_ciphertext_samples, generate_known_answers, run_indistinguishability_game,
    run_known_answer_tests, CancellationToken, HarnessConfig, KatOperation, KatSeed,
};

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("vectors/harness.toml")
}

fn recorded_vectors_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("vectors/kat.json")
}

fn seeds() -> Vec<KatSeed> {
    vec![
        KatSeed::new("keygen-128", SecurityLevel::L128, KatOperation::Keygen, [1; 32]),
        KatSeed::new("encrypt-192", SecurityLevel::L192, KatOperation::Encrypt, [2; 32])
            .with_input(b"known answer"),
        KatSeed::new("sign-128", SecurityLevel::L128, KatOperation::Sign, [3; 32])
            .with_input(b"signed known answer"),
        KatSeed::new("encrypt-256-empty", SecurityLevel::L256, KatOperation::Encrypt, [4; 32]),
    ]
}

#[test]
fn loads_the_shipped_config() {
    let config = HarnessConfig::load(config_path()).unwrap();
    assert_eq!(config.levels, vec![SecurityLevel::L128]);
    assert_eq!(config.seed, 24301);
    assert_eq!(config.ind_trials, 32);
    assert_eq!(config.plaintext_len, 64);
    config.validate().unwrap();
}

#[test]
fn recorded_known_answers_pass() {
    let vectors = load_vectors(recorded_vectors_path()).unwrap();
    for level in SecurityLevel::ALL {
        for operation in [KatOperation::Keygen, KatOperation::Encrypt, KatOperation::Sign] {
            assert!(
                vectors.iter().any(|v| v.level == level && v.operation == operation),
                "no {:?} vector at {}",
                operation,
                level
            );
        }
    }

    let report = run_known_answer_tests(&vectors, &CancellationToken::new());
    assert!(report.all_passed(), "{:?}", report.failures);
    assert_eq!(report.passed, vectors.len());
}

#[test]
fn known_answers_survive_a_json_round_trip() {
    let vectors = generate_known_answers(&seeds()).unwrap();
    let text = vectors_to_json(&vectors, Some("integration")).unwrap();
    let reloaded = vectors_from_json(&text).unwrap();
    assert_eq!(reloaded, vectors);

    let report = run_known_answer_tests(&reloaded, &CancellationToken::new());
    assert!(report.all_passed(), "{:?}", report.failures);
    assert_eq!(report.total, 4);
}

#[test]
fn known_answers_are_reproducible() {
    let first = generate_known_answers(&seeds()).unwrap();
    let second = generate_known_answers(&seeds()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn edited_expectation_is_reported() {
    let mut vectors = generate_known_answers(&seeds()).unwrap();
    vectors[1].expected_output = "00".repeat(32);
    let report = run_known_answer_tests(&vectors, &CancellationToken::new());
    assert!(!report.all_passed());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].label, "encrypt-192");
}

#[test]
fn game_and_statistics_from_the_shipped_config() {
    let config = HarnessConfig::load(config_path()).unwrap();
    let token = CancellationToken::new();

    let report = run_indistinguishability_game(&config, &PayloadBitDistinguisher, &token).unwrap();
    assert!(report.complete);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].trials, 32);
    assert!(report.results[0].consistent_with_zero());

    let batch = collect_ciphertext_samples(&config, &token).unwrap();
    assert!(batch.complete);
    assert_eq!(batch.len(), 8);
    let stats = batch.check().unwrap();
    assert!(stats.complete);
    assert!(stats.passes(1e-4), "{:?}", stats);
}

#[test]
fn cancelled_run_is_incomplete() {
    let vectors = generate_known_answers(&seeds()).unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let report = run_known_answer_tests(&vectors, &token);
    assert!(!report.complete);
    assert!(!report.all_passed());

    let config = HarnessConfig::load(config_path()).unwrap();
    let batch = collect_ciphertext_samples(&config, &token).unwrap();
    assert!(!batch.complete);
    assert!(batch.is_empty());
}
