//! Empirical indistinguishability game
//!
//! Per trial: the distinguisher picks two plaintexts of equal length, a
//! hidden bit selects one, the harness encrypts it with fresh randomness
//! and the distinguisher guesses the bit. The reported advantage
//! `2·Pr[correct] − 1` comes with a normal-approximation confidence
//! interval. This is a sanity check on the implementation, not a proof.

use pqe_hybrid::{encrypt, generate_keypair, Ciphertext, HybridPublicKey};
use pqe_params::SecurityLevel;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::cancel::CancellationToken;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};

/// Adversary plugged into the game
pub trait Distinguisher: Send + Sync {
    fn name(&self) -> &str;

    /// Two distinct plaintexts of exactly `len` bytes
    fn choose(&self, len: usize) -> (Vec<u8>, Vec<u8>);

    /// Guess which plaintext `ct` encrypts; `true` means the second
    fn guess(&self, pk: &HybridPublicKey, ct: &Ciphertext) -> bool;
}

/// Guesses from the low bit of the first payload byte, choosing all-zero
/// and all-one plaintexts
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBitDistinguisher;

impl Distinguisher for PayloadBitDistinguisher {
    fn name(&self) -> &str {
        "payload-bit"
    }

    fn choose(&self, len: usize) -> (Vec<u8>, Vec<u8>) {
        (vec![0x00; len], vec![0xFF; len])
    }

    fn guess(&self, _pk: &HybridPublicKey, ct: &Ciphertext) -> bool {
        ct.payload().first().map_or(false, |b| b & 1 == 1)
    }
}

/// Result of the game at one level
#[derive(Debug, Clone, PartialEq)]
pub struct IndLevelResult {
    pub level: SecurityLevel,
    pub distinguisher: String,
    pub trials: usize,
    pub successes: usize,
    /// `2·p − 1`, signed
    pub advantage: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl IndLevelResult {
    /// True when the confidence interval contains zero advantage
    pub fn consistent_with_zero(&self) -> bool {
        self.ci_low <= 0.0 && 0.0 <= self.ci_high
    }
}

/// Outcome of a game run over every configured level
#[derive(Debug, Clone, PartialEq)]
pub struct IndGameReport {
    pub results: Vec<IndLevelResult>,
    pub confidence: f64,
    pub complete: bool,
}

fn trial_rng(seed: u64, level: SecurityLevel, trial: usize) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ u64::from(level.bits()));
    rng.set_stream(trial as u64 + 1);
    rng
}

/// Run one trial; `None` once cancelled
fn play<D: Distinguisher + ?Sized>(
    config: &HarnessConfig,
    level: SecurityLevel,
    pk: &HybridPublicKey,
    distinguisher: &D,
    trial: usize,
    token: &CancellationToken,
) -> Option<Result<bool>> {
    if token.is_cancelled() {
        return None;
    }
    let mut rng = trial_rng(config.seed, level, trial);
    let hidden = rng.next_u32() & 1 == 1;
    let (m0, m1) = distinguisher.choose(config.plaintext_len);
    if m0.len() != m1.len() || m0 == m1 {
        return Some(Err(HarnessError::InvalidConfig(format!(
            "distinguisher {} must choose distinct plaintexts of equal length",
            distinguisher.name()
        ))));
    }
    let plaintext = if hidden { &m1 } else { &m0 };
    Some(
        encrypt(pk, plaintext, &mut rng)
            .map(|ct| distinguisher.guess(pk, &ct) == hidden)
            .map_err(HarnessError::from),
    )
}

fn normal_quantile(confidence: f64) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| HarnessError::InvalidConfig(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// Play `config.ind_trials` rounds at every configured level
pub fn run_indistinguishability_game<D: Distinguisher + ?Sized>(
    config: &HarnessConfig,
    distinguisher: &D,
    token: &CancellationToken,
) -> Result<IndGameReport> {
    config.validate()?;
    let z = normal_quantile(config.confidence)?;
    let mut report = IndGameReport {
        results: Vec::with_capacity(config.levels.len()),
        confidence: config.confidence,
        complete: true,
    };

    for &level in &config.levels {
        let mut key_rng = trial_rng(config.seed, level, 0);
        let (pk, _) = generate_keypair(level, &mut key_rng)?;
        log::info!(
            "IND game at {}: {} trials against {}",
            level,
            config.ind_trials,
            distinguisher.name()
        );

        let outcomes: Vec<Option<Result<bool>>> = if config.parallel {
            (1..=config.ind_trials)
                .into_par_iter()
                .map(|t| play(config, level, &pk, distinguisher, t, token))
                .collect()
        } else {
            (1..=config.ind_trials)
                .map(|t| play(config, level, &pk, distinguisher, t, token))
                .collect()
        };

        let mut trials = 0usize;
        let mut successes = 0usize;
        for outcome in outcomes {
            match outcome {
                None => report.complete = false,
                Some(result) => {
                    trials += 1;
                    if result? {
                        successes += 1;
                    }
                }
            }
        }
        if trials == 0 {
            break;
        }

        let p = successes as f64 / trials as f64;
        let half_width = z * (p * (1.0 - p) / trials as f64).sqrt();
        report.results.push(IndLevelResult {
            level,
            distinguisher: distinguisher.name().to_string(),
            trials,
            successes,
            advantage: 2.0 * p - 1.0,
            ci_low: 2.0 * (p - half_width) - 1.0,
            ci_high: 2.0 * (p + half_width) - 1.0,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqe_hybrid::{decrypt, HybridSecretKey};

    /// Holds the secret key, so it always wins
    struct KeyHolder {
        sk: HybridSecretKey,
    }

    impl Distinguisher for KeyHolder {
        fn name(&self) -> &str {
            "key-holder"
        }

        fn choose(&self, len: usize) -> (Vec<u8>, Vec<u8>) {
            (vec![0x00; len], vec![0x01; len])
        }

        fn guess(&self, _pk: &HybridPublicKey, ct: &Ciphertext) -> bool {
            decrypt(&self.sk, ct).map_or(false, |m| m[0] == 0x01)
        }
    }

    struct Identical;

    impl Distinguisher for Identical {
        fn name(&self) -> &str {
            "identical"
        }

        fn choose(&self, len: usize) -> (Vec<u8>, Vec<u8>) {
            (vec![7; len], vec![7; len])
        }

        fn guess(&self, _pk: &HybridPublicKey, _ct: &Ciphertext) -> bool {
            false
        }
    }

    fn config() -> HarnessConfig {
        HarnessConfig::quick().with_ind_trials(48).with_confidence(0.999)
    }

    #[test]
    fn test_blind_distinguisher_has_no_advantage() {
        let report =
            run_indistinguishability_game(&config(), &PayloadBitDistinguisher, &CancellationToken::new())
                .unwrap();
        assert!(report.complete);
        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.trials, 48);
        assert!(result.consistent_with_zero(), "{:?}", result);
    }

    #[test]
    fn test_key_holder_always_wins() {
        let config = config();
        let mut key_rng = trial_rng(config.seed, SecurityLevel::L128, 0);
        let (_, sk) = generate_keypair(SecurityLevel::L128, &mut key_rng).unwrap();
        let report =
            run_indistinguishability_game(&config, &KeyHolder { sk }, &CancellationToken::new()).unwrap();
        let result = &report.results[0];
        assert_eq!(result.successes, result.trials);
        assert_eq!(result.advantage, 1.0);
        assert!(!result.consistent_with_zero());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let token = CancellationToken::new();
        let config = config().with_ind_trials(12);
        let parallel = run_indistinguishability_game(&config, &PayloadBitDistinguisher, &token).unwrap();
        let sequential =
            run_indistinguishability_game(&config.sequential(), &PayloadBitDistinguisher, &token).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_identical_plaintexts_are_refused() {
        assert!(matches!(
            run_indistinguishability_game(&config(), &Identical, &CancellationToken::new()),
            Err(HarnessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cancelled_game_is_incomplete() {
        let token = CancellationToken::new();
        token.cancel();
        let report = run_indistinguishability_game(&config(), &PayloadBitDistinguisher, &token).unwrap();
        assert!(!report.complete);
        assert!(report.results.is_empty());
    }
}
