//! Statistical checks on produced bytes
//!
//! Shannon entropy per byte, monobit bias with its two-sided p-value and a
//! chi-squared goodness-of-fit test of the byte histogram against the
//! uniform distribution (255 degrees of freedom).

use pqe_hybrid::{encrypt, generate_keypair};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::cancel::CancellationToken;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticalReport {
    pub bytes: usize,
    /// False when the samples came from a cancelled collection
    pub complete: bool,
    /// Bits per byte, at most 8
    pub entropy: f64,
    /// `|ones / bits − 1/2|`
    pub monobit_bias: f64,
    pub monobit_p_value: f64,
    pub chi_squared: f64,
    pub chi_squared_p_value: f64,
}

impl StatisticalReport {
    /// Both tests pass at significance `alpha`
    pub fn passes(&self, alpha: f64) -> bool {
        self.monobit_p_value >= alpha && self.chi_squared_p_value >= alpha
    }
}

fn stats_error(e: statrs::StatsError) -> HarnessError {
    HarnessError::InvalidConfig(e.to_string())
}

/// Ciphertext samples gathered for the statistical checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleBatch {
    pub samples: Vec<Vec<u8>>,
    /// False when the run was cancelled before every sample was produced
    pub complete: bool,
}

impl SampleBatch {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Run every check; the report inherits this batch's completeness
    pub fn check(&self) -> Result<StatisticalReport> {
        let mut report = run_statistical_checks(&self.samples)?;
        report.complete = self.complete;
        Ok(report)
    }
}

/// Run every check over the concatenation of `samples`
pub fn run_statistical_checks(samples: &[Vec<u8>]) -> Result<StatisticalReport> {
    let mut histogram = [0u64; 256];
    let mut ones = 0u64;
    let mut bytes = 0usize;
    for sample in samples {
        for &b in sample {
            histogram[b as usize] += 1;
            ones += u64::from(b.count_ones());
        }
        bytes += sample.len();
    }
    if bytes == 0 {
        return Err(HarnessError::InvalidConfig("no sample bytes".into()));
    }

    let n = bytes as f64;
    let entropy = histogram
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum::<f64>();

    let bits = 8.0 * n;
    let monobit_bias = (ones as f64 / bits - 0.5).abs();
    // ones ~ N(bits/2, bits/4) under the uniform hypothesis
    let z = 2.0 * monobit_bias * bits.sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(stats_error)?;
    let monobit_p_value = 2.0 * (1.0 - normal.cdf(z));

    let expected = n / 256.0;
    let chi_squared = histogram
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum::<f64>();
    let chi = ChiSquared::new(255.0).map_err(stats_error)?;
    let chi_squared_p_value = 1.0 - chi.cdf(chi_squared);

    Ok(StatisticalReport {
        bytes,
        complete: true,
        entropy,
        monobit_bias,
        monobit_p_value,
        chi_squared,
        chi_squared_p_value,
    })
}

/// Encrypt all-zero plaintexts and keep `payload ‖ tag` of each ciphertext
///
/// With a zero plaintext the payload is the raw keystream. Cancellation
/// stops the run early; samples produced so far are kept and the batch is
/// marked incomplete.
pub fn collect_ciphertext_samples(config: &HarnessConfig, token: &CancellationToken) -> Result<SampleBatch> {
    collect_with_progress(config, token, &|_| {})
}

/// As [`collect_ciphertext_samples`], calling `progress` with the sample
/// index after each sample is produced
fn collect_with_progress(
    config: &HarnessConfig,
    token: &CancellationToken,
    progress: &(dyn Fn(usize) + Sync),
) -> Result<SampleBatch> {
    config.validate()?;
    let plaintext = vec![0u8; config.plaintext_len];
    let mut batch = SampleBatch {
        samples: Vec::with_capacity(config.levels.len() * config.statistical_samples),
        complete: true,
    };

    for &level in &config.levels {
        if token.is_cancelled() {
            batch.complete = false;
            break;
        }
        let mut key_rng = ChaCha20Rng::seed_from_u64(config.seed ^ u64::from(level.bits()));
        let (pk, _) = generate_keypair(level, &mut key_rng)?;

        let one = |i: usize| -> Option<Result<Vec<u8>>> {
            if token.is_cancelled() {
                return None;
            }
            let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
            rng.set_stream((u64::from(level.bits()) << 32) | i as u64);
            let sample = encrypt(&pk, &plaintext, &mut rng).map(|ct| {
                let mut sample = ct.payload().to_vec();
                sample.extend_from_slice(ct.tag());
                sample
            });
            progress(i);
            Some(sample.map_err(HarnessError::from))
        };

        let outcomes: Vec<Option<Result<Vec<u8>>>> = if config.parallel {
            (0..config.statistical_samples).into_par_iter().map(one).collect()
        } else {
            (0..config.statistical_samples).map(one).collect()
        };
        for outcome in outcomes {
            match outcome {
                None => batch.complete = false,
                Some(sample) => batch.samples.push(sample?),
            }
        }
    }

    if batch.complete {
        log::debug!("collected {} ciphertext samples", batch.len());
    } else {
        log::info!("sample collection cancelled after {} samples", batch.len());
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ciphertext_bytes_look_uniform() {
        let config = HarnessConfig::quick().with_plaintext_len(1024);
        let batch = collect_ciphertext_samples(&config, &CancellationToken::new()).unwrap();
        assert!(batch.complete);
        assert_eq!(batch.len(), 16);
        let report = batch.check().unwrap();
        assert!(report.complete);
        assert_eq!(report.bytes, 16 * (1024 + 32));
        assert!(report.entropy > 7.9, "{:?}", report);
        assert!(report.passes(1e-4), "{:?}", report);
    }

    #[test]
    fn test_constant_bytes_fail() {
        let report = run_statistical_checks(&[vec![0u8; 4096]]).unwrap();
        assert_eq!(report.entropy, 0.0);
        assert_eq!(report.monobit_bias, 0.5);
        assert!(!report.passes(1e-4));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(run_statistical_checks(&[]).is_err());
    }

    #[test]
    fn test_cancelled_collection() {
        let token = CancellationToken::new();
        token.cancel();
        let batch = collect_ciphertext_samples(&HarnessConfig::quick(), &token).unwrap();
        assert!(!batch.complete);
        assert!(batch.is_empty());
        assert!(batch.check().is_err());
    }

    #[test]
    fn test_cancellation_keeps_partial_samples() {
        let config = HarnessConfig::quick().sequential();
        let token = CancellationToken::new();
        let stop = token.clone();
        let batch = collect_with_progress(&config, &token, &|i: usize| {
            if i == 2 {
                stop.cancel();
            }
        })
        .unwrap();
        assert!(!batch.complete);
        assert_eq!(batch.len(), 3);

        let report = batch.check().unwrap();
        assert!(!report.complete);
        assert_eq!(report.bytes, 3 * (config.plaintext_len + 32));

        let full = collect_ciphertext_samples(&config, &CancellationToken::new()).unwrap();
        assert_eq!(&full.samples[..3], &batch.samples[..]);
    }
}
