//! Harness configuration: defaults, builder methods and TOML loading

use std::fs;
use std::path::Path;

use pqe_params::SecurityLevel;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Runtime settings shared by every harness entry point
///
/// Missing TOML keys fall back to [`Default`]. Levels are written by bit
/// strength: `levels = [128, 256]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub levels: Vec<SecurityLevel>,
    pub seed: u64,
    pub ind_trials: usize,
    pub plaintext_len: usize,
    pub confidence: f64,
    pub statistical_samples: usize,
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            levels: SecurityLevel::ALL.to_vec(),
            seed: 0x5EED,
            ind_trials: 200,
            plaintext_len: 32,
            confidence: 0.99,
            statistical_samples: 64,
            parallel: true,
        }
    }
}

// Builder methods for easy customization
impl HarnessConfig {
    pub fn with_levels(mut self, levels: &[SecurityLevel]) -> Self {
        self.levels = levels.to_vec();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ind_trials(mut self, trials: usize) -> Self {
        self.ind_trials = trials;
        self
    }

    pub fn with_plaintext_len(mut self, len: usize) -> Self {
        self.plaintext_len = len;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_statistical_samples(mut self, samples: usize) -> Self {
        self.statistical_samples = samples;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

// Predefined configurations
impl HarnessConfig {
    /// Small run over the 128-bit level only, for unit tests
    pub fn quick() -> Self {
        Self::default()
            .with_levels(&[SecurityLevel::L128])
            .with_ind_trials(64)
            .with_statistical_samples(16)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("loading harness config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(HarnessError::InvalidConfig("no security levels selected".into()));
        }
        if self.ind_trials == 0 {
            return Err(HarnessError::InvalidConfig("ind_trials must be positive".into()));
        }
        if self.plaintext_len == 0 {
            return Err(HarnessError::InvalidConfig("plaintext_len must be positive".into()));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "confidence must lie in (0, 1), got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = HarnessConfig::from_toml_str("levels = [128, 256]\nind_trials = 10\n").unwrap();
        assert_eq!(config.levels, vec![SecurityLevel::L128, SecurityLevel::L256]);
        assert_eq!(config.ind_trials, 10);
        assert_eq!(config.plaintext_len, HarnessConfig::default().plaintext_len);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            HarnessConfig::from_toml_str("levels = [100]"),
            Err(HarnessError::Toml(_))
        ));
        assert!(matches!(
            HarnessConfig::from_toml_str("confidence = 1.5"),
            Err(HarnessError::InvalidConfig(_))
        ));
        assert!(matches!(
            HarnessConfig::from_toml_str("levels = []"),
            Err(HarnessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::quick().with_seed(9).sequential();
        assert_eq!(config.levels, vec![SecurityLevel::L128]);
        assert_eq!(config.seed, 9);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }
}
