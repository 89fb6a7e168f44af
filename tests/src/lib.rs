//! Validation harness for the pqe hybrid cryptosystem
//!
//! Everything here drives the public API of `pqe-hybrid` only:
//!
//! - [`kat`]: byte-exact known-answer tests from seeded generators
//! - [`ind`]: an empirical indistinguishability game with a pluggable
//!   distinguisher
//! - [`stats`]: entropy, monobit and chi-squared checks on output bytes
//!
//! Batches run in parallel on rayon's pool and honour a
//! [`CancellationToken`]; a cancelled run returns a report marked
//! incomplete.

pub mod config;
pub mod error;
pub mod ind;
pub mod kat;
pub mod model;
pub mod stats;

pub use cancel::CancellationToken;
pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use ind::{run_indistinguishability_game, Distinguisher, IndGameReport};
pub use kat::{generate_known_answers, run_known_answer_tests, KatReport};
pub use model::{KatOperation, KatSeed, TestVector};
pub use stats::{collect_ciphertext_samples, run_statistical_checks, SampleBatch, StatisticalReport};
