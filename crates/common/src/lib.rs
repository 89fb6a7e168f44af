//! Common functionality shared across the pqe workspace
//!
//! Holds the process-wide randomness source used by the convenience API
//! and the fallible fill helper every layer draws its randomness through.

pub mod rng;

pub use rng::{fill_random, GlobalRng};
