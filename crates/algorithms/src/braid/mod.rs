//! Braid groups on a small number of strands
//!
//! Braids are kept in left normal form (Garside), so equality of group
//! elements is equality of representations. Only what the conjugacy layer
//! needs is provided: products, inverses, conjugation, words sampled over a
//! generator range and strict byte encodings.

mod encoding;
pub mod normal_form;
pub mod permutation;
pub mod word;

pub use normal_form::Braid;
pub use permutation::{Permutation, MAX_STRANDS};
pub use word::{sample_word, Generator};

use core::ops::Range;

/// Generators `σ_0 … σ_{m/2-2}`, acting only on the left half of the strands
pub fn left_generators(strands: usize) -> Range<u8> {
    0..(strands / 2 - 1) as u8
}

/// Generators `σ_{m/2} … σ_{m-2}`, acting only on the right half
pub fn right_generators(strands: usize) -> Range<u8> {
    (strands / 2) as u8..(strands - 1) as u8
}

/// Every generator `σ_0 … σ_{m-2}`
pub fn all_generators(strands: usize) -> Range<u8> {
    0..(strands - 1) as u8
}
