//! Words in the Artin generators and their sampling from an XOF

use core::ops::Range;

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::xof::XofReader;

/// One letter `σ_index` or `σ_index⁻¹`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Generator {
    /// Position of the crossing, `0..strands - 1`
    pub index: u8,
    /// Whether the letter is inverted
    pub inverse: bool,
}

impl Generator {
    /// σ_index
    pub const fn positive(index: u8) -> Self {
        Self {
            index,
            inverse: false,
        }
    }

    /// σ_index⁻¹
    pub const fn negative(index: u8) -> Self {
        Self {
            index,
            inverse: true,
        }
    }

    /// Whether `self · other` cancels
    pub fn cancels(&self, other: &Self) -> bool {
        self.index == other.index && self.inverse != other.inverse
    }
}

/// Sample `len` letters over the generators in `range`
///
/// Each letter consumes one XOF byte, rejecting bytes that would bias the
/// choice and letters that would cancel the previous one.
pub fn sample_word<X: XofReader>(
    xof: &mut X,
    range: Range<u8>,
    len: usize,
) -> Result<Vec<Generator>> {
    if range.is_empty() {
        return Err(Error::param("generator range", "empty"));
    }
    let choices = 2 * (range.end - range.start) as u32;
    if choices > 256 {
        return Err(Error::param("generator range", "too wide"));
    }
    let limit = 256 - 256 % choices;

    let mut word: Vec<Generator> = Vec::with_capacity(len);
    let mut buf = [0u8; 64];
    let mut pos = buf.len();
    while word.len() < len {
        if pos == buf.len() {
            xof.read(&mut buf);
            pos = 0;
        }
        let b = buf[pos] as u32;
        pos += 1;
        if b >= limit {
            continue;
        }
        let v = b % choices;
        let letter = Generator {
            index: range.start + (v >> 1) as u8,
            inverse: v & 1 == 1,
        };
        if word.last().map_or(false, |prev| prev.cancels(&letter)) {
            continue;
        }
        word.push(letter);
    }
    buf.zeroize();
    Ok(word)
}
