//! Validation utilities shared by the decoders

use super::{Error, Result};

/// Validate an exact length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidLength {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate a structural condition on decoded data
#[inline(always)]
pub fn well_formed(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::malformed(context, reason));
    }
    Ok(())
}

/// Validate a serialized tag byte
#[inline(always)]
pub fn tag(context: &'static str, actual: u8, expected: u8) -> Result<()> {
    if actual != expected {
        return Err(Error::UnsupportedFormat { context, tag: actual });
    }
    Ok(())
}
