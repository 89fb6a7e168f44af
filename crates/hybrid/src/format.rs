//! Two-byte header shared by every serialized object: level tag, version

use pqe_api::error::validation;
use pqe_api::Result;
use pqe_params::{SecurityLevel, FORMAT_VERSION};

/// Header length in bytes
pub const HEADER_BYTES: usize = 2;

/// Header for `level` at the current format version
pub fn header(level: SecurityLevel) -> [u8; HEADER_BYTES] {
    [level.tag(), FORMAT_VERSION]
}

/// Split off and check the header; unknown tags are `UnsupportedFormat`
pub fn read_header<'a>(context: &'static str, bytes: &'a [u8]) -> Result<(SecurityLevel, &'a [u8])> {
    validation::min_length(context, bytes.len(), HEADER_BYTES)?;
    let level = SecurityLevel::from_tag(bytes[0])?;
    validation::tag(context, bytes[1], FORMAT_VERSION)?;
    Ok((level, &bytes[HEADER_BYTES..]))
}
