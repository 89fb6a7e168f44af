//! Thin wrappers over SHA-3 and SHAKE with multi-part input
//!
//! Every hash in the workspace absorbs a list of byte strings. Callers that
//! mix variable-length fields must length-prefix them themselves; all current
//! call sites absorb fixed-length fields only, apart from a trailing message.

use sha3::digest::{Digest, ExtendableOutput, Update};
use sha3::{Sha3_256, Sha3_512, Shake128, Shake256};

pub use sha3::digest::XofReader;
pub use sha3::{Shake128Reader, Shake256Reader};

/// SHAKE128 over the concatenation of `parts`, as a stream
pub fn shake128_reader(parts: &[&[u8]]) -> Shake128Reader {
    let mut h = Shake128::default();
    for part in parts {
        Update::update(&mut h, part);
    }
    h.finalize_xof()
}

/// SHAKE256 over the concatenation of `parts`, as a stream
pub fn shake256_reader(parts: &[&[u8]]) -> Shake256Reader {
    let mut h = Shake256::default();
    for part in parts {
        Update::update(&mut h, part);
    }
    h.finalize_xof()
}

/// Fill `out` with SHAKE256 over the concatenation of `parts`
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    shake256_reader(parts).read(out);
}

/// SHA3-256 over the concatenation of `parts`
pub fn sha3_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut h = Sha3_256::new();
    for part in parts {
        Digest::update(&mut h, part);
    }
    h.finalize().into()
}

/// SHA3-512 over the concatenation of `parts`
pub fn sha3_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut h = Sha3_512::new();
    for part in parts {
        Digest::update(&mut h, part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&h.finalize());
    out
}
