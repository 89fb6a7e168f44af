//! Hybrid ciphertext: `level ‖ version ‖ lattice ct ‖ group ct ‖ payload ‖ tag`

use pqe_api::error::validation;
use pqe_api::{Result, Serialize};
use pqe_group::GroupCiphertext;
use pqe_lattice::LweCiphertext;
use pqe_params::{parameters_for, Parameters, SecurityLevel, TAG_BYTES};

use crate::format::{header, read_header};

/// Hybrid ciphertext
///
/// Both layer ciphertexts are decoded strictly on parsing; the payload and
/// tag are opaque until decryption.
#[derive(Clone, Debug)]
pub struct Ciphertext {
    level: SecurityLevel,
    lwe: LweCiphertext,
    group: GroupCiphertext,
    lwe_bytes: Vec<u8>,
    group_bytes: Vec<u8>,
    payload: Vec<u8>,
    tag: [u8; TAG_BYTES],
}

impl Ciphertext {
    pub(crate) fn new(
        lwe: LweCiphertext,
        group: GroupCiphertext,
        payload: Vec<u8>,
        tag: [u8; TAG_BYTES],
    ) -> Result<Self> {
        let lwe_bytes = lwe.to_bytes();
        let group_bytes = group.to_bytes()?;
        Ok(Self {
            level: lwe.level(),
            lwe,
            group,
            lwe_bytes,
            group_bytes,
            payload,
            tag,
        })
    }

    /// Security level the ciphertext was produced at
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Parameter set of the ciphertext's level
    pub fn params(&self) -> &'static Parameters {
        parameters_for(self.level)
    }

    /// Lattice layer ciphertext
    pub fn lwe(&self) -> &LweCiphertext {
        &self.lwe
    }

    /// Group layer ciphertext
    pub fn group(&self) -> &GroupCiphertext {
        &self.group
    }

    /// Encoded lattice ciphertext
    pub fn lwe_bytes(&self) -> &[u8] {
        &self.lwe_bytes
    }

    /// Encoded group ciphertext
    pub fn group_bytes(&self) -> &[u8] {
        &self.group_bytes
    }

    /// Encrypted payload, as long as the plaintext
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// HMAC-SHA256 tag
    pub fn tag(&self) -> &[u8; TAG_BYTES] {
        &self.tag
    }

    /// Total encoded length
    pub fn len(&self) -> usize {
        self.params().ciphertext_bytes(self.payload.len())
    }

    /// True when the ciphertext carries an empty payload
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl Serialize for Ciphertext {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&header(self.level));
        out.extend_from_slice(&self.lwe_bytes);
        out.extend_from_slice(&self.group_bytes);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.tag);
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (level, body) = read_header("hybrid ciphertext", bytes)?;
        let p = parameters_for(level);
        validation::min_length("hybrid ciphertext", bytes.len(), p.ciphertext_bytes(0))?;

        let (lwe_bytes, rest) = body.split_at(p.lwe_ciphertext_bytes());
        let (group_bytes, rest) = rest.split_at(p.braid_bytes());
        let (payload, tag_bytes) = rest.split_at(rest.len() - TAG_BYTES);

        let lwe = LweCiphertext::from_bytes(level, lwe_bytes)?;
        let group = GroupCiphertext::from_bytes(level, group_bytes)?;
        let mut tag = [0u8; TAG_BYTES];
        tag.copy_from_slice(tag_bytes);
        Ok(Self {
            level,
            lwe,
            group,
            lwe_bytes: lwe_bytes.to_vec(),
            group_bytes: group_bytes.to_vec(),
            payload: payload.to_vec(),
            tag,
        })
    }
}
