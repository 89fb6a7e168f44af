//! Hybrid signature: `level ‖ version ‖ c̃ ‖ w1 ‖ z ‖ proof digest ‖ responses`
//!
//! The responses are variable length: each round contributes a 32-byte
//! seed or one length-prefixed braid, depending on its challenge bit. The
//! bits of `c̃` say which; every braid header gives its own length.

use pqe_api::error::validation;
use pqe_api::{Result, Serialize};
use pqe_group::{challenge_bits, GroupProof};
use pqe_lattice::polyvec::PolyVec;
use pqe_lattice::sign::{pack_w1, pack_z, unpack_w1, unpack_z};
use pqe_params::pqe::CHALLENGE_BYTES;
use pqe_params::{parameters_for, Parameters, SecurityLevel, SEED_BYTES};

use crate::format::{header, read_header};

/// Hybrid signature
#[derive(Clone, Debug)]
pub struct Signature {
    level: SecurityLevel,
    c_tilde: [u8; CHALLENGE_BYTES],
    w1: Vec<u32>,
    z: PolyVec,
    digest: [u8; SEED_BYTES],
    proof: GroupProof,
    encoded: Vec<u8>,
}

impl Signature {
    pub(crate) fn new(
        level: SecurityLevel,
        c_tilde: [u8; CHALLENGE_BYTES],
        w1: Vec<u32>,
        z: PolyVec,
        digest: [u8; SEED_BYTES],
        proof: GroupProof,
    ) -> Result<Self> {
        let p = parameters_for(level);
        let proof_bytes = proof.to_bytes(p)?;
        let mut encoded = Vec::with_capacity(p.signature_fixed_bytes() + proof_bytes.len());
        encoded.extend_from_slice(&header(level));
        encoded.extend_from_slice(&c_tilde);
        encoded.extend_from_slice(&pack_w1(p, &w1));
        encoded.extend_from_slice(&pack_z(p, &z));
        encoded.extend_from_slice(&digest);
        encoded.extend_from_slice(&proof_bytes);
        Ok(Self {
            level,
            c_tilde,
            w1,
            z,
            digest,
            proof,
            encoded,
        })
    }

    /// Security level of the signing key
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Parameter set of the signature's level
    pub fn params(&self) -> &'static Parameters {
        parameters_for(self.level)
    }

    /// Shared Fiat-Shamir challenge hash
    pub fn challenge(&self) -> &[u8; CHALLENGE_BYTES] {
        &self.c_tilde
    }

    /// Lattice commitment high bits
    pub fn w1(&self) -> &[u32] {
        &self.w1
    }

    /// Lattice response
    pub fn z(&self) -> &PolyVec {
        &self.z
    }

    /// Digest of the group proof commitments
    pub fn proof_digest(&self) -> &[u8; SEED_BYTES] {
        &self.digest
    }

    /// Group proof responses
    pub fn proof(&self) -> &GroupProof {
        &self.proof
    }

    /// Encoded length in bytes
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    /// Never true; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }
}

impl Serialize for Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.encoded.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (level, body) = read_header("hybrid signature", bytes)?;
        let p = parameters_for(level);
        validation::min_length("hybrid signature", bytes.len(), p.signature_fixed_bytes())?;

        let (c_bytes, rest) = body.split_at(CHALLENGE_BYTES);
        let (w1_bytes, rest) = rest.split_at(p.w1_bytes());
        let (z_bytes, rest) = rest.split_at(p.z_bytes());
        let (digest_bytes, proof_bytes) = rest.split_at(SEED_BYTES);

        let mut c_tilde = [0u8; CHALLENGE_BYTES];
        c_tilde.copy_from_slice(c_bytes);
        let mut digest = [0u8; SEED_BYTES];
        digest.copy_from_slice(digest_bytes);

        let w1 = unpack_w1(p, w1_bytes)?;
        let z = unpack_z(p, z_bytes)?;
        let bits = challenge_bits(&c_tilde, p.sdg_rounds);
        let proof = GroupProof::from_bytes(p, &bits, proof_bytes)?;

        Ok(Self {
            level,
            c_tilde,
            w1,
            z,
            digest,
            proof,
            encoded: bytes.to_vec(),
        })
    }
}
