//! Sibert-Dehornoy-Girault proof of knowledge of the secret conjugator
//!
//! Round `i` commits to `t_i = r_i·y·r_i⁻¹` for a mask `r_i` over all
//! generators. Only a digest of the commitments travels in the signature.
//! For challenge bit 0 the prover opens the seed of `r_i` and the verifier
//! recomputes `r_i·y·r_i⁻¹`; for bit 1 it sends `s_i = r_i·a` and the
//! verifier recomputes `s_i·x·s_i⁻¹`. Both equal `t_i`.
//!
//! Verification recomputes every commitment and accepts only an exact
//! digest match.

use pqe_algorithms::braid::{all_generators, Braid};
use pqe_algorithms::xof::{shake256, shake256_reader, XofReader};
use pqe_api::error::validation;
use pqe_api::{Error, Result};
use pqe_internal::constant_time::ct_eq;
use pqe_params::{Parameters, SEED_BYTES};
use sha3::{Digest, Sha3_256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain;
use crate::keys::{braid_from_seed, GroupPublicKey, GroupSecretKey};

/// Masks and the digest of their commitments, before the challenge is known
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ProofCommitments {
    seeds: Vec<[u8; 32]>,
    masks: Vec<Braid>,
    digest: [u8; 32],
}

impl ProofCommitments {
    /// Digest bound into the Fiat-Shamir challenge
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }
}

/// Answer for one round
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundResponse {
    /// Challenge bit 0: the mask seed
    Seed([u8; 32]),
    /// Challenge bit 1: `r·a` in normal form
    Element(Braid),
}

/// All round responses, in round order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupProof {
    responses: Vec<RoundResponse>,
}

impl GroupProof {
    /// Round responses
    pub fn responses(&self) -> &[RoundResponse] {
        &self.responses
    }

    /// Concatenated responses: 32 bytes per seed, one compact braid per
    /// element
    pub fn to_bytes(&self, params: &Parameters) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for r in &self.responses {
            match r {
                RoundResponse::Seed(seed) => out.extend_from_slice(seed),
                RoundResponse::Element(s) => {
                    out.extend_from_slice(&s.to_compact_bytes(params.max_factors())?)
                }
            }
        }
        Ok(out)
    }

    /// Upper bound on the encoded length for the given challenge bits
    pub fn max_encoded_len(params: &Parameters, bits: &[bool]) -> usize {
        bits.iter()
            .map(|&b| if b { params.braid_bytes() } else { SEED_BYTES })
            .sum()
    }

    /// Decode against the challenge bits, which fix every round's kind
    ///
    /// Each element carries its own length in its header. Trailing bytes
    /// after the last round are rejected.
    pub fn from_bytes(params: &Parameters, bits: &[bool], bytes: &[u8]) -> Result<Self> {
        let mut responses = Vec::with_capacity(bits.len());
        let mut rest = bytes;
        for &bit in bits {
            if bit {
                let (s, used) = Braid::read_compact(rest, params.strands, params.max_factors())?;
                responses.push(RoundResponse::Element(s));
                rest = &rest[used..];
            } else {
                validation::min_length("group proof", rest.len(), SEED_BYTES)?;
                let (head, tail) = rest.split_at(SEED_BYTES);
                let mut seed = [0u8; 32];
                seed.copy_from_slice(head);
                responses.push(RoundResponse::Seed(seed));
                rest = tail;
            }
        }
        validation::length("group proof", bytes.len(), bytes.len() - rest.len())?;
        Ok(Self { responses })
    }
}

fn mask_braid(params: &Parameters, seed: &[u8; 32]) -> Result<Braid> {
    braid_from_seed(
        params.strands,
        seed,
        domain::MASK,
        all_generators(params.strands),
        params.mask_word_len(),
    )
}

fn commitment_digest<'a>(params: &Parameters, commitments: impl Iterator<Item = &'a Braid>) -> [u8; 32] {
    let mut h = Sha3_256::new();
    h.update(domain::COMMIT);
    h.update([params.level.tag()]);
    for t in commitments {
        h.update(t.to_canonical_bytes());
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&h.finalize());
    out
}

/// Draw the round masks and commit to them
///
/// Mask seeds come from SHAKE256(proof_key ‖ mask_key ‖ i); the caller
/// derives `mask_key` from fresh randomness and the message.
pub fn commit(sk: &GroupSecretKey, mask_key: &[u8; 32]) -> Result<ProofCommitments> {
    let p = sk.params();
    let y = sk.public_key().conjugate();
    let mut seeds = Vec::with_capacity(p.sdg_rounds);
    let mut masks = Vec::with_capacity(p.sdg_rounds);
    let mut commitments = Vec::with_capacity(p.sdg_rounds);
    for i in 0..p.sdg_rounds {
        let mut seed = [0u8; 32];
        shake256(&[sk.proof_key(), mask_key, &(i as u16).to_le_bytes()], &mut seed);
        let r = mask_braid(p, &seed)?;
        commitments.push(y.conjugate_by(&r)?);
        seeds.push(seed);
        masks.push(r);
    }
    let digest = commitment_digest(p, commitments.iter());
    Ok(ProofCommitments {
        seeds,
        masks,
        digest,
    })
}

/// One challenge bit per round from SHAKE256(label ‖ c̃)
pub fn challenge_bits(c_tilde: &[u8], rounds: usize) -> Vec<bool> {
    let mut bytes = vec![0u8; rounds.div_ceil(8)];
    shake256_reader(&[domain::CHALLENGE, c_tilde]).read(&mut bytes);
    (0..rounds).map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1).collect()
}

/// Open the commitments for the challenge `c̃`
pub fn prove(sk: &GroupSecretKey, commitments: &ProofCommitments, c_tilde: &[u8]) -> Result<GroupProof> {
    let p = sk.params();
    let bits = challenge_bits(c_tilde, p.sdg_rounds);
    let mut responses = Vec::with_capacity(bits.len());
    for ((bit, seed), r) in bits.iter().zip(&commitments.seeds).zip(&commitments.masks) {
        if *bit {
            responses.push(RoundResponse::Element(r.multiply(sk.secret_braid())?));
        } else {
            responses.push(RoundResponse::Seed(*seed));
        }
    }
    Ok(GroupProof { responses })
}

/// Recompute every commitment and compare the digest
///
/// A response whose kind does not match its challenge bit fails.
pub fn verify(pk: &GroupPublicKey, digest: &[u8; 32], c_tilde: &[u8], proof: &GroupProof) -> Result<bool> {
    let p = pk.params();
    let bits = challenge_bits(c_tilde, p.sdg_rounds);
    if proof.responses.len() != bits.len() {
        return Ok(false);
    }

    let mut commitments = Vec::with_capacity(bits.len());
    for (&bit, response) in bits.iter().zip(&proof.responses) {
        let t = match (bit, response) {
            (false, RoundResponse::Seed(seed)) => pk.conjugate().conjugate_by(&mask_braid(p, seed)?)?,
            (true, RoundResponse::Element(s)) => {
                if s.strands() != p.strands || s.canonical_length() > p.max_factors() {
                    return Err(Error::malformed("group proof", "response out of range"));
                }
                pk.base().conjugate_by(s)?
            }
            _ => return Ok(false),
        };
        commitments.push(t);
    }
    Ok(ct_eq(commitment_digest(p, commitments.iter()), digest))
}
