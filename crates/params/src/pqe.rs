//! Constants for the hybrid lattice + braid parameter sets

use crate::{SecurityLevel, SEED_BYTES, TAG_BYTES};

/// Lattice polynomial degree
pub const PQE_N: usize = 256;

/// Lattice modulus, prime with q ≡ 1 (mod 512)
pub const PQE_Q: u32 = 8380417;

/// Bit width of a fully reduced coefficient
pub const PQE_Q_BITS: usize = 23;

/// Bits per coefficient of a packed secret polynomial (η = 2)
pub const SECRET_COEFF_BITS: usize = 3;

/// Upper bound on Fiat–Shamir-with-aborts iterations per signature
pub const MAX_SIGN_ATTEMPTS: u32 = 1000;

/// Size of the lattice challenge hash c̃ in bytes
pub const CHALLENGE_BYTES: usize = 32;

/// Structure containing one full hybrid parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Level this set belongs to
    pub level: SecurityLevel,

    /// Polynomial degree
    pub n: usize,

    /// Modulus
    pub q: u32,

    /// Rows of A (length of t, s2 and the encapsulation vector r)
    pub k: usize,

    /// Columns of A (length of s1, y, z and the ciphertext vector u)
    pub l: usize,

    /// Centered binomial bound for secrets and errors
    pub eta: u32,

    /// Standard deviation of CBD(η), kept for documentation and bounds
    pub sigma: f64,

    /// Compression bits for the ciphertext vector u
    pub du: usize,

    /// Compression bits for the ciphertext scalar v
    pub dv: usize,

    /// Range of the signing mask y
    pub gamma1: u32,

    /// Low-order rounding range for the commitment decomposition
    pub gamma2: u32,

    /// Number of ±1 coefficients in the challenge polynomial
    pub tau: usize,

    /// Rejection margin, τ·η
    pub beta: u32,

    /// Braid strand count
    pub strands: usize,

    /// Generators in each of the commuting subgroups (m/2 − 1)
    pub generators: usize,

    /// Letters in a secret word a
    pub secret_word_len: usize,

    /// Letters in the public base braid x
    pub base_word_len: usize,

    /// Sibert–Dehornoy–Girault rounds per signature
    pub sdg_rounds: usize,
}

/// 128-bit parameters
pub const LEVEL128: Parameters = Parameters {
    level: SecurityLevel::L128,
    n: PQE_N,
    q: PQE_Q,
    k: 4,
    l: 4,
    eta: 2,
    sigma: 1.0,
    du: 11,
    dv: 4,
    gamma1: 1 << 17,
    gamma2: (PQE_Q - 1) / 88,
    tau: 39,
    beta: 78,
    strands: 16,
    generators: 7,
    secret_word_len: 24,
    base_word_len: 32,
    sdg_rounds: 128,
};

/// 192-bit parameters
pub const LEVEL192: Parameters = Parameters {
    level: SecurityLevel::L192,
    n: PQE_N,
    q: PQE_Q,
    k: 6,
    l: 5,
    eta: 2,
    sigma: 1.0,
    du: 11,
    dv: 4,
    gamma1: 1 << 19,
    gamma2: (PQE_Q - 1) / 32,
    tau: 49,
    beta: 98,
    strands: 20,
    generators: 9,
    secret_word_len: 32,
    base_word_len: 40,
    sdg_rounds: 192,
};

/// 256-bit parameters
pub const LEVEL256: Parameters = Parameters {
    level: SecurityLevel::L256,
    n: PQE_N,
    q: PQE_Q,
    k: 8,
    l: 7,
    eta: 2,
    sigma: 1.0,
    du: 12,
    dv: 4,
    gamma1: 1 << 19,
    gamma2: (PQE_Q - 1) / 32,
    tau: 60,
    beta: 120,
    strands: 24,
    generators: 11,
    secret_word_len: 40,
    base_word_len: 48,
    sdg_rounds: 256,
};

/// Look up the parameter set for a level
pub const fn parameters_for(level: SecurityLevel) -> &'static Parameters {
    match level {
        SecurityLevel::L128 => &LEVEL128,
        SecurityLevel::L192 => &LEVEL192,
        SecurityLevel::L256 => &LEVEL256,
    }
}

const fn bit_length(x: u32) -> usize {
    (32 - x.leading_zeros()) as usize
}

impl Parameters {
    /// Letters in an ephemeral encryption word b
    pub const fn ephemeral_word_len(&self) -> usize {
        self.secret_word_len
    }

    /// Letters in an SDG mask word r
    pub const fn mask_word_len(&self) -> usize {
        self.secret_word_len + self.base_word_len
    }

    /// Largest canonical length of any transmitted braid
    ///
    /// Covers b·x·b⁻¹, a·x·a⁻¹ and r·a.
    pub const fn max_factors(&self) -> usize {
        2 * self.secret_word_len + self.base_word_len
    }

    /// Bits per packed coefficient of the commitment w1
    pub const fn w1_bits(&self) -> usize {
        bit_length((self.q - 1) / (2 * self.gamma2) - 1)
    }

    /// Bits per packed coefficient of the response z
    pub const fn z_bits(&self) -> usize {
        bit_length(2 * self.gamma1 - 1)
    }

    /// Encoded public key of the lattice layer: ρ ‖ t
    pub const fn lwe_public_key_bytes(&self) -> usize {
        SEED_BYTES + self.k * self.n * PQE_Q_BITS / 8
    }

    /// Encoded secret key of the lattice layer: ρ ‖ K ‖ z ‖ s1 ‖ s2
    pub const fn lwe_secret_key_bytes(&self) -> usize {
        3 * SEED_BYTES + (self.k + self.l) * self.n * SECRET_COEFF_BITS / 8
    }

    /// Compressed lattice ciphertext: u ‖ v
    pub const fn lwe_ciphertext_bytes(&self) -> usize {
        self.l * self.n * self.du / 8 + self.n * self.dv / 8
    }

    /// Lattice ciphertext bytes per encapsulated seed byte
    pub const fn expansion_factor(&self) -> usize {
        self.lwe_ciphertext_bytes() / SEED_BYTES
    }

    /// Fixed-width encoding of a braid: infimum, factor count, padded factors
    pub const fn braid_bytes(&self) -> usize {
        4 + self.max_factors() * self.strands
    }

    /// Encoded public key of the group layer: base seed ‖ y
    pub const fn group_public_key_bytes(&self) -> usize {
        SEED_BYTES + self.braid_bytes()
    }

    /// Encoded secret key of the group layer: secret word seed ‖ proof key
    pub const fn group_secret_key_bytes(&self) -> usize {
        2 * SEED_BYTES
    }

    /// Packed commitment w1
    pub const fn w1_bytes(&self) -> usize {
        self.k * self.n * self.w1_bits() / 8
    }

    /// Packed response z
    pub const fn z_bytes(&self) -> usize {
        self.l * self.n * self.z_bits() / 8
    }

    /// Hybrid public key including its two header bytes
    pub const fn public_key_bytes(&self) -> usize {
        2 + self.lwe_public_key_bytes() + self.group_public_key_bytes()
    }

    /// Hybrid secret key including its header and public-key digest
    pub const fn secret_key_bytes(&self) -> usize {
        2 + self.lwe_secret_key_bytes() + self.group_secret_key_bytes() + SEED_BYTES
    }

    /// Hybrid ciphertext length for a plaintext of `plaintext_len` bytes
    pub const fn ciphertext_bytes(&self, plaintext_len: usize) -> usize {
        2 + self.lwe_ciphertext_bytes() + self.braid_bytes() + plaintext_len + TAG_BYTES
    }

    /// Lattice part of a signature: header, c̃, w1, z and the proof digest
    ///
    /// The per-round group responses follow; their total length depends on
    /// the challenge bits.
    pub const fn signature_fixed_bytes(&self) -> usize {
        2 + CHALLENGE_BYTES + self.w1_bytes() + self.z_bytes() + SEED_BYTES
    }
}
