//! params.rs - Polynomial ring parameters with NTT support

use pqe_params::pqe::{PQE_N, PQE_Q};

/// Basic trait defining the modulus and degree for a polynomial ring
///
/// Implementors are zero-sized markers; the supertraits let
/// `Polynomial<M>` derive its own impls.
pub trait Modulus: Clone + core::fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// The primary modulus Q for coefficient arithmetic
    const Q: u32;

    /// The polynomial degree N (number of coefficients)
    const N: usize;
}

/// Extended trait for NTT-enabled moduli
///
/// The NTT operates on N = 256 coefficients and needs a primitive 512-th
/// root of unity modulo Q.
pub trait NttModulus: Modulus {
    /// Primitive 512-th root of unity
    const ZETA: u32;

    /// Powers of ZETA in bit-reversed order: `ZETAS[i] = ZETA^brv8(i)`
    const ZETAS: &'static [u32];

    /// N^-1 mod Q for final scaling in inverse NTT
    const N_INV: u32;
}

/// Ring used by both the lattice KEM and the lattice signature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PqeModulus;

/// Twiddle table for [`PqeModulus`]
pub const PQE_ZETAS: [u32; 256] = zetas_table(PQE_Q, 1753);

impl Modulus for PqeModulus {
    const Q: u32 = PQE_Q; // 2^23 - 2^13 + 1
    const N: usize = PQE_N;
}

impl NttModulus for PqeModulus {
    const ZETA: u32 = 1753;
    const ZETAS: &'static [u32] = &PQE_ZETAS;
    const N_INV: u32 = 8347681; // 256^-1 mod Q
}

/// Modular exponentiation with 64-bit intermediates
pub const fn pow_mod(base: u32, mut exp: u64, q: u32) -> u32 {
    let q = q as u64;
    let mut base = base as u64 % q;
    let mut acc = 1u64;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * base % q;
        }
        base = base * base % q;
        exp >>= 1;
    }
    acc as u32
}

/// Build the bit-reversed twiddle table for a 256-point negacyclic NTT
pub const fn zetas_table(q: u32, root: u32) -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = pow_mod(root, (i as u8).reverse_bits() as u64, q);
        i += 1;
    }
    table
}

/// Check if a number is prime (trial division)
pub fn is_prime(q: u32) -> bool {
    if q < 2 {
        return false;
    }
    if q == 2 {
        return true;
    }
    if q % 2 == 0 {
        return false;
    }

    let mut i = 3u32;
    while (i as u64) * (i as u64) <= q as u64 {
        if q % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Check if N is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}
