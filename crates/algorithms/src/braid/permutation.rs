//! Simple braids as permutations of the strands
//!
//! A simple braid (positive, every pair of strands crossing at most once) is
//! determined by its permutation. `images[i]` is the end position of the
//! strand that starts at position `i`; a product `A·B` runs A first, so
//! `(A·B)[i] = B[A[i]]`.

use core::fmt;

use crate::error::{Error, Result};
use zeroize::Zeroize;

/// Largest strand count supported; descent sets are stored as `u32` masks
pub const MAX_STRANDS: usize = 32;

/// A simple braid on `m` strands
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Permutation {
    images: Vec<u8>,
}

impl Permutation {
    /// The trivial braid
    pub fn identity(strands: usize) -> Self {
        Self {
            images: (0..strands as u8).collect(),
        }
    }

    /// The half twist Δ, reversing every strand
    pub fn delta(strands: usize) -> Self {
        Self {
            images: (0..strands as u8).rev().collect(),
        }
    }

    /// The Artin generator σ_i, crossing strands `i` and `i + 1`
    pub fn generator(strands: usize, i: usize) -> Self {
        let mut p = Self::identity(strands);
        p.images.swap(i, i + 1);
        p
    }

    /// Validate and wrap an image table
    pub fn from_images(images: &[u8]) -> Result<Self> {
        let m = images.len();
        if !(2..=MAX_STRANDS).contains(&m) {
            return Err(Error::param("strands", "strand count must be in 2..=32"));
        }
        let mut seen = 0u32;
        for &v in images {
            if v as usize >= m || seen & (1 << v) != 0 {
                return Err(Error::encoding("braid factor", "not a permutation"));
            }
            seen |= 1 << v;
        }
        Ok(Self {
            images: images.to_vec(),
        })
    }

    /// Number of strands
    pub fn strands(&self) -> usize {
        self.images.len()
    }

    /// Image table
    pub fn images(&self) -> &[u8] {
        &self.images
    }

    /// Whether this is the trivial braid
    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    /// Whether this is Δ
    pub fn is_delta(&self) -> bool {
        let m = self.strands();
        self.images
            .iter()
            .enumerate()
            .all(|(i, &v)| v as usize == m - 1 - i)
    }

    /// Inverse permutation (not the inverse braid, which is not simple)
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0u8; self.strands()];
        for (i, &v) in self.images.iter().enumerate() {
            inv[v as usize] = i as u8;
        }
        Self { images: inv }
    }

    /// Conjugation by Δ: `τ(A) = Δ⁻¹·A·Δ`
    pub fn flip(&self) -> Self {
        let m = self.strands();
        Self {
            images: (0..m)
                .map(|j| (m - 1) as u8 - self.images[m - 1 - j])
                .collect(),
        }
    }

    /// The simple braid `G` with `G·A = Δ`
    pub fn left_complement(&self) -> Self {
        let m = self.strands();
        let inv = self.inverse();
        Self {
            images: (0..m).map(|i| inv.images[m - 1 - i]).collect(),
        }
    }

    /// `Δ·σ_i⁻¹`, the simple braid used to right-multiply by σ_i⁻¹
    pub fn inverse_generator_complement(strands: usize, i: usize) -> Self {
        let g = Self::generator(strands, i);
        Self {
            images: (0..strands).map(|j| g.images[strands - 1 - j]).collect(),
        }
    }

    /// Starting set `S(A) = { i : σ_i is a prefix of A }` as a bit mask
    pub fn starting_set(&self) -> u32 {
        let mut set = 0u32;
        for i in 0..self.strands() - 1 {
            if self.images[i] > self.images[i + 1] {
                set |= 1 << i;
            }
        }
        set
    }

    /// Finishing set `F(A) = { i : σ_i is a suffix of A }` as a bit mask
    pub fn finishing_set(&self) -> u32 {
        self.inverse().starting_set()
    }

    /// Replace `A` by `A·σ_i`; swaps the values `i` and `i + 1`
    fn append_generator(&mut self, i: usize) {
        for v in self.images.iter_mut() {
            if *v as usize == i {
                *v += 1;
            } else if *v as usize == i + 1 {
                *v -= 1;
            }
        }
    }

    /// Replace `B` by `σ_i⁻¹·B`; swaps the entries at `i` and `i + 1`
    fn strip_generator(&mut self, i: usize) {
        self.images.swap(i, i + 1);
    }
}

/// Move crossings from the front of `right` to the back of `left` until
/// `S(right) ⊆ F(left)`. The product `left·right` is unchanged.
///
/// Returns whether anything moved.
pub fn make_left_weighted(left: &mut Permutation, right: &mut Permutation) -> bool {
    let mut changed = false;
    loop {
        let movable = right.starting_set() & !left.finishing_set();
        if movable == 0 {
            return changed;
        }
        let i = movable.trailing_zeros() as usize;
        left.append_generator(i);
        right.strip_generator(i);
        changed = true;
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation{:?}", self.images)
    }
}
