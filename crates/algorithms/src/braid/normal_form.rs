//! Left normal form `Δ^inf · A_1 ⋯ A_r`
//!
//! Every factor is a proper simple braid (neither trivial nor Δ) and each
//! adjacent pair `(A_j, A_{j+1})` is left-weighted. Two braids are equal
//! exactly when their normal forms are equal, which is what makes the
//! conjugates usable as shared values.
//!
//! None of the operations here run in constant time.

use zeroize::Zeroize;

use super::permutation::{make_left_weighted, Permutation, MAX_STRANDS};
use super::word::Generator;
use crate::error::{Error, Result};

/// A braid in left normal form
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Braid {
    strands: usize,
    inf: i32,
    factors: Vec<Permutation>,
}

impl Braid {
    /// The trivial braid on `strands` strands
    pub fn identity(strands: usize) -> Self {
        Self {
            strands,
            inf: 0,
            factors: Vec::new(),
        }
    }

    /// Build the normal form of a word in the Artin generators
    pub fn from_word(strands: usize, word: &[Generator]) -> Result<Self> {
        check_strands(strands)?;
        let mut braid = Self::identity(strands);
        for &g in word {
            if g.index as usize + 1 >= strands {
                return Err(Error::param("generator", "index out of range"));
            }
            braid.push_generator(g);
        }
        Ok(braid)
    }

    /// Rebuild from already-validated normal form parts
    pub(crate) fn from_parts(strands: usize, inf: i32, factors: Vec<Permutation>) -> Self {
        Self {
            strands,
            inf,
            factors,
        }
    }

    /// Number of strands
    pub fn strands(&self) -> usize {
        self.strands
    }

    /// Power of Δ in the normal form
    pub fn infimum(&self) -> i32 {
        self.inf
    }

    /// `inf + r`
    pub fn supremum(&self) -> i32 {
        self.inf + self.factors.len() as i32
    }

    /// Number of non-Δ factors `r`
    pub fn canonical_length(&self) -> usize {
        self.factors.len()
    }

    /// The simple factors `A_1 … A_r`
    pub fn factors(&self) -> &[Permutation] {
        &self.factors
    }

    /// Whether this is the trivial braid
    pub fn is_identity(&self) -> bool {
        self.inf == 0 && self.factors.is_empty()
    }

    /// Right-multiply by `Δ^k`
    pub fn multiply_delta_power(&mut self, k: i32) {
        self.inf += k;
        if k % 2 != 0 {
            for f in self.factors.iter_mut() {
                *f = f.flip();
            }
        }
    }

    /// Right-multiply by a simple braid and restore normal form
    pub fn push_factor(&mut self, factor: Permutation) {
        if factor.is_identity() {
            return;
        }
        if factor.is_delta() {
            self.multiply_delta_power(1);
            return;
        }
        self.factors.push(factor);
        let mut j = self.factors.len() - 1;
        while j > 0 {
            let (head, tail) = self.factors.split_at_mut(j);
            if !make_left_weighted(&mut head[j - 1], &mut tail[0]) {
                break;
            }
            j -= 1;
        }
        self.clean();
    }

    /// Right-multiply by a single generator or its inverse
    pub fn push_generator(&mut self, g: Generator) {
        let i = g.index as usize;
        if g.inverse {
            // σ_i⁻¹ = Δ⁻¹ · (Δ σ_i⁻¹), and the second part is simple
            self.multiply_delta_power(-1);
            self.push_factor(Permutation::inverse_generator_complement(self.strands, i));
        } else {
            self.push_factor(Permutation::generator(self.strands, i));
        }
    }

    /// Inverse braid, in normal form
    pub fn inverse(&self) -> Self {
        let mut out = Self::identity(self.strands);
        // A⁻¹ = Δ⁻¹ · (left complement of A)
        for f in self.factors.iter().rev() {
            out.multiply_delta_power(-1);
            out.push_factor(f.left_complement());
        }
        out.multiply_delta_power(-self.inf);
        out
    }

    /// Product `self · other`
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.strands != other.strands {
            return Err(Error::param("braid", "strand counts differ"));
        }
        let mut out = self.clone();
        out.multiply_delta_power(other.inf);
        for f in &other.factors {
            out.push_factor(f.clone());
        }
        Ok(out)
    }

    /// Conjugate `c · self · c⁻¹`
    pub fn conjugate_by(&self, c: &Self) -> Result<Self> {
        c.multiply(self)?.multiply(&c.inverse())
    }

    /// Whether the stored factors satisfy every normal form condition
    pub fn is_left_normal(&self) -> bool {
        self.factors
            .iter()
            .all(|f| f.strands() == self.strands && !f.is_identity() && !f.is_delta())
            && self.factors.windows(2).all(|w| {
                let (mut a, mut b) = (w[0].clone(), w[1].clone());
                !make_left_weighted(&mut a, &mut b)
            })
    }

    fn clean(&mut self) {
        let leading = self.factors.iter().take_while(|f| f.is_delta()).count();
        if leading > 0 {
            self.factors.drain(..leading);
            self.inf += leading as i32;
        }
        while self.factors.last().map_or(false, Permutation::is_identity) {
            self.factors.pop();
        }
    }
}

pub(crate) fn check_strands(strands: usize) -> Result<()> {
    if !(2..=MAX_STRANDS).contains(&strands) {
        return Err(Error::param("strands", "strand count must be in 2..=32"));
    }
    Ok(())
}
