//! Decryption-failure bound for the lattice layer
//!
//! Decrypting recovers each message coefficient from
//!
//! ```text
//! v' - <s1, u'> = round(q/2)·m + <s2, r> + e2 - <s1, e1 + du> + dv
//! ```
//!
//! where `du` and `dv` are the compression errors. Fix the encapsulation
//! values (r, e1, du). Every coefficient of `<s2, r>` and `<s1, e1 + du>` is
//! then a sum of k·n and l·n independent bounded terms (one per secret
//! coefficient), while `e2` and `dv` are bounded outright. Hoeffding's
//! inequality bounds one coefficient's tail, and a union bound over the n
//! coefficients gives the per-ciphertext failure probability. The bound
//! holds for every choice of (r, e1, du) and therefore unconditionally.

use crate::pqe::Parameters;

impl Parameters {
    /// Largest rounding error of compressing to `d` bits
    pub fn compression_error(&self, d: usize) -> u32 {
        let step = 1u64 << (d + 1);
        ((self.q as u64 + step - 1) / step) as u32
    }

    /// Upper bound on log2 of the decryption-failure probability
    ///
    /// Returns `f64::INFINITY` when the deterministic part of the noise
    /// alone already reaches the decoding threshold.
    pub fn decryption_failure_log2(&self) -> f64 {
        let eta = self.eta as f64;
        let n = self.n as f64;
        let cu = self.compression_error(self.du) as f64;
        let cv = self.compression_error(self.dv) as f64;

        // distance to the decision boundary left after the bounded terms
        let threshold = (self.q / 4) as f64 - cv - eta - 1.0;
        if threshold <= 0.0 {
            return f64::INFINITY;
        }

        // sum of squared ranges of the independent terms
        let s2_range = 2.0 * eta * eta;
        let s1_range = 2.0 * eta * (eta + cu);
        let spread = self.k as f64 * n * s2_range * s2_range
            + self.l as f64 * n * s1_range * s1_range;

        // log2(n · 2 · exp(-2t²/S))
        (2.0 * n).log2() - 2.0 * threshold * threshold / (spread * core::f64::consts::LN_2)
    }
}
