//! Lexicographic `n choose k` index walker (component C).
//!
//! Exposed as an explicit cursor (`advance` / `current`) rather than a
//! lazy iterator over a borrowed buffer, per the "lazy enumerators of
//! borrowed buffers" redesign note: the caller controls when the next
//! step happens and owns the buffer it fills.

use crate::error::SetChallengeError;

/// Walks the `k`-subsets of `0..n`, in lexicographic order by index
/// position.
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    /// Fails when `k > n`.
    pub fn new(n: usize, k: usize) -> Result<Self, SetChallengeError> {
        if k > n {
            return Err(SetChallengeError::InvalidArgument(format!(
                "k ({k}) must not exceed n ({n})"
            )));
        }
        Ok(Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            exhausted: false,
        })
    }

    /// Advances to the next combination, returning `false` once
    /// exhausted. For `k == 0` this yields exactly one (empty)
    /// combination, including when `n == 0`.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if !self.started {
            self.started = true;
            if self.k == 0 {
                self.exhausted = true;
            }
            return true;
        }
        if self.k == 0 {
            return false;
        }
        // Find the rightmost position that still has room to grow, bump
        // it, and reset everything after it to consecutive successors.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.exhausted = true;
                return false;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                self.indices[i] += 1;
                for j in (i + 1)..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return true;
            }
        }
    }

    /// The current combination's index positions into the source
    /// sequence, valid after a call to `advance` returned `true`.
    pub fn current(&self) -> &[usize] {
        &self.indices
    }

    /// Materializes the current combination as a fresh `Vec`.
    pub fn current_combination<T: Clone>(&self, source: &[T]) -> Vec<T> {
        self.indices.iter().map(|&i| source[i].clone()).collect()
    }

    /// Materializes the current combination into a caller-owned buffer,
    /// the "reusable size-k buffer" memory policy. Fails if `buf`'s
    /// length doesn't match `k`.
    pub fn fill_into<T: Clone>(&self, source: &[T], buf: &mut [T]) -> Result<(), SetChallengeError> {
        if buf.len() != self.k {
            return Err(SetChallengeError::InvalidArgument(format!(
                "buffer length {} does not match k={}",
                buf.len(),
                self.k
            )));
        }
        for (slot, &idx) in buf.iter_mut().zip(self.indices.iter()) {
            *slot = source[idx].clone();
        }
        Ok(())
    }
}

/// `n choose k`, used by tests to check enumeration counts (testable
/// property 5) without depending on the enumerator itself.
pub fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 0)]
    #[case(5, 1)]
    #[case(5, 2)]
    #[case(5, 5)]
    #[case(0, 0)]
    #[case(81, 3)]
    fn yields_binomial_n_choose_k_distinct_combinations(#[case] n: usize, #[case] k: usize) {
        let mut combos = Combinations::new(n, k).unwrap();
        let mut seen = std::collections::HashSet::new();
        let mut count = 0u64;
        while combos.advance() {
            assert!(seen.insert(combos.current().to_vec()), "duplicate combination");
            assert_eq!(combos.current().len(), k);
            count += 1;
        }
        assert_eq!(count as u128, binomial(n as u64, k as u64));
    }

    #[test]
    fn k_greater_than_n_is_an_error() {
        assert!(Combinations::new(3, 4).is_err());
    }

    #[test]
    fn empty_combination_is_yielded_exactly_once_for_k_zero() {
        let mut combos = Combinations::new(5, 0).unwrap();
        assert!(combos.advance());
        assert!(combos.current().is_empty());
        assert!(!combos.advance());
    }

    #[test]
    fn combinations_are_in_lexicographic_order() {
        let mut combos = Combinations::new(4, 2).unwrap();
        let mut seq = Vec::new();
        while combos.advance() {
            seq.push(combos.current().to_vec());
        }
        assert_eq!(
            seq,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn fill_into_rejects_wrong_size_buffer() {
        let mut combos = Combinations::new(5, 2).unwrap();
        assert!(combos.advance());
        let source = vec!['a', 'b', 'c', 'd', 'e'];
        let mut buf = vec!['x'; 3];
        assert!(combos.fill_into(&source, &mut buf).is_err());
    }

    #[test]
    fn fill_into_matches_current_combination() {
        let mut combos = Combinations::new(5, 2).unwrap();
        let source = vec!['a', 'b', 'c', 'd', 'e'];
        let mut buf = vec!['x'; 2];
        while combos.advance() {
            combos.fill_into(&source, &mut buf).unwrap();
            assert_eq!(buf, combos.current_combination(&source));
        }
    }
}
