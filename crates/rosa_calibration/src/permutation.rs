//! Permutation engine
//!
//! Gantree: L3_Calibration → Permutation
//!
//! Interleaves experiment and calibration circuits in a random order and
//! maps results back afterwards.

use rand::seq::SliceRandom;
use rand::Rng;
use rosa_core::{RosaError, RosaResult};
use serde::{Deserialize, Serialize};

/// Permutation together with its inverse
///
/// `shuffle_order[j]` is the original index placed at position `j`, and
/// `inverse_order[shuffle_order[j]] == j` for every `j`.
/// Gantree: Permutation // 순열
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permutation {
    shuffle_order: Vec<usize>,
    inverse_order: Vec<usize>,
}

impl Permutation {
    /// Uniformly random permutation of `n` items
    /// Gantree: random(n, rng) -> Self // 무작위 순열
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut shuffle_order: Vec<usize> = (0..n).collect();
        shuffle_order.shuffle(rng);
        Self::from_order(shuffle_order)
    }

    /// Permutation that leaves every item in place
    pub fn identity(n: usize) -> Self {
        Self::from_order((0..n).collect())
    }

    fn from_order(shuffle_order: Vec<usize>) -> Self {
        let mut inverse_order = vec![0; shuffle_order.len()];
        for (position, &original) in shuffle_order.iter().enumerate() {
            inverse_order[original] = position;
        }
        Self {
            shuffle_order,
            inverse_order,
        }
    }

    /// Number of items permuted
    pub fn len(&self) -> usize {
        self.shuffle_order.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.shuffle_order.is_empty()
    }

    /// Original index placed at each shuffled position
    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    /// Shuffled position of each original index
    pub fn inverse_order(&self) -> &[usize] {
        &self.inverse_order
    }

    /// Items in shuffled order
    ///
    /// Panics if `items` is shorter than the permutation, which only happens
    /// when callers pair it with the wrong list.
    /// Gantree: apply(items) -> Vec<T> // 섞기
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.shuffle_order.iter().map(|&i| items[i].clone()).collect()
    }

    /// Put items that arrived in shuffled order back into original order
    /// Gantree: restore(items) -> Result<Vec<T>> // 복원
    pub fn restore<T>(&self, items: Vec<T>) -> RosaResult<Vec<T>> {
        if items.len() != self.len() {
            return Err(RosaError::PermutationLengthMismatch {
                expected: self.len(),
                got: items.len(),
            });
        }

        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        self.inverse_order
            .iter()
            .map(|&position| {
                slots[position].take().ok_or(RosaError::PermutationLengthMismatch {
                    expected: self.len(),
                    got: position,
                })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
