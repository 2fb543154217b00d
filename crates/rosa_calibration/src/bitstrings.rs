//! Random bitstring matrix
//!
//! Gantree: L3_Calibration → RandomBitstrings

use rand::Rng;
use rosa_core::Bitstring;
use serde::{Deserialize, Serialize};
use std::fmt;

/// K × M matrix of prepared bits, one row per calibration trial
/// Gantree: RandomBitstrings // 무작위 비트열
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBitstrings {
    rows: Vec<Bitstring>,
    num_qubits: usize,
}

impl RandomBitstrings {
    /// Draw `k` rows of `m` independent uniform bits
    /// Gantree: generate(k, m, rng) -> Self // 비트열 생성
    pub fn generate<R: Rng + ?Sized>(k: usize, m: usize, rng: &mut R) -> Self {
        let rows = (0..k)
            .map(|_| Bitstring::new((0..m).map(|_| rng.gen::<bool>()).collect()))
            .collect();
        Self {
            rows,
            num_qubits: m,
        }
    }

    /// Build from explicit rows; every row must have `num_qubits` bits
    pub fn from_rows(rows: Vec<Bitstring>, num_qubits: usize) -> Option<Self> {
        if rows.iter().any(|r| r.len() != num_qubits) {
            return None;
        }
        Some(Self { rows, num_qubits })
    }

    /// Number of rows (K)
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (M)
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in trial order
    pub fn rows(&self) -> &[Bitstring] {
        &self.rows
    }

    /// Row `i`
    pub fn row(&self, i: usize) -> Option<&Bitstring> {
        self.rows.get(i)
    }
}

impl fmt::Display for RandomBitstrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RandomBitstrings({}×{})", self.rows.len(), self.num_qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bits = RandomBitstrings::generate(10, 3, &mut rng);
        assert_eq!(bits.num_rows(), 10);
        assert_eq!(bits.num_qubits(), 3);
        assert!(bits.rows().iter().all(|r| r.len() == 3));
        assert_eq!(bits.row(9), Some(&bits.rows()[9]));
        assert!(bits.row(10).is_none());
    }

    #[test]
    fn test_zero_rows() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bits = RandomBitstrings::generate(0, 5, &mut rng);
        assert!(bits.is_empty());
        assert_eq!(bits.num_qubits(), 5);
    }

    #[test]
    fn test_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let bits = RandomBitstrings::generate(1000, 4, &mut rng);
        let ones: usize = bits.rows().iter().map(Bitstring::popcount).sum();
        let fraction = ones as f64 / 4000.0;
        assert!((fraction - 0.5).abs() < 0.05, "fraction of ones = {}", fraction);
    }

    #[test]
    fn test_from_rows_checks_width() {
        let rows = vec![Bitstring::parse("01").unwrap(), Bitstring::parse("1").unwrap()];
        assert!(RandomBitstrings::from_rows(rows, 2).is_none());

        let rows = vec![Bitstring::parse("01").unwrap()];
        assert_eq!(RandomBitstrings::from_rows(rows, 2).unwrap().num_rows(), 1);
    }
}
