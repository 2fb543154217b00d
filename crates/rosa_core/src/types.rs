//! Core types for ROSA
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Qubit identifiers, prepared/measured bitstrings and count histograms.

use crate::error::{RosaError, RosaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Qubit
// ============================================================================

/// Opaque qubit identifier
///
/// The derived ordering (variant first, then coordinates or name) is the
/// total order used whenever qubits are grouped deterministically.
/// Gantree: Qubit // 큐비트 식별자
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Qubit {
    /// Qubit on a line
    Line(i32),
    /// Qubit on a 2D grid
    Grid {
        /// Row coordinate
        row: i32,
        /// Column coordinate
        col: i32,
    },
    /// Qubit identified by name
    Named(String),
}

impl Qubit {
    /// Line qubit at position `x`
    pub fn line(x: i32) -> Self {
        Qubit::Line(x)
    }

    /// Grid qubit at (`row`, `col`)
    pub fn grid(row: i32, col: i32) -> Self {
        Qubit::Grid { row, col }
    }

    /// Named qubit
    pub fn named(name: impl Into<String>) -> Self {
        Qubit::Named(name.into())
    }

    /// Consecutive line qubits `0..n`
    pub fn line_range(n: i32) -> Vec<Self> {
        (0..n).map(Qubit::Line).collect()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qubit::Line(x) => write!(f, "q({})", x),
            Qubit::Grid { row, col } => write!(f, "q({}, {})", row, col),
            Qubit::Named(name) => write!(f, "{}", name),
        }
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Ordered classical bits, index `i` belongs to the `i`-th qubit of
/// whatever qubit list the bitstring was built against
/// Gantree: Bitstring // 비트열 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    /// Gantree: parse(s) -> Self // 파싱
    pub fn parse(s: &str) -> RosaResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(RosaError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Create from 0/1 integers; any non-zero value counts as 1
    pub fn from_bits(bits: &[u8]) -> Self {
        Self {
            bits: bits.iter().map(|&b| b != 0).collect(),
        }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Count number of 1s (Hamming weight)
    /// Gantree: popcount() -> usize // 1 카운트
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Get bit at index
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterate over bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Bits as a slice
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl From<Vec<bool>> for Bitstring {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

// ============================================================================
// Tests
// ============================================================================
