//! Constants for ROSA
//!
//! Gantree: L0_Foundation → Constants
//!
//! Readout-benchmark defaults and simulator limits.

// ============================================================================
// Readout Benchmark Defaults
// Gantree: readout // 측정 보정 기본값
// ============================================================================

pub mod readout {
    //! Defaults for readout-error benchmarking runs

    /// Measurement key used by synthesized calibration circuits
    /// Gantree: MEASUREMENT_KEY: &str = "m"
    pub const MEASUREMENT_KEY: &str = "m";

    /// Default number of random bitstrings per qubit group
    /// Gantree: DEFAULT_NUM_RANDOM_BITSTRINGS: usize = 100
    pub const DEFAULT_NUM_RANDOM_BITSTRINGS: usize = 100;

    /// Default repetitions per calibration circuit
    /// Gantree: DEFAULT_READOUT_REPETITIONS: u64 = 1000
    pub const DEFAULT_READOUT_REPETITIONS: u64 = 1000;

    /// Prefix of the per-qubit exponent symbols in sweep-mode calibration
    pub const SWEEP_SYMBOL_PREFIX: &str = "exp_";

    /// Symbol name for the X-power exponent of the calibration qubit at
    /// `position` within its group
    pub fn sweep_symbol(position: usize) -> String {
        format!("{}{}", SWEEP_SYMBOL_PREFIX, position)
    }
}

// ============================================================================
// Simulation Limits
// Gantree: simulation // 시뮬레이션 한계
// ============================================================================

pub mod simulation {
    //! Limits of the reference state-vector simulator

    /// Maximum qubits a single simulated circuit may touch
    pub const DEFAULT_MAX_QUBITS: usize = 16;

    /// Tolerance for probability normalization checks
    pub const NORM_TOLERANCE: f64 = 1e-9;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_defaults() {
        assert_eq!(readout::MEASUREMENT_KEY, "m");
        assert_eq!(readout::DEFAULT_NUM_RANDOM_BITSTRINGS, 100);
        assert_eq!(readout::DEFAULT_READOUT_REPETITIONS, 1000);
    }

    #[test]
    fn test_sweep_symbol_is_distinct_per_qubit() {
        let a = readout::sweep_symbol(0);
        let b = readout::sweep_symbol(1);
        assert_ne!(a, b);
        assert_eq!(a, "exp_0");
        assert!(b.starts_with(readout::SWEEP_SYMBOL_PREFIX));
    }
}
