//! # ROSA Backend
//!
//! Sampler abstraction and reference simulator for ROSA.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rosa_backend // L2: Backend
//!     SamplerTrait // run / run_batch / run_batch_sweep
//!     MeasurementResult // 키별 측정 기록
//!     SimulatorSampler // 상태 벡터 + 측정 오류
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rosa_backend::prelude::*;
//! use rosa_core::{CircuitBuilder, Qubit};
//!
//! let sampler = SimulatorSampler::ideal().with_seed(42);
//!
//! let q = Qubit::line_range(2);
//! let circuit = CircuitBuilder::new()
//!     .x(q[0].clone())
//!     .measure(q.clone(), "m")
//!     .build();
//!
//! let result = sampler.run(&circuit, 100).unwrap();
//! assert_eq!(result.measurement("m").unwrap().column_ones(), vec![100, 0]);
//! ```
//!
//! ## Noisy Readout
//!
//! ```rust
//! use rosa_backend::prelude::*;
//! use rosa_core::{CircuitBuilder, Qubit};
//!
//! // 2% of zeros read as one, 5% of ones read as zero
//! let sampler = SimulatorSampler::with_readout_error(0.02, 0.05).with_seed(42);
//!
//! let q = Qubit::line(0);
//! let circuit = CircuitBuilder::new()
//!     .x(q.clone())
//!     .measure(vec![q], "m")
//!     .build();
//!
//! let result = sampler.run(&circuit, 1000).unwrap();
//! println!("P(1): {:.3}", result.measurement("m").unwrap().probability("1"));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and sampler trait (Gantree: L2_Backend → SamplerTrait)
pub mod execution;

/// Simulator sampler (Gantree: L2_Backend → SimulatorSampler)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{ExecutionMetadata, MeasurementRecord, MeasurementResult, Sampler};
pub use simulator::{ReadoutError, ReadoutNoise, SimulatorSampler};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rosa_backend::prelude::*;
    //! ```

    pub use crate::execution::{ExecutionMetadata, MeasurementRecord, MeasurementResult, Sampler};
    pub use crate::simulator::{ReadoutError, ReadoutNoise, SimulatorSampler};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use rosa_core::{CircuitBuilder, ParamResolver, Qubit};

    #[test]
    fn test_batch_preserves_order() {
        let sampler = SimulatorSampler::ideal().with_seed(42);
        let q = Qubit::line(0);
        let zero = CircuitBuilder::new().i(q.clone()).measure(vec![q.clone()], "m").build();
        let one = CircuitBuilder::new().x(q.clone()).measure(vec![q], "m").build();

        let results = sampler
            .run_batch(&[one.clone(), zero, one], &[10, 20, 30])
            .unwrap();

        let ones: Vec<u64> = results
            .iter()
            .map(|r| r.measurement("m").unwrap().column_ones()[0])
            .collect();
        assert_eq!(ones, vec![10, 0, 30]);
    }

    #[test]
    fn test_sweep_on_simulator() {
        let sampler = SimulatorSampler::ideal().with_seed(42);
        let q = Qubit::line_range(2);
        let circuit = CircuitBuilder::new()
            .x_pow(q[0].clone(), "a")
            .x_pow(q[1].clone(), "b")
            .measure(q.clone(), "m")
            .build();
        let sweep = vec![
            ParamResolver::new().with("a", 1.0).with("b", 0.0),
            ParamResolver::new().with("a", 0.0).with("b", 1.0),
        ];

        let results = sampler
            .run_batch_sweep(&[circuit], &[sweep], &[25])
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0][0].measurement("m").unwrap().column_ones(), vec![25, 0]);
        assert_eq!(results[0][1].measurement("m").unwrap().column_ones(), vec![0, 25]);
        assert_eq!(results[0][1].params.get("b"), Some(1.0));
    }

    #[test]
    fn test_sampler_as_trait_object() {
        let sampler: Box<dyn Sampler> = Box::new(SimulatorSampler::ideal().with_name("boxed"));
        assert_eq!(sampler.name(), "boxed");
    }
}
