//! # ROSA Engine
//!
//! Readout-error benchmarking with shuffled circuit execution.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rosa_engine // L4: Integration
//!     ReadoutBenchmarkConfig // 측정 보정 설정
//!         num_random_bitstrings, readout_repetitions
//!         measurement_key, qubits
//!     RandomSource // 생성기 또는 시드
//!     InputValidator // 입력 검증
//!         validate_input(), validate_sweep_input()
//!     ReadoutBenchmark // 실행기
//!         run_shuffled() - 섞어 실행 → 복원 → 분석
//!         run_sweep() - 스윕 실행 → 분석
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rosa_engine::prelude::*;
//! use rosa_backend::SimulatorSampler;
//! use rosa_core::{CircuitBuilder, Qubit};
//!
//! let q = Qubit::line_range(2);
//! let circuit = CircuitBuilder::new()
//!     .h(q[0].clone())
//!     .cnot(q[0].clone(), q[1].clone())
//!     .measure(q.clone(), "result")
//!     .build();
//!
//! let sampler = SimulatorSampler::with_readout_error(0.02, 0.05).with_seed(42);
//! let bench = ReadoutBenchmark::new(ReadoutBenchmarkConfig::quick());
//!
//! let run = bench
//!     .run_shuffled(&[circuit], &sampler, &RepetitionSpec::Uniform(1000), RandomSource::Seed(42))
//!     .unwrap();
//!
//! assert_eq!(run.measurements.len(), 1);
//! for (group, calibration) in &run.calibrations {
//!     println!("{}: {}", group, calibration);
//! }
//! ```
//!
//! ## Swept Calibration
//!
//! ```rust
//! use rosa_engine::prelude::*;
//! use rosa_backend::SimulatorSampler;
//! use rosa_core::{CircuitBuilder, ParamResolver, Qubit};
//! use rand::SeedableRng;
//!
//! let q = Qubit::line(0);
//! let circuit = CircuitBuilder::new()
//!     .rx(q.clone(), "theta")
//!     .measure(vec![q], "result")
//!     .build();
//! let sweep = vec![
//!     ParamResolver::new().with("theta", 0.0),
//!     ParamResolver::new().with("theta", std::f64::consts::PI),
//! ];
//!
//! let sampler = SimulatorSampler::ideal().with_seed(1);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! let run = run_sweep_with_readout_benchmarking(
//!     &[circuit],
//!     &[sweep],
//!     &sampler,
//!     &RepetitionSpec::Uniform(100),
//!     RandomSource::from(&mut rng),
//!     &ReadoutBenchmarkConfig::quick(),
//! )
//! .unwrap();
//!
//! assert_eq!(run.measurements[0].len(), 2);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L4_Integration → ReadoutBenchmarkConfig)
pub mod config;

/// Random source (Gantree: L4_Integration → RandomSource)
pub mod random;

/// Input validation (Gantree: L4_Integration → InputValidator)
pub mod validation;

/// Pipelines (Gantree: L4_Integration → ReadoutBenchmark)
pub mod pipeline;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ReadoutBenchmarkConfig;
pub use pipeline::{
    run_shuffled_with_readout_benchmarking, run_sweep_with_readout_benchmarking,
    ReadoutBenchmark, ShuffledRun, SweepRun,
};
pub use random::RandomSource;
pub use validation::{validate_input, validate_sweep_input, RepetitionSpec};

// Re-export from dependencies
pub use rosa_calibration::{CalibrationResult, QubitGroup, QubitSpec, RateEstimate};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rosa_engine::prelude::*;
    //! ```

    pub use crate::config::ReadoutBenchmarkConfig;
    pub use crate::pipeline::{
        run_shuffled_with_readout_benchmarking, run_sweep_with_readout_benchmarking,
        ReadoutBenchmark, ShuffledRun, SweepRun,
    };
    pub use crate::random::RandomSource;
    pub use crate::validation::{validate_input, validate_sweep_input, RepetitionSpec};
    pub use rosa_calibration::{CalibrationResult, QubitGroup, QubitSpec, RateEstimate};
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
