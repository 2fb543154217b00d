//! # ROSA Calibration
//!
//! Readout calibration circuits, interleaving and error-rate analysis.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rosa_calibration // L3: Calibration
//!     QubitGroups // 보정 대상 그룹
//!         QubitSpec, QubitGroup, resolve_qubit_groups()
//!     RandomBitstrings // K×M 무작위 비트열
//!     CalibrationSynthesizer // 보정 회로 생성
//!         generate_readout_calibration_circuits()
//!         generate_parameterized_calibration_circuit()
//!     Permutation // 섞기 / 복원
//!     ReadoutAnalyzer // e0, e1 추정
//!     CalibrationResult // 큐비트별 결과
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rosa_calibration::prelude::*;
//! use rosa_core::Qubit;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let group = QubitGroup::new(Qubit::line_range(3));
//!
//! // 10 random calibration circuits for a 3-qubit group
//! let (circuits, bitstrings) =
//!     generate_readout_calibration_circuits(&group, 10, "m", &mut rng);
//! assert_eq!(circuits.len(), 10);
//! assert_eq!(bitstrings.num_qubits(), 3);
//! ```
//!
//! ## Interleaving
//!
//! ```rust
//! use rosa_calibration::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let perm = Permutation::random(5, &mut rng);
//!
//! let shuffled = perm.apply(&["a", "b", "c", "d", "e"]);
//! assert_eq!(perm.restore(shuffled).unwrap(), vec!["a", "b", "c", "d", "e"]);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Qubit group resolution (Gantree: L3_Calibration → QubitGroups)
pub mod groups;

/// Random bitstrings (Gantree: L3_Calibration → RandomBitstrings)
pub mod bitstrings;

/// Calibration circuit synthesis (Gantree: L3_Calibration → CalibrationSynthesizer)
pub mod synthesis;

/// Permutation engine (Gantree: L3_Calibration → Permutation)
pub mod permutation;

/// Readout error analysis (Gantree: L3_Calibration → ReadoutAnalyzer)
pub mod analysis;

/// Calibration results (Gantree: L3_Calibration → CalibrationResult)
pub mod result;

// ============================================================================
// Re-exports
// ============================================================================

pub use analysis::analyze_readout_results;
pub use bitstrings::RandomBitstrings;
pub use groups::{resolve_qubit_groups, QubitGroup, QubitSpec};
pub use permutation::Permutation;
pub use result::{CalibrationResult, RateEstimate, ReadoutErrorRates};
pub use synthesis::{
    generate_parameterized_calibration_circuit, generate_readout_calibration_circuits,
};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rosa_calibration::prelude::*;
    //! ```

    pub use crate::analysis::analyze_readout_results;
    pub use crate::bitstrings::RandomBitstrings;
    pub use crate::groups::{resolve_qubit_groups, QubitGroup, QubitSpec};
    pub use crate::permutation::Permutation;
    pub use crate::result::{CalibrationResult, RateEstimate, ReadoutErrorRates};
    pub use crate::synthesis::{
        generate_parameterized_calibration_circuit, generate_readout_calibration_circuits,
    };
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
