//! # ROSA Core
//!
//! Core types for readout-error benchmarking with shuffled execution.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rosa_core // L0+L1: Foundation + Circuit
//!     L0_Foundation // 기반 타입/상수/에러
//!         CoreTypes // Qubit, Bitstring, Counts
//!         Constants // 측정 보정 기본값
//!         Errors // RosaError
//!     L1_Circuit // 회로 구조
//!         Param // ParamExpr, ParamResolver, Sweep
//!         Gate // 게이트 enum
//!         Circuit // 회로 구조체
//!         CircuitBuilder // 빌더 패턴
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rosa_core::prelude::*;
//!
//! let q = Qubit::line_range(2);
//! let circuit = CircuitBuilder::new()
//!     .h(q[0].clone())
//!     .cnot(q[0].clone(), q[1].clone())
//!     .measure(q.clone(), "m")
//!     .build();
//!
//! assert!(circuit.has_measurements());
//! assert_eq!(circuit.num_qubits(), 2);
//! ```
//!
//! ## Parameterized Circuits
//!
//! ```rust
//! use rosa_core::prelude::*;
//!
//! let q = Qubit::line(0);
//! let circuit = CircuitBuilder::new()
//!     .x_pow(q.clone(), "t")
//!     .measure(vec![q], "m")
//!     .build();
//!
//! let resolved = circuit
//!     .resolve_parameters(&ParamResolver::new().with("t", 1.0))
//!     .unwrap();
//! assert!(!resolved.is_parameterized());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Symbolic parameters (Gantree: L1_Circuit → Param)
pub mod param;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{readout, simulation};
pub use error::{RosaError, RosaResult};
pub use gate::Gate;
pub use param::{FuncOp, ParamExpr, ParamResolver, Sweep};
pub use types::{Bitstring, Counts, Qubit};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use rosa_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{readout, simulation};
    pub use crate::error::{RosaError, RosaResult};
    pub use crate::gate::Gate;
    pub use crate::param::{FuncOp, ParamExpr, ParamResolver, Sweep};
    pub use crate::types::{Bitstring, Counts, Qubit};
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
