//! Error types for ROSA
//!
//! Gantree: L0_Foundation → Errors
//!
//! Input errors are raised before anything is submitted to a sampler.
//! Execution errors describe a sampler that broke its contract.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for ROSA
/// Gantree: RosaError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosaError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// No circuits were supplied
    /// Gantree: EmptyCircuitList // 빈 회로 목록
    #[error("Input circuits must not be empty")]
    EmptyCircuitList,

    /// Circuit failed its well-formedness check
    #[error("Input circuit {index} is malformed: {reason}")]
    InvalidCircuit { index: usize, reason: String },

    /// Circuit has no measurement operation
    /// Gantree: MissingMeasurement{{index}} // 측정 없음
    #[error("Input circuit {index} has no measurements")]
    MissingMeasurement { index: usize },

    /// Per-circuit repetitions do not line up with the circuits
    #[error("Number of circuit repetitions ({got}) must match the number of input circuits ({expected})")]
    RepetitionCountMismatch { expected: usize, got: usize },

    /// Zero circuit repetitions
    #[error("Circuit repetitions must be positive (circuit {index})")]
    NonPositiveRepetitions { index: usize },

    /// Zero readout repetitions
    #[error("Readout repetitions must be positive")]
    NonPositiveReadoutRepetitions,

    /// Sweep variant received no sweep parameters
    #[error("Sweep parameters must not be empty")]
    EmptySweepParameters,

    /// Sweep list does not line up with the circuits
    #[error("Number of sweeps ({got}) must match the number of input circuits ({expected})")]
    SweepCountMismatch { expected: usize, got: usize },

    /// Qubit group without qubits
    #[error("Qubit group {index} is empty")]
    EmptyQubitGroup { index: usize },

    /// Same qubit group listed twice
    #[error("Qubit group {0} is listed more than once")]
    DuplicateQubitGroup(String),

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Parameter Errors
    // ========================================================================
    /// Symbol has no binding in the resolver
    /// Gantree: UnresolvedSymbol(String) // 미해결 심볼
    #[error("Symbol '{0}' is not bound by the parameter resolver")]
    UnresolvedSymbol(String),

    /// Malformed parameter expression
    #[error("Invalid parameter expression: {0}")]
    InvalidParameter(String),

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Sampler failure
    /// Gantree: BackendError(String) // 백엔드
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Sampler returned the wrong number of results
    #[error("Expected {expected} results, got {got}")]
    ResultCountMismatch { expected: usize, got: usize },

    /// Result lacks the expected measurement key
    #[error("Measurement key '{0}' not found in result")]
    MissingMeasurementKey(String),

    /// Measurement record has an unexpected width
    #[error("Measurement '{key}' has {got} qubits, expected {expected}")]
    MeasurementShapeMismatch {
        key: String,
        expected: usize,
        got: usize,
    },

    /// Circuit too wide for the simulator
    #[error("Circuit touches {qubits} qubits, simulator supports at most {max}")]
    TooManyQubits { qubits: usize, max: usize },

    /// Restoring order with a permutation of a different length
    #[error("Permutation of length {expected} applied to {got} items")]
    PermutationLengthMismatch { expected: usize, got: usize },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for ROSA operations
/// Gantree: RosaResult<T> // type alias
pub type RosaResult<T> = Result<T, RosaError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for RosaError {
    fn from(err: serde_json::Error) -> Self {
        RosaError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for RosaError {
    fn from(err: std::io::Error) -> Self {
        RosaError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl RosaError {
    /// Check if error was raised by input validation
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RosaError::EmptyCircuitList
                | RosaError::InvalidCircuit { .. }
                | RosaError::MissingMeasurement { .. }
                | RosaError::RepetitionCountMismatch { .. }
                | RosaError::NonPositiveRepetitions { .. }
                | RosaError::NonPositiveReadoutRepetitions
                | RosaError::EmptySweepParameters
                | RosaError::SweepCountMismatch { .. }
                | RosaError::EmptyQubitGroup { .. }
                | RosaError::DuplicateQubitGroup(_)
                | RosaError::InvalidConfig(_)
        )
    }

    /// Check if error came from execution or a broken sampler contract
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            RosaError::BackendError(_)
                | RosaError::ResultCountMismatch { .. }
                | RosaError::MissingMeasurementKey(_)
                | RosaError::MeasurementShapeMismatch { .. }
                | RosaError::TooManyQubits { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RosaError::RepetitionCountMismatch {
            expected: 3,
            got: 2,
        };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_is_input_error() {
        assert!(RosaError::EmptyCircuitList.is_input_error());
        assert!(RosaError::NonPositiveReadoutRepetitions.is_input_error());
        assert!(!RosaError::BackendError("down".into()).is_input_error());
    }

    #[test]
    fn test_is_execution_error() {
        assert!(RosaError::MissingMeasurementKey("m".into()).is_execution_error());
        assert!(!RosaError::EmptySweepParameters.is_execution_error());
    }

    #[test]
    fn test_json_conversion() {
        let err: RosaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RosaError::JsonError(_)));
    }
}
