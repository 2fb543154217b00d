//! Input validation
//!
//! Gantree: L4_Integration → InputValidator
//!
//! Everything here runs before a single circuit is submitted.

use crate::config::ReadoutBenchmarkConfig;
use rosa_core::{Circuit, RosaError, RosaResult, Sweep};
use serde::{Deserialize, Serialize};

/// Repetitions for the experiment circuits
/// Gantree: RepetitionSpec // 반복 횟수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepetitionSpec {
    /// Same count for every circuit
    Uniform(u64),

    /// One count per circuit
    PerCircuit(Vec<u64>),
}

impl RepetitionSpec {
    /// One count per circuit, checked against the circuit count
    pub fn normalize(&self, num_circuits: usize) -> RosaResult<Vec<u64>> {
        let reps = match self {
            RepetitionSpec::Uniform(n) => vec![*n; num_circuits],
            RepetitionSpec::PerCircuit(reps) => {
                if reps.len() != num_circuits {
                    return Err(RosaError::RepetitionCountMismatch {
                        expected: num_circuits,
                        got: reps.len(),
                    });
                }
                reps.clone()
            }
        };

        match reps.iter().position(|&r| r == 0) {
            Some(index) => Err(RosaError::NonPositiveRepetitions { index }),
            None => Ok(reps),
        }
    }
}

impl From<u64> for RepetitionSpec {
    fn from(n: u64) -> Self {
        RepetitionSpec::Uniform(n)
    }
}

impl From<Vec<u64>> for RepetitionSpec {
    fn from(reps: Vec<u64>) -> Self {
        RepetitionSpec::PerCircuit(reps)
    }
}

/// Check a batch for the shuffled pipeline; returns per-circuit repetitions
/// Gantree: validate_input(circuits, reps, config) -> Result<Vec<u64>> // 입력 검증
pub fn validate_input(
    circuits: &[Circuit],
    repetitions: &RepetitionSpec,
    config: &ReadoutBenchmarkConfig,
) -> RosaResult<Vec<u64>> {
    if circuits.is_empty() {
        return Err(RosaError::EmptyCircuitList);
    }

    for (index, circuit) in circuits.iter().enumerate() {
        circuit.validate_at(index)?;
        if !circuit.has_measurements() {
            return Err(RosaError::MissingMeasurement { index });
        }
    }

    let reps = repetitions.normalize(circuits.len())?;

    if config.readout_repetitions == 0 {
        return Err(RosaError::NonPositiveReadoutRepetitions);
    }
    if config.measurement_key.is_empty() {
        return Err(RosaError::InvalidConfig(
            "measurement_key must not be empty".to_string(),
        ));
    }

    Ok(reps)
}

/// Check a batch for the swept pipeline
/// Gantree: validate_sweep_input(circuits, sweeps, reps, config) // 스윕 입력 검증
pub fn validate_sweep_input(
    circuits: &[Circuit],
    sweeps: &[Sweep],
    repetitions: &RepetitionSpec,
    config: &ReadoutBenchmarkConfig,
) -> RosaResult<Vec<u64>> {
    let reps = validate_input(circuits, repetitions, config)?;

    if sweeps.is_empty() {
        return Err(RosaError::EmptySweepParameters);
    }
    if sweeps.len() != circuits.len() {
        return Err(RosaError::SweepCountMismatch {
            expected: circuits.len(),
            got: sweeps.len(),
        });
    }

    Ok(reps)
}

// ============================================================================
// Tests
// ============================================================================
