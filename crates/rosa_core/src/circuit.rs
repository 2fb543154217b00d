//! Quantum circuit structure for ROSA
//!
//! Gantree: L1_Circuit → Circuit
//!
//! A circuit is a time-ordered list of gates over an open set of qubits.
//! The pipeline only ever reads experiment circuits; calibration circuits
//! are built fresh.

use crate::error::{RosaError, RosaResult};
use crate::gate::Gate;
use crate::param::ParamResolver;
use crate::types::Qubit;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Gate sequence
    /// Gantree: gates: Vec<Gate> // 게이트 목록
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    /// Gantree: new() -> Self // 생성자
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with a name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(gates: Vec<Gate>) -> Self {
        Self { gates, name: None }
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append a gate
    /// Gantree: add_gate(&mut, Gate) // 게이트 추가
    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Append multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) {
        self.gates.extend(gates);
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    // ========================================================================
    // Circuit Queries
    // ========================================================================

    /// Every qubit touched by any gate, in qubit order
    /// Gantree: all_qubits(&self) -> BTreeSet<Qubit> // 사용 큐비트
    pub fn all_qubits(&self) -> BTreeSet<Qubit> {
        self.gates.iter().flat_map(|g| g.qubits()).collect()
    }

    /// Number of distinct qubits touched
    pub fn num_qubits(&self) -> usize {
        self.all_qubits().len()
    }

    /// Whether at least one gate is a measurement
    /// Gantree: has_measurements(&self) -> bool // 측정 여부
    pub fn has_measurements(&self) -> bool {
        self.gates.iter().any(Gate::is_measurement)
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.gates.iter().filter(|g| g.is_measurement()).count()
    }

    /// Measurement keys in circuit order
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.gates.iter().filter_map(Gate::measurement_key).collect()
    }

    /// Whether any gate argument still contains symbols
    pub fn is_parameterized(&self) -> bool {
        self.gates.iter().any(Gate::is_parameterized)
    }

    /// Names of all symbols used by gate arguments
    pub fn parameter_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for gate in &self.gates {
            gate.collect_symbols(&mut names);
        }
        names
    }

    /// Copy of the circuit with every gate argument evaluated
    /// Gantree: resolve_parameters(&self, resolver) -> Result<Circuit> // 파라미터 해석
    pub fn resolve_parameters(&self, resolver: &ParamResolver) -> RosaResult<Circuit> {
        let gates = self
            .gates
            .iter()
            .map(|g| g.resolve(resolver))
            .collect::<RosaResult<Vec<_>>>()?;
        Ok(Circuit {
            gates,
            name: self.name.clone(),
        })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check that the circuit is well formed
    ///
    /// No gate may act on the same qubit twice, measurements need at least
    /// one qubit and a non-empty key, and a key may be measured only once.
    /// Gantree: validate(&self) -> Result // 형식 검증
    pub fn validate(&self) -> Result<(), String> {
        let mut keys = HashSet::new();

        for (position, gate) in self.gates.iter().enumerate() {
            let qubits = gate.qubits();
            let distinct: HashSet<&Qubit> = qubits.iter().collect();
            if distinct.len() != qubits.len() {
                return Err(format!(
                    "gate {} ({}) acts on a qubit more than once",
                    position, gate
                ));
            }

            if let Gate::Measure { qubits, key } = gate {
                if qubits.is_empty() {
                    return Err(format!("measurement {} has no qubits", position));
                }
                if key.is_empty() {
                    return Err(format!("measurement {} has an empty key", position));
                }
                if !keys.insert(key.as_str()) {
                    return Err(format!("measurement key '{}' is used twice", key));
                }
            }
        }

        Ok(())
    }

    /// `validate` mapped onto an input error for circuit `index`
    pub fn validate_at(&self, index: usize) -> RosaResult<()> {
        self.validate()
            .map_err(|reason| RosaError::InvalidCircuit { index, reason })
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} gates)",
            self.num_qubits(),
            self.gates.len()
        )?;
        for gate in &self.gates {
            writeln!(f, "  {}", gate)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
