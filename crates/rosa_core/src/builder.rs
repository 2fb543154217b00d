//! Circuit builder for ROSA
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for experiment and calibration circuits.

use crate::circuit::Circuit;
use crate::error::RosaResult;
use crate::gate::Gate;
use crate::param::ParamExpr;
use crate::types::{Bitstring, Qubit};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    /// Internal circuit being built
    /// Gantree: circuit: Circuit // 내부 회로
    circuit: Circuit,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new() -> Self // 생성자
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with circuit name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(name),
        }
    }

    /// Append an arbitrary gate
    pub fn gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add identity gate
    pub fn i(self, qubit: Qubit) -> Self {
        self.gate(Gate::I(qubit))
    }

    /// Add Pauli-X gate
    /// Gantree: x(self, q) -> Self // X 추가
    pub fn x(self, qubit: Qubit) -> Self {
        self.gate(Gate::X(qubit))
    }

    /// Add Pauli-Y gate
    pub fn y(self, qubit: Qubit) -> Self {
        self.gate(Gate::Y(qubit))
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: Qubit) -> Self {
        self.gate(Gate::Z(qubit))
    }

    /// Add Hadamard gate
    /// Gantree: h(self, q) -> Self // H 추가
    pub fn h(self, qubit: Qubit) -> Self {
        self.gate(Gate::H(qubit))
    }

    /// Add X^t
    pub fn x_pow(self, qubit: Qubit, exponent: impl Into<ParamExpr>) -> Self {
        self.gate(Gate::XPow(qubit, exponent.into()))
    }

    /// Add Rx rotation
    pub fn rx(self, qubit: Qubit, angle: impl Into<ParamExpr>) -> Self {
        self.gate(Gate::Rx(qubit, angle.into()))
    }

    /// Add Ry rotation
    pub fn ry(self, qubit: Qubit, angle: impl Into<ParamExpr>) -> Self {
        self.gate(Gate::Ry(qubit, angle.into()))
    }

    /// Add Rz rotation
    pub fn rz(self, qubit: Qubit, angle: impl Into<ParamExpr>) -> Self {
        self.gate(Gate::Rz(qubit, angle.into()))
    }

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================

    /// Add CNOT gate
    /// Gantree: cnot(self, c, t) -> Self // CNOT 추가
    pub fn cnot(self, control: Qubit, target: Qubit) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Add CZ gate
    pub fn cz(self, a: Qubit, b: Qubit) -> Self {
        self.gate(Gate::Cz(a, b))
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Measure `qubits` under `key`
    /// Gantree: measure(self, qs, key) -> Self // 측정 추가
    pub fn measure(self, qubits: Vec<Qubit>, key: impl Into<String>) -> Self {
        self.gate(Gate::Measure {
            qubits,
            key: key.into(),
        })
    }

    /// Measure every qubit touched so far, in qubit order
    pub fn measure_all(self, key: impl Into<String>) -> Self {
        let qubits = self.circuit.all_qubits().into_iter().collect();
        self.measure(qubits, key)
    }

    // ========================================================================
    // Calibration Layers
    // ========================================================================

    /// Prepare `bits` on `qubits`: X where the bit is 1, I where it is 0
    /// Gantree: prepare_bitstring(self, qs, bits) -> Self // 비트열 준비
    pub fn prepare_bitstring(mut self, qubits: &[Qubit], bits: &Bitstring) -> Self {
        for (qubit, bit) in qubits.iter().zip(bits.iter()) {
            self.circuit
                .add_gate(Gate::flip_or_identity(qubit.clone(), bit));
        }
        self
    }

    /// X^symbol on every qubit; `symbol_for` names the symbol from the qubit's position
    pub fn x_pow_layer<F>(mut self, qubits: &[Qubit], symbol_for: F) -> Self
    where
        F: Fn(usize) -> String,
    {
        for (position, qubit) in qubits.iter().enumerate() {
            let symbol = ParamExpr::Symbol(symbol_for(position));
            self.circuit.add_gate(Gate::XPow(qubit.clone(), symbol));
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit
    /// Gantree: build(self) -> Circuit // 회로 생성
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build and run the well-formedness check
    pub fn build_validated(self) -> RosaResult<Circuit> {
        self.circuit.validate_at(0)?;
        Ok(self.circuit)
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let q = Qubit::line_range(2);
        let circuit = CircuitBuilder::new()
            .h(q[0].clone())
            .cnot(q[0].clone(), q[1].clone())
            .measure(q.clone(), "m")
            .build();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gate_count(), 3);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_measure_all() {
        let circuit = CircuitBuilder::new()
            .x(Qubit::line(2))
            .h(Qubit::line(0))
            .measure_all("m")
            .build();

        let last = circuit.gates().last().unwrap();
        assert_eq!(last.qubits(), vec![Qubit::line(0), Qubit::line(2)]);
    }

    #[test]
    fn test_prepare_bitstring() {
        let q = Qubit::line_range(3);
        let bits = Bitstring::parse("101").unwrap();
        let circuit = CircuitBuilder::new().prepare_bitstring(&q, &bits).build();

        assert_eq!(
            circuit.gates(),
            &[
                Gate::X(q[0].clone()),
                Gate::I(q[1].clone()),
                Gate::X(q[2].clone())
            ]
        );
    }

    #[test]
    fn test_x_pow_layer() {
        let q = Qubit::line_range(2);
        let circuit = CircuitBuilder::new()
            .x_pow_layer(&q, |i| format!("t_{}", i))
            .build();

        assert!(circuit.is_parameterized());
        assert_eq!(circuit.parameter_names().len(), 2);
    }

    #[test]
    fn test_build_validated() {
        let q = Qubit::line(0);
        assert!(CircuitBuilder::new()
            .x(q.clone())
            .measure(vec![q.clone()], "m")
            .build_validated()
            .is_ok());
        assert!(CircuitBuilder::new()
            .cz(q.clone(), q)
            .build_validated()
            .is_err());
    }
}
