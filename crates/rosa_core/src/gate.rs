//! Quantum gate definitions for ROSA
//!
//! Gantree: L1_Circuit → Gate
//!
//! Closed gate set: enough for calibration circuits (identity, flips,
//! parameterized X powers, terminal measurement) and for the small
//! experiment circuits the reference simulator runs.

use crate::error::RosaResult;
use crate::param::{ParamExpr, ParamResolver};
use crate::types::Qubit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Identity (no-op placeholder)
    /// Gantree: I(Qubit) // 항등
    I(Qubit),

    /// Pauli-X gate (bit flip)
    /// Gantree: X(Qubit) // 파울리 X
    X(Qubit),

    /// Pauli-Y gate
    Y(Qubit),

    /// Pauli-Z gate
    Z(Qubit),

    /// Hadamard gate
    H(Qubit),

    // ========================================================================
    // Single-Qubit Parameterized Gates
    // ========================================================================
    /// X raised to an exponent: `t = 0` is I, `t = 1` is X
    /// Gantree: XPow(Qubit, ParamExpr) // X^t
    XPow(Qubit, ParamExpr),

    /// Rotation around X-axis (radians)
    Rx(Qubit, ParamExpr),

    /// Rotation around Y-axis (radians)
    Ry(Qubit, ParamExpr),

    /// Rotation around Z-axis (radians)
    Rz(Qubit, ParamExpr),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (control, target)
    Cnot(Qubit, Qubit),

    /// Controlled-Z
    Cz(Qubit, Qubit),

    // ========================================================================
    // Measurement
    // ========================================================================
    /// Measure `qubits` into the record labelled `key`
    /// Gantree: Measure{{qubits,key}} // 측정
    Measure {
        /// Measured qubits, in record column order
        qubits: Vec<Qubit>,
        /// Record label
        key: String,
    },
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<Qubit> // 관련 큐비트
    pub fn qubits(&self) -> Vec<Qubit> {
        match self {
            Gate::I(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::H(q)
            | Gate::XPow(q, _)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _) => vec![q.clone()],

            Gate::Cnot(a, b) | Gate::Cz(a, b) => vec![a.clone(), b.clone()],

            Gate::Measure { qubits, .. } => qubits.clone(),
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            Gate::I(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::H(_)
                | Gate::XPow(_, _)
                | Gate::Rx(_, _)
                | Gate::Ry(_, _)
                | Gate::Rz(_, _)
        )
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Cz(_, _))
    }

    /// Check if gate is a measurement
    /// Gantree: is_measurement(&self) -> bool // 측정 여부
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }

    /// Measurement key, if this is a measurement
    pub fn measurement_key(&self) -> Option<&str> {
        match self {
            Gate::Measure { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Gate argument, if the gate takes one
    pub fn param(&self) -> Option<&ParamExpr> {
        match self {
            Gate::XPow(_, p) | Gate::Rx(_, p) | Gate::Ry(_, p) | Gate::Rz(_, p) => Some(p),
            _ => None,
        }
    }

    /// Check if the gate argument contains unresolved symbols
    /// Gantree: is_parameterized(&self) -> bool // 심볼 여부
    pub fn is_parameterized(&self) -> bool {
        self.param().is_some_and(ParamExpr::is_parameterized)
    }

    /// Collect symbol names used by the gate argument
    pub fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        if let Some(p) = self.param() {
            p.collect_symbols(out);
        }
    }

    /// Copy of the gate with its argument evaluated against `resolver`
    /// Gantree: resolve(&self, resolver) -> Result<Gate> // 파라미터 해석
    pub fn resolve(&self, resolver: &ParamResolver) -> RosaResult<Gate> {
        let scalar = |p: &ParamExpr| -> RosaResult<ParamExpr> {
            Ok(ParamExpr::Scalar(p.resolve(resolver)?))
        };
        Ok(match self {
            Gate::XPow(q, p) => Gate::XPow(q.clone(), scalar(p)?),
            Gate::Rx(q, p) => Gate::Rx(q.clone(), scalar(p)?),
            Gate::Ry(q, p) => Gate::Ry(q.clone(), scalar(p)?),
            Gate::Rz(q, p) => Gate::Rz(q.clone(), scalar(p)?),
            other => other.clone(),
        })
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I(_) => "i",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::H(_) => "h",
            Gate::XPow(_, _) => "xpow",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::Cnot(_, _) => "cx",
            Gate::Cz(_, _) => "cz",
            Gate::Measure { .. } => "measure",
        }
    }

    // ========================================================================
    // Calibration Helpers
    // ========================================================================

    /// `X` for a prepared 1, `I` for a prepared 0
    /// Gantree: flip_or_identity(q, bit) -> Gate // X 또는 I
    pub fn flip_or_identity(qubit: Qubit, bit: bool) -> Gate {
        if bit {
            Gate::X(qubit)
        } else {
            Gate::I(qubit)
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::XPow(q, p) => write!(f, "X({})**{}", q, p),
            Gate::Rx(q, p) | Gate::Ry(q, p) | Gate::Rz(q, p) => {
                write!(f, "{}({})({})", self.name(), p, q)
            }
            Gate::Measure { qubits, key } => {
                write!(f, "measure[{}](", key)?;
                for (i, q) in qubits.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", q)?;
                }
                write!(f, ")")
            }
            other => {
                let qs: Vec<String> = other.qubits().iter().map(|q| q.to_string()).collect();
                write!(f, "{}({})", other.name(), qs.join(", "))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        let q0 = Qubit::line(0);
        let q1 = Qubit::line(1);
        assert_eq!(Gate::X(q0.clone()).qubits(), vec![q0.clone()]);
        assert_eq!(Gate::Cz(q0.clone(), q1.clone()).qubits(), vec![q0.clone(), q1.clone()]);

        let m = Gate::Measure {
            qubits: vec![q1.clone(), q0.clone()],
            key: "m".into(),
        };
        assert_eq!(m.qubits(), vec![q1, q0]);
        assert!(m.is_measurement());
        assert_eq!(m.measurement_key(), Some("m"));
    }

    #[test]
    fn test_parameterized_detection() {
        let q = Qubit::line(0);
        assert!(!Gate::XPow(q.clone(), 1.0.into()).is_parameterized());
        assert!(Gate::XPow(q.clone(), "t".into()).is_parameterized());
        assert!(!Gate::X(q).is_parameterized());
    }

    #[test]
    fn test_resolve() {
        let q = Qubit::line(0);
        let gate = Gate::XPow(q.clone(), "t".into());
        let resolved = gate.resolve(&ParamResolver::new().with("t", 1.0)).unwrap();
        assert_eq!(resolved, Gate::XPow(q, ParamExpr::Scalar(1.0)));
        assert!(gate.resolve(&ParamResolver::new()).is_err());
    }

    #[test]
    fn test_flip_or_identity() {
        let q = Qubit::line(4);
        assert_eq!(Gate::flip_or_identity(q.clone(), true), Gate::X(q.clone()));
        assert_eq!(Gate::flip_or_identity(q.clone(), false), Gate::I(q));
    }

    #[test]
    fn test_display() {
        let q = Qubit::line(0);
        assert_eq!(Gate::X(q.clone()).to_string(), "x(q(0))");
        assert_eq!(Gate::XPow(q.clone(), "t".into()).to_string(), "X(q(0))**t");
        let m = Gate::Measure {
            qubits: vec![q],
            key: "m".into(),
        };
        assert_eq!(m.to_string(), "measure[m](q(0))");
    }
}
