//! Qubit group resolution
//!
//! Gantree: L3_Calibration → QubitGroups
//!
//! Turns the caller's qubit selection into an ordered list of groups, each
//! calibrated independently.

use rosa_core::{Circuit, Qubit, RosaError, RosaResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Which qubits to calibrate
/// Gantree: QubitSpec // 큐비트 선택
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QubitSpec {
    /// Union of every qubit the experiment circuits touch
    #[default]
    AllTouched,

    /// One explicit group
    FlatGroup(Vec<Qubit>),

    /// Several explicit groups; qubits may appear in more than one
    Groups(Vec<Vec<Qubit>>),
}

impl fmt::Display for QubitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitSpec::AllTouched => write!(f, "all touched"),
            QubitSpec::FlatGroup(qs) => write!(f, "1 group of {}", qs.len()),
            QubitSpec::Groups(gs) => write!(f, "{} groups", gs.len()),
        }
    }
}

/// Ordered, duplicate-free set of qubits calibrated together
/// Gantree: QubitGroup // 큐비트 그룹
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitGroup(Vec<Qubit>);

impl QubitGroup {
    /// Create, dropping repeats but keeping first occurrences in place
    pub fn new(qubits: impl IntoIterator<Item = Qubit>) -> Self {
        let mut seen = HashSet::new();
        Self(
            qubits
                .into_iter()
                .filter(|q| seen.insert(q.clone()))
                .collect(),
        )
    }

    /// Qubits in group order
    pub fn qubits(&self) -> &[Qubit] {
        &self.0
    }

    /// Number of qubits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `qubit` belongs to the group
    pub fn contains(&self, qubit: &Qubit) -> bool {
        self.0.contains(qubit)
    }
}

impl fmt::Display for QubitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "({})", names.join(", "))
    }
}

impl From<Vec<Qubit>> for QubitGroup {
    fn from(qubits: Vec<Qubit>) -> Self {
        Self::new(qubits)
    }
}

/// Resolve `spec` into calibration groups
/// Gantree: resolve_qubit_groups(circuits, spec) -> Result<Vec<QubitGroup>> // 그룹 결정
pub fn resolve_qubit_groups(circuits: &[Circuit], spec: &QubitSpec) -> RosaResult<Vec<QubitGroup>> {
    let groups = match spec {
        QubitSpec::AllTouched => {
            let touched: BTreeSet<Qubit> = circuits.iter().flat_map(Circuit::all_qubits).collect();
            vec![QubitGroup::new(touched)]
        }
        QubitSpec::FlatGroup(qubits) => vec![QubitGroup::new(qubits.iter().cloned())],
        QubitSpec::Groups(groups) => groups
            .iter()
            .map(|g| QubitGroup::new(g.iter().cloned()))
            .collect(),
    };

    let mut seen = HashSet::new();
    for (index, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(RosaError::EmptyQubitGroup { index });
        }
        if !seen.insert(group) {
            return Err(RosaError::DuplicateQubitGroup(group.to_string()));
        }
    }

    Ok(groups)
}
