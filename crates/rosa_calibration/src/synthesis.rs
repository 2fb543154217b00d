//! Calibration circuit synthesis
//!
//! Gantree: L3_Calibration → CalibrationSynthesizer
//!
//! Two forms: one concrete circuit per random bitstring (X where the bit is
//! 1, I where it is 0), or one circuit with a symbolic X-power per qubit and
//! a sweep carrying the bitstrings as 0/1 exponents.

use crate::bitstrings::RandomBitstrings;
use crate::groups::QubitGroup;
use rand::Rng;
use rosa_core::{readout, Circuit, CircuitBuilder, ParamResolver, Sweep};

/// Draw `k` bitstrings for `group` and build one circuit per bitstring
/// Gantree: generate_readout_calibration_circuits(group, k, key, rng) // 보정 회로 생성
pub fn generate_readout_calibration_circuits<R: Rng + ?Sized>(
    group: &QubitGroup,
    k: usize,
    key: &str,
    rng: &mut R,
) -> (Vec<Circuit>, RandomBitstrings) {
    let bitstrings = RandomBitstrings::generate(k, group.len(), rng);
    let circuits = bitstrings
        .rows()
        .iter()
        .map(|bits| {
            CircuitBuilder::new()
                .prepare_bitstring(group.qubits(), bits)
                .measure(group.qubits().to_vec(), key)
                .build()
        })
        .collect();
    (circuits, bitstrings)
}

/// Build the parameterized calibration circuit for `group` and its sweep
/// Gantree: generate_parameterized_calibration_circuit(group, bits, key) // 스윕 보정 회로
pub fn generate_parameterized_calibration_circuit(
    group: &QubitGroup,
    bitstrings: &RandomBitstrings,
    key: &str,
) -> (Circuit, Sweep) {
    let circuit = CircuitBuilder::new()
        .x_pow_layer(group.qubits(), readout::sweep_symbol)
        .measure(group.qubits().to_vec(), key)
        .build();

    let sweep = bitstrings
        .rows()
        .iter()
        .map(|bits| {
            bits.iter()
                .enumerate()
                .map(|(i, bit)| (readout::sweep_symbol(i), if bit { 1.0 } else { 0.0 }))
                .collect::<ParamResolver>()
        })
        .collect();

    (circuit, sweep)
}
