//! Readout error analysis
//!
//! Gantree: L3_Calibration → ReadoutAnalyzer
//!
//! Compares each trial's prepared bits with what the sampler measured.
//! For every qubit, shots prepared in |0⟩ that read 1 count towards e0 and
//! shots prepared in |1⟩ that read 0 count towards e1.

use crate::bitstrings::RandomBitstrings;
use crate::groups::QubitGroup;
use crate::result::{CalibrationResult, RateEstimate, ReadoutErrorRates};
use rosa_backend::MeasurementResult;
use rosa_core::{RosaError, RosaResult};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Per-qubit tallies
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    zero_num: u64,
    zero_den: u64,
    one_num: u64,
    one_den: u64,
}

impl Accumulator {
    fn rates(&self) -> ReadoutErrorRates {
        ReadoutErrorRates {
            e0: RateEstimate::from_counts(self.zero_num, self.zero_den),
            e1: RateEstimate::from_counts(self.one_num, self.one_den),
        }
    }
}

/// Estimate per-qubit readout error rates for `group`
///
/// `results[i]` must be the outcome of the circuit that prepared
/// `bitstrings.rows()[i]`, measured under `key` with `readout_repetitions`
/// shots.
/// Gantree: analyze_readout_results(results, bits, reps, group, key, ts) // 오류율 분석
pub fn analyze_readout_results(
    results: &[MeasurementResult],
    bitstrings: &RandomBitstrings,
    readout_repetitions: u64,
    group: &QubitGroup,
    key: &str,
    timestamp: SystemTime,
) -> RosaResult<CalibrationResult> {
    if results.len() != bitstrings.num_rows() {
        return Err(RosaError::ResultCountMismatch {
            expected: bitstrings.num_rows(),
            got: results.len(),
        });
    }

    let mut acc = vec![Accumulator::default(); group.len()];

    for (result, prepared) in results.iter().zip(bitstrings.rows()) {
        let record = result.measurement(key)?;
        if record.num_qubits() != group.len() {
            return Err(RosaError::MeasurementShapeMismatch {
                key: key.to_string(),
                expected: group.len(),
                got: record.num_qubits(),
            });
        }

        for ((tally, bit), ones) in acc.iter_mut().zip(prepared.iter()).zip(record.column_ones()) {
            let ones = ones.min(readout_repetitions);
            if bit {
                tally.one_num += readout_repetitions - ones;
                tally.one_den += readout_repetitions;
            } else {
                tally.zero_num += ones;
                tally.zero_den += readout_repetitions;
            }
        }
    }

    let rates: BTreeMap<_, _> = group
        .qubits()
        .iter()
        .zip(&acc)
        .map(|(q, tally)| (q.clone(), tally.rates()))
        .collect();

    log::debug!(
        "analyzed {} trials for group {} ({} reps each)",
        results.len(),
        group,
        readout_repetitions
    );

    Ok(CalibrationResult::new(rates, readout_repetitions, timestamp))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rosa_backend::MeasurementRecord;
    use rosa_core::{Bitstring, Qubit};

    fn bits(rows: &[&str]) -> RandomBitstrings {
        let width = rows.first().map_or(0, |r| r.len());
        RandomBitstrings::from_rows(
            rows.iter().map(|r| Bitstring::parse(r).unwrap()).collect(),
            width,
        )
        .unwrap()
    }

    fn constant(qubits: &[Qubit], row: &[u8], reps: usize) -> MeasurementResult {
        MeasurementResult::new(reps as u64, "scripted").with_record(
            "m",
            MeasurementRecord::constant(qubits.to_vec(), row.to_vec(), reps),
        )
    }

    #[test]
    fn test_prepared_zero_always_read_one() {
        let q = vec![Qubit::line(0)];
        let group = QubitGroup::new(q.clone());
        let result = analyze_readout_results(
            &[constant(&q, &[1], 100)],
            &bits(&["0"]),
            100,
            &group,
            "m",
            SystemTime::now(),
        )
        .unwrap();

        assert_eq!(result.zero_state_error(&q[0]), Some(RateEstimate::Measured(1.0)));
        assert_eq!(result.one_state_error(&q[0]), Some(RateEstimate::InsufficientData));
        assert!(result.rates[&q[0]].e1.as_f64().is_nan());
    }

    #[test]
    fn test_prepared_zero_always_read_zero() {
        let q = vec![Qubit::line(0)];
        let group = QubitGroup::new(q.clone());
        let result = analyze_readout_results(
            &[constant(&q, &[0], 100)],
            &bits(&["0"]),
            100,
            &group,
            "m",
            SystemTime::now(),
        )
        .unwrap();

        assert_eq!(result.zero_state_error(&q[0]), Some(RateEstimate::Measured(0.0)));
    }

    #[test]
    fn test_mixed_trials() {
        let q = Qubit::line_range(2);
        let group = QubitGroup::new(q.clone());
        let reps = 4;

        // trial 1 prepares 01: q0 reads 1 once, q1 reads 0 once
        let trial1 = MeasurementResult::new(reps, "scripted").with_record(
            "m",
            MeasurementRecord::new(
                q.clone(),
                vec![vec![1, 1], vec![0, 0], vec![0, 1], vec![0, 1]],
            ),
        );
        // trial 2 prepares 10: clean
        let trial2 = constant(&q, &[1, 0], reps as usize);

        let result = analyze_readout_results(
            &[trial1, trial2],
            &bits(&["01", "10"]),
            reps,
            &group,
            "m",
            SystemTime::now(),
        )
        .unwrap();

        assert_relative_eq!(result.rates[&q[0]].e0.as_f64(), 0.25);
        assert_relative_eq!(result.rates[&q[0]].e1.as_f64(), 0.0);
        assert_relative_eq!(result.rates[&q[1]].e0.as_f64(), 0.0);
        assert_relative_eq!(result.rates[&q[1]].e1.as_f64(), 0.25);
    }

    #[test]
    fn test_counts_clamped_to_repetitions() {
        let q = vec![Qubit::line(0)];
        let group = QubitGroup::new(q.clone());
        let result = analyze_readout_results(
            &[constant(&q, &[1], 20)],
            &bits(&["1"]),
            10,
            &group,
            "m",
            SystemTime::now(),
        )
        .unwrap();

        assert_eq!(result.one_state_error(&q[0]), Some(RateEstimate::Measured(0.0)));
    }

    #[test]
    fn test_no_trials() {
        let group = QubitGroup::new(Qubit::line_range(2));
        let empty = RandomBitstrings::from_rows(Vec::new(), 2).unwrap();
        let result =
            analyze_readout_results(&[], &empty, 10, &group, "m", SystemTime::now()).unwrap();

        assert_eq!(result.num_qubits(), 2);
        assert!(result.rates.values().all(|r| *r == ReadoutErrorRates::insufficient()));
    }

    #[test]
    fn test_contract_violations() {
        let q = Qubit::line_range(2);
        let group = QubitGroup::new(q.clone());
        let ts = SystemTime::now();

        assert!(matches!(
            analyze_readout_results(&[], &bits(&["01"]), 10, &group, "m", ts),
            Err(RosaError::ResultCountMismatch { expected: 1, got: 0 })
        ));
        assert_eq!(
            analyze_readout_results(&[constant(&q, &[0, 1], 10)], &bits(&["01"]), 10, &group, "z", ts)
                .unwrap_err(),
            RosaError::MissingMeasurementKey("z".into())
        );
        assert!(matches!(
            analyze_readout_results(&[constant(&q[..1], &[0], 10)], &bits(&["01"]), 10, &group, "m", ts),
            Err(RosaError::MeasurementShapeMismatch { expected: 2, got: 1, .. })
        ));
    }
}
