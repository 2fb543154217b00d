//! Readout benchmarking pipelines
//!
//! Gantree: L4_Integration → ReadoutBenchmark
//!
//! Runs experiment circuits together with readout calibration circuits in a
//! single sampler call. The shuffled pipeline interleaves everything in a
//! random order so slow drift affects both kinds of circuit alike. The swept
//! pipeline submits one parameterized calibration circuit per group after
//! the experiments and does not shuffle.

use crate::config::ReadoutBenchmarkConfig;
use crate::random::RandomSource;
use crate::validation::{validate_input, validate_sweep_input, RepetitionSpec};
use rosa_backend::{MeasurementResult, Sampler};
use rosa_calibration::{
    analyze_readout_results, generate_parameterized_calibration_circuit,
    generate_readout_calibration_circuits, resolve_qubit_groups, CalibrationResult, Permutation,
    QubitGroup, RandomBitstrings,
};
use rosa_core::{Circuit, RosaError, RosaResult, Sweep};
use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

/// Output of the shuffled pipeline
/// Gantree: ShuffledRun // 섞어 실행 결과
#[derive(Debug, Clone)]
pub struct ShuffledRun {
    /// Experiment results, in input order
    pub measurements: Vec<MeasurementResult>,

    /// Readout calibration per qubit group
    pub calibrations: BTreeMap<QubitGroup, CalibrationResult>,

    /// When the sampler returned
    pub timestamp: SystemTime,
}

/// Output of the swept pipeline
/// Gantree: SweepRun // 스윕 실행 결과
#[derive(Debug, Clone)]
pub struct SweepRun {
    /// Experiment results, one list per circuit in sweep order
    pub measurements: Vec<Vec<MeasurementResult>>,

    /// Readout calibration per qubit group
    pub calibrations: BTreeMap<QubitGroup, CalibrationResult>,

    /// When the sampler returned
    pub timestamp: SystemTime,
}

impl ShuffledRun {
    /// Calibration of `group`
    pub fn calibration(&self, group: &QubitGroup) -> Option<&CalibrationResult> {
        self.calibrations.get(group)
    }
}

impl SweepRun {
    /// Calibration of `group`
    pub fn calibration(&self, group: &QubitGroup) -> Option<&CalibrationResult> {
        self.calibrations.get(group)
    }
}

impl fmt::Display for ShuffledRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ShuffledRun({} experiment results)", self.measurements.len())?;
        for (group, calibration) in &self.calibrations {
            writeln!(f, "  {}: {}", group, calibration)?;
        }
        Ok(())
    }
}

impl fmt::Display for SweepRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SweepRun({} experiment sweeps)", self.measurements.len())?;
        for (group, calibration) in &self.calibrations {
            writeln!(f, "  {}: {}", group, calibration)?;
        }
        Ok(())
    }
}

/// Calibration trials drawn for one group
struct GroupPlan {
    group: QubitGroup,
    bitstrings: RandomBitstrings,
}

/// Readout benchmarking runner
/// Gantree: ReadoutBenchmark // 측정 보정 실행기
#[derive(Debug, Clone, Default)]
pub struct ReadoutBenchmark {
    config: ReadoutBenchmarkConfig,
}

impl ReadoutBenchmark {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with configuration
    pub fn new(config: ReadoutBenchmarkConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    pub fn config(&self) -> &ReadoutBenchmarkConfig {
        &self.config
    }

    // ========================================================================
    // Shuffled Pipeline
    // ========================================================================

    /// Run `circuits` interleaved with enumerated calibration circuits
    /// Gantree: run_shuffled(circuits, sampler, reps, random) -> Result<ShuffledRun> // 섞어 실행
    pub fn run_shuffled<S: Sampler + ?Sized>(
        &self,
        circuits: &[Circuit],
        sampler: &S,
        repetitions: &RepetitionSpec,
        random: RandomSource<'_>,
    ) -> RosaResult<ShuffledRun> {
        let config = &self.config;
        let circuit_reps = validate_input(circuits, repetitions, config)?;
        let groups = resolve_qubit_groups(circuits, &config.qubits)?;
        let mut rng = random.into_rng();

        let mut all_circuits = circuits.to_vec();
        let mut plans = Vec::with_capacity(groups.len());
        for group in groups {
            let (calibration_circuits, bitstrings) = generate_readout_calibration_circuits(
                &group,
                config.num_random_bitstrings,
                &config.measurement_key,
                &mut *rng,
            );
            all_circuits.extend(calibration_circuits);
            plans.push(GroupPlan { group, bitstrings });
        }

        let num_calibration = all_circuits.len() - circuits.len();
        let mut all_reps = circuit_reps;
        all_reps.extend(std::iter::repeat(config.readout_repetitions).take(num_calibration));

        log::info!(
            "shuffled readout benchmark: {} experiment + {} calibration circuits over {} group(s)",
            circuits.len(),
            num_calibration,
            plans.len()
        );

        let permutation = Permutation::random(all_circuits.len(), &mut *rng);
        let shuffled_circuits = permutation.apply(&all_circuits);
        let shuffled_reps = permutation.apply(&all_reps);

        log::debug!("submitting {} circuits to {}", shuffled_circuits.len(), sampler.name());
        let results = sampler.run_batch(&shuffled_circuits, &shuffled_reps)?;
        let timestamp = SystemTime::now();

        if results.len() != all_circuits.len() {
            return Err(RosaError::ResultCountMismatch {
                expected: all_circuits.len(),
                got: results.len(),
            });
        }

        let mut results = permutation.restore(results)?.into_iter();
        let measurements: Vec<MeasurementResult> = results.by_ref().take(circuits.len()).collect();

        let mut calibrations = BTreeMap::new();
        for plan in plans {
            let group_results: Vec<MeasurementResult> =
                results.by_ref().take(plan.bitstrings.num_rows()).collect();
            let calibration = self.analyze(&plan, &group_results, timestamp)?;
            calibrations.insert(plan.group, calibration);
        }

        Ok(ShuffledRun {
            measurements,
            calibrations,
            timestamp,
        })
    }

    // ========================================================================
    // Swept Pipeline
    // ========================================================================

    /// Run swept `circuits` followed by one parameterized calibration circuit
    /// per group
    /// Gantree: run_sweep(circuits, sweeps, sampler, reps, random) -> Result<SweepRun> // 스윕 실행
    pub fn run_sweep<S: Sampler + ?Sized>(
        &self,
        circuits: &[Circuit],
        sweeps: &[Sweep],
        sampler: &S,
        repetitions: &RepetitionSpec,
        random: RandomSource<'_>,
    ) -> RosaResult<SweepRun> {
        let config = &self.config;
        let circuit_reps = validate_sweep_input(circuits, sweeps, repetitions, config)?;
        let groups = resolve_qubit_groups(circuits, &config.qubits)?;
        let mut rng = random.into_rng();

        let mut all_circuits = circuits.to_vec();
        let mut all_sweeps = sweeps.to_vec();
        let mut all_reps = circuit_reps;
        let mut plans = Vec::with_capacity(groups.len());

        for group in groups {
            let bitstrings =
                RandomBitstrings::generate(config.num_random_bitstrings, group.len(), &mut *rng);
            if !bitstrings.is_empty() {
                let (circuit, sweep) = generate_parameterized_calibration_circuit(
                    &group,
                    &bitstrings,
                    &config.measurement_key,
                );
                all_circuits.push(circuit);
                all_sweeps.push(sweep);
                all_reps.push(config.readout_repetitions);
            }
            plans.push(GroupPlan { group, bitstrings });
        }

        log::info!(
            "swept readout benchmark: {} experiment + {} calibration circuits over {} group(s)",
            circuits.len(),
            all_circuits.len() - circuits.len(),
            plans.len()
        );

        let results = sampler.run_batch_sweep(&all_circuits, &all_sweeps, &all_reps)?;
        let timestamp = SystemTime::now();

        let received = results.len();
        if received != all_circuits.len() {
            return Err(RosaError::ResultCountMismatch {
                expected: all_circuits.len(),
                got: received,
            });
        }

        let mut results = results.into_iter();
        let measurements: Vec<Vec<MeasurementResult>> =
            results.by_ref().take(circuits.len()).collect();

        let mut calibrations = BTreeMap::new();
        for plan in plans {
            let group_results = if plan.bitstrings.is_empty() {
                Vec::new()
            } else {
                results.next().ok_or(RosaError::ResultCountMismatch {
                    expected: all_circuits.len(),
                    got: received,
                })?
            };
            let calibration = self.analyze(&plan, &group_results, timestamp)?;
            calibrations.insert(plan.group, calibration);
        }

        Ok(SweepRun {
            measurements,
            calibrations,
            timestamp,
        })
    }

    fn analyze(
        &self,
        plan: &GroupPlan,
        results: &[MeasurementResult],
        timestamp: SystemTime,
    ) -> RosaResult<CalibrationResult> {
        let calibration = analyze_readout_results(
            results,
            &plan.bitstrings,
            self.config.readout_repetitions,
            &plan.group,
            &self.config.measurement_key,
            timestamp,
        )?;
        log::info!("readout calibration {}: {}", plan.group, calibration);
        Ok(calibration)
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Shuffled pipeline with an explicit configuration
/// Gantree: run_shuffled_with_readout_benchmarking() // 섞어 실행
pub fn run_shuffled_with_readout_benchmarking<S: Sampler + ?Sized>(
    circuits: &[Circuit],
    sampler: &S,
    repetitions: &RepetitionSpec,
    random: RandomSource<'_>,
    config: &ReadoutBenchmarkConfig,
) -> RosaResult<ShuffledRun> {
    ReadoutBenchmark::new(config.clone()).run_shuffled(circuits, sampler, repetitions, random)
}

/// Swept pipeline with an explicit configuration
/// Gantree: run_sweep_with_readout_benchmarking() // 스윕 실행
pub fn run_sweep_with_readout_benchmarking<S: Sampler + ?Sized>(
    circuits: &[Circuit],
    sweeps: &[Sweep],
    sampler: &S,
    repetitions: &RepetitionSpec,
    random: RandomSource<'_>,
    config: &ReadoutBenchmarkConfig,
) -> RosaResult<SweepRun> {
    ReadoutBenchmark::new(config.clone()).run_sweep(circuits, sweeps, sampler, repetitions, random)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rosa_backend::MeasurementRecord;
    use rosa_calibration::{QubitSpec, RateEstimate};
    use rosa_core::{CircuitBuilder, Gate, ParamResolver, Qubit, RosaResult};
    use std::sync::Mutex;

    /// Reads back each prepared X as 1, optionally flipping everything, and
    /// remembers how many circuits were submitted
    struct ScriptedSampler {
        invert: bool,
        submitted: Mutex<Vec<usize>>,
    }

    impl ScriptedSampler {
        fn new(invert: bool) -> Self {
            Self {
                invert,
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    impl Sampler for ScriptedSampler {
        fn name(&self) -> &str {
            "scripted"
        }

        fn run(&self, circuit: &Circuit, repetitions: u64) -> RosaResult<MeasurementResult> {
            let mut result = MeasurementResult::new(repetitions, self.name());
            for gate in circuit.gates() {
                if let Gate::Measure { qubits, key } = gate {
                    let row = qubits
                        .iter()
                        .map(|q| {
                            let flipped = circuit.gates().contains(&Gate::X(q.clone()));
                            u8::from(flipped != self.invert)
                        })
                        .collect();
                    let record =
                        MeasurementRecord::constant(qubits.clone(), row, repetitions as usize);
                    result = result.with_record(key.clone(), record);
                }
            }
            Ok(result)
        }

        fn run_batch(
            &self,
            circuits: &[Circuit],
            repetitions: &[u64],
        ) -> RosaResult<Vec<MeasurementResult>> {
            self.submitted.lock().unwrap().push(circuits.len());
            circuits
                .iter()
                .zip(repetitions)
                .map(|(c, &r)| self.run(c, r))
                .collect()
        }
    }

    /// Drops the last result of every batch
    struct LossySampler;

    impl Sampler for LossySampler {
        fn name(&self) -> &str {
            "lossy"
        }

        fn run(&self, _circuit: &Circuit, repetitions: u64) -> RosaResult<MeasurementResult> {
            Ok(MeasurementResult::new(repetitions, self.name()))
        }

        fn run_batch(
            &self,
            circuits: &[Circuit],
            repetitions: &[u64],
        ) -> RosaResult<Vec<MeasurementResult>> {
            let mut results: Vec<_> = circuits
                .iter()
                .zip(repetitions)
                .map(|(c, &r)| self.run(c, r))
                .collect::<RosaResult<_>>()?;
            results.pop();
            Ok(results)
        }

        fn run_batch_sweep(
            &self,
            circuits: &[Circuit],
            sweeps: &[Sweep],
            repetitions: &[u64],
        ) -> RosaResult<Vec<Vec<MeasurementResult>>> {
            let mut results: Vec<_> = circuits
                .iter()
                .zip(sweeps)
                .zip(repetitions)
                .map(|((c, sweep), &r)| self.run_sweep(c, sweep, r))
                .collect::<RosaResult<_>>()?;
            results.pop();
            Ok(results)
        }
    }

    fn experiment(n: i32) -> Circuit {
        let q = Qubit::line_range(n);
        CircuitBuilder::new()
            .x(q[0].clone())
            .measure(q.clone(), "result")
            .build()
    }

    #[test]
    fn test_measurements_return_in_input_order() {
        let sampler = ScriptedSampler::new(false);
        let circuits = vec![experiment(1), experiment(2), experiment(3)];
        let bench = ReadoutBenchmark::new(ReadoutBenchmarkConfig::default().with_num_random_bitstrings(5));

        let run = bench
            .run_shuffled(&circuits, &sampler, &RepetitionSpec::PerCircuit(vec![7, 8, 9]), 3u64.into())
            .unwrap();

        let widths: Vec<usize> = run
            .measurements
            .iter()
            .map(|r| r.measurement("result").unwrap().num_qubits())
            .collect();
        assert_eq!(widths, vec![1, 2, 3]);
        let reps: Vec<u64> = run.measurements.iter().map(|r| r.repetitions).collect();
        assert_eq!(reps, vec![7, 8, 9]);
        assert_eq!(*sampler.submitted.lock().unwrap(), vec![3 + 5]);
    }

    #[test]
    fn test_perfect_readout_gives_zero_rates() {
        let sampler = ScriptedSampler::new(false);
        let bench = ReadoutBenchmark::new(
            ReadoutBenchmarkConfig::default()
                .with_num_random_bitstrings(30)
                .with_readout_repetitions(10),
        );

        let run = bench
            .run_shuffled(&[experiment(2)], &sampler, &10u64.into(), 11u64.into())
            .unwrap();

        let calibration = &run.calibrations[&QubitGroup::new(Qubit::line_range(2))];
        for rates in calibration.rates.values() {
            assert_eq!(rates.e0, RateEstimate::Measured(0.0));
            assert_eq!(rates.e1, RateEstimate::Measured(0.0));
        }
    }

    #[test]
    fn test_inverted_readout_gives_unit_rates() {
        let sampler = ScriptedSampler::new(true);
        let bench = ReadoutBenchmark::new(ReadoutBenchmarkConfig::default().with_num_random_bitstrings(30));

        let run = bench
            .run_shuffled(&[experiment(2)], &sampler, &10u64.into(), 12u64.into())
            .unwrap();

        let calibration = run.calibrations.values().next().unwrap();
        assert_eq!(calibration.avg_e0(), Some(1.0));
        assert_eq!(calibration.avg_e1(), Some(1.0));
    }

    #[test]
    fn test_result_count_mismatch() {
        let bench = ReadoutBenchmark::new(ReadoutBenchmarkConfig::default().with_num_random_bitstrings(2));
        let err = bench
            .run_shuffled(&[experiment(1)], &LossySampler, &10u64.into(), 1u64.into())
            .unwrap_err();
        assert_eq!(err, RosaError::ResultCountMismatch { expected: 3, got: 2 });
        assert!(err.is_execution_error());
    }

    #[test]
    fn test_sweep_result_count_mismatch() {
        let q = Qubit::line(0);
        let circuit = CircuitBuilder::new().measure(vec![q], "result").build();
        let bench = ReadoutBenchmark::new(ReadoutBenchmarkConfig::default().with_num_random_bitstrings(2));

        let err = bench
            .run_sweep(
                &[circuit],
                &[vec![ParamResolver::new()]],
                &LossySampler,
                &10u64.into(),
                1u64.into(),
            )
            .unwrap_err();
        assert_eq!(err, RosaError::ResultCountMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_invalid_input_submits_nothing() {
        let sampler = ScriptedSampler::new(false);
        let bench = ReadoutBenchmark::default();
        let unmeasured = CircuitBuilder::new().x(Qubit::line(0)).build();

        assert!(bench
            .run_shuffled(&[unmeasured], &sampler, &10u64.into(), 1u64.into())
            .is_err());
        assert!(sampler.submitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sweep_pipeline_splits_results() {
        let sampler = ScriptedSampler::new(false);
        let q = Qubit::line(0);
        let circuit = CircuitBuilder::new()
            .x_pow(q.clone(), "t")
            .measure(vec![q], "result")
            .build();
        let sweep: Sweep = vec![
            ParamResolver::new().with("t", 0.0),
            ParamResolver::new().with("t", 1.0),
            ParamResolver::new().with("t", 0.5),
        ];
        let bench = ReadoutBenchmark::new(
            ReadoutBenchmarkConfig::default()
                .with_num_random_bitstrings(6)
                .with_readout_repetitions(20),
        );

        let run = bench
            .run_sweep(&[circuit], &[sweep], &sampler, &5u64.into(), 4u64.into())
            .unwrap();

        assert_eq!(run.measurements.len(), 1);
        assert_eq!(run.measurements[0].len(), 3);
        assert_eq!(run.measurements[0][1].params.get("t"), Some(1.0));

        // XPow gates are never plain X, so the scripted sampler reads all zeros
        let calibration = run.calibrations.values().next().unwrap();
        assert_eq!(calibration.repetitions, 20);
        let rates = calibration.rates[&Qubit::line(0)];
        assert!(rates.e0.is_measured() || rates.e1.is_measured());
        if let RateEstimate::Measured(e1) = rates.e1 {
            assert_eq!(e1, 1.0);
        }
    }

    #[test]
    fn test_sweep_with_explicit_groups() {
        let sampler = ScriptedSampler::new(false);
        let q = Qubit::line_range(2);
        let circuit = CircuitBuilder::new().measure(q.clone(), "result").build();
        let bench = ReadoutBenchmark::new(
            ReadoutBenchmarkConfig::default()
                .with_num_random_bitstrings(3)
                .with_qubits(QubitSpec::Groups(vec![vec![q[0].clone()], vec![q[1].clone()]])),
        );

        let run = bench
            .run_sweep(
                &[circuit],
                &[vec![ParamResolver::new()]],
                &sampler,
                &1u64.into(),
                5u64.into(),
            )
            .unwrap();

        assert_eq!(run.calibrations.len(), 2);
        assert!(run.calibration(&QubitGroup::new(vec![q[1].clone()])).is_some());
    }
}
