//! Sampler execution types and traits
//!
//! Gantree: L2_Backend → SamplerTrait
//!
//! Defines the execution boundary: a [`Sampler`] runs circuits and returns
//! one [`MeasurementResult`] per circuit (or per sweep point), with measured
//! bits keyed by the measurement label.

use rosa_core::{Circuit, Counts, ParamResolver, Qubit, RosaError, RosaResult, Sweep};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Bits measured under one key
/// Gantree: MeasurementRecord // 측정 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Measured qubits, one per column
    pub qubits: Vec<Qubit>,

    /// repetitions × qubits matrix of 0/1 outcomes
    pub bits: Vec<Vec<u8>>,
}

impl MeasurementRecord {
    /// Create a record
    pub fn new(qubits: Vec<Qubit>, bits: Vec<Vec<u8>>) -> Self {
        Self { qubits, bits }
    }

    /// Record where every shot reads `row`
    pub fn constant(qubits: Vec<Qubit>, row: Vec<u8>, repetitions: usize) -> Self {
        Self {
            qubits,
            bits: vec![row; repetitions],
        }
    }

    /// Number of shots (rows)
    pub fn repetitions(&self) -> usize {
        self.bits.len()
    }

    /// Number of measured qubits (columns)
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Per-column number of shots that read 1
    /// Gantree: column_ones(&self) -> Vec<u64> // 1 카운트
    pub fn column_ones(&self) -> Vec<u64> {
        let mut ones = vec![0u64; self.qubits.len()];
        for row in &self.bits {
            for (count, &bit) in ones.iter_mut().zip(row) {
                if bit != 0 {
                    *count += 1;
                }
            }
        }
        ones
    }

    /// Histogram of row bitstrings
    pub fn counts(&self) -> Counts {
        let mut counts: Counts = HashMap::new();
        for row in &self.bits {
            let key: String = row.iter().map(|&b| if b != 0 { '1' } else { '0' }).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Fraction of shots reading `bitstring`
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        let count = self.counts().get(bitstring).copied().unwrap_or(0);
        count as f64 / self.bits.len() as f64
    }
}

/// Result of running one circuit (at one sweep point)
/// Gantree: MeasurementResult // 실행 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Records keyed by measurement label
    pub records: BTreeMap<String, MeasurementRecord>,

    /// Repetitions requested
    pub repetitions: u64,

    /// Parameter bindings the circuit was run with
    pub params: ParamResolver,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Job ID (if applicable)
    pub job_id: Option<String>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,
}

impl MeasurementResult {
    /// Create an empty result
    pub fn new(repetitions: u64, backend: &str) -> Self {
        Self {
            records: BTreeMap::new(),
            repetitions,
            params: ParamResolver::new(),
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                ..Default::default()
            },
        }
    }

    /// Add a record under `key`, builder style
    pub fn with_record(mut self, key: impl Into<String>, record: MeasurementRecord) -> Self {
        self.records.insert(key.into(), record);
        self
    }

    /// Attach parameter bindings, builder style
    pub fn with_params(mut self, params: ParamResolver) -> Self {
        self.params = params;
        self
    }

    /// Record under `key`
    /// Gantree: measurement(key) -> Result<&Record> // 키 조회
    pub fn measurement(&self, key: &str) -> RosaResult<&MeasurementRecord> {
        self.records
            .get(key)
            .ok_or_else(|| RosaError::MissingMeasurementKey(key.to_string()))
    }

    /// Measurement keys present
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys().collect();
        write!(
            f,
            "MeasurementResult(repetitions={}, keys=[{}], backend={})",
            self.repetitions,
            keys.join(", "),
            self.metadata.backend
        )
    }
}

/// Circuit execution service
///
/// Only [`Sampler::run`] is required; the batched and swept forms default
/// to running circuits one by one. Implementations backed by a remote
/// service override [`Sampler::run_batch`] / [`Sampler::run_batch_sweep`] to
/// submit a single request. Errors are never retried here.
/// Gantree: SamplerTrait // 샘플러 인터페이스
pub trait Sampler: Send + Sync {
    /// Get sampler name
    fn name(&self) -> &str;

    /// Run one fully resolved circuit
    /// Gantree: run(circuit, reps) -> Result<MeasurementResult>
    fn run(&self, circuit: &Circuit, repetitions: u64) -> RosaResult<MeasurementResult>;

    /// Run one circuit at every point of `sweep`
    fn run_sweep(
        &self,
        circuit: &Circuit,
        sweep: &[ParamResolver],
        repetitions: u64,
    ) -> RosaResult<Vec<MeasurementResult>> {
        sweep
            .iter()
            .map(|params| {
                let resolved = circuit.resolve_parameters(params)?;
                Ok(self.run(&resolved, repetitions)?.with_params(params.clone()))
            })
            .collect()
    }

    /// Run circuits with per-circuit repetitions, results in submission order
    /// Gantree: run_batch(circuits, reps) -> Result<Vec<MeasurementResult>>
    fn run_batch(
        &self,
        circuits: &[Circuit],
        repetitions: &[u64],
    ) -> RosaResult<Vec<MeasurementResult>> {
        if circuits.len() != repetitions.len() {
            return Err(RosaError::BackendError(format!(
                "{} circuits submitted with {} repetition counts",
                circuits.len(),
                repetitions.len()
            )));
        }
        circuits
            .iter()
            .zip(repetitions)
            .map(|(circuit, &reps)| self.run(circuit, reps))
            .collect()
    }

    /// Run each circuit over its own sweep
    fn run_batch_sweep(
        &self,
        circuits: &[Circuit],
        sweeps: &[Sweep],
        repetitions: &[u64],
    ) -> RosaResult<Vec<Vec<MeasurementResult>>> {
        if circuits.len() != sweeps.len() || circuits.len() != repetitions.len() {
            return Err(RosaError::BackendError(format!(
                "{} circuits submitted with {} sweeps and {} repetition counts",
                circuits.len(),
                sweeps.len(),
                repetitions.len()
            )));
        }
        circuits
            .iter()
            .zip(sweeps)
            .zip(repetitions)
            .map(|((circuit, sweep), &reps)| self.run_sweep(circuit, sweep, reps))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rosa_core::CircuitBuilder;
    use std::sync::Mutex;

    fn make_record() -> MeasurementRecord {
        MeasurementRecord::new(
            Qubit::line_range(2),
            vec![vec![0, 0], vec![0, 1], vec![1, 1], vec![0, 1]],
        )
    }

    #[test]
    fn test_column_ones() {
        let record = make_record();
        assert_eq!(record.repetitions(), 4);
        assert_eq!(record.num_qubits(), 2);
        assert_eq!(record.column_ones(), vec![1, 3]);
    }

    #[test]
    fn test_counts_and_probability() {
        let record = make_record();
        let counts = record.counts();
        assert_eq!(counts.get("01"), Some(&2));
        assert_eq!(counts.get("10"), None);
        assert_relative_eq!(record.probability("01"), 0.5);
        assert_relative_eq!(record.probability("10"), 0.0);
    }

    #[test]
    fn test_missing_key() {
        let result = MeasurementResult::new(4, "test").with_record("m", make_record());
        assert!(result.measurement("m").is_ok());
        assert_eq!(
            result.measurement("z").unwrap_err(),
            RosaError::MissingMeasurementKey("z".into())
        );
    }

    #[test]
    fn test_result_serialization() {
        let result = MeasurementResult::new(4, "test").with_record("m", make_record());
        let json = serde_json::to_string(&result).unwrap();
        let restored: MeasurementResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.records, result.records);
        assert_eq!(restored.repetitions, 4);
    }

    /// Echoes repetitions back and remembers every circuit it saw
    struct EchoSampler {
        seen: Mutex<Vec<Circuit>>,
    }

    impl Sampler for EchoSampler {
        fn name(&self) -> &str {
            "echo"
        }

        fn run(&self, circuit: &Circuit, repetitions: u64) -> RosaResult<MeasurementResult> {
            self.seen.lock().unwrap().push(circuit.clone());
            Ok(MeasurementResult::new(repetitions, self.name()))
        }
    }

    #[test]
    fn test_default_run_batch() {
        let sampler = EchoSampler {
            seen: Mutex::new(Vec::new()),
        };
        let circuits = vec![Circuit::new(), Circuit::new()];

        let results = sampler.run_batch(&circuits, &[3, 7]).unwrap();
        assert_eq!(results.iter().map(|r| r.repetitions).collect::<Vec<_>>(), vec![3, 7]);

        assert!(sampler.run_batch(&circuits, &[3]).is_err());
    }

    #[test]
    fn test_default_run_sweep_resolves() {
        let sampler = EchoSampler {
            seen: Mutex::new(Vec::new()),
        };
        let q = Qubit::line(0);
        let circuit = CircuitBuilder::new()
            .x_pow(q.clone(), "t")
            .measure(vec![q], "m")
            .build();
        let sweep = vec![
            ParamResolver::new().with("t", 0.0),
            ParamResolver::new().with("t", 1.0),
        ];

        let results = sampler.run_sweep(&circuit, &sweep, 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].params.get("t"), Some(1.0));

        let seen = sampler.seen.lock().unwrap();
        assert!(seen.iter().all(|c| !c.is_parameterized()));
    }

    #[test]
    fn test_run_batch_sweep_shape() {
        let sampler = EchoSampler {
            seen: Mutex::new(Vec::new()),
        };
        let circuits = vec![Circuit::new(), Circuit::new()];
        let sweeps = vec![
            vec![ParamResolver::new()],
            vec![ParamResolver::new(), ParamResolver::new(), ParamResolver::new()],
        ];

        let results = sampler.run_batch_sweep(&circuits, &sweeps, &[1, 2]).unwrap();
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[1].len(), 3);
        assert!(sampler.run_batch_sweep(&circuits, &sweeps[..1], &[1, 2]).is_err());
    }
}
