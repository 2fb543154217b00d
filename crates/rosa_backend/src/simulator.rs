//! Simulator sampler for ROSA
//!
//! Gantree: L2_Backend → SimulatorSampler
//!
//! State-vector simulator for the closed gate set with classical readout
//! flips. Measurements are terminal: the state is sampled once per shot
//! after all unitary gates, and each measurement gate records its qubits
//! from that sample.

use crate::execution::{ExecutionMetadata, MeasurementRecord, MeasurementResult, Sampler};
use num_complex::Complex64;
use rand::prelude::*;
use rand::rngs::StdRng;
use rosa_core::{simulation, Circuit, Gate, ParamResolver, Qubit, RosaError, RosaResult};
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use std::sync::Mutex;

/// Readout flip probabilities for one qubit
/// Gantree: ReadoutError // 측정 오류율
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadoutError {
    /// P(read 1 | state 0)
    pub p0_to_1: f64,
    /// P(read 0 | state 1)
    pub p1_to_0: f64,
}

impl ReadoutError {
    /// Create, clamping both probabilities into [0, 1]
    pub fn new(p0_to_1: f64, p1_to_0: f64) -> Self {
        Self {
            p0_to_1: p0_to_1.clamp(0.0, 1.0),
            p1_to_0: p1_to_0.clamp(0.0, 1.0),
        }
    }

    /// Same flip probability in both directions
    pub fn symmetric(p: f64) -> Self {
        Self::new(p, p)
    }

    fn flip_probability(&self, bit: bool) -> f64 {
        if bit {
            self.p1_to_0
        } else {
            self.p0_to_1
        }
    }
}

/// Readout noise: a default plus per-qubit overrides
#[derive(Debug, Clone, Default)]
pub struct ReadoutNoise {
    default: ReadoutError,
    per_qubit: HashMap<Qubit, ReadoutError>,
}

impl ReadoutNoise {
    /// Noise-free readout
    pub fn ideal() -> Self {
        Self::default()
    }

    /// Same error for every qubit
    pub fn uniform(error: ReadoutError) -> Self {
        Self {
            default: error,
            per_qubit: HashMap::new(),
        }
    }

    /// Override one qubit
    pub fn with_qubit(mut self, qubit: Qubit, error: ReadoutError) -> Self {
        self.per_qubit.insert(qubit, error);
        self
    }

    /// Error applied to `qubit`
    pub fn for_qubit(&self, qubit: &Qubit) -> ReadoutError {
        self.per_qubit.get(qubit).copied().unwrap_or(self.default)
    }

    /// Whether any flip probability is non-zero
    pub fn is_ideal(&self) -> bool {
        let zero = ReadoutError::default();
        self.default == zero && self.per_qubit.values().all(|e| *e == zero)
    }
}

/// Simulator sampler with readout noise
/// Gantree: SimulatorSampler // 시뮬레이터 구현
pub struct SimulatorSampler {
    /// Sampler name
    name: String,

    /// Readout noise
    readout: ReadoutNoise,

    /// Qubit limit per circuit
    max_qubits: usize,

    /// Random seed
    seed: Option<u64>,

    /// Shot sampler state
    rng: Mutex<StdRng>,
}

impl SimulatorSampler {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new simulator sampler
    pub fn new(readout: ReadoutNoise) -> Self {
        Self {
            name: "rosa_simulator".to_string(),
            readout,
            max_qubits: simulation::DEFAULT_MAX_QUBITS,
            seed: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create ideal (noiseless) simulator
    pub fn ideal() -> Self {
        Self::new(ReadoutNoise::ideal())
    }

    /// Create with the same asymmetric readout error on every qubit
    pub fn with_readout_error(p0_to_1: f64, p1_to_0: f64) -> Self {
        Self::new(ReadoutNoise::uniform(ReadoutError::new(p0_to_1, p1_to_0)))
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Override the readout error of one qubit
    pub fn with_qubit_readout_error(mut self, qubit: Qubit, p0_to_1: f64, p1_to_0: f64) -> Self {
        self.readout = self
            .readout
            .with_qubit(qubit, ReadoutError::new(p0_to_1, p1_to_0));
        self
    }

    /// Set the qubit limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set sampler name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Readout noise in use
    pub fn readout(&self) -> &ReadoutNoise {
        &self.readout
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final state vector; qubit `i` of `index` is bit `i` of the basis index
    fn evolve(&self, circuit: &Circuit, index: &BTreeMap<Qubit, usize>) -> RosaResult<Vec<Complex64>> {
        let n = index.len();
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in circuit.gates() {
            self.apply_gate(&mut state, gate, index)?;
        }
        Ok(state)
    }

    fn apply_gate(
        &self,
        state: &mut [Complex64],
        gate: &Gate,
        index: &BTreeMap<Qubit, usize>,
    ) -> RosaResult<()> {
        let at = |q: &Qubit| index[q];
        let angle = |gate: &Gate| -> RosaResult<f64> {
            // resolve() leaves unbound symbols as errors
            match gate.param() {
                Some(p) => p.resolve(&ParamResolver::new()),
                None => Ok(0.0),
            }
        };

        match gate {
            Gate::I(_) | Gate::Measure { .. } => {}
            Gate::X(q) => apply_single(state, at(q), |a, b| (b, a)),
            Gate::Y(q) => apply_single(state, at(q), |a, b| {
                (b * Complex64::new(0.0, -1.0), a * Complex64::new(0.0, 1.0))
            }),
            Gate::Z(q) => apply_single(state, at(q), |a, b| (a, -b)),
            Gate::H(q) => {
                let s = std::f64::consts::FRAC_1_SQRT_2;
                apply_single(state, at(q), |a, b| ((a + b) * s, (a - b) * s));
            }
            // X^t equals Rx(pi * t) up to global phase
            Gate::XPow(q, _) => apply_rx(state, at(q), PI * angle(gate)?),
            Gate::Rx(q, _) => apply_rx(state, at(q), angle(gate)?),
            Gate::Ry(q, _) => {
                let theta = angle(gate)?;
                let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                apply_single(state, at(q), |a, b| (a * c - b * s, a * s + b * c));
            }
            Gate::Rz(q, _) => {
                let theta = angle(gate)?;
                let neg = Complex64::from_polar(1.0, -theta / 2.0);
                let pos = Complex64::from_polar(1.0, theta / 2.0);
                apply_single(state, at(q), |a, b| (a * neg, b * pos));
            }
            Gate::Cnot(c, t) => {
                let (cm, tm) = (1usize << at(c), 1usize << at(t));
                for i in 0..state.len() {
                    if i & cm != 0 && i & tm == 0 {
                        state.swap(i, i | tm);
                    }
                }
            }
            Gate::Cz(a, b) => {
                let (am, bm) = (1usize << at(a), 1usize << at(b));
                for (i, amp) in state.iter_mut().enumerate() {
                    if i & am != 0 && i & bm != 0 {
                        *amp = -*amp;
                    }
                }
            }
        }
        Ok(())
    }

    /// Sample one basis index from the state's probability distribution
    fn sample_outcome(probs: &[f64], rng: &mut StdRng) -> usize {
        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        for (i, &p) in probs.iter().enumerate() {
            cumsum += p;
            if r < cumsum {
                return i;
            }
        }
        probs.len() - 1
    }
}

fn apply_single<F>(state: &mut [Complex64], q: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1usize << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

fn apply_rx(state: &mut [Complex64], q: usize, theta: f64) {
    let c = (theta / 2.0).cos();
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    apply_single(state, q, |a, b| (a * c + b * s, a * s + b * c));
}

impl Sampler for SimulatorSampler {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, circuit: &Circuit, repetitions: u64) -> RosaResult<MeasurementResult> {
        if let Some(symbol) = circuit.parameter_names().into_iter().next() {
            return Err(RosaError::UnresolvedSymbol(symbol));
        }

        let qubits = circuit.all_qubits();
        if qubits.len() > self.max_qubits {
            return Err(RosaError::TooManyQubits {
                qubits: qubits.len(),
                max: self.max_qubits,
            });
        }
        let index: BTreeMap<Qubit, usize> = qubits
            .iter()
            .enumerate()
            .map(|(i, q)| (q.clone(), i))
            .collect();

        let state = self.evolve(circuit, &index)?;
        let probs: Vec<f64> = state.iter().map(|a| a.norm_sqr()).collect();
        let norm: f64 = probs.iter().sum();
        if (norm - 1.0).abs() > simulation::NORM_TOLERANCE {
            log::warn!("{}: state norm drifted to {:.12}", self.name, norm);
        }

        let measurements: Vec<(&str, &[Qubit])> = circuit
            .gates()
            .iter()
            .filter_map(|g| match g {
                Gate::Measure { qubits, key } => Some((key.as_str(), qubits.as_slice())),
                _ => None,
            })
            .collect();

        let mut rows: Vec<Vec<Vec<u8>>> = vec![Vec::with_capacity(repetitions as usize); measurements.len()];
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RosaError::BackendError("simulator rng lock poisoned".into()))?;

        for _ in 0..repetitions {
            let outcome = Self::sample_outcome(&probs, &mut rng);
            for (slot, (_, measured)) in rows.iter_mut().zip(&measurements) {
                let row = measured
                    .iter()
                    .map(|q| {
                        let bit = outcome & (1 << index[q]) != 0;
                        let flipped = rng.gen::<f64>() < self.readout.for_qubit(q).flip_probability(bit);
                        u8::from(bit != flipped)
                    })
                    .collect();
                slot.push(row);
            }
        }

        log::debug!(
            "{}: {} shots over {} qubits, {} measurement(s)",
            self.name,
            repetitions,
            qubits.len(),
            measurements.len()
        );

        let records = measurements
            .iter()
            .zip(rows)
            .map(|((key, measured), bits)| {
                (key.to_string(), MeasurementRecord::new(measured.to_vec(), bits))
            })
            .collect();

        Ok(MeasurementResult {
            records,
            repetitions,
            params: ParamResolver::new(),
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                simulated: true,
                seed: self.seed,
                ..Default::default()
            },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
