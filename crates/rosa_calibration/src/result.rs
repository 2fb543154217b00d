//! Readout calibration results
//!
//! Gantree: L3_Calibration → CalibrationResult
//!
//! Per-qubit readout error rates estimated from one group's calibration
//! trials, with the repetitions used and the time the data was taken.

use rosa_core::Qubit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime};

/// Ratio estimate that may lack a denominator
/// Gantree: RateEstimate // 추정값 또는 데이터 부족
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateEstimate {
    /// Ratio computed from at least one shot
    Measured(f64),

    /// No shot prepared the relevant state
    InsufficientData,
}

impl RateEstimate {
    /// `num / den`, or `InsufficientData` when `den == 0`
    pub fn from_counts(num: u64, den: u64) -> Self {
        if den == 0 {
            RateEstimate::InsufficientData
        } else {
            RateEstimate::Measured(num as f64 / den as f64)
        }
    }

    /// Measured value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            RateEstimate::Measured(v) => Some(*v),
            RateEstimate::InsufficientData => None,
        }
    }

    /// Measured value, NaN when undefined
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    /// Check if measured
    pub fn is_measured(&self) -> bool {
        matches!(self, RateEstimate::Measured(_))
    }
}

impl fmt::Display for RateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateEstimate::Measured(v) => write!(f, "{:.4}", v),
            RateEstimate::InsufficientData => write!(f, "n/a"),
        }
    }
}

/// Readout error rates of one qubit
/// Gantree: ReadoutErrorRates // e0, e1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadoutErrorRates {
    /// P(read 1 | prepared 0)
    pub e0: RateEstimate,

    /// P(read 0 | prepared 1)
    pub e1: RateEstimate,
}

impl ReadoutErrorRates {
    /// Both rates undefined
    pub fn insufficient() -> Self {
        Self {
            e0: RateEstimate::InsufficientData,
            e1: RateEstimate::InsufficientData,
        }
    }

    /// Larger of the measured rates
    pub fn worst(&self) -> Option<f64> {
        match (self.e0.value(), self.e1.value()) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Readout calibration of one qubit group
/// Gantree: CalibrationResult // 측정 보정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    /// Error rates per qubit
    /// Gantree: rates: BTreeMap<Qubit, Rates> // 큐비트별 오류율
    #[serde(with = "map_as_pairs")]
    pub rates: BTreeMap<Qubit, ReadoutErrorRates>,

    /// Repetitions per calibration circuit
    pub repetitions: u64,

    /// When the calibration data was returned by the sampler
    /// Gantree: timestamp: SystemTime // 측정 시간
    #[serde(with = "system_time_serde")]
    pub timestamp: SystemTime,
}

impl CalibrationResult {
    /// Create from per-qubit rates
    pub fn new(rates: BTreeMap<Qubit, ReadoutErrorRates>, repetitions: u64, timestamp: SystemTime) -> Self {
        Self {
            rates,
            repetitions,
            timestamp,
        }
    }

    /// Result with every rate undefined
    pub fn insufficient<'a>(
        qubits: impl IntoIterator<Item = &'a Qubit>,
        repetitions: u64,
        timestamp: SystemTime,
    ) -> Self {
        let rates = qubits
            .into_iter()
            .map(|q| (q.clone(), ReadoutErrorRates::insufficient()))
            .collect();
        Self::new(rates, repetitions, timestamp)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits covered
    pub fn num_qubits(&self) -> usize {
        self.rates.len()
    }

    /// P(read 1 | prepared 0) for `qubit`
    /// Gantree: zero_state_error(q) -> Option<RateEstimate> // e0
    pub fn zero_state_error(&self, qubit: &Qubit) -> Option<RateEstimate> {
        self.rates.get(qubit).map(|r| r.e0)
    }

    /// P(read 0 | prepared 1) for `qubit`
    /// Gantree: one_state_error(q) -> Option<RateEstimate> // e1
    pub fn one_state_error(&self, qubit: &Qubit) -> Option<RateEstimate> {
        self.rates.get(qubit).map(|r| r.e1)
    }

    /// Mean e0 over qubits with a measured value
    pub fn avg_e0(&self) -> Option<f64> {
        mean(self.rates.values().filter_map(|r| r.e0.value()))
    }

    /// Mean e1 over qubits with a measured value
    pub fn avg_e1(&self) -> Option<f64> {
        mean(self.rates.values().filter_map(|r| r.e1.value()))
    }

    /// Up to `n` qubits with the largest `max(e0, e1)`, worst first
    /// Gantree: worst_qubits(n) -> Vec<Qubit> // 최악 큐비트
    pub fn worst_qubits(&self, n: usize) -> Vec<Qubit> {
        let mut scored: Vec<(&Qubit, f64)> = self
            .rates
            .iter()
            .filter_map(|(q, r)| r.worst().map(|w| (q, w)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(n).map(|(q, _)| q.clone()).collect()
    }

    /// Age of the calibration data
    pub fn age(&self) -> Option<Duration> {
        self.timestamp.elapsed().ok()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

impl fmt::Display for CalibrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v));
        write!(
            f,
            "CalibrationResult({}Q, reps={}, avg e0={}, avg e1={})",
            self.num_qubits(),
            self.repetitions,
            show(self.avg_e0()),
            show(self.avg_e1())
        )
    }
}

// ============================================================================
// Serde Helpers
// ============================================================================

// JSON object keys must be strings; qubits are written as [key, value] pairs
mod map_as_pairs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

// ============================================================================
// SystemTime Serde Helper
// ============================================================================

mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_secs(secs))
    }
}

// ============================================================================
// Tests
// ============================================================================
