//! Readout benchmark configuration
//!
//! Gantree: L4_Integration → ReadoutBenchmarkConfig
//!
//! Settings shared by the shuffled and swept pipelines.

use rosa_calibration::QubitSpec;
use rosa_core::{readout, Qubit, RosaError, RosaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Readout benchmark configuration
/// Gantree: ReadoutBenchmarkConfig // 측정 보정 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutBenchmarkConfig {
    /// Random bitstrings (calibration trials) per qubit group
    pub num_random_bitstrings: usize,

    /// Repetitions per calibration circuit
    pub readout_repetitions: u64,

    /// Measurement key of synthesized calibration circuits
    pub measurement_key: String,

    /// Qubits to calibrate
    pub qubits: QubitSpec,
}

impl ReadoutBenchmarkConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Fewer trials and shots, for smoke runs
    pub fn quick() -> Self {
        Self {
            num_random_bitstrings: 20,
            readout_repetitions: 200,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set number of random bitstrings
    pub fn with_num_random_bitstrings(mut self, k: usize) -> Self {
        self.num_random_bitstrings = k;
        self
    }

    /// Set readout repetitions
    pub fn with_readout_repetitions(mut self, reps: u64) -> Self {
        self.readout_repetitions = reps;
        self
    }

    /// Set measurement key
    pub fn with_measurement_key(mut self, key: impl Into<String>) -> Self {
        self.measurement_key = key.into();
        self
    }

    /// Set qubit selection
    pub fn with_qubits(mut self, qubits: QubitSpec) -> Self {
        self.qubits = qubits;
        self
    }

    /// Calibrate a single explicit group
    pub fn with_qubit_group(self, qubits: Vec<Qubit>) -> Self {
        self.with_qubits(QubitSpec::FlatGroup(qubits))
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.readout_repetitions == 0 {
            return Err("readout_repetitions must be > 0".to_string());
        }

        if self.measurement_key.is_empty() {
            return Err("measurement_key must not be empty".to_string());
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Parse from JSON
    pub fn from_json(json: &str) -> RosaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> RosaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> RosaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        config.validate().map_err(RosaError::InvalidConfig)?;

        log::info!("Loaded readout benchmark config from {}", path.display());
        Ok(config)
    }

    /// Write as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> RosaResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for ReadoutBenchmarkConfig {
    fn default() -> Self {
        Self {
            num_random_bitstrings: readout::DEFAULT_NUM_RANDOM_BITSTRINGS,
            readout_repetitions: readout::DEFAULT_READOUT_REPETITIONS,
            measurement_key: readout::MEASUREMENT_KEY.to_string(),
            qubits: QubitSpec::AllTouched,
        }
    }
}

impl fmt::Display for ReadoutBenchmarkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReadoutBenchmarkConfig(bitstrings={}, reps={}, key={}, qubits={})",
            self.num_random_bitstrings, self.readout_repetitions, self.measurement_key, self.qubits
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ReadoutBenchmarkConfig::default();
        assert_eq!(config.num_random_bitstrings, 100);
        assert_eq!(config.readout_repetitions, 1000);
        assert_eq!(config.measurement_key, "m");
        assert_eq!(config.qubits, QubitSpec::AllTouched);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick() {
        let config = ReadoutBenchmarkConfig::quick();
        assert!(config.num_random_bitstrings < ReadoutBenchmarkConfig::default().num_random_bitstrings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ReadoutBenchmarkConfig::default()
            .with_num_random_bitstrings(4)
            .with_readout_repetitions(50)
            .with_measurement_key("cal")
            .with_qubit_group(vec![Qubit::line(0)]);

        assert_eq!(config.num_random_bitstrings, 4);
        assert_eq!(config.readout_repetitions, 50);
        assert_eq!(config.measurement_key, "cal");
        assert_eq!(config.qubits, QubitSpec::FlatGroup(vec![Qubit::line(0)]));
    }

    #[test]
    fn test_validation() {
        assert!(ReadoutBenchmarkConfig::default()
            .with_readout_repetitions(0)
            .validate()
            .is_err());
        assert!(ReadoutBenchmarkConfig::default()
            .with_measurement_key("")
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = ReadoutBenchmarkConfig::quick().with_qubits(QubitSpec::Groups(vec![
            vec![Qubit::line(0)],
            vec![Qubit::grid(1, 1)],
        ]));
        let restored = ReadoutBenchmarkConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ReadoutBenchmarkConfig::from_json(r#"{"readout_repetitions": 10}"#).unwrap();
        assert_eq!(config.readout_repetitions, 10);
        assert_eq!(config.num_random_bitstrings, 100);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("rosa_config_{}.json", std::process::id()));
        let config = ReadoutBenchmarkConfig::quick().with_measurement_key("cal");

        config.save(&path).unwrap();
        let loaded = ReadoutBenchmarkConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let path = std::env::temp_dir().join(format!("rosa_bad_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"readout_repetitions": 0}"#).unwrap();
        let result = ReadoutBenchmarkConfig::load(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(RosaError::InvalidConfig(_))));
    }
}
