//! Simulation parameters. Every field has a default matching the reference
//! link, so a config file only needs to name what it changes.
use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result, linspace, manchester::CodeWordPolicy, ook::DEFAULT_THRESHOLD,
    path_loss::{WeatherCondition, distance_range},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLossConfig {
    pub distance_start_m: f64,
    pub distance_stop_m: f64,
    pub distance_step_m: f64,
    pub wavelength_m: f64,
    pub tx_power_mw: f64,
    pub conditions: Vec<WeatherCondition>,
}

impl Default for PathLossConfig {
    fn default() -> Self {
        Self {
            distance_start_m: 100.0,
            distance_stop_m: 2000.0,
            distance_step_m: 100.0,
            wavelength_m: 1550e-9,
            tx_power_mw: 10.0,
            conditions: WeatherCondition::presets(),
        }
    }
}

impl PathLossConfig {
    pub fn distances(&self) -> Result<Vec<f64>> {
        distance_range(
            self.distance_start_m,
            self.distance_stop_m,
            self.distance_step_m,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManchesterConfig {
    pub num_bits: usize,
    pub threshold: f64,
    pub policy: CodeWordPolicy,
}

impl Default for ManchesterConfig {
    fn default() -> Self {
        Self {
            num_bits: 100,
            threshold: DEFAULT_THRESHOLD,
            policy: CodeWordPolicy::Substitute,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwgnConfig {
    pub num_bits: usize,
    pub snr_start_db: f64,
    pub snr_stop_db: f64,
    pub snr_points: usize,
    pub threshold: f64,
}

impl Default for AwgnConfig {
    fn default() -> Self {
        Self {
            num_bits: 10_000,
            snr_start_db: 0.0,
            snr_stop_db: 20.0,
            snr_points: 21,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AwgnConfig {
    pub fn snrs_db(&self) -> Vec<f64> {
        linspace(self.snr_start_db, self.snr_stop_db, self.snr_points).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub path_loss: PathLossConfig,
    pub manchester: ManchesterConfig,
    pub awgn: AwgnConfig,
    /// Seed for the bit source and the noise generator. `None` draws one
    /// at startup, see [`SimulationConfig::resolve_seed`].
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading simulation config {}", path_ref.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("parsing simulation config {}", path_ref.display()))?;
        Ok(config)
    }

    /// The configured seed, or a fresh one drawn from `entropy` and stored
    /// back so the run can be repeated with it.
    pub fn resolve_seed<R: Rng + ?Sized>(&mut self, entropy: &mut R) -> u64 {
        *self.seed.get_or_insert_with(|| entropy.random::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reference_defaults() {
        let cfg = SimulationConfig::default();
        let d = cfg.path_loss.distances().unwrap();
        assert_eq!(d.len(), 20);
        assert_eq!(cfg.path_loss.conditions[0], WeatherCondition::clear_air());
        assert_eq!(cfg.awgn.snrs_db().len(), 21);
        assert_eq!(cfg.awgn.snrs_db()[20], 20.0);
        assert_eq!(cfg.manchester.policy, CodeWordPolicy::Substitute);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SimulationConfig::from_json(
            r#"{"seed": 42, "manchester": {"policy": "strict"}, "awgn": {"num_bits": 500}}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.manchester.policy, CodeWordPolicy::Strict);
        assert_eq!(cfg.manchester.num_bits, 100);
        assert_eq!(cfg.awgn.num_bits, 500);
        assert_eq!(cfg.awgn.threshold, 0.5);
        assert_eq!(cfg.path_loss, PathLossConfig::default());
    }

    #[test]
    fn configured_seed_wins() {
        let mut cfg = SimulationConfig {
            seed: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_seed(&mut StdRng::seed_from_u64(1)), u64::MAX);
        assert_eq!(cfg.seed, Some(u64::MAX));
    }

    #[test]
    fn drawn_seed_is_kept() {
        let mut cfg = SimulationConfig::default();
        let seed = cfg.resolve_seed(&mut StdRng::seed_from_u64(1));
        assert_eq!(cfg.seed, Some(seed));
        // Resolving again does not draw a new one.
        assert_eq!(cfg.resolve_seed(&mut StdRng::seed_from_u64(2)), seed);
        assert_eq!(
            SimulationConfig::default().resolve_seed(&mut StdRng::seed_from_u64(1)),
            seed
        );
    }

    #[test]
    fn load_reads_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"{"path_loss": {"conditions": [{"name": "Snow", "attenuation_db_per_km": 30.0}]}}"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = SimulationConfig::load(&path).unwrap();
        assert_eq!(cfg.path_loss.conditions.len(), 1);
        assert_eq!(cfg.path_loss.conditions[0].name, "Snow");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimulationConfig::load("/nonexistent/owcsim.json").unwrap_err();
        assert!(err.to_string().contains("reading simulation config"));
    }
}
