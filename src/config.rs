use crate::error::{ConfigSource, Result, SimError};
use crate::pos::Pos;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happens to the population once the survivor has been picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepopulationPolicy {
    /// The mutated survivor becomes the whole next generation.
    #[default]
    SingleSurvivor,
    /// Refill to `num_agents` independently mutated copies of the survivor.
    Refill,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub num_agents: usize,
    /// Seconds per generation.
    pub generation_duration: f32,
    pub start: Pos,
    pub init_weight_range: f32,
    pub mutation_step: f32,
    pub time_penalty: f32,
    pub boundary_penalty: f32,
    pub target_radius_min: f32,
    pub target_radius_max: f32,
    pub sprite_path: PathBuf,
    pub sprite_scale: f32,
    pub seed: Option<u64>,
    pub repopulation: RepopulationPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Simple Racing Game".to_string(),
            num_agents: 3000,
            generation_duration: 5.0,
            start: Pos::new(400.0, 500.0),
            init_weight_range: 1.0,
            mutation_step: 0.1,
            time_penalty: 0.01,
            boundary_penalty: 2.0,
            target_radius_min: 10.0,
            target_radius_max: 50.0,
            sprite_path: PathBuf::from("assets/car.png"),
            sprite_scale: 0.1,
            seed: None,
            repopulation: RepopulationPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Reads a JSON config. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SimError::Config { path: path.to_path_buf(), source: ConfigSource::Io(e) });
            }
        };
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| SimError::Config { path: path.to_path_buf(), source: ConfigSource::Json(e) })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig("canvas must be non-empty"));
        }
        if self.num_agents == 0 {
            return Err(SimError::InvalidConfig("num_agents must be at least 1"));
        }
        if self.generation_duration.is_nan() || self.generation_duration <= 0.0 {
            return Err(SimError::InvalidConfig("generation_duration must be positive"));
        }
        if self.target_radius_min < 0.0 || self.target_radius_max < self.target_radius_min {
            return Err(SimError::InvalidConfig("target radius range is empty"));
        }
        let smallest = self.width.min(self.height) as f32;
        if 2.0 * self.target_radius_max > smallest {
            return Err(SimError::InvalidConfig("target does not fit in the canvas"));
        }
        if self.sprite_scale.is_nan() || self.sprite_scale <= 0.0 {
            return Err(SimError::InvalidConfig("sprite_scale must be positive"));
        }
        let non_negative = [
            (self.init_weight_range, "init_weight_range must be a non-negative number"),
            (self.mutation_step, "mutation_step must be a non-negative number"),
            (self.time_penalty, "time_penalty must be a non-negative number"),
            (self.boundary_penalty, "boundary_penalty must be a non-negative number"),
        ];
        for (value, reason) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(SimError::InvalidConfig(reason));
            }
        }
        Ok(())
    }

    pub fn canvas(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_canvas() {
        let c = SimConfig::default();
        assert_eq!((c.width, c.height), (800, 600));
        assert_eq!(c.start, Pos::new(400.0, 500.0));
        assert_eq!(c.num_agents, 3000);
        assert_eq!(c.repopulation, RepopulationPolicy::SingleSurvivor);
        c.validate().unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = SimConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(c, SimConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_agents": 12, "seed": 9, "repopulation": "refill"}}"#).unwrap();
        let c = SimConfig::load(file.path()).unwrap();
        assert_eq!(c.num_agents, 12);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.repopulation, RepopulationPolicy::Refill);
        assert_eq!(c.width, 800);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(SimConfig::load(file.path()), Err(SimError::Config { .. })));
    }

    #[test]
    fn negative_weight_range_is_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mutation_step": -0.1, "init_weight_range": -1.0}}"#).unwrap();
        assert!(matches!(SimConfig::load(file.path()), Err(SimError::InvalidConfig(_))));
    }

    fn rejects(config: SimConfig, field: &str) {
        match config.validate() {
            Err(SimError::InvalidConfig(reason)) => assert!(reason.starts_with(field), "{reason}"),
            other => panic!("{field}: expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_or_nan_rates() {
        let base = SimConfig::default();
        for bad in [-1.0, f32::NAN] {
            rejects(SimConfig { init_weight_range: bad, ..base.clone() }, "init_weight_range");
            rejects(SimConfig { mutation_step: bad, ..base.clone() }, "mutation_step");
            rejects(SimConfig { time_penalty: bad, ..base.clone() }, "time_penalty");
            rejects(SimConfig { boundary_penalty: bad, ..base.clone() }, "boundary_penalty");
        }
    }

    #[test]
    fn zero_rates_are_allowed() {
        let c = SimConfig { mutation_step: 0.0, time_penalty: 0.0, boundary_penalty: 0.0, ..SimConfig::default() };
        c.validate().unwrap();
    }

    #[test]
    fn validate_rejects_oversized_target() {
        let c = SimConfig { width: 60, height: 60, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::InvalidConfig(_))));
    }
}
