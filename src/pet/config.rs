use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::state::{GAUGE_MAX, GAUGE_MIN};

const CONFIG_PATH: &str = "config/pet.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPetConfig {
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    decay: RawDecay,
    #[serde(default)]
    recalc: RawRecalc,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDefaults {
    start: i64,
}

impl Default for RawDefaults {
    fn default() -> Self {
        Self { start: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDecay {
    per_minute: i64,
}

impl Default for RawDecay {
    fn default() -> Self {
        Self { per_minute: 1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRecalc {
    interval_seconds: f32,
}

impl Default for RawRecalc {
    fn default() -> Self {
        Self {
            interval_seconds: 60.0,
        }
    }
}

/// Runtime configuration derived from `config/pet.toml`.
#[derive(Resource, Debug, Clone)]
pub struct PetConfig {
    pub start: i64,
    pub decay_per_minute: i64,
    pub recalc_interval_seconds: f32,
}

impl PetConfig {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawPetConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawPetConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPetConfig::default().into()
            }
        }
    }
}

impl Default for PetConfig {
    fn default() -> Self {
        RawPetConfig::default().into()
    }
}

impl From<RawPetConfig> for PetConfig {
    fn from(value: RawPetConfig) -> Self {
        Self {
            start: value.defaults.start.clamp(GAUGE_MIN, GAUGE_MAX),
            decay_per_minute: value.decay.per_minute.max(0),
            recalc_interval_seconds: value.recalc.interval_seconds.max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_falls_back_to_defaults() {
        let config = PetConfig::from(RawPetConfig::default());
        assert_eq!(config.start, 100);
        assert_eq!(config.decay_per_minute, 1);
        assert_eq!(config.recalc_interval_seconds, 60.0);
    }

    #[test]
    fn config_clamps_out_of_range_values() {
        let raw = RawPetConfig {
            defaults: RawDefaults { start: 250 },
            decay: RawDecay { per_minute: -3 },
            recalc: RawRecalc {
                interval_seconds: 0.0,
            },
        };

        let config = PetConfig::from(raw);
        assert_eq!(config.start, 100);
        assert_eq!(config.decay_per_minute, 0);
        assert_eq!(config.recalc_interval_seconds, 1.0);
    }

    #[test]
    fn config_parses_partial_toml() {
        let raw: RawPetConfig =
            toml::from_str("[decay]\nper_minute = 2\n").expect("partial toml should parse");
        let config = PetConfig::from(raw);
        assert_eq!(config.decay_per_minute, 2);
        assert_eq!(config.start, 100);
    }
}
