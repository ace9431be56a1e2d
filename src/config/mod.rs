// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for harmony.
//!
//! Settings are read from YAML or, for files ending in `.toml`, from TOML.
//! Every field has a default so an empty file yields twelve-tone equal
//! temperament at A4 = 440 Hz.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::pitch_class::Accidental;
use crate::music::tuning::{Tuning, REFERENCE_FREQUENCY, SEMITONES_IN_OCTAVE};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HarmonyConfig {
    /// Octave division and reference pitch
    #[serde(default)]
    pub tuning: TuningConfig,
    /// Output spelling preferences
    #[serde(default)]
    pub notation: NotationConfig,
}

impl HarmonyConfig {
    /// Load a configuration file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = if is_toml(path) {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        debug!(?path, steps = config.tuning.steps_per_octave, "loaded configuration");
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save configuration, choosing the format by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write config file: {:?}", path))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Octave division and reference pitch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TuningConfig {
    /// Equal steps per 2:1 octave
    #[serde(default = "default_steps_per_octave")]
    pub steps_per_octave: u32,
    /// Frequency of the reference pitch in Hz
    #[serde(default = "default_reference_frequency")]
    pub reference_frequency: f64,
    /// Step index of the reference pitch within its octave
    #[serde(default = "default_reference_step")]
    pub reference_step: u32,
    /// Octave of the reference pitch (MIDI convention)
    #[serde(default = "default_reference_octave")]
    pub reference_octave: i32,
}

fn default_steps_per_octave() -> u32 {
    SEMITONES_IN_OCTAVE
}
fn default_reference_frequency() -> f64 {
    REFERENCE_FREQUENCY
}
fn default_reference_step() -> u32 {
    9
}
fn default_reference_octave() -> i32 {
    4
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            steps_per_octave: default_steps_per_octave(),
            reference_frequency: default_reference_frequency(),
            reference_step: default_reference_step(),
            reference_octave: default_reference_octave(),
        }
    }
}

impl TuningConfig {
    /// Validate and build the tuning
    pub fn to_tuning(&self) -> Result<Tuning> {
        let tuning = Tuning::new(
            self.steps_per_octave,
            self.reference_frequency,
            self.reference_step,
            self.reference_octave,
        )
        .context("Invalid tuning configuration")?;
        debug!(
            steps = tuning.steps_per_octave(),
            reference = tuning.reference_frequency(),
            "installed tuning"
        );
        Ok(tuning)
    }
}

/// Output spelling preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationConfig {
    /// Accidental used when a black key has no key context
    #[serde(default)]
    pub accidental: Accidental,
    /// Partials listed by the overtone command when no count is given
    #[serde(default = "default_overtone_partials")]
    pub overtone_partials: u32,
}

fn default_overtone_partials() -> u32 {
    16
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            accidental: Accidental::default(),
            overtone_partials: default_overtone_partials(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_yaml() {
        let config = HarmonyConfig::from_yaml("{}").unwrap();
        assert_eq!(config, HarmonyConfig::default());
        assert_eq!(config.tuning.to_tuning().unwrap(), Tuning::default());
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
tuning:
  steps_per_octave: 24
  reference_frequency: 442.0
  reference_step: 18
notation:
  accidental: flat
  overtone_partials: 8
"#;
        let config = HarmonyConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tuning.steps_per_octave, 24);
        assert_eq!(config.tuning.reference_octave, 4);
        assert_eq!(config.notation.accidental, Accidental::Flat);
        assert_eq!(config.notation.overtone_partials, 8);

        let tuning = config.tuning.to_tuning().unwrap();
        assert_eq!(tuning.steps_per_octave(), 24);
        assert_eq!(tuning.reference_step(), 18);
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
[tuning]
steps_per_octave = 19
reference_step = 14

[notation]
accidental = "sharp"
"#;
        let config = HarmonyConfig::from_toml(text).unwrap();
        assert_eq!(config.tuning.steps_per_octave, 19);
        assert_eq!(config.tuning.reference_frequency, 440.0);
        assert_eq!(config.notation.overtone_partials, 16);
    }

    #[test]
    fn test_invalid_tuning_is_reported() {
        let config = HarmonyConfig::from_yaml("tuning:\n  reference_step: 12\n").unwrap();
        let err = config.tuning.to_tuning().unwrap_err();
        assert!(err.to_string().contains("Invalid tuning configuration"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(HarmonyConfig::from_yaml("tuning: [1, 2").is_err());
        assert!(HarmonyConfig::from_yaml("notation:\n  accidental: natural\n").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = HarmonyConfig::default();
        config.tuning.reference_frequency = 415.0;
        config.notation.accidental = Accidental::Flat;

        let yaml_path = dir.path().join("harmony.yaml");
        config.save(&yaml_path).unwrap();
        assert_eq!(HarmonyConfig::load(&yaml_path).unwrap(), config);

        let toml_path = dir.path().join("harmony.toml");
        config.save(&toml_path).unwrap();
        let text = fs::read_to_string(&toml_path).unwrap();
        assert!(text.contains("[tuning]"));
        assert_eq!(HarmonyConfig::load(&toml_path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = HarmonyConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
