// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the theory engine.
//!
//! Settings are read from YAML (`.yaml`/`.yml`) or TOML (`.toml`). Every
//! field has a default, so an empty file is a valid configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::containers::Note;
use crate::music::keys::{self, Key};
use crate::music::meter::Meter;
use crate::music::notes::AccidentalStyle;

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Frequency of A-4 in Hz
    #[serde(default = "default_standard_pitch")]
    pub standard_pitch: f64,
    /// Key used when none is given (e.g. "C", "Eb", "f#")
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Octave used when a note has none
    #[serde(default = "default_octave")]
    pub default_octave: i32,
    /// Preferred accidental when spelling pitch classes
    #[serde(default)]
    pub accidentals: AccidentalStyle,
    /// Count perfect fourths as consonant
    #[serde(default = "default_include_fourths")]
    pub include_fourths: bool,
    /// Default time signature
    #[serde(default)]
    pub meter: Meter,
}

fn default_standard_pitch() -> f64 {
    440.0
}
fn default_key() -> String {
    "C".to_string()
}
fn default_octave() -> i32 {
    4
}
fn default_include_fourths() -> bool {
    true
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            standard_pitch: default_standard_pitch(),
            default_key: default_key(),
            default_octave: default_octave(),
            accidentals: AccidentalStyle::default(),
            include_fourths: default_include_fourths(),
            meter: Meter::default(),
        }
    }
}

impl TheoryConfig {
    /// Load a configuration file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
            other => bail!("Unsupported config format: {:?}", other),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if !(self.standard_pitch.is_finite() && self.standard_pitch > 0.0) {
            bail!("standard_pitch must be positive, got {}", self.standard_pitch);
        }
        keys::validate_key(&self.default_key)
            .with_context(|| format!("Invalid default_key: {}", self.default_key))?;
        if !self.meter.is_valid() {
            bail!("Invalid meter: {}", self.meter);
        }
        Ok(())
    }

    /// Nearest note to a frequency, tuned to `standard_pitch` and spelled
    /// with the configured accidentals
    pub fn note_at(&self, hertz: f64) -> Result<Note> {
        Note::from_hertz_with(hertz, self.standard_pitch, self.accidentals)
            .with_context(|| format!("No note for {} Hz", hertz))
    }

    /// Parse a meter, or use the configured one when none is given
    pub fn meter_or_default(&self, text: Option<&str>) -> Result<Meter> {
        match text {
            Some(text) => text
                .parse()
                .with_context(|| format!("Invalid meter: {}", text)),
            None => Ok(self.meter),
        }
    }

    /// The default key as a `Key` value
    pub fn key(&self) -> Result<Key> {
        Key::new(&self.default_key).with_context(|| format!("Invalid default_key: {}", self.default_key))
    }
}
