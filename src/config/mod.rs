// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generation settings loaded from YAML.
//!
//! A config file names the key, the infinity series window and the
//! self-replication shape, plus an optional mutation pool:
//!
//! ```yaml
//! key:
//!   tonic: D
//!   scale: dorian
//! infinity_series:
//!   seed: [0, 2]
//!   size: 32
//!   offset: [-7, 7]
//!   boundary: fold
//! self_replication:
//!   length: 21
//!   ratio: 2
//! mutations: [reverse, invert, bit_flip]
//! seed: 7
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generators::{are_coprime, InfinitySeries, Melody, Mutation};
use crate::music::{Key, Tonic};

/// Root generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub key: KeyConfig,
    pub infinity_series: InfinitySeries,
    pub self_replication: ReplicationConfig,
    /// Pool that `mutate` picks from
    pub mutations: Vec<Mutation>,
    /// Random seed for mutations (entropy when absent)
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Load a generation configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&contents)?;
        debug!(
            "Loaded generation config from {:?}: {} {}",
            path.as_ref(),
            config.key.tonic,
            config.key.scale
        );
        Ok(config)
    }

    /// Parse a generation configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Build the configured key
    pub fn key(&self) -> Result<Key> {
        Key::parse(self.key.tonic.clone(), &self.key.scale)
            .with_context(|| format!("Invalid key: {} {}", self.key.tonic, self.key.scale))
    }

    /// Evaluate the configured infinity series window
    pub fn series(&self) -> Result<Vec<i64>> {
        self.infinity_series
            .generate()
            .context("Invalid infinity series settings")
    }

    /// Self-replicate a melody with the configured length and ratio
    pub fn replicate(&self, melody: &Melody) -> Result<Melody> {
        let ReplicationConfig { length, ratio } = self.self_replication;
        melody
            .self_replicate(length, ratio)
            .with_context(|| format!("Failed to self-replicate to length {} (ratio {})", length, ratio))
    }

    /// Apply one mutation drawn from the configured pool
    pub fn mutate(&self, melody: &Melody) -> Result<Melody> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Mutation::random(melody, &self.mutations, &mut rng).context("Failed to mutate melody")
    }

    /// Check every section can be used
    pub fn validate(&self) -> Result<()> {
        self.key()?;
        self.series()?;
        let ReplicationConfig { length, ratio } = self.self_replication;
        if !are_coprime(length as u64, ratio as u64) {
            bail!(
                "Self-replication length {} and ratio {} must be coprime",
                length,
                ratio
            );
        }
        Ok(())
    }
}

/// Load a config file and check that it is usable
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<GenerationConfig> {
    let config = GenerationConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Key section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    /// Tonic name ("C", "F#", "Eb") or MIDI number
    pub tonic: Tonic,
    /// Scale name (e.g., "major", "dorian", "whole tone")
    pub scale: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            tonic: Tonic::default(),
            scale: "major".to_string(),
        }
    }
}

/// Self-replication section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplicationConfig {
    /// Output length; must be coprime with `ratio`
    pub length: usize,
    pub ratio: usize,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            length: 15,
            ratio: crate::generators::melody::DEFAULT_REPLICATION_RATIO,
        }
    }
}
