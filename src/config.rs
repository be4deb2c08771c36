// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build and scoring configuration.
//!
//! Both structs load from JSON; absent fields take their defaults so a config
//! file only has to name what it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Index construction settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Gram length for the wildcard dictionary.
    pub kgram_size: usize,
    /// Tokens per temporary SPIMI block before it is flushed to disk.
    pub temp_block_size: usize,
    /// Terms per final block file.
    pub terms_per_block: usize,
    /// Brotli-compress block payloads.
    pub compress_blocks: bool,
    /// Worker threads for the build (0 = rayon's default).
    pub threads: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            kgram_size: 3,
            temp_block_size: 5000,
            terms_per_block: 64,
            compress_blocks: false,
            threads: 0,
        }
    }
}

impl IndexConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kgram_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "kgram_size must be at least 2, got {}",
                self.kgram_size
            )));
        }
        if self.temp_block_size == 0 {
            return Err(Error::InvalidConfig("temp_block_size must be positive".into()));
        }
        if self.terms_per_block == 0 {
            return Err(Error::InvalidConfig("terms_per_block must be positive".into()));
        }
        Ok(())
    }
}

/// Weights of the two zones in zone scoring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneWeights {
    pub title: f64,
    pub body: f64,
}

impl Default for ZoneWeights {
    fn default() -> Self {
        Self {
            title: 0.4,
            body: 0.6,
        }
    }
}

impl ZoneWeights {
    pub fn validate(&self) -> Result<()> {
        if self.title < 0.0 || self.body < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "zone weights must be non-negative (title {}, body {})",
                self.title, self.body
            )));
        }
        // Small tolerance: 0.4 + 0.6 is not exactly 1.0 in binary
        if self.title + self.body > 1.0 + 1e-9 {
            return Err(Error::InvalidConfig(format!(
                "zone weights sum to {} (must be <= 1.0)",
                self.title + self.body
            )));
        }
        Ok(())
    }
}

/// Which frequency feeds the overlap score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapFormula {
    /// term total frequency in the collection × per-document idf
    #[default]
    CollectionFrequency,
    /// per-document term frequency × per-document idf
    TermFrequency,
}

/// Query-time scoring settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub zone_weights: ZoneWeights,
    pub overlap_formula: OverlapFormula,
}

impl ScoringConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.zone_weights.validate()?;
        Ok(config)
    }
}

/// Combined config file layout: `{ "index": {...}, "scoring": {...} }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.index.validate()?;
        config.scoring.zone_weights.validate()?;
        Ok(config)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
