use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for code chunking behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Maximum chunk size in bytes produced by the tree walk (hard limit,
    /// except for single nodes that are larger on their own)
    pub max_chars: usize,

    /// Minimum non-whitespace size a coalesced chunk must reach before it is
    /// emitted, unless it is the last one
    pub min_chars: usize,

    /// Chunks with this many non-whitespace characters or fewer get coalesced
    /// with their neighbours. Also scales the line-based micro-merge passes.
    pub coalesce: usize,

    /// Flush rule used while coalescing
    pub coalesce_policy: CoalescePolicy,

    /// Line windows used when structural chunking is unavailable
    pub fallback: NaiveConfig,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chars: 1200,
            min_chars: 200,
            coalesce: 150,
            coalesce_policy: CoalescePolicy::MinimumSize,
            fallback: NaiveConfig::default(),
        }
    }
}

impl ChunkerConfig {
    /// Create config optimized for embeddings (smaller, focused chunks)
    pub fn for_embeddings() -> Self {
        Self {
            max_chars: 800,
            min_chars: 120,
            coalesce: 100,
            ..Default::default()
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    pub fn for_llm_context() -> Self {
        Self {
            max_chars: 3000,
            min_chars: 500,
            coalesce: 300,
            fallback: NaiveConfig {
                window: 80,
                overlap: 10,
            },
            ..Default::default()
        }
    }

    /// Parse a TOML document; missing keys take their default values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(ChunkerError::invalid_config("max_chars must be > 0"));
        }

        self.fallback.validate()
    }
}

/// When an accumulated chunk is flushed during coalescing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoalescePolicy {
    /// Flush once the chunk is over the coalesce threshold, spans a line
    /// break, and also reaches `min_chars` (or the input is exhausted)
    #[default]
    MinimumSize,

    /// Flush once the chunk is over the coalesce threshold and spans a line
    /// break
    SizeAndNewline,
}

/// Sliding line window used by the naive chunker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveConfig {
    /// Lines per window
    pub window: usize,

    /// Lines shared by consecutive windows
    pub overlap: usize,
}

impl Default for NaiveConfig {
    fn default() -> Self {
        Self {
            window: 40,
            overlap: 5,
        }
    }
}

impl NaiveConfig {
    /// Lines between the starts of consecutive windows
    pub fn step(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.window - self.overlap)
    }

    /// Reject windows that would not advance
    pub fn validate(&self) -> Result<()> {
        if self.overlap >= self.window {
            return Err(ChunkerError::InvalidOverlap {
                window: self.window,
                overlap: self.overlap,
            });
        }
        Ok(())
    }
}
