//! Corrector configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};
use crate::spelling::candidates::CandidateStrategy;

/// Configuration for a [`SpellingCorrector`](crate::spelling::corrector::SpellingCorrector).
///
/// The defaults consider the whole vocabulary for every unknown word and
/// join corrected tokens with single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// How candidates are drawn from the trie.
    pub candidate_strategy: CandidateStrategy,
    /// Splice corrected tokens back at their original offsets instead of
    /// joining them with single spaces.
    pub preserve_layout: bool,
}

impl CorrectorConfig {
    /// Parse a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SpellError::invalid_config(format!("cannot parse configuration: {e}")))
    }

    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Set the candidate strategy.
    pub fn with_strategy(mut self, strategy: CandidateStrategy) -> Self {
        self.candidate_strategy = strategy;
        self
    }

    /// Enable or disable layout preservation.
    pub fn with_preserve_layout(mut self, preserve_layout: bool) -> Self {
        self.preserve_layout = preserve_layout;
        self
    }
}
