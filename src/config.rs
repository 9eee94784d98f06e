// File: src/config.rs
use crate::core::alphabet::DEFAULT_ALPHABET;
use crate::core::transitions::DEFAULT_SMOOTHING;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Threshold used until a classifier is calibrated. Sits just above the
/// uniform score of the default alphabet (1/27), so an untrained model
/// flags everything with bigrams and a trained one flags text whose
/// transitions look no better than chance.
pub const DEFAULT_THRESHOLD: f64 = 0.045;

/// Construction parameters for a `Classifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub alphabet: Vec<char>,
    /// Pseudo-count given to every character pair before training.
    pub smoothing: f64,
    pub threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            smoothing: DEFAULT_SMOOTHING,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    pub fn with_alphabet<I: IntoIterator<Item = char>>(mut self, chars: I) -> Self {
        self.alphabet = chars.into_iter().collect();
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Checks the numeric fields. The alphabet is checked when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }
        if !self.threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
