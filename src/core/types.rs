// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Position of a character inside an `Alphabet`. Rows and columns of the
/// transition tables are addressed by it.
pub type CharIndex = usize;

/// The verdict for a single piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// exp(mean log transition probability); 1.0 when the text has no bigrams.
    pub probability: f64,
    /// The threshold in effect when the text was analyzed.
    pub threshold: f64,
    /// `probability < threshold`.
    pub is_gibberish: bool,
}

impl Analysis {
    pub fn new(probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            threshold,
            is_gibberish: probability < threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_gibberish() {
        assert!(Analysis::new(0.01, 0.05).is_gibberish);
    }

    #[test]
    fn at_or_above_threshold_is_not_gibberish() {
        assert!(!Analysis::new(0.05, 0.05).is_gibberish);
        assert!(!Analysis::new(0.5, 0.05).is_gibberish);
    }
}
