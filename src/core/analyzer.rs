// File: src/core/analyzer.rs
use crate::core::alphabet::Alphabet;
use crate::core::transitions::TransitionModel;
use crate::core::types::CharIndex;

/// Read-only scorer over an alphabet and an (optional) finalized model.
///
/// Without a model every transition is scored as `ln(1 / n)`, which is what
/// finalizing untouched smoothing counts would yield.
#[derive(Clone, Copy)]
pub struct Analyzer<'a> {
    alphabet: &'a Alphabet,
    model: Option<&'a TransitionModel>,
}

impl<'a> Analyzer<'a> {
    pub fn new(alphabet: &'a Alphabet, model: Option<&'a TransitionModel>) -> Self {
        Self { alphabet, model }
    }

    /// exp(mean log transition probability) of the normalized text.
    /// Text with no bigrams scores 1.0.
    pub fn score(&self, text: &str) -> f64 {
        self.mean_log_prob(&self.alphabet.encode(text))
            .unwrap_or(0.0)
            .exp()
    }

    /// Like `score`, but `None` when the text has no bigrams.
    pub fn score_if_scorable(&self, text: &str) -> Option<f64> {
        self.mean_log_prob(&self.alphabet.encode(text)).map(f64::exp)
    }

    fn mean_log_prob(&self, indices: &[CharIndex]) -> Option<f64> {
        if indices.len() < 2 {
            return None;
        }
        let total: f64 = indices
            .windows(2)
            .map(|pair| self.log_prob(pair[0], pair[1]))
            .sum();
        Some(total / (indices.len() - 1) as f64)
    }

    fn log_prob(&self, prev: CharIndex, next: CharIndex) -> f64 {
        match self.model {
            Some(model) => model.log_prob(prev, next),
            None => -(self.alphabet.len() as f64).ln(),
        }
    }
}
