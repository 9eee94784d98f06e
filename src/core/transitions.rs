// File: src/core/transitions.rs
use crate::core::types::CharIndex;
use serde::{Deserialize, Serialize};

/// Pseudo-count every character pair starts with. Acts as a prior so that
/// no transition ever has zero probability.
pub const DEFAULT_SMOOTHING: f64 = 10.0;

/// Dense `size x size` table of bigram counts, row = previous character,
/// column = next character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionCounts {
    size: usize,
    cells: Vec<f64>,
}

impl TransitionCounts {
    /// Every cell starts at `prior`.
    pub fn new(size: usize, prior: f64) -> Self {
        Self {
            size,
            cells: vec![prior; size * size],
        }
    }

    /// Rebuilds a table from raw cells, checking shape and positivity.
    pub fn from_cells(size: usize, cells: Vec<f64>) -> Result<Self, String> {
        if cells.len() != size * size {
            return Err(format!(
                "expected {} transition cells for {} characters, got {}",
                size * size,
                size,
                cells.len()
            ));
        }
        if let Some(bad) = cells.iter().find(|c| !(c.is_finite() && **c > 0.0)) {
            return Err(format!("transition count {bad} is not positive"));
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn get(&self, prev: CharIndex, next: CharIndex) -> f64 {
        self.cells[prev * self.size + next]
    }

    pub fn increment(&mut self, prev: CharIndex, next: CharIndex) {
        self.cells[prev * self.size + next] += 1.0;
    }

    /// Counts every overlapping pair in `indices`. Returns how many were added.
    pub fn add_sequence(&mut self, indices: &[CharIndex]) -> usize {
        for pair in indices.windows(2) {
            self.increment(pair[0], pair[1]);
        }
        indices.len().saturating_sub(1)
    }

    fn row(&self, prev: CharIndex) -> &[f64] {
        &self.cells[prev * self.size..(prev + 1) * self.size]
    }
}

/// Natural-log transition probabilities derived from a `TransitionCounts`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionModel {
    size: usize,
    log_probs: Vec<f64>,
}

impl TransitionModel {
    /// logP(next | prev) = ln(count(prev, next) / sum of the prev row).
    /// Always computed from counts, never from an earlier model.
    pub fn from_counts(counts: &TransitionCounts) -> Self {
        let size = counts.size();
        let mut log_probs = Vec::with_capacity(size * size);
        for prev in 0..size {
            let row = counts.row(prev);
            let total: f64 = row.iter().sum();
            log_probs.extend(row.iter().map(|&c| (c / total).ln()));
        }
        Self { size, log_probs }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn log_prob(&self, prev: CharIndex, next: CharIndex) -> f64 {
        self.log_probs[prev * self.size + next]
    }
}
