// File: src/calibration.rs
use crate::core::analyzer::Analyzer;
use crate::error::{CalibrationError, GibberishError};
use crate::learning::for_each_line;
use std::io::Read;

/// Outcome of a successful calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    pub threshold: f64,
    pub max_bad: f64,
    /// `None` when no good line could be scored.
    pub min_good: Option<f64>,
    pub good_lines: usize,
    pub bad_lines: usize,
    /// True when a good example scored below `max_bad` and the threshold
    /// was pulled down to the midpoint.
    pub used_midpoint: bool,
}

/// Derives a decision threshold from labeled example streams.
pub struct Calibrator<'a> {
    analyzer: Analyzer<'a>,
}

impl<'a> Calibrator<'a> {
    pub fn new(analyzer: Analyzer<'a>) -> Self {
        Self { analyzer }
    }

    /// Scores every scorable line of both streams and applies
    /// `threshold_from_scores`. Lines with fewer than two recognized
    /// characters are ignored.
    pub fn calibrate<G: Read, B: Read>(&self, good: G, bad: B) -> Result<CalibrationReport, GibberishError> {
        let good_scores = self.score_lines(good)?;
        let bad_scores = self.score_lines(bad)?;
        log::debug!(
            "calibrating on {} good and {} bad lines",
            good_scores.len(),
            bad_scores.len()
        );
        Ok(Self::threshold_from_scores(&good_scores, &bad_scores)?)
    }

    fn score_lines<R: Read>(&self, reader: R) -> std::io::Result<Vec<f64>> {
        let mut scores = Vec::new();
        for_each_line(reader, |line| {
            if let Some(score) = self.analyzer.score_if_scorable(line) {
                scores.push(score);
            }
        })?;
        Ok(scores)
    }

    /// The threshold is the highest bad score. If some good score falls
    /// below it, the midpoint between that max and the lowest good score
    /// is used instead.
    pub fn threshold_from_scores(good: &[f64], bad: &[f64]) -> Result<CalibrationReport, CalibrationError> {
        let max_bad = bad
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(CalibrationError::NoBadExamples)?;

        if !(max_bad.is_finite() && max_bad > 0.0) {
            return Err(CalibrationError::Degenerate { max_bad });
        }

        let min_good = good.iter().copied().reduce(f64::min);
        let used_midpoint = matches!(min_good, Some(g) if g < max_bad);
        let threshold = match min_good {
            Some(g) if used_midpoint => (max_bad + g) / 2.0,
            _ => max_bad,
        };

        if used_midpoint {
            log::warn!(
                "a good example scored {:.5} below the worst bad example {:.5}; using midpoint {:.5}",
                min_good.unwrap_or(max_bad),
                max_bad,
                threshold
            );
        }

        Ok(CalibrationReport {
            threshold,
            max_bad,
            min_good,
            good_lines: good.len(),
            bad_lines: bad.len(),
            used_midpoint,
        })
    }
}
