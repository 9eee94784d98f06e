use crate::calibration::{CalibrationReport, Calibrator};
use crate::config::ClassifierConfig;
use crate::core::alphabet::Alphabet;
use crate::core::analyzer::Analyzer;
use crate::core::transitions::{TransitionCounts, TransitionModel};
use crate::core::types::Analysis;
use crate::error::Result;
use crate::learning::{LearningEngine, TrainingStats};
use crate::persistence;
use std::io::{Read, Write};

/// A bigram gibberish classifier.
///
/// Train on known-good text, `finalize`, optionally `calibrate` against
/// labeled examples, then `analyze`. Mutating calls need `&mut self`;
/// analysis is read-only and may be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    pub(crate) alphabet: Alphabet,
    pub(crate) counts: TransitionCounts,
    pub(crate) model: Option<TransitionModel>,
    pub(crate) threshold: f64,
}

impl Classifier {
    /// A classifier over the default alphabet.
    pub fn new() -> Self {
        let config = ClassifierConfig::default();
        let alphabet = Alphabet::default();
        Self {
            counts: TransitionCounts::new(alphabet.len(), config.smoothing),
            alphabet,
            model: None,
            threshold: config.threshold,
        }
    }

    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let alphabet = Alphabet::new(config.alphabet)?;
        Ok(Self {
            counts: TransitionCounts::new(alphabet.len(), config.smoothing),
            alphabet,
            model: None,
            threshold: config.threshold,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    pub fn model(&self) -> Option<&TransitionModel> {
        self.model.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_finalized(&self) -> bool {
        self.model.is_some()
    }

    /// Accumulates bigram counts from every line of `reader`. The model is
    /// not touched until `finalize`.
    pub fn train<R: Read>(&mut self, reader: R) -> Result<TrainingStats> {
        let stats = LearningEngine::new(&self.alphabet).learn(&mut self.counts, reader)?;
        log::info!(
            "trained on {} lines ({} bigrams, {} skipped)",
            stats.lines,
            stats.bigrams,
            stats.skipped
        );
        Ok(stats)
    }

    /// Derives the log-probability model from the current counts.
    pub fn finalize(&mut self) {
        self.model = Some(TransitionModel::from_counts(&self.counts));
        log::debug!("finalized {0}x{0} transition model", self.alphabet.len());
    }

    pub fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.alphabet, self.model.as_ref())
    }

    pub fn score(&self, text: &str) -> f64 {
        self.analyzer().score(text)
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        Analysis::new(self.score(text), self.threshold)
    }

    /// Sets the threshold from labeled good and bad lines. On error the
    /// previous threshold stays.
    pub fn calibrate<G: Read, B: Read>(&mut self, good: G, bad: B) -> Result<CalibrationReport> {
        let report = Calibrator::new(self.analyzer()).calibrate(good, bad)?;
        self.threshold = report.threshold;
        log::info!(
            "calibrated threshold to {:.5} from {} bad and {} good examples",
            report.threshold,
            report.bad_lines,
            report.good_lines
        );
        Ok(report)
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        persistence::write_classifier(self, writer)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        persistence::read_classifier(reader)
    }

    /// Replaces `self` with the classifier stored in `reader`. Leaves
    /// `self` untouched if anything goes wrong.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<()> {
        *self = Self::from_reader(reader)?;
        Ok(())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, GibberishError};

    const CORPUS: &str = "the quick brown fox jumps over the lazy dog\n\
                          she sells sea shells by the sea shore\n\
                          a stitch in time saves nine\n";

    fn trained() -> Classifier {
        let mut classifier = Classifier::new();
        classifier.train(CORPUS.as_bytes()).unwrap();
        classifier.finalize();
        classifier
    }

    #[test]
    fn empty_alphabet_fails_construction() {
        let config = ClassifierConfig::default().with_alphabet(Vec::new());
        let err = Classifier::with_config(config).unwrap_err();
        assert!(matches!(err, GibberishError::Config(ConfigError::EmptyAlphabet)));
    }

    #[test]
    fn new_matches_default_config() {
        let from_config = Classifier::with_config(ClassifierConfig::default()).unwrap();
        assert_eq!(Classifier::new(), from_config);
    }

    #[test]
    fn training_does_not_finalize() {
        let mut classifier = Classifier::new();
        classifier.train(CORPUS.as_bytes()).unwrap();
        assert!(!classifier.is_finalized());
        classifier.finalize();
        assert!(classifier.is_finalized());
    }

    #[test]
    fn finalize_twice_is_stable() {
        let mut classifier = trained();
        let first = classifier.model().cloned();
        classifier.finalize();
        assert_eq!(classifier.model().cloned(), first);
    }

    #[test]
    fn training_twice_accumulates() {
        let mut twice = Classifier::new();
        twice.train(CORPUS.as_bytes()).unwrap();
        twice.train(CORPUS.as_bytes()).unwrap();

        let mut doubled = Classifier::new();
        doubled.train(format!("{CORPUS}{CORPUS}").as_bytes()).unwrap();

        assert_eq!(twice.counts(), doubled.counts());
    }

    #[test]
    fn lower_probability_means_gibberish() {
        let classifier = trained();
        let natural = classifier.analyze("the lazy fox");
        let noise = classifier.analyze("qxzqxzqxz");
        assert!(natural.probability > noise.probability);
        assert!(noise.is_gibberish);
        assert_eq!(noise.is_gibberish, noise.probability < noise.threshold);
    }

    #[test]
    fn empty_text_is_never_gibberish() {
        let analysis = trained().analyze("");
        assert_eq!(analysis.probability, 1.0);
        assert!(!analysis.is_gibberish);
    }

    #[test]
    fn failed_calibration_keeps_threshold() {
        let mut classifier = trained();
        let before = classifier.threshold();
        assert!(classifier.calibrate("good text".as_bytes(), "".as_bytes()).is_err());
        assert_eq!(classifier.threshold(), before);
    }

    #[test]
    fn classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
