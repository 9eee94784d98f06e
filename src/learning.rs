// File: src/learning.rs
use crate::core::{alphabet::Alphabet, transitions::TransitionCounts};
use std::io::{self, BufRead, BufReader, Read};

/// Summary of one `train` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingStats {
    pub lines: usize,
    pub bigrams: usize,
    /// Lines with fewer than two recognized characters.
    pub skipped: usize,
}

impl TrainingStats {
    fn merge(&mut self, other: TrainingStats) {
        self.lines += other.lines;
        self.bigrams += other.bigrams;
        self.skipped += other.skipped;
    }
}

/// Feeds corpus lines into a `TransitionCounts`.
pub struct LearningEngine<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> LearningEngine<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Counts the bigrams of a single line.
    pub fn learn_line(&self, counts: &mut TransitionCounts, line: &str) -> TrainingStats {
        let indices = self.alphabet.encode(line);
        let bigrams = counts.add_sequence(&indices);
        TrainingStats {
            lines: 1,
            bigrams,
            skipped: usize::from(bigrams == 0),
        }
    }

    /// Reads `reader` to the end, one line at a time. Invalid UTF-8 is
    /// replaced rather than rejected; only read failures are errors.
    pub fn learn<R: Read>(&self, counts: &mut TransitionCounts, reader: R) -> io::Result<TrainingStats> {
        let mut stats = TrainingStats::default();
        for_each_line(reader, |line| stats.merge(self.learn_line(counts, line)))?;
        Ok(stats)
    }
}

/// Calls `f` with every line of `reader`, lossily decoded, without the
/// trailing newline.
pub(crate) fn for_each_line<R: Read, F: FnMut(&str)>(reader: R, mut f: F) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(&['\n', '\r'][..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transitions::DEFAULT_SMOOTHING;

    #[test]
    fn learn_counts_lines_and_skips_short_ones() {
        let alphabet = Alphabet::default();
        let mut counts = TransitionCounts::new(alphabet.len(), DEFAULT_SMOOTHING);
        let engine = LearningEngine::new(&alphabet);

        let stats = engine.learn(&mut counts, "ab\n\nc\n!!\nabc".as_bytes()).unwrap();

        assert_eq!(stats, TrainingStats { lines: 5, bigrams: 3, skipped: 3 });
        let a = alphabet.index_of('a').unwrap();
        let b = alphabet.index_of('b').unwrap();
        assert_eq!(counts.get(a, b), DEFAULT_SMOOTHING + 2.0);
    }

    #[test]
    fn invalid_utf8_is_not_an_error() {
        let alphabet = Alphabet::default();
        let mut counts = TransitionCounts::new(alphabet.len(), DEFAULT_SMOOTHING);
        let engine = LearningEngine::new(&alphabet);

        let stats = engine.learn(&mut counts, &b"ab\xffcd\n"[..]).unwrap();
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.bigrams, 3);
    }

    #[test]
    fn line_order_does_not_matter() {
        let alphabet = Alphabet::default();
        let engine = LearningEngine::new(&alphabet);
        let mut forward = TransitionCounts::new(alphabet.len(), DEFAULT_SMOOTHING);
        let mut backward = TransitionCounts::new(alphabet.len(), DEFAULT_SMOOTHING);

        engine.learn(&mut forward, "one line\nanother line\nthird".as_bytes()).unwrap();
        engine.learn(&mut backward, "third\nanother line\none line".as_bytes()).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn crlf_endings_are_stripped() {
        let mut lines = Vec::new();
        for_each_line("a\r\nb\n".as_bytes(), |l| lines.push(l.to_string())).unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "boom"))
        }
    }

    #[test]
    fn read_errors_propagate() {
        let alphabet = Alphabet::default();
        let mut counts = TransitionCounts::new(alphabet.len(), DEFAULT_SMOOTHING);
        let err = LearningEngine::new(&alphabet)
            .learn(&mut counts, FailingReader)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
