// File: src/error.rs
use std::io;

/// Everything a classifier operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum GibberishError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not restore classifier: {0}")]
    Serialization(#[from] SerializationError),
    #[error("calibration failed: {0}")]
    Calibration(#[from] CalibrationError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A persisted classifier blob could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("invalid magic number in model header")]
    InvalidMagic,
    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("model too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("decompression failed: {0}")]
    Decompress(io::Error),
    #[error("bincode: {0}")]
    Codec(#[from] bincode::Error),
    #[error("inconsistent model: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("no bad example produced a score")]
    NoBadExamples,
    #[error("bad examples are degenerate (max score {max_bad})")]
    Degenerate { max_bad: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,
    #[error("smoothing prior must be positive and finite, got {0}")]
    InvalidSmoothing(f64),
    #[error("threshold must be finite, got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, GibberishError>;
