// src/lib.rs

//! Bigram gibberish detection: train on known-good text, calibrate a
//! threshold from labeled examples, and flag text whose character
//! transitions are too unlikely.

pub mod calibration;
pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::calibration::CalibrationReport;
pub use crate::config::{ClassifierConfig, DEFAULT_THRESHOLD};
pub use crate::core::alphabet::{Alphabet, DEFAULT_ALPHABET};
pub use crate::core::engine::Classifier;
pub use crate::core::types::Analysis;
pub use crate::error::{GibberishError, Result};
pub use crate::learning::TrainingStats;
