// File: src/persistence.rs
use crate::core::alphabet::Alphabet;
use crate::core::engine::Classifier;
use crate::core::transitions::{TransitionCounts, TransitionModel};
use crate::error::{GibberishError, Result, SerializationError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Leading bytes of every persisted classifier.
const MAGIC: [u8; 4] = *b"GBRS";

/// Bumped whenever `PersistedClassifier` changes shape.
pub const FORMAT_VERSION: u32 = 1;

/// Magic plus little-endian version.
const HEADER_SIZE: usize = 8;

/// The on-disk state: raw counts rather than the derived log table, which
/// is rebuilt on load.
#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedClassifier {
    alphabet: Vec<char>,
    counts: Vec<f64>,
    finalized: bool,
    threshold: f64,
}

/// Writes `classifier` as header + gzip(bincode(state)).
pub fn write_classifier<W: Write>(classifier: &Classifier, mut writer: W) -> Result<()> {
    let state = PersistedClassifier {
        alphabet: classifier.alphabet.chars().to_vec(),
        counts: classifier.counts.cells().to_vec(),
        finalized: classifier.model.is_some(),
        threshold: classifier.threshold,
    };

    let payload = bincode::serialize(&state).map_err(SerializationError::Codec)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&payload)?;
    let compressed = encoder.finish()?;

    writer.write_all(&MAGIC)?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
    writer.write_all(&compressed)?;
    writer.flush()?;
    Ok(())
}

/// Reads the whole source, then decodes it into a fresh classifier.
pub fn read_classifier<R: Read>(mut reader: R) -> Result<Classifier> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data)?)
}

fn decode(data: &[u8]) -> std::result::Result<Classifier, SerializationError> {
    if data.len() < HEADER_SIZE {
        return Err(SerializationError::Truncated {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }
    if data[..4] != MAGIC {
        return Err(SerializationError::InvalidMagic);
    }
    let version = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    if version != FORMAT_VERSION {
        return Err(SerializationError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }

    let mut payload = Vec::new();
    GzDecoder::new(&data[HEADER_SIZE..])
        .read_to_end(&mut payload)
        .map_err(SerializationError::Decompress)?;
    let state: PersistedClassifier = bincode::deserialize(&payload)?;

    let alphabet = Alphabet::new(state.alphabet.iter().copied())
        .map_err(|e| SerializationError::Invalid(e.to_string()))?;
    if alphabet.chars() != state.alphabet.as_slice() {
        return Err(SerializationError::Invalid(
            "alphabet is not in canonical order".to_string(),
        ));
    }
    let counts = TransitionCounts::from_cells(alphabet.len(), state.counts)
        .map_err(SerializationError::Invalid)?;
    if !state.threshold.is_finite() {
        return Err(SerializationError::Invalid(format!(
            "threshold {} is not finite",
            state.threshold
        )));
    }

    let model = state.finalized.then(|| TransitionModel::from_counts(&counts));
    Ok(Classifier {
        alphabet,
        counts,
        model,
        threshold: state.threshold,
    })
}

/// Saves atomically: the blob goes to a temp file next to `path`, which is
/// then renamed over it.
pub fn save_to_disk(classifier: &Classifier, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    write_classifier(classifier, BufWriter::new(&temp_file))?;
    temp_file
        .persist(path)
        .map_err(|e| GibberishError::Io(e.error))?;

    log::info!("saved classifier to {}", path.display());
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<Classifier> {
    let file = File::open(path)?;
    let classifier = read_classifier(BufReader::new(file))?;
    log::info!("loaded classifier from {}", path.display());
    Ok(classifier)
}
