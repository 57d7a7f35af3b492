//! # File I/O Module
//!
//! Reads and writes envelope records and design configurations.
//!
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **Envelope format**: every number is stored as a decimal string so the
//!   file round-trips exactly and can be consumed by plotting scripts
//!
//! ## Envelope File Format
//!
//! ```json
//! {
//!   "x": ["0", "0.0012012012012012011", "..."],
//!   "shear_force_envelope": ["0", "254.1", "..."],
//!   "bending_moment_envelope": ["0", "0.305", "..."],
//!   "shear": "257.5",
//!   "moment": "69.4"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use girder_core::calculations::envelope::generate_envelope;
//! use girder_core::file_io::{load_envelope, save_envelope};
//! use girder_core::loads::presets;
//! use std::path::Path;
//!
//! let envelope = generate_envelope(
//!     &presets::train_load_case_2(),
//!     &presets::standard_sweep(),
//!     &presets::standard_grid(),
//! )?;
//! save_envelope(&envelope, Path::new("load_case_2.json"))?;
//! let reloaded = load_envelope(Path::new("load_case_2.json"))?;
//! assert_eq!(reloaded, envelope);
//! # Ok::<(), girder_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::envelope::EnvelopeRecord;
use crate::errors::{CalcError, CalcResult};

/// On-disk form of an [`EnvelopeRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEnvelope {
    /// Grid positions (m)
    pub x: Vec<String>,
    /// Signed max-magnitude shear at each position (N)
    pub shear_force_envelope: Vec<String>,
    /// Maximum moment at each position (N·m)
    pub bending_moment_envelope: Vec<String>,
    /// Design shear (N)
    pub shear: String,
    /// Design moment (N·m)
    pub moment: String,
}

fn to_decimal_strings(values: &[f64]) -> Vec<String> {
    values.iter().map(f64::to_string).collect()
}

fn parse_decimal(field: &str, text: &str) -> CalcResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| CalcError::serialization(format!("'{}' in {} is not a decimal: {}", text, field, e)))
}

fn parse_decimals(field: &str, texts: &[String]) -> CalcResult<Vec<f64>> {
    texts.iter().map(|t| parse_decimal(field, t)).collect()
}

impl From<&EnvelopeRecord> for PersistedEnvelope {
    fn from(record: &EnvelopeRecord) -> Self {
        PersistedEnvelope {
            x: to_decimal_strings(&record.x),
            shear_force_envelope: to_decimal_strings(&record.shear_envelope),
            bending_moment_envelope: to_decimal_strings(&record.moment_envelope),
            shear: record.max_shear.to_string(),
            moment: record.max_moment.to_string(),
        }
    }
}

impl PersistedEnvelope {
    /// Parse back into an [`EnvelopeRecord`].
    ///
    /// # Errors
    ///
    /// * [`CalcError::MismatchedLengths`] if the envelopes do not line up with `x`
    /// * [`CalcError::SerializationError`] for unparsable decimals
    pub fn into_record(self) -> CalcResult<EnvelopeRecord> {
        if self.shear_force_envelope.len() != self.x.len() {
            return Err(CalcError::mismatched_lengths(
                "shear_force_envelope",
                self.x.len(),
                self.shear_force_envelope.len(),
            ));
        }
        if self.bending_moment_envelope.len() != self.x.len() {
            return Err(CalcError::mismatched_lengths(
                "bending_moment_envelope",
                self.x.len(),
                self.bending_moment_envelope.len(),
            ));
        }

        Ok(EnvelopeRecord {
            x: parse_decimals("x", &self.x)?,
            shear_envelope: parse_decimals("shear_force_envelope", &self.shear_force_envelope)?,
            moment_envelope: parse_decimals("bending_moment_envelope", &self.bending_moment_envelope)?,
            max_shear: parse_decimal("shear", &self.shear)?,
            max_moment: parse_decimal("moment", &self.moment)?,
        })
    }
}

/// Serialize an envelope to its persisted JSON form
pub fn to_json_string(record: &EnvelopeRecord) -> CalcResult<String> {
    serde_json::to_string_pretty(&PersistedEnvelope::from(record)).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Parse an envelope from its persisted JSON form
pub fn from_json_str(json: &str) -> CalcResult<EnvelopeRecord> {
    let persisted: PersistedEnvelope = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    persisted.into_record()
}

/// Write `contents` to `path` with atomic write semantics.
///
/// The save process:
/// 1. Write to a temporary file next to the target (.tmp)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub(crate) fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Read a whole file into a string
pub(crate) fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    Ok(contents)
}

/// Save an envelope to a file with atomic write semantics.
///
/// # Example
///
/// ```rust,no_run
/// use girder_core::calculations::envelope::EnvelopeRecord;
/// use girder_core::file_io::save_envelope;
/// use std::path::Path;
///
/// let record = EnvelopeRecord::empty(&[0.0, 0.6, 1.2]);
/// save_envelope(&record, Path::new("envelope.json"))?;
/// # Ok::<(), girder_core::errors::CalcError>(())
/// ```
pub fn save_envelope(record: &EnvelopeRecord, path: &Path) -> CalcResult<()> {
    let json = to_json_string(record)?;
    write_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), points = record.len(), "saved envelope");
    Ok(())
}

/// Load an envelope from a file.
///
/// # Returns
///
/// * `Ok(EnvelopeRecord)` - Successfully loaded envelope
/// * `Err(CalcError::MismatchedLengths)` - Envelope arrays do not match `x`
/// * `Err(CalcError::SerializationError)` - Invalid JSON or decimal string
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_envelope(path: &Path) -> CalcResult<EnvelopeRecord> {
    let contents = read_to_string(path)?;
    let persisted: PersistedEnvelope =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    persisted.into_record()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnvelopeRecord {
        EnvelopeRecord {
            x: vec![0.0, 0.6, 1.2],
            shear_envelope: vec![223.3, -12.5, -223.3],
            moment_envelope: vec![0.0, 66.1, 0.0],
            max_shear: 257.5,
            max_moment: 69.4,
        }
    }

    #[test]
    fn test_persisted_keys() {
        let json = to_json_string(&sample()).unwrap();
        for key in ["\"x\"", "\"shear_force_envelope\"", "\"bending_moment_envelope\"", "\"shear\"", "\"moment\""] {
            assert!(json.contains(key), "missing {}", key);
        }
        assert!(json.contains("\"257.5\""));
    }

    #[test]
    fn test_decimal_strings_roundtrip_exactly() {
        let mut record = sample();
        record.x[1] = 1.2 / 999.0;
        let back = from_json_str(&to_json_string(&record).unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut persisted = PersistedEnvelope::from(&sample());
        persisted.bending_moment_envelope.pop();
        assert_eq!(
            persisted.into_record().unwrap_err(),
            CalcError::mismatched_lengths("bending_moment_envelope", 3, 2)
        );
    }

    #[test]
    fn test_bad_decimal_rejected() {
        let mut persisted = PersistedEnvelope::from(&sample());
        persisted.shear = "lots".to_string();
        assert_eq!(persisted.into_record().unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelope.json");
        save_envelope(&sample(), &path).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("envelope.json.tmp").exists());
        assert_eq!(load_envelope(&path).unwrap(), sample());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_envelope(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
