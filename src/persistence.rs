//! JSON persistence of baseline models.
//!
//! Models are written inside a versioned envelope:
//!
//! ```json
//! { "format_version": 1, "model": { "feature_names": [...], "hierarchies": [...] } }
//! ```
//!
//! Every `f64` round-trips bit-exactly, so a reloaded model detects exactly
//! like the one that was saved.

use crate::errors::{AnomalyDetectionError, AnomalyResult};
use crate::model::MultiFeatureBaselineModel;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Envelope version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

const FORMAT: &str = "json";

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    model: &'a MultiFeatureBaselineModel,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    model: MultiFeatureBaselineModel,
}

fn serialization_error(reason: impl ToString) -> AnomalyDetectionError {
    AnomalyDetectionError::SerializationError {
        format: FORMAT.to_string(),
        reason: reason.to_string(),
    }
}

fn unwrap_envelope(envelope: Envelope) -> AnomalyResult<MultiFeatureBaselineModel> {
    if envelope.format_version != FORMAT_VERSION {
        return Err(serialization_error(format!(
            "unsupported format version {} (expected {})",
            envelope.format_version, FORMAT_VERSION
        )));
    }
    envelope
        .model
        .validate()
        .map_err(|e| serialization_error(format!("invalid model: {}", e)))?;
    Ok(envelope.model)
}

/// Writes `model` to `writer`.
pub fn save_model<W: Write>(model: &MultiFeatureBaselineModel, writer: W) -> AnomalyResult<()> {
    let envelope = EnvelopeRef {
        format_version: FORMAT_VERSION,
        model,
    };
    serde_json::to_writer(writer, &envelope).map_err(serialization_error)
}

/// Reads a model from `reader`, validating envelope and invariants.
pub fn load_model<R: Read>(reader: R) -> AnomalyResult<MultiFeatureBaselineModel> {
    let envelope: Envelope = serde_json::from_reader(reader).map_err(serialization_error)?;
    unwrap_envelope(envelope)
}

/// Serializes `model` into a byte buffer.
pub fn model_to_bytes(model: &MultiFeatureBaselineModel) -> AnomalyResult<Vec<u8>> {
    let mut buffer = Vec::new();
    save_model(model, &mut buffer)?;
    Ok(buffer)
}

/// Restores a model from bytes produced by [`model_to_bytes`].
pub fn model_from_bytes(bytes: &[u8]) -> AnomalyResult<MultiFeatureBaselineModel> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(serialization_error)?;
    unwrap_envelope(envelope)
}

/// Writes `model` to the file at `path`, replacing it if present.
pub fn save_model_to_path<P: AsRef<Path>>(
    model: &MultiFeatureBaselineModel,
    path: P,
) -> AnomalyResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| AnomalyDetectionError::io(format!("create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    save_model(model, &mut writer)?;
    writer
        .flush()
        .map_err(|e| AnomalyDetectionError::io(format!("flush {}", path.display()), e))
}

/// Reads a model from the file at `path`.
pub fn load_model_from_path<P: AsRef<Path>>(path: P) -> AnomalyResult<MultiFeatureBaselineModel> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| AnomalyDetectionError::io(format!("open {}", path.display()), e))?;
    load_model(BufReader::new(file))
}
