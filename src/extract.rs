//! Best-effort extraction of JSON embedded in model output
//!
//! Model replies often wrap the requested JSON in prose or markdown fences.
//! Extraction takes everything from the first opening delimiter to the last
//! closing delimiter and decodes that slice. The scan is not nesting-aware:
//! stray brackets in the surrounding prose widen or invert the slice, and the
//! decode then fails.
//!
//! The strict functions report why extraction failed. The `*_or_default`
//! functions log the failure and fall back to an empty container.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a JSON value could not be extracted
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no '{delimiter}' found in model output")]
    MissingDelimiter { delimiter: char },

    #[error("closing delimiter at byte {end} precedes opening delimiter at byte {start}")]
    Inverted { start: usize, end: usize },

    #[error("embedded JSON could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The container shape being looked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    #[must_use]
    pub fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }
}

/// Slice from the first opening to the last closing delimiter, inclusive
pub fn candidate_slice(text: &str, shape: JsonShape) -> Result<&str, ExtractionError> {
    let (open, close) = shape.delimiters();
    let start = text
        .find(open)
        .ok_or(ExtractionError::MissingDelimiter { delimiter: open })?;
    let end = text
        .rfind(close)
        .ok_or(ExtractionError::MissingDelimiter { delimiter: close })?;
    if end < start {
        return Err(ExtractionError::Inverted { start, end });
    }
    // Both delimiters are single byte, so `end + 1` is a char boundary.
    Ok(&text[start..=end])
}

fn extract<T: DeserializeOwned>(text: &str, shape: JsonShape) -> Result<T, ExtractionError> {
    let slice = candidate_slice(text, shape)?;
    debug!(len = slice.len(), ?shape, "decoding embedded JSON");
    Ok(serde_json::from_str(slice)?)
}

/// Extract the outermost `[...]` span and decode it as an array
pub fn extract_array(text: &str) -> Result<Vec<Value>, ExtractionError> {
    extract(text, JsonShape::Array)
}

/// Extract the outermost `{...}` span and decode it as an object
pub fn extract_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    extract(text, JsonShape::Object)
}

/// Like [`extract_array`], but an empty array on failure
#[must_use]
pub fn array_or_default(text: &str) -> Vec<Value> {
    extract_array(text).unwrap_or_else(|err| {
        warn!(error = %err, "Error decoding JSON array, using empty result");
        Vec::new()
    })
}

/// Like [`extract_object`], but an empty object on failure
#[must_use]
pub fn object_or_default(text: &str) -> Map<String, Value> {
    extract_object(text).unwrap_or_else(|err| {
        warn!(error = %err, "Error decoding JSON object, using empty result");
        Map::new()
    })
}
