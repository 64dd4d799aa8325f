//! Normalization boundary between raw JSON documents and the tagged-block
//! model.
//!
//! The renderers never see raw input; they only operate on [`Message`] and
//! [`ContentBlock`] values produced here. Missing fields become defaults,
//! unrecognized shapes become `"unknown"` blocks, and the only fatal errors
//! are the ones a CLI has to surface anyway: unreadable files, malformed
//! JSON, and a top-level document that is not an object.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{ContentBlock, Message, Usage};

// === Errors ===

/// Errors raised while loading or normalizing input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No input provided")]
    EmptyInput,
    #[error("Unsupported response shape: expected a JSON object")]
    UnsupportedShape,
}

// === Normalization ===

/// Normalize one content block value.
///
/// Objects keep their payload with the declared `type` tag (`"unknown"` when
/// absent). Bare strings become text blocks. Anything else is wrapped as an
/// `"unknown"` block carrying its string form, so rendering stays total.
#[must_use]
pub fn parse_content_block(block: &Value) -> ContentBlock {
    match block {
        Value::Object(map) => {
            let kind = map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            ContentBlock::new(kind, map.clone())
        }
        Value::String(text) => {
            let mut data = Map::new();
            data.insert("text".to_string(), Value::String(text.clone()));
            ContentBlock::new("text", data)
        }
        other => {
            let mut data = Map::new();
            data.insert("raw".to_string(), Value::String(other.to_string()));
            ContentBlock::new("unknown", data)
        }
    }
}

/// Normalize a full response document into a [`Message`].
///
/// Every field defaults when absent: role `"unknown"`, empty content, no
/// model/stop-reason, no usage. An empty `usage` object counts as absent so
/// the usage panel is suppressed rather than rendered with zeros.
pub fn parse_response(response: &Value) -> Result<Message, ParseError> {
    let map = response.as_object().ok_or(ParseError::UnsupportedShape)?;

    let role = map
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let content = map
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| blocks.iter().map(parse_content_block).collect())
        .unwrap_or_default();

    let model = map
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_string);
    let stop_reason = map
        .get("stop_reason")
        .and_then(Value::as_str)
        .map(str::to_string);

    let usage = match map.get("usage") {
        Some(Value::Object(fields)) if !fields.is_empty() => Some(
            serde_json::from_value::<Usage>(Value::Object(fields.clone())).unwrap_or_default(),
        ),
        _ => None,
    };

    Ok(Message {
        role,
        content,
        model,
        stop_reason,
        usage,
    })
}

// === Loaders ===

/// Parse a message from a JSON string.
pub fn load_from_str(input: &str) -> Result<Message, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let value: Value = serde_json::from_str(input)?;
    parse_response(&value)
}

/// Load and parse a message from a JSON file.
pub fn load_from_path(path: &Path) -> Result<Message, ParseError> {
    let raw = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&raw)
}
