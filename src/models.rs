//! Normalized message model shared by the parser and the renderers.
//!
//! Everything downstream of the parser operates on these types only: a
//! message is a role plus an ordered list of tagged content blocks, and a
//! block keeps its raw payload so renderers can probe fields defensively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One content block of a message, tagged by its declared `type`.
///
/// The payload is kept as the raw JSON object. A missing field omits its
/// sub-element at render time; it never fails the render.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    /// Declared block kind (`text`, `tool_use`, ...). `"unknown"` when the
    /// input carried no `type` tag.
    pub kind: String,
    /// Raw key-value payload for this block.
    pub data: Map<String, Value>,
}

impl ContentBlock {
    #[must_use]
    pub fn new(kind: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Fetch a string field from the payload, if present.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Fetch a boolean field from the payload, defaulting to `false`.
    #[must_use]
    pub fn bool_field(&self, key: &str) -> bool {
        self.data
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Token accounting attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl Usage {
    /// Combined token count. Derived, never stored.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A parsed message: role, ordered content blocks, optional metadata.
///
/// Block order is preserved from the input and is the rendering order.
/// `usage: None` suppresses the usage panel entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}
