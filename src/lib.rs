//! Terminal visualization for conversational-AI message JSON.
//!
//! Turns a structured message object (role, model metadata, typed content
//! blocks, token usage) into a styled terminal tree. The pipeline:
//!
//! 1. [`parser`] normalizes raw JSON into the tagged-block [`Message`] model.
//! 2. [`render`] dispatches each block through an open registry of per-kind
//!    renderers, with a generic fallback for unrecognized kinds.
//! 3. [`visualize`] assembles the full tree and the usage panel.
//!
//! Rendering is total: missing fields, unexpected shapes, and unknown block
//! kinds all degrade to a coarser representation instead of failing.
//!
//! ```no_run
//! use msgviz::{load_from_str, render_message, theme};
//!
//! let message = load_from_str(r#"{"role":"assistant","content":[]}"#)?;
//! let scheme = theme::current_scheme();
//! println!("{}", render_message(&message, &scheme));
//! # Ok::<(), msgviz::ParseError>(())
//! ```

pub mod capture;
pub mod logging;
pub mod models;
pub mod parser;
pub mod render;
pub mod theme;
pub mod tree;
pub mod truncate;
pub mod visualize;

pub use models::{ContentBlock, Message, Usage};
pub use parser::{ParseError, load_from_path, load_from_str, parse_response};
pub use theme::{ColorScheme, Theme};
pub use visualize::{render_message, render_with_registry, visualize_message};
