//! Optional pass-through capture of raw responses to timestamped JSON files.
//!
//! An explicit collaborator the caller opts into (`--save-to` on the CLI);
//! nothing here hooks into or mutates shared state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::Value;

/// Saves raw response documents into a capture directory.
#[derive(Debug, Clone)]
pub struct ResponseCapture {
    dir: PathBuf,
}

impl ResponseCapture {
    /// Open a capture target, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create capture directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `response` to a timestamped JSON file, returning its path.
    pub fn capture(&self, response: &Value) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S_%f");
        let path = self.dir.join(format!("response_{timestamp}.json"));
        let pretty =
            serde_json::to_string_pretty(response).context("Failed to serialize response")?;
        fs::write(&path, pretty)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
