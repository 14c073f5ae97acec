// SPDX-License-Identifier: MPL-2.0
//! A single entry of a similarity-search result list.

use super::location::{ImageLocation, ImageType};
use serde::{Deserialize, Serialize};

/// One image returned by the search backend, with its similarity and metrics.
///
/// Results are created once when the payload is parsed and never mutated.
/// For the rest of the session a result is identified by its `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Absolute filesystem path on the host. Unique key.
    pub path: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub subfolder: String,
    #[serde(rename = "type", default)]
    pub image_type: Option<ImageType>,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
    /// Mean luminance in `0.0..=1.0`.
    #[serde(default)]
    pub brightness: Option<f64>,
    #[serde(default)]
    pub is_dark: Option<bool>,
    #[serde(default)]
    pub has_workflow: bool,
    #[serde(default)]
    pub has_prompt: bool,
    /// Pixel mode reported by the backend (e.g. `RGB`, `RGBA`).
    #[serde(default)]
    pub mode: Option<String>,
    /// Modification time in epoch seconds.
    #[serde(default)]
    pub modified_time: Option<f64>,
    /// Set by the backend when gathering metrics for this image failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResult {
    /// Creates a result with only its path set; everything else is unknown.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: String::new(),
            subfolder: String::new(),
            image_type: None,
            similarity: None,
            width: None,
            height: None,
            file_size: None,
            format: None,
            brightness: None,
            is_dark: None,
            has_workflow: false,
            has_prompt: false,
            mode: None,
            modified_time: None,
            error: None,
        }
    }

    /// Where the host serves this image from.
    ///
    /// Uses the backend-supplied `filename`/`subfolder`/`type` when present.
    /// Whatever is missing is recovered from the raw `path`; a backend
    /// `filename` without a `type` still takes type and subfolder from it.
    pub fn location(&self) -> ImageLocation {
        let resolved = ImageLocation::from_path(&self.path);
        if self.filename.is_empty() {
            return resolved;
        }
        match self.image_type {
            Some(image_type) => ImageLocation {
                filename: self.filename.clone(),
                subfolder: self.subfolder.clone(),
                image_type,
            },
            None => ImageLocation {
                filename: self.filename.clone(),
                subfolder: if self.subfolder.is_empty() {
                    resolved.subfolder
                } else {
                    self.subfolder.clone()
                },
                image_type: resolved.image_type,
            },
        }
    }

    /// Name shown on cards and in the modal header.
    pub fn display_name(&self) -> String {
        self.location().filename
    }

    /// Pixel area, `0` when either dimension is unknown.
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}
