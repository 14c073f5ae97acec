// SPDX-License-Identifier: MPL-2.0
//! Inbound gallery payload produced by the search backend.
//!
//! The backend hands the view a JSON document, optionally prefixed with
//! [`IMAGE_SEARCH_MARKER`] so the host can recognize it among other node
//! outputs. Decoding failures are reported as [`Error::Payload`]; the view
//! renders them inline instead of a gallery.

pub mod location;
pub mod result;

pub use location::{ImageLocation, ImageType};
pub use result::SearchResult;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix the backend puts in front of gallery payloads.
pub const IMAGE_SEARCH_MARKER: &str = "$WAS_IMAGE_SEARCH$";

/// Discriminator of the payload document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Search options echoed back before a search has produced results.
    ImageSearch,
    /// A finished search.
    ImageSearchGallery,
}

/// Decoded gallery payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPayload {
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub query_images: Vec<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub total_indexed: Option<u64>,
}

impl GalleryPayload {
    /// Decodes a payload, stripping the marker prefix when present.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim_start();
        let body = trimmed.strip_prefix(IMAGE_SEARCH_MARKER).unwrap_or(trimmed);
        if body.trim().is_empty() {
            return Err(Error::Payload("empty payload".to_string()));
        }
        let payload: GalleryPayload = serde_json::from_str(body)?;
        Ok(payload)
    }

    /// Session the selection is reported against.
    ///
    /// `options.session_id` wins; the top-level field written by newer
    /// backends is the fallback.
    pub fn session_id(&self) -> String {
        self.options
            .get("session_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| self.session_id.clone())
            .unwrap_or_default()
    }

    /// Locations of the query images shown in the header strip.
    pub fn query_locations(&self) -> Vec<ImageLocation> {
        self.query_images
            .iter()
            .map(|path| ImageLocation::from_path(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marker_prefixed_payload() {
        let raw = format!(
            "{}{}",
            IMAGE_SEARCH_MARKER,
            r#"{"type":"image_search_gallery","results":[{"path":"a"}],"options":{"session_id":"s1"},"query_images":["/c/input/q.png"]}"#
        );
        let payload = GalleryPayload::parse(&raw).expect("valid payload");
        assert_eq!(payload.kind, PayloadKind::ImageSearchGallery);
        assert_eq!(payload.results.len(), 1);
        assert_eq!(payload.session_id(), "s1");
        assert_eq!(payload.query_locations()[0].filename, "q.png");
    }

    #[test]
    fn parses_plain_payload_without_marker() {
        let payload = GalleryPayload::parse(r#"{"type":"image_search","results":[]}"#)
            .expect("valid payload");
        assert_eq!(payload.kind, PayloadKind::ImageSearch);
        assert!(payload.results.is_empty());
        assert_eq!(payload.session_id(), "");
    }

    #[test]
    fn top_level_session_id_is_fallback() {
        let payload = GalleryPayload::parse(
            r#"{"type":"image_search_gallery","session_id":"top","results":[]}"#,
        )
        .expect("valid payload");
        assert_eq!(payload.session_id(), "top");
    }

    #[test]
    fn malformed_json_is_payload_error() {
        let err = GalleryPayload::parse("$WAS_IMAGE_SEARCH${\"type\":").expect_err("must fail");
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = GalleryPayload::parse(r#"{"type":"text","results":[]}"#).expect_err("must fail");
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(GalleryPayload::parse(IMAGE_SEARCH_MARKER).is_err());
    }
}
