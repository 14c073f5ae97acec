// SPDX-License-Identifier: MPL-2.0
//! Reporting the selection back to the host.
//!
//! The view side builds an [`OutputMessage`] from the gallery and posts it
//! after every change that can affect the selection. The host side stores
//! `OUTPUT_MARKER + json(data)` in the node's selection-state field, and later
//! turns that field back into files on disk with [`decode_output`] and
//! [`DecodedOutput::resolve_selected`].

use super::{FrameTransport, OutboundMessage};
use crate::error::{Error, Result};
use crate::gallery::GalleryState;
use crate::search::{ImageLocation, ImageType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix marking a selection-state field value.
pub const OUTPUT_MARKER: &str = "$WAS_IMAGE_SEARCH_OUTPUT$";

const OUTPUT_ACTION: &str = "output";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    pub selected: Vec<ImageLocation>,
    pub session_id: String,
}

impl OutputData {
    /// The selection in input order, or the whole filtered and sorted view
    /// when nothing is selected.
    pub fn from_gallery(gallery: &GalleryState, session_id: &str) -> Self {
        let items = if gallery.selected_paths().is_empty() {
            gallery.visible()
        } else {
            gallery.selected_results()
        };
        Self {
            selected: items.iter().map(|result| result.location()).collect(),
            session_id: session_id.to_string(),
        }
    }

    /// Field value stored by the host.
    pub fn encode(&self) -> Result<String> {
        Ok(format!("{OUTPUT_MARKER}{}", serde_json::to_string(self)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMessage {
    pub action: String,
    pub data: OutputData,
    pub node_id: Option<String>,
}

impl OutputMessage {
    pub fn new(data: OutputData, node_id: Option<String>) -> Self {
        Self {
            action: OUTPUT_ACTION.to_string(),
            data,
            node_id,
        }
    }
}

/// Posts selection updates for one host node.
#[derive(Clone)]
pub struct OutputEmitter {
    transport: Arc<dyn FrameTransport>,
    node_id: Option<String>,
}

impl std::fmt::Debug for OutputEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputEmitter")
            .field("node_id", &self.node_id)
            .finish_non_exhaustive()
    }
}

impl OutputEmitter {
    pub fn new(transport: Arc<dyn FrameTransport>, node_id: Option<String>) -> Self {
        Self { transport, node_id }
    }

    pub fn emit(&self, data: OutputData) -> Result<()> {
        tracing::debug!(
            selected = data.selected.len(),
            session_id = %data.session_id,
            "posting selection"
        );
        self.transport
            .post(OutboundMessage::Output(OutputMessage::new(
                data,
                self.node_id.clone(),
            )))
    }
}

// =============================================================================
// Host side
// =============================================================================

/// Where the host keeps a node's selection-state field.
pub trait SelectionBinding {
    /// Replaces the field value of `node_id`.
    ///
    /// Returns [`Error::MissingBinding`] when the node has no such field.
    fn write_selection(&mut self, node_id: Option<&str>, value: String) -> Result<()>;
}

/// Selection fields of the host's nodes, keyed by node id.
///
/// Only registered nodes carry a field.
#[derive(Debug, Clone, Default)]
pub struct NodeFields {
    fields: HashMap<String, String>,
}

impl NodeFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node_id: impl Into<String>) {
        self.fields.entry(node_id.into()).or_default();
    }

    pub fn value(&self, node_id: &str) -> Option<&str> {
        self.fields.get(node_id).map(String::as_str)
    }
}

impl SelectionBinding for NodeFields {
    fn write_selection(&mut self, node_id: Option<&str>, value: String) -> Result<()> {
        let Some(node_id) = node_id else {
            return Err(Error::MissingBinding("no node id".to_string()));
        };
        match self.fields.get_mut(node_id) {
            Some(field) => {
                *field = value;
                Ok(())
            }
            None => Err(Error::MissingBinding(format!("node {node_id}"))),
        }
    }
}

/// Stores an output message in the host's selection field.
///
/// A missing field is logged and skipped; returns whether the write happened.
pub fn apply_output(binding: &mut dyn SelectionBinding, message: &OutputMessage) -> bool {
    let value = match message.data.encode() {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode selection");
            return false;
        }
    };
    match binding.write_selection(message.node_id.as_deref(), value) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "skipping selection write");
            false
        }
    }
}

/// One item of a stored selection, as written by any version of the view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelectedItem {
    #[serde(rename = "type", default)]
    pub image_type: Option<ImageType>,
    #[serde(default)]
    pub subfolder: String,
    #[serde(default)]
    pub filename: String,
}

/// A decoded selection-state field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DecodedOutput {
    #[serde(default)]
    pub selected: Vec<SelectedItem>,
    #[serde(default)]
    pub session_id: String,
    /// Absolute paths written by older views.
    #[serde(default)]
    pub selected_paths: Vec<String>,
}

/// The host's base directory per image type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostFolders {
    pub input: PathBuf,
    pub output: PathBuf,
    pub temp: PathBuf,
}

impl HostFolders {
    pub fn base_dir(&self, image_type: ImageType) -> &Path {
        match image_type {
            ImageType::Input => &self.input,
            ImageType::Output => &self.output,
            ImageType::Temp => &self.temp,
        }
    }
}

/// Whether a field value holds a stored selection.
pub fn is_output(field: &str) -> bool {
    field.starts_with(OUTPUT_MARKER)
}

/// Parses a selection-state field back into its items.
pub fn decode_output(field: &str) -> Result<DecodedOutput> {
    let body = field
        .strip_prefix(OUTPUT_MARKER)
        .ok_or_else(|| Error::Payload("missing selection marker".to_string()))?;
    Ok(serde_json::from_str(body)?)
}

impl DecodedOutput {
    /// Existing files for the stored selection.
    ///
    /// Items default to the output folder. Items without a filename are
    /// skipped and missing files are logged. When nothing resolves, the legacy
    /// `selected_paths` list is used instead.
    pub fn resolve_selected(&self, folders: &HostFolders) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for item in &self.selected {
            if item.filename.is_empty() {
                continue;
            }
            let mut path = folders
                .base_dir(item.image_type.unwrap_or(ImageType::Output))
                .to_path_buf();
            if !item.subfolder.is_empty() {
                path.push(&item.subfolder);
            }
            path.push(&item.filename);

            if path.exists() {
                paths.push(path);
            } else {
                tracing::warn!(path = %path.display(), "selected image not found");
            }
        }

        if paths.is_empty() {
            paths.extend(
                self.selected_paths
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .filter(|p| p.exists()),
            );
        }
        if paths.is_empty() {
            tracing::warn!(session_id = %self.session_id, "no selected images found");
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::FilterMode;
    use crate::search::SearchResult;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutboundMessage>>,
    }

    impl FrameTransport for RecordingTransport {
        fn post(&self, message: OutboundMessage) -> Result<()> {
            self.sent.lock().expect("lock").push(message);
            Ok(())
        }
    }

    fn gallery() -> GalleryState {
        let mut a = SearchResult::new("/c/output/a.png");
        a.similarity = Some(0.2);
        a.is_dark = Some(true);
        let mut b = SearchResult::new("/c/input/sub/b.png");
        b.similarity = Some(0.9);
        b.is_dark = Some(false);
        GalleryState::new(vec![a, b])
    }

    fn filenames(data: &OutputData) -> Vec<&str> {
        data.selected.iter().map(|l| l.filename.as_str()).collect()
    }

    #[test]
    fn empty_selection_emits_filtered_view_in_view_order() {
        let mut gallery = gallery();
        assert_eq!(filenames(&OutputData::from_gallery(&gallery, "s")), ["b.png", "a.png"]);

        gallery.set_filter(FilterMode::Dark);
        assert_eq!(filenames(&OutputData::from_gallery(&gallery, "s")), ["a.png"]);
    }

    #[test]
    fn selection_is_emitted_even_when_hidden() {
        let mut gallery = gallery();
        gallery.toggle_selection("/c/input/sub/b.png");
        gallery.set_filter(FilterMode::Dark);

        let data = OutputData::from_gallery(&gallery, "s1");
        assert_eq!(data.session_id, "s1");
        assert_eq!(data.selected.len(), 1);
        assert_eq!(data.selected[0].subfolder, "sub");
        assert_eq!(data.selected[0].image_type, ImageType::Input);
    }

    #[test]
    fn emitter_posts_output_with_node_id() {
        let transport = Arc::new(RecordingTransport::default());
        let emitter = OutputEmitter::new(transport.clone(), Some("12".into()));
        emitter
            .emit(OutputData::from_gallery(&gallery(), "s"))
            .expect("posted");

        let sent = transport.sent.lock().expect("lock");
        let encoded = sent[0].encode().expect("encodes");
        let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
        assert_eq!(value["type"], "image-search-output");
        assert_eq!(value["action"], "output");
        assert_eq!(value["nodeId"], "12");
        assert_eq!(value["data"]["selected"][0]["type"], "input");
    }

    #[test]
    fn apply_output_skips_missing_field() {
        let mut fields = NodeFields::new();
        fields.register("7");
        let data = OutputData::from_gallery(&gallery(), "s");

        assert!(!apply_output(&mut fields, &OutputMessage::new(data.clone(), Some("8".into()))));
        assert!(!apply_output(&mut fields, &OutputMessage::new(data.clone(), None)));
        assert!(apply_output(&mut fields, &OutputMessage::new(data, Some("7".into()))));

        let stored = fields.value("7").expect("registered");
        assert!(is_output(stored));
        let decoded = decode_output(stored).expect("decodes");
        assert_eq!(decoded.selected.len(), 2);
        assert_eq!(decoded.session_id, "s");
    }

    #[test]
    fn decode_rejects_unmarked_field() {
        assert!(matches!(decode_output("{}"), Err(Error::Payload(_))));
    }

    #[test]
    fn resolve_selected_defaults_to_output_folder() {
        let dir = tempdir().expect("tempdir");
        let folders = HostFolders {
            input: dir.path().join("input"),
            output: dir.path().join("output"),
            temp: dir.path().join("temp"),
        };
        fs::create_dir_all(folders.output.join("sub")).expect("mkdir");
        fs::write(folders.output.join("sub").join("x.png"), b"png").expect("write");

        let field = format!(
            "{OUTPUT_MARKER}{}",
            r#"{"selected":[{"subfolder":"sub","filename":"x.png"},{"type":"temp","filename":"gone.png"},{"type":"input"}],"session_id":"s"}"#
        );
        let paths = decode_output(&field).expect("decodes").resolve_selected(&folders);
        assert_eq!(paths, [folders.output.join("sub").join("x.png")]);
    }

    #[test]
    fn resolve_selected_falls_back_to_legacy_paths() {
        let dir = tempdir().expect("tempdir");
        let legacy = dir.path().join("legacy.png");
        fs::write(&legacy, b"png").expect("write");

        let decoded = DecodedOutput {
            selected: vec![SelectedItem {
                image_type: None,
                subfolder: String::new(),
                filename: "missing.png".into(),
            }],
            session_id: String::new(),
            selected_paths: vec![legacy.display().to_string(), String::new()],
        };
        let folders = HostFolders {
            output: dir.path().join("output"),
            ..HostFolders::default()
        };
        assert_eq!(decoded.resolve_selected(&folders), [legacy]);
    }
}
