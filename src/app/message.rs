// SPDX-License-Identifier: MPL-2.0
//! Messages, side effects and startup flags of the view component.

use crate::bridge::OutputData;
use crate::gallery::{FilterMode, SortMode};
use crate::metadata::Metadata;
use crate::modal::ModalTab;
use crate::search::SearchResult;
use crate::ui::json_tree::NodeId;
use crate::ui::notice::NoticeId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything that can happen to the view. User interactions arrive from the
/// host wrapped in `image-search-event`; the variants marked internal are
/// produced by the runtime and cannot be sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    SetSort {
        mode: SortMode,
    },
    SetFilter {
        mode: FilterMode,
    },
    SetThumbSize {
        px: u32,
    },
    ToggleSelection {
        path: String,
    },
    SelectAll,
    ClearSelection,
    /// Opens the modal on an index of the current view.
    OpenModal {
        index: usize,
    },
    CloseModal,
    Navigate {
        delta: isize,
    },
    SetTab {
        tab: ModalTab,
    },
    /// Select/deselect button inside the modal.
    ToggleCurrentSelection,
    ToggleJsonNode {
        id: NodeId,
    },
    CopyValue {
        text: String,
    },
    DismissNotice {
        id: NoticeId,
    },
    /// Internal: a metadata fetch finished.
    #[serde(skip)]
    MetadataLoaded { path: String, metadata: Metadata },
    /// Internal: a clipboard write finished.
    #[serde(skip)]
    CopyFinished { error: Option<String> },
}

/// Work the runtime performs on behalf of the component.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch (or read from cache) the metadata of a result, then send
    /// [`Message::MetadataLoaded`].
    FetchMetadata(Box<SearchResult>),
    EmitOutput(OutputData),
    /// Write to the clipboard, then send [`Message::CopyFinished`].
    CopyToClipboard(String),
    /// Send [`Message::DismissNotice`] after a delay.
    DismissAfter { id: NoticeId, delay: Duration },
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `IMAGE_SEARCH_VIEW_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Host node that receives the selection.
    pub node_id: Option<String>,
    /// Answer metadata requests in-process against this host base URL.
    pub host: Option<String>,
    /// Print the initial view and exit.
    pub once: bool,
    /// Stored selection field to resolve into file paths.
    pub resolve: Option<String>,
    /// Gallery payload, or a path to a file holding it.
    pub payload: Option<String>,
}
