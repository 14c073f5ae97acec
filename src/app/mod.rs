// SPDX-License-Identifier: MPL-2.0
//! The view component: owns every piece of state and turns messages into
//! state changes plus [`Effect`]s for the runtime to carry out.
//!
//! `update` never blocks and never fails. Anything slow (metadata round
//! trips, clipboard writes, timers) leaves as an effect and comes back later
//! as a message. Every change that can alter what would be reported to the
//! host ends with an [`Effect::EmitOutput`].

pub mod clipboard;
mod message;
pub mod paths;
pub mod runtime;

pub use clipboard::{Clipboard, SystemClipboard};
pub use message::{Effect, Flags, Message};

use crate::bridge::OutputData;
use crate::config::Config;
use crate::error::Error;
use crate::gallery::GalleryState;
use crate::i18n::fluent::I18n;
use crate::metadata::Metadata;
use crate::modal::{self, ModalNavigator};
use crate::search::{GalleryPayload, ImageLocation, SearchResult};
use crate::ui::json_tree::{JsonTree, NodeId, RenderOptions};
use crate::ui::modal_view::{self, MetadataPanel};
use crate::ui::notice::{Notice, NoticeId, NoticeKind};
use crate::ui::{gallery_view, Body, ErrorView, NoticeView, ViewDescription};
use std::fmt;

struct Loaded {
    gallery: GalleryState,
    session_id: String,
    query_images: Vec<ImageLocation>,
    total_indexed: Option<u64>,
}

enum Content {
    Loaded(Box<Loaded>),
    /// The payload could not be decoded; only an inline error is shown.
    Failed(Error),
}

/// Metadata shown in the open modal, tagged with the path it belongs to.
struct ModalMetadata {
    path: String,
    panel: MetadataPanel,
}

pub struct ImageSearchView {
    i18n: I18n,
    base_url: String,
    content: Content,
    modal: ModalNavigator,
    modal_metadata: Option<ModalMetadata>,
    notices: Vec<Notice>,
}

impl fmt::Debug for ImageSearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSearchView")
            .field("base_url", &self.base_url)
            .field("loaded", &matches!(self.content, Content::Loaded(_)))
            .field("modal", &self.modal.state())
            .field("notices", &self.notices.len())
            .finish()
    }
}

impl ImageSearchView {
    /// Builds the component from a raw payload. A malformed payload yields
    /// a component that only renders the error.
    pub fn new(raw_payload: &str, config: &Config, i18n: I18n) -> Self {
        let content = match GalleryPayload::parse(raw_payload) {
            Ok(payload) => {
                let gallery = GalleryState::new(payload.results.clone()).with_modes(
                    config.gallery.sort.unwrap_or_default(),
                    config.gallery.filter.unwrap_or_default(),
                    config
                        .gallery
                        .thumb_size
                        .unwrap_or(crate::config::DEFAULT_THUMB_SIZE),
                );
                tracing::info!(
                    results = payload.results.len(),
                    session_id = %payload.session_id(),
                    "gallery payload loaded"
                );
                Content::Loaded(Box::new(Loaded {
                    session_id: payload.session_id(),
                    query_images: payload.query_locations(),
                    total_indexed: payload.total_indexed,
                    gallery,
                }))
            }
            Err(err) => {
                tracing::warn!(error = %err, "unreadable gallery payload");
                Content::Failed(err)
            }
        };

        Self {
            i18n,
            base_url: config.host_base_url().to_string(),
            content,
            modal: ModalNavigator::new(),
            modal_metadata: None,
            notices: Vec::new(),
        }
    }

    /// Effects to run once at startup: report the initial (unselected) view
    /// and schedule dismissal of notices raised before the loop started.
    pub fn init(&self) -> Vec<Effect> {
        let dismissals = self.notices.iter().filter_map(|notice| {
            notice.kind.auto_dismiss().map(|delay| Effect::DismissAfter {
                id: notice.id,
                delay,
            })
        });
        self.output().into_iter().chain(dismissals).collect()
    }

    pub fn gallery(&self) -> Option<&GalleryState> {
        match &self.content {
            Content::Loaded(loaded) => Some(&loaded.gallery),
            Content::Failed(_) => None,
        }
    }

    pub fn modal(&self) -> &ModalNavigator {
        &self.modal
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Shows a notice without scheduling anything. Used before the runtime
    /// starts; [`Self::init`] picks up the dismissal.
    pub fn push_notice(&mut self, kind: NoticeKind) -> NoticeId {
        let notice = Notice::new(kind);
        self.notices.push(notice);
        notice.id
    }

    /// Shows a notice, scheduling its dismissal if it has a lifetime.
    pub fn notify(&mut self, kind: NoticeKind) -> Vec<Effect> {
        let id = self.push_notice(kind);
        kind.auto_dismiss()
            .map(|delay| Effect::DismissAfter { id, delay })
            .into_iter()
            .collect()
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::CopyValue { text } => vec![Effect::CopyToClipboard(text)],
            Message::CopyFinished { error } => self.handle_copy_finished(error),
            Message::DismissNotice { id } => {
                self.dismiss(id);
                Vec::new()
            }
            Message::MetadataLoaded { path, metadata } => {
                self.handle_metadata_loaded(&path, &metadata);
                Vec::new()
            }
            message => {
                let Content::Loaded(loaded) = &mut self.content else {
                    tracing::debug!(?message, "ignoring message without a gallery");
                    return Vec::new();
                };
                let mut effects = Vec::new();
                let output_changed = Self::handle_gallery_message(
                    &mut loaded.gallery,
                    &mut self.modal,
                    &mut self.modal_metadata,
                    message,
                    &mut effects,
                );
                if output_changed {
                    effects.extend(self.output());
                }
                effects
            }
        }
    }

    /// Applies a gallery or modal message. Returns whether the gallery
    /// re-rendered, which re-emits the output.
    fn handle_gallery_message(
        gallery: &mut GalleryState,
        modal: &mut ModalNavigator,
        modal_metadata: &mut Option<ModalMetadata>,
        message: Message,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let mut selection_changed = false;
        let mut view_changed = false;
        let mut resized = false;

        match message {
            Message::SetSort { mode } => {
                gallery.set_sort(mode);
                view_changed = true;
            }
            Message::SetFilter { mode } => {
                gallery.set_filter(mode);
                view_changed = true;
            }
            Message::SetThumbSize { px } => {
                gallery.set_thumb_size(px);
                resized = true;
            }
            Message::ToggleSelection { path } => {
                gallery.toggle_selection(&path);
                selection_changed = true;
            }
            Message::SelectAll => {
                gallery.select_all();
                selection_changed = true;
            }
            Message::ClearSelection => {
                gallery.clear_selection();
                selection_changed = true;
            }
            Message::OpenModal { index } => {
                let len = gallery.visible().len();
                let event = modal.open(index, len);
                Self::follow_modal_event(gallery, modal_metadata, event, effects);
            }
            Message::CloseModal => {
                modal.close();
                *modal_metadata = None;
            }
            Message::Navigate { delta } => {
                let len = gallery.visible().len();
                let event = modal.navigate(delta, len);
                Self::follow_modal_event(gallery, modal_metadata, event, effects);
            }
            Message::SetTab { tab } => modal.set_tab(tab),
            Message::ToggleCurrentSelection => {
                if let Some(path) = Self::current_path(gallery, modal) {
                    gallery.toggle_selection(&path);
                    selection_changed = true;
                }
            }
            Message::ToggleJsonNode { id } => {
                if let Some(metadata) = modal_metadata {
                    toggle_tree_node(&mut metadata.panel, id);
                }
            }
            Message::CopyValue { .. }
            | Message::CopyFinished { .. }
            | Message::DismissNotice { .. }
            | Message::MetadataLoaded { .. } => {}
        }

        if view_changed {
            // The item on display may have moved or been filtered out.
            let path = modal_metadata.as_ref().map(|m| m.path.clone());
            let new_index = path.and_then(|p| gallery.visible_index_of(&p));
            if let modal::Event::Closed = modal.relocate(new_index) {
                *modal_metadata = None;
            }
        }

        selection_changed || view_changed || resized
    }

    fn follow_modal_event(
        gallery: &GalleryState,
        modal_metadata: &mut Option<ModalMetadata>,
        event: modal::Event,
        effects: &mut Vec<Effect>,
    ) {
        let modal::Event::Showing(index) = event else {
            return;
        };
        let Some(result) = gallery.visible().get(index).map(|r| (*r).clone()) else {
            return;
        };
        *modal_metadata = Some(ModalMetadata {
            path: result.path.clone(),
            panel: MetadataPanel::Loading,
        });
        effects.push(Effect::FetchMetadata(Box::new(result)));
    }

    fn current_path(gallery: &GalleryState, modal: &ModalNavigator) -> Option<String> {
        let index = modal.index()?;
        gallery.visible().get(index).map(|r| r.path.clone())
    }

    fn handle_metadata_loaded(&mut self, path: &str, metadata: &Metadata) {
        let Some(current) = self.modal_metadata.as_mut() else {
            return;
        };
        if current.path != path {
            tracing::debug!(path, "dropping metadata for an item no longer shown");
            return;
        }
        current.panel = MetadataPanel::Loaded {
            prompts: metadata.prompt_entries(),
            workflow: metadata
                .workflow
                .as_ref()
                .map(|w| JsonTree::new(Some(w), &RenderOptions::workflow(), &self.i18n)),
            api: metadata
                .prompt
                .as_ref()
                .map(|p| JsonTree::new(Some(p), &RenderOptions::api(), &self.i18n)),
        };
    }

    fn handle_copy_finished(&mut self, error: Option<String>) -> Vec<Effect> {
        match error {
            None => self.notify(NoticeKind::Copied),
            Some(error) => {
                tracing::warn!(%error, "clipboard write failed");
                self.notify(NoticeKind::CopyFailed)
            }
        }
    }

    fn dismiss(&mut self, id: NoticeId) {
        self.notices.retain(|notice| notice.id != id);
    }

    fn output(&self) -> Option<Effect> {
        let Content::Loaded(loaded) = &self.content else {
            return None;
        };
        Some(Effect::EmitOutput(OutputData::from_gallery(
            &loaded.gallery,
            &loaded.session_id,
        )))
    }

    pub fn view(&self) -> ViewDescription {
        let i18n = &self.i18n;
        let (body, modal) = match &self.content {
            Content::Failed(err) => (
                Body::Error(ErrorView {
                    title: i18n.tr(err.i18n_key()),
                    detail: err.to_string(),
                }),
                None,
            ),
            Content::Loaded(loaded) => {
                let gallery = gallery_view::view(gallery_view::ViewContext {
                    i18n,
                    gallery: &loaded.gallery,
                    query_images: &loaded.query_images,
                    base_url: &self.base_url,
                    total_indexed: loaded.total_indexed,
                });
                (Body::Gallery(Box::new(gallery)), self.modal_view(loaded))
            }
        };

        ViewDescription {
            locale: i18n.current_locale().to_string(),
            body,
            modal,
            notices: self
                .notices
                .iter()
                .map(|notice| NoticeView {
                    id: notice.id,
                    kind: notice.kind,
                    severity: notice.kind.severity(),
                    message: i18n.tr(notice.kind.i18n_key()),
                    dismiss_label: i18n.tr("dismiss"),
                })
                .collect(),
        }
    }

    fn modal_view(&self, loaded: &Loaded) -> Option<modal_view::ModalView> {
        let (index, tab) = match self.modal.state() {
            modal::ModalState::Open { index, tab } => (index, tab),
            modal::ModalState::Closed => return None,
        };
        let visible = loaded.gallery.visible();
        let result: &SearchResult = visible.get(index)?;
        let loading = MetadataPanel::Loading;
        let metadata = self
            .modal_metadata
            .as_ref()
            .filter(|m| m.path == result.path)
            .map_or(&loading, |m| &m.panel);

        Some(modal_view::view(modal_view::ViewContext {
            i18n: &self.i18n,
            result,
            index,
            total: visible.len(),
            tab,
            selected: loaded.gallery.is_selected(&result.path),
            base_url: &self.base_url,
            metadata,
        }))
    }
}

fn toggle_tree_node(panel: &mut MetadataPanel, id: NodeId) {
    if let MetadataPanel::Loaded { workflow, api, .. } = panel {
        let toggled = workflow.as_mut().is_some_and(|tree| tree.toggle(id))
            || api.as_mut().is_some_and(|tree| tree.toggle(id));
        if !toggled {
            tracing::debug!(%id, "toggle for unknown json node");
        }
    }
}
