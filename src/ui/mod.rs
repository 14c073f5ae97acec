// SPDX-License-Identifier: MPL-2.0
//! View descriptions handed to the host for drawing.
//!
//! Nothing in here holds state of its own: every description is rebuilt from
//! the component state on each render and can be thrown away afterwards. The
//! one exception is [`json_tree::JsonTree`], whose collapsed flags live
//! between renders so toggles stick.

pub mod format;
pub mod gallery_view;
pub mod json_tree;
pub mod modal_view;
pub mod notice;

use gallery_view::GalleryView;
use modal_view::ModalView;
use notice::{NoticeId, NoticeKind, Severity};
use serde::Serialize;

/// One choice of a segmented control or dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView<T> {
    pub value: T,
    pub label: String,
    pub active: bool,
}

/// Shown instead of the gallery when the payload could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Gallery(Box<GalleryView>),
    Error(ErrorView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeView {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub severity: Severity,
    pub message: String,
    pub dismiss_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewDescription {
    pub locale: String,
    pub body: Body,
    pub modal: Option<ModalView>,
    pub notices: Vec<NoticeView>,
}

impl ViewDescription {
    pub fn gallery(&self) -> Option<&GalleryView> {
        match &self.body {
            Body::Gallery(gallery) => Some(gallery),
            Body::Error(_) => None,
        }
    }
}
