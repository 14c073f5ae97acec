// SPDX-License-Identifier: MPL-2.0
//! Short-lived notices shown over the view.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NoticeId(u64);

impl NoticeId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Copied,
    CopyFailed,
    /// `settings.toml` was unreadable and defaults are in use.
    ConfigLoadError,
}

impl NoticeKind {
    pub fn severity(&self) -> Severity {
        match self {
            NoticeKind::Copied => Severity::Success,
            NoticeKind::ConfigLoadError => Severity::Warning,
            NoticeKind::CopyFailed => Severity::Error,
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            NoticeKind::Copied => "notice-copied",
            NoticeKind::CopyFailed => "notice-copy-failed",
            NoticeKind::ConfigLoadError => "notice-config-load-error",
        }
    }

    /// `None` means the notice stays until dismissed.
    pub fn auto_dismiss(&self) -> Option<Duration> {
        match self.severity() {
            Severity::Success => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(kind: NoticeKind) -> Self {
        Self {
            id: NoticeId::new(),
            kind,
        }
    }
}
