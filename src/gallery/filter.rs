// SPDX-License-Identifier: MPL-2.0
//! Filter modes for the gallery view.
//!
//! A filter only narrows what is displayed; it never touches the underlying
//! result list or the selection set.

use crate::search::SearchResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    /// Only results explicitly flagged dark.
    Dark,
    /// Only results explicitly flagged light. Unknown brightness matches neither.
    Light,
    WithWorkflow,
}

impl FilterMode {
    pub const ALL: [FilterMode; 4] = [
        FilterMode::All,
        FilterMode::Dark,
        FilterMode::Light,
        FilterMode::WithWorkflow,
    ];

    /// Returns `true` if the result passes this filter.
    #[must_use]
    pub fn matches(&self, result: &SearchResult) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Dark => result.is_dark == Some(true),
            FilterMode::Light => result.is_dark == Some(false),
            FilterMode::WithWorkflow => result.has_workflow,
        }
    }

    /// Returns `true` if this filter excludes anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, FilterMode::All)
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            FilterMode::All => "filter-all",
            FilterMode::Dark => "filter-dark",
            FilterMode::Light => "filter-light",
            FilterMode::WithWorkflow => "filter-with-workflow",
        }
    }
}
