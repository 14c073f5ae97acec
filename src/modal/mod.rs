// SPDX-License-Identifier: MPL-2.0
//! Detail modal navigation.
//!
//! The modal is either closed or open on one index of the gallery's current
//! view. The index is always valid while open: callers pass the view length
//! to every transition that moves it.

use serde::{Deserialize, Serialize};

/// Tabs of the detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalTab {
    #[default]
    Metrics,
    Prompts,
    Workflow,
    Api,
}

impl ModalTab {
    pub const ALL: [ModalTab; 4] = [
        ModalTab::Metrics,
        ModalTab::Prompts,
        ModalTab::Workflow,
        ModalTab::Api,
    ];

    pub fn i18n_key(&self) -> &'static str {
        match self {
            ModalTab::Metrics => "tab-metrics",
            ModalTab::Prompts => "tab-prompts",
            ModalTab::Workflow => "tab-workflow",
            ModalTab::Api => "tab-api",
        }
    }

    /// Whether the tab shows fetched metadata.
    pub fn needs_metadata(&self) -> bool {
        !matches!(self, ModalTab::Metrics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open { index: usize, tab: ModalTab },
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The modal now shows the item at this index.
    Showing(usize),
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct ModalNavigator {
    state: ModalState,
}

impl ModalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            ModalState::Open { index, .. } => Some(index),
            ModalState::Closed => None,
        }
    }

    pub fn tab(&self) -> Option<ModalTab> {
        match self.state {
            ModalState::Open { tab, .. } => Some(tab),
            ModalState::Closed => None,
        }
    }

    /// Opens on `index`, always on the metrics tab.
    pub fn open(&mut self, index: usize, len: usize) -> Event {
        if index >= len {
            return Event::None;
        }
        self.state = ModalState::Open {
            index,
            tab: ModalTab::Metrics,
        };
        Event::Showing(index)
    }

    pub fn close(&mut self) -> Event {
        if !self.is_open() {
            return Event::None;
        }
        self.state = ModalState::Closed;
        Event::Closed
    }

    /// Moves by `delta` within `0..len`, keeping the tab. No wraparound.
    pub fn navigate(&mut self, delta: isize, len: usize) -> Event {
        let ModalState::Open { index, tab } = self.state else {
            return Event::None;
        };
        let Some(target) = index.checked_add_signed(delta) else {
            return Event::None;
        };
        if target >= len || target == index {
            return Event::None;
        }
        self.state = ModalState::Open { index: target, tab };
        Event::Showing(target)
    }

    pub fn set_tab(&mut self, tab: ModalTab) {
        if let ModalState::Open { index, .. } = self.state {
            self.state = ModalState::Open { index, tab };
        }
    }

    /// Follows the current item into a reordered or refiltered view.
    ///
    /// `new_index` is where the item now sits, `None` if it is hidden.
    pub fn relocate(&mut self, new_index: Option<usize>) -> Event {
        let ModalState::Open { index, tab } = self.state else {
            return Event::None;
        };
        match new_index {
            Some(new_index) if new_index == index => Event::None,
            Some(new_index) => {
                self.state = ModalState::Open {
                    index: new_index,
                    tab,
                };
                Event::Showing(new_index)
            }
            None => self.close(),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.index().is_some_and(|index| index > 0)
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.index().is_some_and(|index| index + 1 < len)
    }
}
