// SPDX-License-Identifier: MPL-2.0
//! Gallery state: the result set, how it is sorted and filtered, and what is
//! selected.
//!
//! [`GalleryState`] is the single source of truth for which results are
//! visible and which are selected. Sorting and filtering only ever produce a
//! derived view; the result list keeps its input order and the selection set is
//! never narrowed to what is currently visible.

pub mod filter;
pub mod masonry;
pub mod sort;

pub use filter::FilterMode;
pub use sort::SortMode;

use crate::config::{DEFAULT_THUMB_SIZE, MAX_THUMB_SIZE, MIN_THUMB_SIZE};
use crate::search::SearchResult;
use serde::Serialize;
use std::collections::HashSet;

/// Why the gallery has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The search produced no results at all.
    NoResults,
    /// Results exist but the active filter hides all of them.
    NoMatches,
}

/// Toolbar counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalleryCounts {
    pub total: usize,
    pub visible: usize,
    pub selected: usize,
    pub dark: usize,
    pub light: usize,
    pub with_workflow: usize,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    /// Results in input order.
    results: Vec<SearchResult>,
    sort_mode: SortMode,
    filter_mode: FilterMode,
    selected_paths: HashSet<String>,
    thumb_size: u32,
}

impl GalleryState {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            sort_mode: SortMode::default(),
            filter_mode: FilterMode::default(),
            selected_paths: HashSet::new(),
            thumb_size: DEFAULT_THUMB_SIZE,
        }
    }

    /// Starts with the given modes instead of the defaults.
    pub fn with_modes(mut self, sort_mode: SortMode, filter_mode: FilterMode, thumb_size: u32) -> Self {
        self.sort_mode = sort_mode;
        self.filter_mode = filter_mode;
        self.set_thumb_size(thumb_size);
        self
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn thumb_size(&self) -> u32 {
        self.thumb_size
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
    }

    /// Sets the thumbnail (column) width, clamped to the supported range.
    pub fn set_thumb_size(&mut self, px: u32) {
        self.thumb_size = px.clamp(MIN_THUMB_SIZE, MAX_THUMB_SIZE);
    }

    /// Flips the selection of `path` and returns whether it is now selected.
    ///
    /// Works for any path, visible or not.
    pub fn toggle_selection(&mut self, path: &str) -> bool {
        if self.selected_paths.remove(path) {
            false
        } else {
            self.selected_paths.insert(path.to_string());
            true
        }
    }

    /// Adds every currently visible result to the selection.
    pub fn select_all(&mut self) {
        let visible: Vec<String> = self.visible().iter().map(|r| r.path.clone()).collect();
        self.selected_paths.extend(visible);
    }

    /// Empties the whole selection, including results hidden by the filter.
    pub fn clear_selection(&mut self) {
        self.selected_paths.clear();
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected_paths.contains(path)
    }

    pub fn selected_paths(&self) -> &HashSet<String> {
        &self.selected_paths
    }

    /// Selected results in input order, whether or not they are visible.
    pub fn selected_results(&self) -> Vec<&SearchResult> {
        self.results
            .iter()
            .filter(|r| self.selected_paths.contains(&r.path))
            .collect()
    }

    /// The filtered and sorted view.
    pub fn visible(&self) -> Vec<&SearchResult> {
        let mut view: Vec<&SearchResult> = self
            .results
            .iter()
            .filter(|r| self.filter_mode.matches(r))
            .collect();
        sort::sort_results(&mut view, self.sort_mode);
        view
    }

    /// Position of `path` in the current view.
    pub fn visible_index_of(&self, path: &str) -> Option<usize> {
        self.visible().iter().position(|r| r.path == path)
    }

    /// Which placeholder to show instead of cards, if any.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.results.is_empty() {
            Some(EmptyState::NoResults)
        } else if !self.results.iter().any(|r| self.filter_mode.matches(r)) {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    pub fn counts(&self) -> GalleryCounts {
        GalleryCounts {
            total: self.results.len(),
            visible: self
                .results
                .iter()
                .filter(|r| self.filter_mode.matches(r))
                .count(),
            selected: self.selected_paths.len(),
            dark: self.results.iter().filter(|r| r.is_dark == Some(true)).count(),
            light: self.results.iter().filter(|r| r.is_dark == Some(false)).count(),
            with_workflow: self.results.iter().filter(|r| r.has_workflow).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str, similarity: f64, is_dark: Option<bool>) -> SearchResult {
        let mut result = SearchResult::new(path);
        result.filename = path.to_string();
        result.similarity = Some(similarity);
        result.is_dark = is_dark;
        result
    }

    fn paths(view: &[&SearchResult]) -> Vec<String> {
        view.iter().map(|r| r.path.clone()).collect()
    }

    fn sample() -> GalleryState {
        GalleryState::new(vec![
            result("a", 0.4, Some(true)),
            result("b", 0.9, Some(false)),
            result("c", 0.7, None),
        ])
    }

    #[test]
    fn default_view_is_sorted_by_similarity() {
        let gallery = sample();
        assert_eq!(paths(&gallery.visible()), ["b", "c", "a"]);
        // Underlying list keeps input order.
        assert_eq!(gallery.results()[0].path, "a");
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let mut gallery = sample();
        gallery.toggle_selection("c");
        let before = gallery.selected_paths().clone();

        assert!(gallery.toggle_selection("a"));
        assert!(!gallery.toggle_selection("a"));
        assert_eq!(gallery.selected_paths(), &before);
    }

    #[test]
    fn selection_survives_filter_change() {
        let mut gallery = sample();
        gallery.toggle_selection("b");
        gallery.set_filter(FilterMode::Dark);
        assert!(!paths(&gallery.visible()).contains(&"b".to_string()));
        assert!(gallery.is_selected("b"));

        gallery.set_filter(FilterMode::All);
        assert!(gallery.is_selected("b"));
    }

    #[test]
    fn select_all_only_adds_visible_results() {
        let mut gallery = sample();
        gallery.toggle_selection("b");
        gallery.set_filter(FilterMode::Dark);
        gallery.select_all();

        assert!(gallery.is_selected("a"));
        assert!(gallery.is_selected("b"));
        assert!(!gallery.is_selected("c"));
    }

    #[test]
    fn clear_selection_removes_hidden_selections() {
        let mut gallery = sample();
        gallery.toggle_selection("b");
        gallery.set_filter(FilterMode::Dark);
        gallery.clear_selection();
        assert!(gallery.selected_paths().is_empty());
    }

    #[test]
    fn selected_results_keep_input_order() {
        let mut gallery = sample();
        gallery.toggle_selection("c");
        gallery.toggle_selection("a");
        assert_eq!(paths(&gallery.selected_results()), ["a", "c"]);
    }

    #[test]
    fn empty_states_are_distinct() {
        let empty = GalleryState::new(Vec::new());
        assert_eq!(empty.empty_state(), Some(EmptyState::NoResults));

        let mut gallery = GalleryState::new(vec![result("x", 0.5, None)]);
        assert_eq!(gallery.empty_state(), None);
        gallery.set_filter(FilterMode::Light);
        assert_eq!(gallery.empty_state(), Some(EmptyState::NoMatches));
    }

    #[test]
    fn thumb_size_is_clamped() {
        let mut gallery = sample();
        gallery.set_thumb_size(10);
        assert_eq!(gallery.thumb_size(), MIN_THUMB_SIZE);
        gallery.set_thumb_size(10_000);
        assert_eq!(gallery.thumb_size(), MAX_THUMB_SIZE);
        gallery.set_thumb_size(150);
        assert_eq!(gallery.thumb_size(), 150);
    }

    #[test]
    fn counts_report_brightness_split() {
        let mut gallery = sample();
        gallery.toggle_selection("a");
        gallery.set_filter(FilterMode::Light);
        let counts = gallery.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.visible, 1);
        assert_eq!(counts.selected, 1);
        assert_eq!(counts.dark, 1);
        assert_eq!(counts.light, 1);
    }

    #[test]
    fn visible_index_follows_sort() {
        let mut gallery = sample();
        assert_eq!(gallery.visible_index_of("a"), Some(2));
        gallery.set_sort(SortMode::Filename);
        assert_eq!(gallery.visible_index_of("a"), Some(0));
        gallery.set_filter(FilterMode::Light);
        assert_eq!(gallery.visible_index_of("a"), None);
    }
}
