// SPDX-License-Identifier: MPL-2.0
//! View description of the gallery: query strip, toolbar and masonry cards.

use super::format::{format_dimensions, format_percent};
use super::OptionView;
use crate::config::{MAX_THUMB_SIZE, MIN_THUMB_SIZE};
use crate::gallery::masonry;
use crate::gallery::{EmptyState, FilterMode, GalleryCounts, GalleryState, SortMode};
use crate::i18n::fluent::I18n;
use crate::search::{ImageLocation, SearchResult};
use serde::Serialize;

/// Everything the gallery view reads.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryState,
    pub query_images: &'a [ImageLocation],
    pub base_url: &'a str,
    pub total_indexed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    pub query_images: Vec<QueryImageView>,
    pub toolbar: ToolbarView,
    /// Set instead of cards when there is nothing to show.
    pub placeholder: Option<PlaceholderView>,
    pub column_width: u32,
    pub row_unit: u32,
    pub gap: u32,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryImageView {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarView {
    pub sort: Vec<OptionView<SortMode>>,
    pub filter: Vec<OptionView<FilterMode>>,
    pub thumb_size: u32,
    pub thumb_min: u32,
    pub thumb_max: u32,
    pub counts: GalleryCounts,
    pub summary: String,
    pub total_indexed: Option<String>,
    pub select_all_label: String,
    pub clear_selection_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderView {
    pub state: EmptyState,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Position in the current view; what `open_modal` expects.
    pub index: usize,
    pub path: String,
    pub filename: String,
    pub url: String,
    pub row_span: u32,
    pub selected: bool,
    pub toggle_label: String,
    pub similarity: Option<String>,
    pub dimensions: Option<String>,
    pub is_dark: Option<bool>,
    pub has_workflow: bool,
    pub error: Option<String>,
}

pub fn view(ctx: ViewContext<'_>) -> GalleryView {
    let ViewContext {
        i18n,
        gallery,
        query_images,
        base_url,
        total_indexed,
    } = ctx;

    let column_width = gallery.thumb_size();
    let placeholder = gallery.empty_state().map(|state| PlaceholderView {
        state,
        message: i18n.tr(match state {
            EmptyState::NoResults => "empty-run-search",
            EmptyState::NoMatches => "empty-no-matches",
        }),
    });

    let cards = if placeholder.is_some() {
        Vec::new()
    } else {
        gallery
            .visible()
            .into_iter()
            .enumerate()
            .map(|(index, result)| card(i18n, gallery, result, index, base_url, column_width))
            .collect()
    };

    GalleryView {
        query_images: query_images
            .iter()
            .map(|location| QueryImageView {
                filename: location.filename.clone(),
                url: location.view_url(base_url),
            })
            .collect(),
        toolbar: toolbar(i18n, gallery, total_indexed),
        placeholder,
        column_width,
        row_unit: masonry::ROW_UNIT,
        gap: masonry::GAP,
        cards,
    }
}

fn toolbar(i18n: &I18n, gallery: &GalleryState, total_indexed: Option<u64>) -> ToolbarView {
    let counts = gallery.counts();
    let visible = counts.visible.to_string();
    let total = counts.total.to_string();
    let selected = counts.selected.to_string();

    ToolbarView {
        sort: SortMode::ALL
            .iter()
            .map(|mode| OptionView {
                value: *mode,
                label: i18n.tr(mode.i18n_key()),
                active: *mode == gallery.sort_mode(),
            })
            .collect(),
        filter: FilterMode::ALL
            .iter()
            .map(|mode| OptionView {
                value: *mode,
                label: i18n.tr(mode.i18n_key()),
                active: *mode == gallery.filter_mode(),
            })
            .collect(),
        thumb_size: gallery.thumb_size(),
        thumb_min: MIN_THUMB_SIZE,
        thumb_max: MAX_THUMB_SIZE,
        counts,
        summary: i18n.tr_with_args(
            "gallery-summary",
            &[
                ("visible", visible.as_str()),
                ("total", total.as_str()),
                ("selected", selected.as_str()),
            ],
        ),
        total_indexed: total_indexed.map(|n| i18n.tr_count("gallery-indexed", n as usize)),
        select_all_label: i18n.tr("select-all"),
        clear_selection_label: i18n.tr("clear-selection"),
    }
}

fn card(
    i18n: &I18n,
    gallery: &GalleryState,
    result: &SearchResult,
    index: usize,
    base_url: &str,
    column_width: u32,
) -> CardView {
    let location = result.location();
    let selected = gallery.is_selected(&result.path);
    CardView {
        index,
        path: result.path.clone(),
        url: location.view_url(base_url),
        filename: location.filename,
        row_span: masonry::row_span(result.width, result.height, column_width),
        selected,
        toggle_label: toggle_label(i18n, selected),
        similarity: result.similarity.map(format_percent),
        dimensions: format_dimensions(result.width, result.height),
        is_dark: result.is_dark,
        has_workflow: result.has_workflow,
        error: result.error.clone(),
    }
}

/// Label of the select/deselect button for an item.
pub fn toggle_label(i18n: &I18n, selected: bool) -> String {
    i18n.tr(if selected { "deselect" } else { "select" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn i18n() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn result(path: &str, similarity: f64, width: u32, height: u32, dark: bool) -> SearchResult {
        let mut result = SearchResult::new(path);
        result.similarity = Some(similarity);
        result.width = Some(width);
        result.height = Some(height);
        result.is_dark = Some(dark);
        result
    }

    fn render(gallery: &GalleryState) -> GalleryView {
        let i18n = i18n();
        view(ViewContext {
            i18n: &i18n,
            gallery,
            query_images: &[],
            base_url: "http://host",
            total_indexed: Some(42),
        })
    }

    #[test]
    fn cards_follow_view_order_with_row_spans() {
        let gallery = GalleryState::new(vec![
            result("/c/output/a.png", 0.4, 200, 100, false),
            result("/c/output/b.png", 0.9, 100, 200, true),
        ]);
        let view = render(&gallery);

        let names: Vec<&str> = view.cards.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(names, ["b.png", "a.png"]);
        assert_eq!(view.cards[0].index, 0);
        assert_eq!(
            view.cards[0].row_span,
            masonry::row_span(Some(100), Some(200), gallery.thumb_size())
        );
        assert_eq!(view.cards[0].similarity.as_deref(), Some("90.0%"));
        assert_eq!(
            view.cards[0].url,
            "http://host/view?filename=b.png&subfolder=&type=output"
        );
    }

    #[test]
    fn placeholder_distinguishes_no_results_from_no_matches() {
        let empty = render(&GalleryState::new(Vec::new()));
        assert_eq!(
            empty.placeholder.as_ref().map(|p| p.state),
            Some(EmptyState::NoResults)
        );

        let mut gallery = GalleryState::new(vec![result("a", 0.5, 1, 1, false)]);
        gallery.set_filter(FilterMode::Dark);
        let filtered = render(&gallery);
        let placeholder = filtered.placeholder.expect("placeholder");
        assert_eq!(placeholder.state, EmptyState::NoMatches);
        assert_ne!(placeholder.message, empty.placeholder.expect("placeholder").message);
        assert!(filtered.cards.is_empty());
    }

    #[test]
    fn toolbar_marks_active_modes_and_labels() {
        let mut gallery = GalleryState::new(vec![result("a", 0.5, 1, 1, false)]);
        gallery.set_sort(SortMode::Filename);
        gallery.toggle_selection("a");
        let view = render(&gallery);

        let active: Vec<SortMode> = view
            .toolbar
            .sort
            .iter()
            .filter(|o| o.active)
            .map(|o| o.value)
            .collect();
        assert_eq!(active, [SortMode::Filename]);
        assert_eq!(view.toolbar.summary, "1 of 1 shown, 1 selected");
        assert_eq!(view.cards[0].toggle_label, "Deselect");
        assert!(view.toolbar.total_indexed.is_some());
    }
}
