// SPDX-License-Identifier: MPL-2.0
//! Sort modes and their comparators.
//!
//! Missing metrics sort as `0` (or the empty string for filenames). All
//! callers go through [`sort_results`], which uses the stable `sort_by` so
//! that equal keys keep their input order.

use crate::search::SearchResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Most similar first.
    #[default]
    Similarity,
    /// Darkest first.
    BrightnessDark,
    /// Brightest first.
    BrightnessLight,
    /// Largest pixel area first.
    SizeLarge,
    SizeSmall,
    Filename,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::Similarity,
        SortMode::BrightnessDark,
        SortMode::BrightnessLight,
        SortMode::SizeLarge,
        SortMode::SizeSmall,
        SortMode::Filename,
    ];

    /// Orders two results according to this mode.
    pub fn compare(&self, a: &SearchResult, b: &SearchResult) -> Ordering {
        match self {
            SortMode::Similarity => metric(b.similarity).total_cmp(&metric(a.similarity)),
            SortMode::BrightnessDark => metric(a.brightness).total_cmp(&metric(b.brightness)),
            SortMode::BrightnessLight => metric(b.brightness).total_cmp(&metric(a.brightness)),
            SortMode::SizeLarge => b.area().cmp(&a.area()),
            SortMode::SizeSmall => a.area().cmp(&b.area()),
            SortMode::Filename => compare_filenames(&a.display_name(), &b.display_name()),
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            SortMode::Similarity => "sort-similarity",
            SortMode::BrightnessDark => "sort-brightness-dark",
            SortMode::BrightnessLight => "sort-brightness-light",
            SortMode::SizeLarge => "sort-size-large",
            SortMode::SizeSmall => "sort-size-small",
            SortMode::Filename => "sort-filename",
        }
    }
}

fn metric(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Case-insensitive comparison with a case-sensitive tie break, so that
/// `b.png` sorts between `A.png` and `C.png`.
pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort of a borrowed view.
pub fn sort_results(results: &mut [&SearchResult], mode: SortMode) {
    results.sort_by(|a, b| mode.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str, similarity: Option<f64>, brightness: Option<f64>) -> SearchResult {
        let mut result = SearchResult::new(path);
        result.filename = path.to_string();
        result.similarity = similarity;
        result.brightness = brightness;
        result
    }

    fn order(results: &[SearchResult], mode: SortMode) -> Vec<String> {
        let mut view: Vec<&SearchResult> = results.iter().collect();
        sort_results(&mut view, mode);
        view.iter().map(|r| r.path.clone()).collect()
    }

    #[test]
    fn similarity_sorts_descending_with_missing_as_zero() {
        let results = vec![
            result("low", Some(0.2), None),
            result("none", None, None),
            result("high", Some(0.9), None),
        ];
        assert_eq!(order(&results, SortMode::Similarity), ["high", "low", "none"]);
    }

    #[test]
    fn brightness_modes_are_mirrored() {
        let results = vec![
            result("mid", None, Some(0.5)),
            result("dark", None, Some(0.1)),
            result("light", None, Some(0.9)),
        ];
        assert_eq!(
            order(&results, SortMode::BrightnessDark),
            ["dark", "mid", "light"]
        );
        assert_eq!(
            order(&results, SortMode::BrightnessLight),
            ["light", "mid", "dark"]
        );
    }

    #[test]
    fn size_modes_use_pixel_area() {
        let mut wide = result("wide", None, None);
        wide.width = Some(400);
        wide.height = Some(100);
        let mut square = result("square", None, None);
        square.width = Some(300);
        square.height = Some(300);
        let unknown = result("unknown", None, None);
        let results = vec![wide, unknown, square];

        assert_eq!(
            order(&results, SortMode::SizeLarge),
            ["square", "wide", "unknown"]
        );
        assert_eq!(
            order(&results, SortMode::SizeSmall),
            ["unknown", "wide", "square"]
        );
    }

    #[test]
    fn filename_sort_ignores_case() {
        let results = vec![
            result("c.png", None, None),
            result("B.png", None, None),
            result("a.png", None, None),
        ];
        assert_eq!(
            order(&results, SortMode::Filename),
            ["a.png", "B.png", "c.png"]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let results = vec![
            result("first", Some(0.5), None),
            result("second", Some(0.5), None),
            result("third", Some(0.5), None),
        ];
        assert_eq!(
            order(&results, SortMode::Similarity),
            ["first", "second", "third"]
        );
    }
}
