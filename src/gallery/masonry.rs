// SPDX-License-Identifier: MPL-2.0
//! Masonry layout: how many grid rows a card spans.
//!
//! The gallery grid uses fixed-height rows of [`ROW_UNIT`] pixels separated by
//! [`GAP`] pixels. A card spans enough rows to fit its image at the column
//! width; rounding up guarantees no card overlaps the one below it.

/// Height of one grid row in pixels.
pub const ROW_UNIT: u32 = 10;

/// Gutter between rows and columns in pixels.
pub const GAP: u32 = 12;

/// Span used when the image dimensions are unknown.
pub const DEFAULT_ROW_SPAN: u32 = 15;

/// Number of grid rows a card of the given image size spans.
pub fn row_span(width: Option<u32>, height: Option<u32>, column_width: u32) -> u32 {
    let (Some(width), Some(height)) = (width, height) else {
        return DEFAULT_ROW_SPAN;
    };
    if width == 0 || height == 0 {
        return DEFAULT_ROW_SPAN;
    }

    let rendered_height = f64::from(column_width) * (f64::from(height) / f64::from(width));
    let rows = (rendered_height + f64::from(GAP)) / f64::from(ROW_UNIT + GAP);
    rows.ceil() as u32
}
