// SPDX-License-Identifier: MPL-2.0
//! Display formatting of result metrics.

use chrono::{DateTime, Local, TimeZone, Utc};

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count with binary multiples (`1536` -> `1.5 KB`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

/// A `0.0..=1.0` ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn format_dimensions(width: Option<u32>, height: Option<u32>) -> Option<String> {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(format!("{w} × {h}")),
        _ => None,
    }
}

/// Epoch seconds in local time.
pub fn format_timestamp(epoch_secs: f64) -> Option<String> {
    format_timestamp_in(epoch_secs, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(epoch_secs: f64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    if !epoch_secs.is_finite() || epoch_secs < 0.0 {
        return None;
    }
    let utc = DateTime::<Utc>::from_timestamp(epoch_secs.trunc() as i64, 0)?;
    Some(utc.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072.0 GB");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.8734), "87.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn dimensions_need_both_sides() {
        assert_eq!(format_dimensions(Some(640), Some(480)).as_deref(), Some("640 × 480"));
        assert_eq!(format_dimensions(Some(640), None), None);
        assert_eq!(format_dimensions(Some(0), Some(480)), None);
    }

    #[test]
    fn timestamps_format_in_given_zone() {
        assert_eq!(
            format_timestamp_in(1_700_000_000.75, &Utc).as_deref(),
            Some("2023-11-14 22:13:20")
        );
        assert_eq!(format_timestamp_in(f64::NAN, &Utc), None);
        assert_eq!(format_timestamp_in(-5.0, &Utc), None);
    }
}
