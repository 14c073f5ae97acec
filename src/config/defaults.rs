// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Gallery**: Thumbnail (column) width bounds
//! - **Metadata**: Round-trip timeout for cross-frame metadata requests
//! - **Host**: Where the hosting application serves images and metadata

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default thumbnail column width in pixels.
pub const DEFAULT_THUMB_SIZE: u32 = 200;

/// Smallest thumbnail column width in pixels.
pub const MIN_THUMB_SIZE: u32 = 80;

/// Largest thumbnail column width in pixels.
pub const MAX_THUMB_SIZE: u32 = 300;

// ==========================================================================
// Metadata Defaults
// ==========================================================================

/// Time a metadata request may stay unanswered before resolving empty.
pub const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;

pub const MIN_METADATA_TIMEOUT_SECS: u64 = 1;

pub const MAX_METADATA_TIMEOUT_SECS: u64 = 120;

/// Path of the host's metadata endpoint.
pub const DEFAULT_METADATA_ENDPOINT: &str = "/was/image_search/metadata";

// ==========================================================================
// Host Defaults
// ==========================================================================

/// Base URL of a locally running host.
pub const DEFAULT_HOST_BASE_URL: &str = "http://127.0.0.1:8188";

/// Host image folders, relative to the working directory when unset.
pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TEMP_DIR: &str = "temp";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_THUMB_SIZE > 0);
    assert!(MAX_THUMB_SIZE > MIN_THUMB_SIZE);
    assert!(DEFAULT_THUMB_SIZE >= MIN_THUMB_SIZE);
    assert!(DEFAULT_THUMB_SIZE <= MAX_THUMB_SIZE);

    assert!(MIN_METADATA_TIMEOUT_SECS > 0);
    assert!(MAX_METADATA_TIMEOUT_SECS >= MIN_METADATA_TIMEOUT_SECS);
    assert!(DEFAULT_METADATA_TIMEOUT_SECS >= MIN_METADATA_TIMEOUT_SECS);
    assert!(DEFAULT_METADATA_TIMEOUT_SECS <= MAX_METADATA_TIMEOUT_SECS);
};
