// SPDX-License-Identifier: MPL-2.0
//! Clipboard writes for the JSON inspector's copy buttons.

use crate::error::{Error, Result};

/// Maximum clipboard content size in bytes (10 MB).
pub const MAX_CLIPBOARD_SIZE_BYTES: usize = 10 * 1024 * 1024;

pub trait Clipboard: Send + Sync {
    /// Blocking write; run it off the event loop.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The OS clipboard, opened fresh for every write.
///
/// Fails on headless systems or when access is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        check_size(text)?;

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        Ok(())
    }
}

fn check_size(text: &str) -> Result<()> {
    if text.len() > MAX_CLIPBOARD_SIZE_BYTES {
        return Err(Error::Clipboard(format!(
            "content too large for clipboard: {} bytes",
            text.len()
        )));
    }
    Ok(())
}
