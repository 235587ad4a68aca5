//! System clipboard backed by `arboard`.

use arboard::Clipboard;
use client_core::ClipboardSink;

/// Opens the clipboard per write; `arboard` handles are not shareable across threads.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), String> {
        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| err.to_string())
    }
}
