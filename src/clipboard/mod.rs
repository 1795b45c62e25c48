mod system;
mod watcher;

pub use system::SystemClipboard;
pub use watcher::{CheckOutcome, ClipboardWatcher};

use anyhow::Result;

/// Minimal boundary to the OS clipboard.
///
/// `read_text` returns `Ok(None)` when the clipboard holds no text payload
/// at all (an image, a file list, nothing); that is a normal cycle, not an
/// error.
pub trait ClipboardPort: Send + Sync + 'static {
    fn read_text(&self) -> Result<Option<String>>;

    /// Write a text payload. Triggered by the presentation layer on
    /// copy-from-history, never by the poll cycle.
    fn write_text(&self, content: &str) -> Result<()>;
}
