use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};

use super::ClipboardPort;

/// `clipboard-rs` backed implementation of [`ClipboardPort`].
///
/// The context is not thread-safe, so it lives behind a mutex; reads and
/// writes are short enough that contention between the poll cycle and a
/// user-triggered copy does not matter.
pub struct SystemClipboard {
    ctx: Mutex<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("cannot create clipboard context: {}", e))?;
        Ok(Self {
            ctx: Mutex::new(ctx),
        })
    }
}

impl ClipboardPort for SystemClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        let ctx = self.ctx.lock().unwrap();
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        ctx.get_text()
            .map(Some)
            .map_err(|e| anyhow!("cannot read clipboard text: {}", e))
    }

    fn write_text(&self, content: &str) -> Result<()> {
        let ctx = self.ctx.lock().unwrap();
        ctx.set_text(content.to_owned())
            .map_err(|e| anyhow!("cannot write clipboard text: {}", e))
    }
}
