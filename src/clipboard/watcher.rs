use std::sync::Mutex;

use anyhow::Result as AnyResult;
use log::debug;
use tokio::sync::{mpsc, watch};

use crate::entry::ClipboardEntry;
use crate::error::{Error, Result};
use crate::runtime::StoreCommand;

use super::ClipboardPort;

/// What a single watch cycle decided. Mostly useful for tests and
/// diagnostics; the poll loop only cares about errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No text payload on the clipboard this cycle.
    NoText,
    /// Content unchanged since the last observation.
    Unchanged,
    /// Content matches the entry at the top of the history: observed, not
    /// re-recorded.
    MatchesHead,
    /// Genuinely new content, submitted to the writer.
    Submitted,
}

/// Samples the OS clipboard and decides whether the current text payload is
/// worth recording.
///
/// Dedup is two-tier: against `last_seen` (the content last observed, which
/// suppresses redundant polls of an unchanged clipboard) and against the
/// head of the history view (which suppresses a re-copy of the entry
/// already at the top). Content that changes away and then back is recorded
/// once per transition.
pub struct ClipboardWatcher<C> {
    clipboard: C,
    last_seen: Mutex<Option<String>>,
    view: watch::Receiver<Vec<ClipboardEntry>>,
    writer: mpsc::UnboundedSender<StoreCommand>,
}

impl<C: ClipboardPort> ClipboardWatcher<C> {
    pub(crate) fn new(
        clipboard: C,
        view: watch::Receiver<Vec<ClipboardEntry>>,
        writer: mpsc::UnboundedSender<StoreCommand>,
    ) -> Self {
        Self {
            clipboard,
            last_seen: Mutex::new(None),
            view,
            writer,
        }
    }

    /// Seed `last_seen` from the most recent persisted entry, so a payload
    /// still sitting on the clipboard from the previous run is not recorded
    /// a second time.
    pub(crate) fn seed_last_seen(&self, content: Option<String>) {
        *self.last_seen.lock().unwrap() = content;
    }

    /// Acknowledge an explicit copy-from-history so the next cycle does not
    /// re-record the just-copied item.
    pub fn note_copied(&self, content: String) {
        *self.last_seen.lock().unwrap() = Some(content);
    }

    /// Write `content` back to the OS clipboard on behalf of the
    /// presentation layer, with the acknowledgment applied under the cycle
    /// lock so no watch cycle can land between the write and the ack.
    pub fn copy_from_history(&self, content: &str) -> AnyResult<()> {
        let mut last_seen = self.last_seen.lock().unwrap();
        self.clipboard.write_text(content)?;
        *last_seen = Some(content.to_owned());
        Ok(())
    }

    /// Run one watch cycle.
    pub fn check_once(&self) -> Result<CheckOutcome> {
        // The lock spans the clipboard read: an explicit copy-from-history
        // can never interleave between observation and decision, so a cycle
        // either sees the pre-copy clipboard with the pre-copy state or the
        // post-copy clipboard with the acknowledgment in place.
        let mut last_seen = self.last_seen.lock().unwrap();

        let content = self
            .clipboard
            .read_text()
            .map_err(|e| Error::ClipboardRead(e.to_string()))?;

        // Entries are non-empty by contract; an empty string reads as "no
        // text payload".
        let Some(content) = content.filter(|c| !c.is_empty()) else {
            return Ok(CheckOutcome::NoText);
        };

        if last_seen.as_deref() == Some(content.as_str()) {
            return Ok(CheckOutcome::Unchanged);
        }

        let matches_head = self
            .view
            .borrow()
            .first()
            .is_some_and(|head| head.content == content);
        if matches_head {
            // The user re-copied what is already at the top: remember it,
            // don't duplicate it.
            *last_seen = Some(content);
            return Ok(CheckOutcome::MatchesHead);
        }

        *last_seen = Some(content.clone());
        drop(last_seen);

        debug!("clipboard changed ({} bytes), recording", content.len());
        // A closed channel means shutdown is underway; nothing left to
        // record into.
        let _ = self.writer.send(StoreCommand::Insert { content });
        Ok(CheckOutcome::Submitted)
    }
}
