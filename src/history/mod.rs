mod model;

pub use model::HistoryModel;

use crate::entry::ClipboardEntry;

/// Notification emitted by the consumer context after a view mutation has
/// been applied. Presentation layers subscribe through
/// `ClipboardManager::subscribe`.
#[derive(Debug, Clone)]
pub enum HistoryEvent {
    /// Initial view seeded from persisted history at startup.
    Loaded(Vec<ClipboardEntry>),
    /// New entry prepended at the front of the view.
    Added(ClipboardEntry),
    /// Tail entry trimmed from the view; the store keeps the row.
    Evicted(i32),
    Removed(i32),
    Updated { id: i32, content: String },
    Cleared,
}
