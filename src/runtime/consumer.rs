use log::debug;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::entry::ClipboardEntry;
use crate::history::{HistoryEvent, HistoryModel};

/// A view mutation. Produced by the writer thread after the corresponding
/// durable operation succeeded, or by the manager for view-only changes
/// (capacity).
#[derive(Debug)]
pub(crate) enum ModelUpdate {
    Prepend(ClipboardEntry),
    Replace { id: i32, content: String },
    Remove { id: i32 },
    Clear,
    SetCapacity(usize),
}

/// Spawn the consumer task: the one place the view is mutated.
///
/// Updates are applied in arrival order, which matches store submission
/// order; after each one the full ordered view is republished for the
/// watcher and any pull-based observer.
pub(crate) fn spawn_consumer(
    mut model: HistoryModel,
    mut updates: mpsc::UnboundedReceiver<ModelUpdate>,
    events: broadcast::Sender<HistoryEvent>,
    view: watch::Sender<Vec<ClipboardEntry>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            apply(&mut model, update, &events);
            let _ = view.send(model.snapshot());
        }
        debug!("history consumer shutting down");
    })
}

fn apply(
    model: &mut HistoryModel,
    update: ModelUpdate,
    events: &broadcast::Sender<HistoryEvent>,
) {
    match update {
        ModelUpdate::Prepend(entry) => {
            let evicted = model.prepend(entry.clone());
            let _ = events.send(HistoryEvent::Added(entry));
            if let Some(evicted) = evicted {
                let _ = events.send(HistoryEvent::Evicted(evicted.id));
            }
        }
        ModelUpdate::Replace { id, content } => {
            if model.replace_content(id, &content) {
                let _ = events.send(HistoryEvent::Updated { id, content });
            }
        }
        ModelUpdate::Remove { id } => {
            if model.remove_by_id(id) {
                let _ = events.send(HistoryEvent::Removed(id));
            }
        }
        ModelUpdate::Clear => {
            model.clear();
            let _ = events.send(HistoryEvent::Cleared);
        }
        ModelUpdate::SetCapacity(capacity) => {
            for evicted in model.set_capacity(capacity) {
                let _ = events.send(HistoryEvent::Evicted(evicted.id));
            }
        }
    }
}
