use std::thread::{self, JoinHandle};

use log::{debug, error};
use tokio::sync::mpsc;

use crate::storage::Store;

use super::consumer::ModelUpdate;

/// A durable mutation, applied by the writer thread in submission order.
/// Timer-driven inserts and user-initiated edits share one channel, so FIFO
/// on the writer is FIFO for everyone.
#[derive(Debug)]
pub enum StoreCommand {
    Insert { content: String },
    Update { id: i32, content: String },
    Delete { id: i32 },
    Clear,
}

/// Spawn the writer thread.
///
/// It owns the only open store handle; the command channel is the sole way
/// to reach it. The thread drains queued commands and exits once every
/// sender is gone.
pub(crate) fn spawn_writer(
    mut store: Store,
    mut commands: mpsc::UnboundedReceiver<StoreCommand>,
    updates: mpsc::UnboundedSender<ModelUpdate>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("clipstack-writer".into())
        .spawn(move || {
            while let Some(command) = commands.blocking_recv() {
                apply(&mut store, command, &updates);
            }
            debug!("store writer shutting down");
        })
        .expect("cannot spawn store writer thread")
}

/// Durable write first; the view update is only forwarded once the write
/// succeeded. Failures stay here as log lines; the poll loop and the
/// consumer never see them.
fn apply(store: &mut Store, command: StoreCommand, updates: &mpsc::UnboundedSender<ModelUpdate>) {
    let update = match command {
        StoreCommand::Insert { content } => {
            let timestamp = chrono::Local::now().naive_local();
            match store.insert(&content, timestamp) {
                Ok(entry) => ModelUpdate::Prepend(entry),
                Err(e) => {
                    error!("cannot persist clipboard entry: {}", e);
                    return;
                }
            }
        }
        StoreCommand::Update { id, content } => match store.update(id, &content) {
            Ok(()) => ModelUpdate::Replace { id, content },
            Err(e) => {
                error!("cannot update entry {}: {}", id, e);
                return;
            }
        },
        StoreCommand::Delete { id } => match store.delete(id) {
            Ok(()) => ModelUpdate::Remove { id },
            Err(e) => {
                error!("cannot delete entry {}: {}", id, e);
                return;
            }
        },
        StoreCommand::Clear => match store.clear() {
            Ok(()) => ModelUpdate::Clear,
            Err(e) => {
                error!("cannot clear history: {}", e);
                return;
            }
        },
    };

    // The consumer may already be gone during shutdown; late results are
    // discardable.
    let _ = updates.send(update);
}
