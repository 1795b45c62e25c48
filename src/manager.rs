use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result as AnyResult;
use log::info;
use tokio::sync::{broadcast, mpsc, watch};

use crate::clipboard::{ClipboardPort, ClipboardWatcher};
use crate::entry::ClipboardEntry;
use crate::error::{Error, Result};
use crate::history::{HistoryEvent, HistoryModel};
use crate::runtime::{
    spawn_consumer, spawn_writer, ModelUpdate, PollLoop, StoreCommand, DEFAULT_POLL_INTERVAL,
};
use crate::settings::Settings;
use crate::storage::Store;

/// Wiring for [`ClipboardManager`].
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// SQLite database location.
    pub db_path: PathBuf,
    /// View capacity. The store itself is unbounded; only the view trims.
    pub max_history: usize,
    /// Watch-cycle period.
    pub poll_interval: Duration,
}

impl ManagerConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            max_history: crate::settings::DEFAULT_MAX_HISTORY as usize,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn from_settings(db_path: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            db_path: db_path.into(),
            max_history: settings.max_history_size as usize,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Facade over the store, the view and the three execution contexts.
///
/// `start` performs all fallible startup work (open, migrate, initial
/// load); after that every operation is a channel send and cannot take the
/// caller down. Mutations follow one rule: durable write first, view
/// mutation second, so the view never claims success for a failed write.
pub struct ClipboardManager<C: ClipboardPort> {
    config: ManagerConfig,
    watcher: Arc<ClipboardWatcher<C>>,
    poller: PollLoop,
    started: AtomicBool,
    commands: mpsc::UnboundedSender<StoreCommand>,
    command_rx: Mutex<Option<mpsc::UnboundedReceiver<StoreCommand>>>,
    updates: mpsc::UnboundedSender<ModelUpdate>,
    update_rx: Mutex<Option<mpsc::UnboundedReceiver<ModelUpdate>>>,
    events: broadcast::Sender<HistoryEvent>,
    view_tx: Mutex<Option<watch::Sender<Vec<ClipboardEntry>>>>,
    view_rx: watch::Receiver<Vec<ClipboardEntry>>,
}

impl<C: ClipboardPort> ClipboardManager<C> {
    pub fn new(clipboard: C, config: ManagerConfig) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (updates, update_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(64);
        let (view_tx, view_rx) = watch::channel(Vec::new());

        let watcher = Arc::new(ClipboardWatcher::new(
            clipboard,
            view_rx.clone(),
            commands.clone(),
        ));

        Self {
            poller: PollLoop::new(config.poll_interval),
            config,
            watcher,
            started: AtomicBool::new(false),
            commands,
            command_rx: Mutex::new(Some(command_rx)),
            updates,
            update_rx: Mutex::new(Some(update_rx)),
            events,
            view_tx: Mutex::new(Some(view_tx)),
            view_rx,
        }
    }

    /// Open the store, seed the view from persisted history and bring up
    /// the writer, consumer and poll loop. Storage failure here is fatal
    /// and returned to the caller; a failed start may be retried.
    pub async fn start(&self) -> Result<()> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        let result = self.try_start().await;
        if result.is_err() {
            self.started.store(false, Ordering::Release);
        }
        result
    }

    async fn try_start(&self) -> Result<()> {
        let db_path = self.config.db_path.clone();
        let capacity = self.config.max_history;

        // Blocking I/O stays off the runtime threads.
        let (store, initial) = tokio::task::spawn_blocking(move || -> Result<(Store, Vec<ClipboardEntry>)> {
            let mut store = Store::open(&db_path)?;
            let initial = store
                .load_recent(capacity)
                .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
            Ok((store, initial))
        })
        .await
        .map_err(|e| Error::StorageUnavailable(e.to_string()))??;

        info!("loaded {} persisted clipboard entries", initial.len());

        self.watcher
            .seed_last_seen(initial.first().map(|entry| entry.content.clone()));

        let mut model = HistoryModel::new(capacity);
        model.load_initial(initial);

        let (Some(view_tx), Some(command_rx), Some(update_rx)) = (
            self.view_tx.lock().unwrap().take(),
            self.command_rx.lock().unwrap().take(),
            self.update_rx.lock().unwrap().take(),
        ) else {
            return Ok(());
        };

        let _ = view_tx.send(model.snapshot());
        let _ = self.events.send(HistoryEvent::Loaded(model.snapshot()));

        spawn_writer(store, command_rx, self.updates.clone());
        spawn_consumer(model, update_rx, self.events.clone(), view_tx);
        self.poller.start(Arc::clone(&self.watcher));

        Ok(())
    }

    /// Stop the poll loop. Writes already queued to the writer complete;
    /// their results are applied (or discarded) safely.
    pub fn stop(&self) {
        self.poller.stop();
    }

    /// Subscribe to view change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Current ordered view, most recent first.
    pub fn view(&self) -> watch::Receiver<Vec<ClipboardEntry>> {
        self.view_rx.clone()
    }

    pub fn delete_item(&self, id: i32) {
        let _ = self.commands.send(StoreCommand::Delete { id });
    }

    pub fn update_item(&self, id: i32, content: String) {
        let _ = self.commands.send(StoreCommand::Update { id, content });
    }

    pub fn clear_all(&self) {
        let _ = self.commands.send(StoreCommand::Clear);
    }

    /// Record that the user explicitly copied an existing history item, so
    /// the next watch cycle does not re-record it.
    pub fn set_last_copied(&self, content: String) {
        self.watcher.note_copied(content);
    }

    /// Copy an existing history item back to the OS clipboard, with the
    /// acknowledgment `set_last_copied` would apply.
    pub fn copy_item(&self, content: &str) -> AnyResult<()> {
        self.watcher.copy_from_history(content)
    }

    /// Runtime capacity change from the settings surface. View-only: a
    /// shrink trims the view, the store keeps its rows.
    pub fn set_max_history(&self, capacity: usize) {
        let _ = self.updates.send(ModelUpdate::SetCapacity(capacity));
    }
}

impl<C: ClipboardPort> Drop for ClipboardManager<C> {
    fn drop(&mut self) {
        // Cancel the timer; writer and consumer drain and exit once their
        // channels close behind it.
        self.poller.stop();
    }
}
