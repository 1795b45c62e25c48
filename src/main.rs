use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use clipstack::settings::Settings;
use clipstack::{ClipboardManager, ManagerConfig, SystemClipboard};

fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .context("no local data directory on this platform")?
        .join("clipstack");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create data directory {}", dir.display()))?;
    Ok(dir)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = data_dir()?;
    let settings = Settings::load(&dir.join("config.properties"))?;
    info!(
        "history capped at {} entries, theme {}",
        settings.max_history_size, settings.theme
    );

    let clipboard = SystemClipboard::new()?;
    let manager = ClipboardManager::new(
        clipboard,
        ManagerConfig::from_settings(dir.join("clipboard.db"), &settings),
    );

    // Headless trace of view changes; a tray front-end subscribes the same
    // way.
    let mut events = manager.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            debug!("history event: {:?}", event);
        }
    });

    manager.start().await?;
    info!("watching clipboard (ctrl-c to exit)");

    tokio::signal::ctrl_c().await?;
    manager.stop();
    Ok(())
}
