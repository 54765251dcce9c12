//! TOML configuration loading and hot-reload watching.
//!
//! The driver loads the config once at startup and then watches the
//! file for changes. The watcher's callback runs on the notify thread
//! but only pushes a marker into a channel; the driver drains it
//! between ticks, so all config swapping stays on the single driver
//! thread.

use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result, anyhow};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Config;

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: Config = toml::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    config
        .validate()
        .map_err(|e| anyhow!("invalid config: {e}"))?;
    Ok(config)
}

/// Watches one config file and reports "something changed" markers.
pub struct ConfigWatcher {
    // Held for its Drop: dropping the watcher stops the notify thread.
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl ConfigWatcher {
    pub fn watch(path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                if let Ok(event) = res {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let _ = tx.send(());
                    }
                }
            })
            .context("creating config watcher")?;
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", path.display()))?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending change markers. Returns true if the file changed
    /// since the last call; editors often fire several events per save,
    /// so they coalesce into one reload.
    pub fn take_change(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
