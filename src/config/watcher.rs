//! Configuration file watcher for hot reload.
//!
//! Only the `[[pages]]` table is meant to change at runtime; the consumer
//! re-registers those pages and ignores the rest of the reloaded config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching the file. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_relevant(&event, &path) => reload(&path, &update_tx),
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?watched, "Config watcher started");
        Ok(watcher)
    }
}

fn is_relevant(event: &Event, path: &Path) -> bool {
    let touches_file = event.paths.is_empty()
        || event.paths.iter().any(|p| p.file_name() == path.file_name());
    touches_file && (event.kind.is_modify() || event.kind.is_create())
}

fn reload(path: &Path, tx: &mpsc::UnboundedSender<AppConfig>) {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(pages = config.pages.len(), "Config reloaded");
            if tx.send(config).is_err() {
                tracing::debug!("Config update receiver dropped");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current pages");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind};

    #[test]
    fn test_relevance_filter() {
        let path = Path::new("site.toml");

        let modify = Event::new(EventKind::Modify(ModifyKind::Any)).add_path("/srv/site.toml".into());
        assert!(is_relevant(&modify, path));

        let other = Event::new(EventKind::Create(CreateKind::File)).add_path("/srv/other.toml".into());
        assert!(!is_relevant(&other, path));

        let access = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path("/srv/site.toml".into());
        assert!(!is_relevant(&access, path));
    }

    #[test]
    fn test_reload_forwards_valid_config() {
        let path = std::env::temp_dir().join(format!("spa-router-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[[pages]]\npath = \"faq\"\ncontent = \"<h1>FAQ</h1>\"\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        reload(&path, &tx);
        let config = rx.try_recv().unwrap();
        assert_eq!(config.pages[0].path, "faq");

        std::fs::write(&path, "[rendering]\nmax_attempts = 0\n").unwrap();
        reload(&path, &tx);
        assert!(rx.try_recv().is_err());

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
