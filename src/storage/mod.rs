pub mod firebase;
pub mod local;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::player::Player;
use firebase::FirebaseStore;
use local::LocalStore;

/// Persistence backend for the roster. Chosen once at startup and never
/// swapped at runtime; the UI only ever sees this trait.
#[async_trait]
pub trait RosterBackend: Send + Sync {
    fn mode(&self) -> BackendMode;

    /// Full collection read, sorted by surname.
    async fn load_all(&self) -> Result<Vec<Player>, StorageError>;

    /// Creates the record when `id` is empty (assigning a fresh id),
    /// otherwise updates it in place. Returns the persisted record.
    async fn save(&self, player: Player) -> Result<Player, StorageError>;

    /// Removes the record. Deleting an id that is already absent is a no-op
    /// success, not an error.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Full-collection snapshots pushed by the backend whenever the remote
    /// collection changes. `None` for the local backend, which has no
    /// out-of-band change source.
    fn subscribe(&self) -> Option<broadcast::Receiver<Vec<Player>>> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Realtime,
    Local,
}

/// Failures surface as values mapped to transient notifications; no storage
/// error ever aborts the session.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Probes the realtime endpoint when one is configured and falls back to the
/// local store when it is missing or unreachable. No mixed mode: the choice
/// holds for the whole session.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn RosterBackend>> {
    if let Some(url) = &config.realtime_url {
        match FirebaseStore::connect(url, config.probe_timeout()).await {
            Ok(store) => {
                info!(url = %url, "realtime store reachable, using realtime mode");
                return Ok(Arc::new(store));
            }
            Err(err) => {
                warn!(url = %url, error = %err, "realtime store unreachable, falling back to local storage");
            }
        }
    } else {
        info!("no realtime store configured, using local storage");
    }

    let path = config.local_db_path()?;
    let store = LocalStore::open(&path).await?;
    Ok(Arc::new(store))
}
