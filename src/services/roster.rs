use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::player::Player;
use crate::storage::{BackendMode, RosterBackend, StorageError};

/// Thin handle over whichever persistence backend startup selected. The UI
/// only ever talks to this; it never learns which backend is live beyond the
/// mode flag.
#[derive(Clone)]
pub struct RosterService {
    backend: Arc<dyn RosterBackend>,
}

impl RosterService {
    pub fn new(backend: Arc<dyn RosterBackend>) -> Self {
        Self { backend }
    }

    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    pub async fn load_all(&self) -> Result<Vec<Player>, StorageError> {
        self.backend.load_all().await
    }

    pub async fn save(&self, player: Player) -> Result<Player, StorageError> {
        self.backend.save(player).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.backend.delete(id).await
    }

    pub fn subscribe(&self) -> Option<broadcast::Receiver<Vec<Player>>> {
        self.backend.subscribe()
    }
}
