use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::player::{sort_roster, Player};
use crate::storage::{BackendMode, RosterBackend, StorageError};

/// Fixed key holding the JSON-serialized player array.
const BLOB_KEY: &str = "tennis_players";

/// Fallback backend used when no realtime store is reachable. The whole
/// roster is one JSON blob in a key-value table: read at startup, rewritten
/// after every mutation. A blob write is all-or-nothing, so a failed save
/// cannot leave a partially updated collection behind.
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub async fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let db_url = format!("sqlite://{}", db_path.display());
        if !Sqlite::database_exists(&db_url).await? {
            info!(path = %db_path.display(), "creating local roster database");
            Sqlite::create_database(&db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory store, used by tests.
    pub async fn open_in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn read_blob(&self) -> Result<Vec<Player>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM roster_blobs WHERE key = ?")
                .bind(BLOB_KEY)
                .fetch_optional(&self.pool)
                .await?;

        let Some((json,)) = row else {
            return Ok(Vec::new());
        };

        // A corrupt blob resets the collection to empty instead of poisoning
        // the session.
        match serde_json::from_str(&json) {
            Ok(players) => Ok(players),
            Err(err) => {
                warn!(error = %err, "local roster blob is not valid JSON, resetting to empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_blob(&self, players: &[Player]) -> Result<(), StorageError> {
        let json = serde_json::to_string(players)?;
        sqlx::query("INSERT OR REPLACE INTO roster_blobs (key, value) VALUES (?, ?)")
            .bind(BLOB_KEY)
            .bind(json)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RosterBackend for LocalStore {
    fn mode(&self) -> BackendMode {
        BackendMode::Local
    }

    async fn load_all(&self) -> Result<Vec<Player>, StorageError> {
        let mut players = self.read_blob().await?;
        sort_roster(&mut players);
        Ok(players)
    }

    async fn save(&self, mut player: Player) -> Result<Player, StorageError> {
        let mut players = self.read_blob().await?;

        if player.id.is_empty() {
            player.id = Uuid::new_v4().to_string();
            players.push(player.clone());
        } else if let Some(existing) = players.iter_mut().find(|p| p.id == player.id) {
            *existing = player.clone();
        } else {
            // Editing a record that vanished from the blob; keep the write.
            players.push(player.clone());
        }

        self.write_blob(&players).await?;
        Ok(player)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut players = self.read_blob().await?;
        players.retain(|p| p.id != id);
        self.write_blob(&players).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::SkillLevel;
    use chrono::Utc;

    fn player(surname: &str) -> Player {
        let now = Utc::now();
        Player {
            id: String::new(),
            surname: surname.to_string(),
            first_name: "Test".to_string(),
            phone: "333 1234567".to_string(),
            level: SkillLevel::Beginner,
            empathy: 3,
            availability: Vec::new(),
            preferred_player_ids: Vec::new(),
            unwanted_player_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_roundtrips() {
        let store = LocalStore::open_in_memory().await.unwrap();

        let saved = store.save(player("Rossi")).await.unwrap();
        assert!(!saved.id.is_empty());

        let all = store.load_all().await.unwrap();
        assert_eq!(all, vec![saved]);
    }

    #[tokio::test]
    async fn test_update_replaces_record_in_place() {
        let store = LocalStore::open_in_memory().await.unwrap();
        let mut saved = store.save(player("Rossi")).await.unwrap();
        store.save(player("Bianchi")).await.unwrap();

        saved.phone = "333 9999999".to_string();
        let updated = store.save(saved.clone()).await.unwrap();
        assert_eq!(updated.id, saved.id);

        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let rossi = all.iter().find(|p| p.id == saved.id).unwrap();
        assert_eq!(rossi.phone, "333 9999999");
    }

    #[tokio::test]
    async fn test_load_all_sorts_by_surname() {
        let store = LocalStore::open_in_memory().await.unwrap();
        // Inserted out of order.
        store.save(player("Verdi")).await.unwrap();
        store.save(player("Bianchi")).await.unwrap();
        store.save(player("Rossi")).await.unwrap();

        let surnames: Vec<String> = store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.surname)
            .collect();
        assert_eq!(surnames, vec!["Bianchi", "Rossi", "Verdi"]);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_absent_id_is_noop() {
        let store = LocalStore::open_in_memory().await.unwrap();
        let saved = store.save(player("Rossi")).await.unwrap();

        store.delete(&saved.id).await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());

        // Deleting again must not error.
        store.delete(&saved.id).await.unwrap();
        store.delete("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_blob_resets_to_empty() {
        let store = LocalStore::open_in_memory().await.unwrap();
        store.save(player("Rossi")).await.unwrap();

        sqlx::query("UPDATE roster_blobs SET value = '{not json' WHERE key = ?")
            .bind(BLOB_KEY)
            .execute(store.pool())
            .await
            .unwrap();

        assert!(store.load_all().await.unwrap().is_empty());

        // The store keeps working after the reset.
        let saved = store.save(player("Bianchi")).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn test_open_creates_database_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roster.db");

        let store = LocalStore::open(&path).await.unwrap();
        let saved = store.save(player("Rossi")).await.unwrap();
        drop(store);

        // Reopen and read back.
        let store = LocalStore::open(&path).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), vec![saved]);
    }
}
