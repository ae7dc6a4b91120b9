use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::domain::player::{sort_roster, Player};
use crate::storage::{BackendMode, RosterBackend, StorageError};

/// Collection path under the database root.
const COLLECTION: &str = "players";
/// Timeout for plain REST calls. The event-stream request deliberately has
/// none; it stays open for the session.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Realtime backend over the store's REST surface. Each child of the
/// `players` collection is keyed by a store-generated id, value = the player
/// fields minus `id`. Change notification is coarse-grained on purpose: on
/// any event from the listener the entire collection is re-fetched and
/// broadcast, and subscribers replace their local copy wholesale.
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    snapshots: broadcast::Sender<Vec<Player>>,
    listener_started: AtomicBool,
}

impl FirebaseStore {
    /// Probes the endpoint with a short timeout; an unreachable store fails
    /// here so the caller can fall back to local storage.
    pub async fn connect(base_url: &str, probe_timeout: Duration) -> Result<Self, StorageError> {
        let client = reqwest::Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        client
            .get(format!("{base_url}/{COLLECTION}.json?shallow=true"))
            .timeout(probe_timeout)
            .send()
            .await?
            .error_for_status()?;

        let (snapshots, _) = broadcast::channel(8);
        Ok(Self {
            client,
            base_url,
            snapshots,
            listener_started: AtomicBool::new(false),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}.json", self.base_url)
    }

    fn child_url(&self, id: &str) -> String {
        format!("{}/{COLLECTION}/{id}.json", self.base_url)
    }

    async fn fetch_snapshot(
        client: &reqwest::Client,
        url: &str,
    ) -> Result<Vec<Player>, StorageError> {
        // The store returns `null` for an empty collection.
        let body: Option<BTreeMap<String, serde_json::Value>> = client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(parse_snapshot(body.unwrap_or_default()))
    }

    /// Holds a streaming GET against the collection and re-fetches the full
    /// snapshot on every change event, forever. Connection loss backs off and
    /// reconnects; the next successful snapshot is authoritative.
    async fn listen(
        client: reqwest::Client,
        url: String,
        snapshots: broadcast::Sender<Vec<Player>>,
    ) {
        loop {
            match Self::listen_once(&client, &url, &snapshots).await {
                Ok(()) => debug!("event stream closed by the store, reconnecting"),
                Err(err) => warn!(error = %err, "event stream failed, reconnecting"),
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn listen_once(
        client: &reqwest::Client,
        url: &str,
        snapshots: &broadcast::Sender<Vec<Player>>,
    ) -> Result<(), StorageError> {
        let response = client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        let mut stream = response.bytes_stream();
        let mut buffer = SseBuffer::default();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for event in buffer.push(&String::from_utf8_lossy(&chunk)) {
                match event.as_str() {
                    // Both carry a change; the payload is ignored in favor of
                    // a full re-read so subscribers always see the entire
                    // collection.
                    "put" | "patch" => {
                        let snapshot = Self::fetch_snapshot(client, url).await?;
                        info!(players = snapshot.len(), "roster snapshot received");
                        let _ = snapshots.send(snapshot);
                    }
                    "keep-alive" => {}
                    // The store asked us to re-establish the stream.
                    "cancel" | "auth_revoked" => return Ok(()),
                    other => debug!(event = other, "ignoring unknown stream event"),
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RosterBackend for FirebaseStore {
    fn mode(&self) -> BackendMode {
        BackendMode::Realtime
    }

    async fn load_all(&self) -> Result<Vec<Player>, StorageError> {
        Self::fetch_snapshot(&self.client, &self.collection_url()).await
    }

    async fn save(&self, mut player: Player) -> Result<Player, StorageError> {
        // The id lives in the child key, never in the stored value.
        let mut value = serde_json::to_value(&player)?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove("id");
        }

        if player.id.is_empty() {
            #[derive(Deserialize)]
            struct PushResponse {
                name: String,
            }

            let pushed: PushResponse = self
                .client
                .post(self.collection_url())
                .timeout(REQUEST_TIMEOUT)
                .json(&value)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            player.id = pushed.name;
        } else {
            self.client
                .patch(self.child_url(&player.id))
                .timeout(REQUEST_TIMEOUT)
                .json(&value)
                .send()
                .await?
                .error_for_status()?;
        }

        Ok(player)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        // Deleting an absent child succeeds at the store, matching the no-op
        // contract.
        self.client
            .delete(self.child_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<Vec<Player>>> {
        if !self.listener_started.swap(true, Ordering::SeqCst) {
            tokio::spawn(Self::listen(
                self.client.clone(),
                self.collection_url(),
                self.snapshots.clone(),
            ));
        }
        Some(self.snapshots.subscribe())
    }
}

/// Maps the raw collection object (child key to child value) onto players,
/// injecting the key as the record id. Malformed children are skipped rather
/// than failing the whole snapshot.
fn parse_snapshot(children: BTreeMap<String, serde_json::Value>) -> Vec<Player> {
    let mut players = Vec::with_capacity(children.len());
    for (key, value) in children {
        match serde_json::from_value::<Player>(value) {
            Ok(mut player) => {
                player.id = key;
                players.push(player);
            }
            Err(err) => warn!(key = %key, error = %err, "skipping malformed roster record"),
        }
    }
    sort_roster(&mut players);
    players
}

/// Incremental server-sent-events splitter. Events are blocks separated by a
/// blank line; only the event name matters here. CR is stripped on the way in
/// so CRLF-framed streams split the same as LF-framed ones.
#[derive(Default)]
struct SseBuffer {
    pending: String,
}

impl SseBuffer {
    fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.extend(chunk.chars().filter(|&c| c != '\r'));
        let mut events = Vec::new();

        while let Some(boundary) = self.pending.find("\n\n") {
            let block: String = self.pending.drain(..boundary + 2).collect();
            for line in block.lines() {
                if let Some(name) = line.strip_prefix("event:") {
                    events.push(name.trim().to_string());
                }
            }
        }
        events
    }
}
