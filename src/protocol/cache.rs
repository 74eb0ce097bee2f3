//! Per-client memory of the last frame sent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// What the server believes a display currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFrameState {
    /// Packed frame of the last packet built for this client
    pub last_frame: Option<Vec<u8>>,
    /// Refresh slot of the last packet built for this client
    pub last_refresh_slot: Option<i64>,
}

/// Client states keyed by client identifier.
///
/// Each entry sits behind its own async lock so concurrent updates for one
/// client run one after another while different clients never contend.
/// Entries are never evicted; memory grows with the number of distinct
/// client identifiers seen.
#[derive(Debug, Default, Clone)]
pub struct FrameCache {
    clients: Arc<Mutex<HashMap<String, Arc<Mutex<ClientFrameState>>>>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, client: &str) -> Arc<Mutex<ClientFrameState>> {
        let mut clients = self.clients.lock().await;
        clients
            .entry(client.to_string())
            .or_insert_with(|| {
                log::debug!("New display client '{}'", client);
                Arc::new(Mutex::new(ClientFrameState::default()))
            })
            .clone()
    }

    /// Locks `client`'s state until the guard is dropped.
    pub async fn lock(&self, client: &str) -> OwnedMutexGuard<ClientFrameState> {
        self.entry(client).await.lock_owned().await
    }

    /// Copy of `client`'s state, if the client has been seen.
    pub async fn snapshot(&self, client: &str) -> Option<ClientFrameState> {
        let entry = self.clients.lock().await.get(client).cloned()?;
        let state = entry.lock().await.clone();
        Some(state)
    }

    /// Forgets the cached frame so the next update is a full one.
    pub async fn invalidate(&self, client: &str) {
        let mut state = self.lock(client).await;
        state.last_frame = None;
        log::info!("Cache for '{}' invalidated, next update is full", client);
    }

    /// Number of clients tracked.
    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }
}
