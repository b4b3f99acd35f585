//! Session storage and exports.
//!
//! Each upload becomes a session holding one immutable dataset in memory.
//! Nothing is persisted; ending the session or evicting it drops the data.

pub mod export;

pub use export::*;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::Dataset;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One user's uploaded dataset.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub dataset: Arc<Dataset>,
    pub created_at: DateTime<Utc>,
}

/// In-memory session map with a size cap.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start a session for `dataset`, evicting the oldest when full.
    pub async fn insert(&self, dataset: Dataset) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            dataset: Arc::new(dataset),
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    info!("Evicted session {}", id);
                }
                None => break,
            }
        }
        sessions.insert(session.id, session.clone());
        debug!("Session {} created ({} active)", session.id, sessions.len());

        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// End a session. Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
