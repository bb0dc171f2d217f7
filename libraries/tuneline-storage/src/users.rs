//! Credential store
//!
//! Maps usernames to stored credential records in a JSON document. Password
//! hashing happens before records reach this store.

use crate::persist::{read_document, write_document};
use indexmap::IndexMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tuneline_core::{Result, TunelineError, UserRecord};

pub struct UserStore {
    path: PathBuf,
    users: RwLock<IndexMap<String, UserRecord>>,
}

impl UserStore {
    /// Load the credential document; a missing file starts an empty store
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let users: IndexMap<String, UserRecord> = read_document(&path).await?.unwrap_or_default();
        tracing::info!("Loaded {} user(s) from {}", users.len(), path.display());

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    /// Store a new user record and persist the document
    ///
    /// # Errors
    /// `Validation` for a blank username, `UserAlreadyExists` if taken.
    pub async fn insert(&self, username: &str, record: UserRecord) -> Result<()> {
        if username.trim().is_empty() {
            return Err(TunelineError::validation("Username is required"));
        }

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(TunelineError::UserAlreadyExists(username.to_string()));
        }

        users.insert(username.to_string(), record);
        if let Err(e) = write_document(&self.path, &*users).await {
            users.shift_remove(username);
            tracing::error!("Failed to persist user '{}': {}", username, e);
            return Err(e.into());
        }

        tracing::info!("Registered user '{}'", username);
        Ok(())
    }

    /// Stored record for `username`, if any
    pub async fn get(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.users.read().await.contains_key(username)
    }

    /// Usernames in registration order
    pub async fn list_usernames(&self) -> Vec<String> {
        self.users.read().await.keys().cloned().collect()
    }
}
