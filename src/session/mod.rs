//! Client-side authentication session.
//!
//! `AuthStore` keeps the current session in memory and writes through to an
//! injected `SessionStorage`, so the store can be exercised without touching
//! the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::credentials::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub trait SessionStorage {
    fn load(&self) -> Result<Option<AuthSession>, SessionError>;
    fn save(&self, session: &AuthSession) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Volatile storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<AuthSession>>,
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Durable storage as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let session: AuthSession = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct AuthStore<S: SessionStorage> {
    storage: S,
    current: Option<AuthSession>,
}

impl<S: SessionStorage> AuthStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Load any persisted session into memory
    pub fn hydrate(&mut self) -> Result<Option<&AuthSession>, SessionError> {
        self.current = self.storage.load()?;
        Ok(self.current.as_ref())
    }

    pub fn login(&mut self, session: AuthSession) -> Result<(), SessionError> {
        self.storage.save(&session)?;
        self.current = Some(session);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.storage.clear()?;
        self.current = None;
        Ok(())
    }

    pub fn current(&self) -> Option<&AuthSession> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.current
            .as_ref()
            .map(|s| !s.is_expired(now))
            .unwrap_or(false)
    }

    /// Token to send with requests, if the session is still live
    pub fn bearer_token(&self, now: DateTime<Utc>) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|s| !s.is_expired(now))
            .map(|s| s.token.as_str())
    }
}
