//! Persisted session state
//!
//! The session is two values stored under fixed keys: the credential token
//! and the privilege flag. Only a login flow writes them and only the
//! invalidation path (or an explicit logout) clears them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Storage key of the credential token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the privilege flag
pub const PRIVILEGE_KEY: &str = "is_admin";

/// Session storage errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing storage cannot be read or written
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// The backing storage holds data that is not a session
    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Port for reading and writing the persisted session
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current credential token, if one is persisted
    async fn token(&self) -> Result<Option<SecretString>, SessionError>;

    /// Persist a credential token
    async fn set_token(&self, token: SecretString) -> Result<(), SessionError>;

    /// Whether the cached privilege flag is set
    async fn is_privileged(&self) -> Result<bool, SessionError>;

    /// Persist the privilege flag
    async fn set_privileged(&self, privileged: bool) -> Result<(), SessionError>;

    /// Replace the whole session with a fresh token and privilege flag
    ///
    /// Whatever was stored before is overwritten without being read.
    async fn start(&self, token: SecretString, privileged: bool) -> Result<(), SessionError>;

    /// Remove both the token and the privilege flag
    async fn clear(&self) -> Result<(), SessionError>;
}

impl std::fmt::Debug for dyn SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionStore")
    }
}

/// In-memory session store with process lifetime
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RwLock<SessionRecord>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(SessionRecord {
                token: Some(token.into()),
                is_admin: None,
            }),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.state.read().token.clone().map(SecretString::from))
    }

    async fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        self.state.write().token = Some(token.expose_secret().to_string());
        Ok(())
    }

    async fn is_privileged(&self) -> Result<bool, SessionError> {
        Ok(self.state.read().is_admin.unwrap_or(false))
    }

    async fn set_privileged(&self, privileged: bool) -> Result<(), SessionError> {
        self.state.write().is_admin = Some(privileged);
        Ok(())
    }

    async fn start(&self, token: SecretString, privileged: bool) -> Result<(), SessionError> {
        *self.state.write() = SessionRecord::new(&token, privileged);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.state.write() = SessionRecord::default();
        Ok(())
    }
}

/// On-disk layout: exactly the two session keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(rename = "is_admin", default, skip_serializing_if = "Option::is_none")]
    is_admin: Option<bool>,
}

impl SessionRecord {
    fn new(token: &SecretString, privileged: bool) -> Self {
        Self {
            token: Some(token.expose_secret().to_string()),
            is_admin: Some(privileged),
        }
    }

    const fn is_empty(&self) -> bool {
        self.token.is_none() && self.is_admin.is_none()
    }
}

/// Session store backed by a JSON file
///
/// A missing file is an empty session. Writes replace the file as a whole.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSessionStore {
    /// Create a store persisting to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_record(&self) -> Result<SessionRecord, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(SessionRecord::default()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SessionError::Corrupt(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionRecord::default()),
            Err(e) => Err(SessionError::Unavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_record(&self, record: &SessionRecord) -> Result<(), SessionError> {
        if record.is_empty() {
            return match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Unavailable(format!(
                    "{}: {e}",
                    self.path.display()
                ))),
            };
        }

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| SessionError::Unavailable(format!("{}: {e}", self.path.display())))
    }

    async fn update<F>(&self, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut SessionRecord) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut record = self.read_record().await?;
        change(&mut record);
        self.write_record(&record).await
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.read_record().await?.token.map(SecretString::from))
    }

    async fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        let token = token.expose_secret().to_string();
        self.update(move |record| record.token = Some(token)).await
    }

    async fn is_privileged(&self) -> Result<bool, SessionError> {
        Ok(self.read_record().await?.is_admin.unwrap_or(false))
    }

    async fn set_privileged(&self, privileged: bool) -> Result<(), SessionError> {
        self.update(move |record| record.is_admin = Some(privileged))
            .await
    }

    async fn start(&self, token: SecretString, privileged: bool) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        self.write_record(&SessionRecord::new(&token, privileged))
            .await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        debug!(path = %self.path.display(), "Clearing persisted session");
        self.write_record(&SessionRecord::default()).await
    }
}
