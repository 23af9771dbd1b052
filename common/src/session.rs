//! # Session Persistence
//!
//! A browser keeps the access token in memory and the refresh token in an
//! HTTP-only cookie. A command line process dies after every command, so both
//! halves are written to a [`SessionStore`] and seeded back on the next run.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{padron_dir, ConfigError};

/// Everything needed to resume an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Raw `name=value` pair of the refresh cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_cookie: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_cookie.is_none()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<SessionSnapshot>, ConfigError>;
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ConfigError>;
    async fn clear(&self) -> Result<(), ConfigError>;
}

/// TOML file store, `~/.padron/session.toml` by default. Written owner-only on unix.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        padron_dir().join("session.toml")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, ConfigError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: SessionSnapshot = toml::from_str(&content)?;
        Ok((!snapshot.is_empty()).then_some(snapshot))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, toml::to_string_pretty(snapshot)?).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, perms).await?;
        }

        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ConfigError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the snapshot in memory only.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<SessionSnapshot>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<SessionSnapshot> {
        self.inner.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, ConfigError> {
        Ok(self.current().filter(|snapshot| !snapshot.is_empty()))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ConfigError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(snapshot.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), ConfigError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = None;
        }
        Ok(())
    }
}
