//! Session state: the client-held proof of authentication.
//!
//! The store is the single source of truth for the bearer token and the
//! user identity. It persists to `<home>/session.json` with restricted
//! permissions (0600) and is mutated only through `login` and `logout`.
//! Tokens are never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Authenticated user identity as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A live session: bearer token plus the identity it belongs to.
///
/// Keeping both fields in one value makes the consistency invariant
/// structural: the store is authenticated exactly when it holds
/// `Some(Session)`, never a token without a user or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Persistence adapter for the session store.
///
/// The store itself never touches the filesystem directly; persistence is
/// pluggable so tests and ephemeral runs can swap in an in-memory adapter.
pub trait SessionPersist: Send + Sync {
    /// Loads the previously saved session, if any.
    fn load(&self) -> Result<Option<Session>>;

    /// Saves the current session state, including the cleared state.
    fn save(&self, session: Option<&Session>) -> Result<()>;
}

/// File-backed persistence at `${CLX_HOME}/session.json`.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Adapter pointing at the default session file location.
    pub fn default_path() -> Self {
        Self::new(paths::session_path())
    }
}

impl SessionPersist for FileSession {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    fn save(&self, session: Option<&Session>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| {
                    format!("Failed to open {} for writing", self.path.display())
                })?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// In-memory persistence for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySession {
    slot: RwLock<Option<Session>>,
}

impl SessionPersist for MemorySession {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: Option<&Session>) -> Result<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = session.cloned();
        Ok(())
    }
}

/// Single source of truth for authentication state.
///
/// All components read through the query methods; the only mutations are
/// `login` and `logout`, each a single lock-guarded swap, so no observer
/// ever sees a partially updated session.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    persist: Box<dyn SessionPersist>,
}

impl SessionStore {
    /// Creates an empty (unauthenticated) store backed by the given adapter.
    pub fn new(persist: impl SessionPersist + 'static) -> Self {
        Self {
            current: RwLock::new(None),
            persist: Box::new(persist),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads persisted state into the store and returns a snapshot of it.
    ///
    /// A first run with no prior state leaves the store unauthenticated.
    pub fn hydrate(&self) -> Result<Option<Session>> {
        let loaded = self.persist.load()?;
        *self.write() = loaded.clone();
        Ok(loaded)
    }

    /// Establishes a session atomically and persists it.
    ///
    /// The in-memory transition itself has no failure mode; a persistence
    /// failure only costs the reload survival and is logged, not surfaced.
    pub fn login(&self, token: impl Into<String>, user: UserProfile) {
        let session = Session {
            token: token.into(),
            user,
        };
        *self.write() = Some(session.clone());
        if let Err(err) = self.persist.save(Some(&session)) {
            tracing::warn!("failed to persist session: {err:#}");
        }
    }

    /// Clears the session atomically and persists the cleared state.
    ///
    /// Returns true when a session was actually cleared. Logging out while
    /// already logged out is a no-op and returns false; callers use this
    /// edge to react to expiry exactly once.
    pub fn logout(&self) -> bool {
        let had_session = self.write().take().is_some();
        if had_session {
            if let Err(err) = self.persist.save(None) {
                tracing::warn!("failed to persist cleared session: {err:#}");
            }
        }
        had_session
    }

    /// Returns a clone of the current session, if any.
    pub fn snapshot(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Returns the current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    /// Returns the current user identity, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }
}
