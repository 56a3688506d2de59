//! Session context: the bearer token and the signed-in user
//!
//! One [`Session`] is shared (by clone) between the API client and the
//! stores. The token is persisted through a [`TokenStore`] so a restarted
//! client can resume; the identity is only ever held in memory.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use tracing::warn;

use crate::types::UserInfo;

/// Persistence for the bearer token between client runs
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Keeps the token for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Stores the token in a plain file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/station-registry/token`
    pub fn default_path() -> PathBuf {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("station-registry")
            .join("token")
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!("Failed to persist token to {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserInfo>,
}

#[derive(Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("Session")
            .field("token", &state.token.as_ref().map(|_| "<redacted>"))
            .field("user", &state.user)
            .finish()
    }
}

impl Session {
    /// New session, resuming any token the store holds.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        Self {
            state: Arc::new(RwLock::new(SessionState { token, user: None })),
            store,
        }
    }

    /// Session backed by a [`MemoryTokenStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).user.clone()
    }

    /// A token is held. The identity may still be loading.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .token
            .is_some()
    }

    /// Set token and identity together and persist the token.
    pub fn establish(&self, token: String, user: UserInfo) {
        self.store.save(&token);
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.token = Some(token);
        state.user = Some(user);
    }

    pub fn set_user(&self, user: UserInfo) {
        self.state.write().unwrap_or_else(|e| e.into_inner()).user = Some(user);
    }

    /// Drop token and identity and remove the persisted token.
    pub fn clear(&self) {
        self.store.clear();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.token = None;
        state.user = None;
    }
}
