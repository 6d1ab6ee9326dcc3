//! Persisted administrator session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Storage slot holding the serialized session.
pub const SESSION_SLOT: &str = "whipsawSession";

/// Key/value storage that outlives a page view (browser local storage, a
/// file, or memory in tests).
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-process storage, used by tests and headless tools.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    credential: String,
    username: String,
}

/// The administrator session, owned by the application root.
///
/// Either anonymous or authenticated. Every transition writes through to
/// the storage slot so a reload sees the same state.
pub struct Session {
    storage: Arc<dyn SessionStorage>,
    current: Option<StoredSession>,
}

impl Session {
    /// Restore the session from storage. A slot that does not hold a usable
    /// session is discarded and the session starts anonymous.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let current = match storage.get(SESSION_SLOT) {
            None => None,
            Some(raw) => match serde_json::from_str::<StoredSession>(&raw) {
                Ok(stored) if !stored.credential.trim().is_empty() => Some(stored),
                Ok(_) => {
                    tracing::debug!("Stored session has an empty credential, discarding");
                    storage.remove(SESSION_SLOT);
                    None
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Stored session is malformed, discarding");
                    storage.remove(SESSION_SLOT);
                    None
                }
            },
        };

        Self { storage, current }
    }

    /// Become authenticated with a freshly issued credential.
    pub fn save(&mut self, credential: impl Into<String>, username: impl Into<String>) {
        let stored = StoredSession {
            credential: credential.into(),
            username: username.into(),
        };
        match serde_json::to_string(&stored) {
            Ok(raw) => self.storage.set(SESSION_SLOT, raw),
            Err(e) => tracing::warn!(error = %e, "Failed to persist session"),
        }
        self.current = Some(stored);
    }

    /// Return to anonymous and forget the stored credential.
    pub fn clear(&mut self) {
        self.storage.remove(SESSION_SLOT);
        self.current = None;
    }

    pub fn credential(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.credential.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
