//! Persisted key/value storage for session data.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store writes its token and identity through [`SessionStorage`]
//! so the same logic runs against browser `localStorage` on the client and an
//! in-memory map during SSR and tests.
//!
//! TRADE-OFFS
//! ==========
//! Browser writes are best-effort: a full or disabled `localStorage` drops the
//! write silently and the session simply does not survive a reload.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Minimal string key/value store backing the session.
///
/// Implementations must be `Send + Sync` so stores can live in reactive
/// context.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Remove `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// `window.localStorage`, looked up on every call.
///
/// Outside the browser every read misses and every write is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage write failed: key={key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.remove_item(key).is_err() {
                leptos::logging::warn!("localStorage remove failed: key={key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local storage. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
