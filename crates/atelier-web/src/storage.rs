//! Tab-Scoped Storage
//!
//! `ParamStore` backed by the browser's sessionStorage: it survives the
//! full-page round trip to an external payment domain and dies with the
//! tab, which is exactly the lifetime the pending purchase needs.

use atelier_checkout::ParamStore;

/// sessionStorage-backed parameter store
pub struct SessionStorageStore;

impl Default for SessionStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.session_storage().ok().flatten())
    }
}

impl ParamStore for SessionStorageStore {
    fn store(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!(key = %key, "session storage unavailable");
            return;
        };
        // Quota/privacy-mode failures degrade to a no-op; the flow treats
        // the missing value as absent context when it reads it back.
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key = %key, "session storage write failed");
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn clear(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
