//! Checkout Context
//!
//! One bundle of shared flow state per page load, provided at the app
//! root. The resolver lives here so remounts of the success page within
//! the same navigation share its one-shot guard.

use std::sync::Arc;

use atelier_checkout::{CheckoutInitiator, ConfirmationResolver, ParamStore, PurchaseCache};
use atelier_client::HttpBackend;
use atelier_core::CourseBackend;

use crate::storage::SessionStorageStore;

/// Shared flow state
#[derive(Clone)]
pub struct CheckoutContext {
    /// Platform backend, reached same-origin
    pub backend: Arc<dyn CourseBackend>,

    /// Tab-scoped parameter store
    pub store: Arc<dyn ParamStore>,

    /// Read-side purchase cache
    pub cache: Arc<PurchaseCache>,

    /// Checkout initiator
    pub initiator: Arc<CheckoutInitiator>,

    /// One-shot confirmation resolver
    pub resolver: Arc<ConfirmationResolver>,
}

impl Default for CheckoutContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutContext {
    pub fn new() -> Self {
        let backend: Arc<dyn CourseBackend> = Arc::new(HttpBackend::same_origin());
        let store: Arc<dyn ParamStore> = Arc::new(SessionStorageStore::new());
        let cache = Arc::new(PurchaseCache::new(backend.clone()));
        let initiator = Arc::new(CheckoutInitiator::new(backend.clone(), store.clone()));
        let resolver = Arc::new(ConfirmationResolver::new(
            backend.clone(),
            store.clone(),
            cache.clone(),
        ));

        Self {
            backend,
            store,
            cache,
            initiator,
            resolver,
        }
    }
}
