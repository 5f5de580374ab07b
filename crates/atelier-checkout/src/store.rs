//! Session Parameter Store
//!
//! Durable key→string storage scoped to the browser tab: it survives a
//! full-page navigation to an external domain and back, but not a new
//! tab. The checkout flow uses it as a handoff cell for the pending
//! purchase across the payment-provider redirect.

use std::collections::HashMap;
use std::sync::RwLock;

use atelier_core::{PaymentProvider, PendingPurchase};

/// Storage key for the course id of the purchase in flight
pub const PENDING_COURSE_KEY: &str = "pendingPurchaseCourseId";

/// Storage key for the client-generated PayPal session reference
pub const PENDING_PAYPAL_SESSION_KEY: &str = "pendingPaypalSessionId";

/// Tab-scoped key→string storage
///
/// Injected into the flow rather than reached as an ambient singleton so
/// tests can fake it. Operations are infallible from the caller's view:
/// a write that fails (storage quota) degrades to a no-op and the flow
/// treats the missing value as absent context downstream.
pub trait ParamStore: Send + Sync {
    /// Write a value, silently overwriting any previous one
    fn store(&self, key: &str, value: &str);

    /// Read a value without removing it
    fn get(&self, key: &str) -> Option<String>;

    /// Remove a key; idempotent
    fn clear(&self, key: &str);
}

/// Persist a pending purchase under its two storage keys
///
/// At most one pending purchase exists per browser session: the course id
/// is overwritten, and a Stripe intent clears any stale PayPal session
/// reference left by an abandoned earlier attempt.
pub fn store_pending_purchase(store: &dyn ParamStore, pending: &PendingPurchase) {
    store.store(PENDING_COURSE_KEY, &pending.course_id);
    match (pending.provider, &pending.provider_session_id) {
        (PaymentProvider::Paypal, Some(session_id)) => {
            store.store(PENDING_PAYPAL_SESSION_KEY, session_id);
        }
        _ => store.clear(PENDING_PAYPAL_SESSION_KEY),
    }
}

/// Drop every pending-purchase key
///
/// Used when a payment is cancelled and after a confirmed purchase.
pub fn clear_pending_purchase(store: &dyn ParamStore) {
    store.clear(PENDING_COURSE_KEY);
    store.clear(PENDING_PAYPAL_SESSION_KEY);
}

/// In-memory parameter store (for development/testing)
pub struct MemoryParamStore {
    values: RwLock<HashMap<String, String>>,
}

impl Default for MemoryParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryParamStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl ParamStore for MemoryParamStore {
    fn store(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap();
        values.get(key).cloned()
    }

    fn clear(&self, key: &str) {
        let mut values = self.values.write().unwrap();
        values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let store = MemoryParamStore::new();
        store.store(PENDING_COURSE_KEY, "c1");

        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));
        // Reading does not remove the value
        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));
    }

    #[test]
    fn test_store_overwrites() {
        let store = MemoryParamStore::new();
        store.store(PENDING_COURSE_KEY, "c1");
        store.store(PENDING_COURSE_KEY, "c2");
        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c2"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryParamStore::new();
        store.store(PENDING_COURSE_KEY, "c1");

        store.clear(PENDING_COURSE_KEY);
        assert_eq!(store.get(PENDING_COURSE_KEY), None);

        // Clearing an absent key is not an error
        store.clear(PENDING_COURSE_KEY);
        assert_eq!(store.get(PENDING_COURSE_KEY), None);
    }

    #[test]
    fn test_new_stripe_intent_clears_stale_paypal_reference() {
        let store = MemoryParamStore::new();
        store_pending_purchase(
            &store,
            &PendingPurchase {
                course_id: "c1".into(),
                provider: PaymentProvider::Paypal,
                provider_session_id: Some("paypal_1".into()),
            },
        );

        store_pending_purchase(
            &store,
            &PendingPurchase {
                course_id: "c2".into(),
                provider: PaymentProvider::Stripe,
                provider_session_id: None,
            },
        );

        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c2"));
        assert_eq!(store.get(PENDING_PAYPAL_SESSION_KEY), None);
    }

    #[test]
    fn test_clear_pending_purchase_drops_both_keys() {
        let store = MemoryParamStore::new();
        store.store(PENDING_COURSE_KEY, "c1");
        store.store(PENDING_PAYPAL_SESSION_KEY, "paypal_1");

        clear_pending_purchase(&store);

        assert_eq!(store.get(PENDING_COURSE_KEY), None);
        assert_eq!(store.get(PENDING_PAYPAL_SESSION_KEY), None);
    }
}
