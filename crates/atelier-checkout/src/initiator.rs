//! Checkout Initiator
//!
//! Starts an external payment flow for exactly one course. The pending
//! purchase is persisted before any call that could lead to the browser
//! unloading the page; the write must land first or the return page has
//! nothing to reconnect the payment to.

use std::sync::Arc;

use serde::Deserialize;

use atelier_core::{
    Course, CourseBackend, PaymentProvider, PendingPurchase, ShoppingItem, UserProfile,
};

use crate::error::{CheckoutError, Result};
use crate::store::{store_pending_purchase, ParamStore};

/// Fixed unit price, in cents, until per-course pricing lands backend-side
pub const COURSE_PRICE_CENTS: i64 = 4900;

const COURSE_PRICE_CURRENCY: &str = "usd";

/// Where the initiator sends the caller next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutStart {
    /// Navigate the browser to this provider URL
    Redirect(String),

    /// Caller has no saved profile: run profile setup instead.
    /// No backend call was made.
    ProfileRequired,
}

/// Provider-issued checkout session payload
///
/// The backend hands this over as a raw JSON string; only `id` and `url`
/// matter to the client, everything else is opaque.
#[derive(Debug, Deserialize)]
struct SessionPayload {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    url: Option<String>,
}

/// Starts checkout flows against the platform backend
pub struct CheckoutInitiator {
    backend: Arc<dyn CourseBackend>,
    store: Arc<dyn ParamStore>,
}

impl CheckoutInitiator {
    pub fn new(backend: Arc<dyn CourseBackend>, store: Arc<dyn ParamStore>) -> Self {
        Self { backend, store }
    }

    /// Start a Stripe-hosted checkout for a course
    ///
    /// `origin` is the scheme+host the return pages live under. On
    /// success the returned URL points at the provider's hosted page and
    /// the pending course id is already persisted.
    pub async fn begin_stripe(
        &self,
        course: &Course,
        profile: Option<&UserProfile>,
        origin: &str,
    ) -> Result<CheckoutStart> {
        if profile.is_none() {
            tracing::debug!(course_id = %course.id, "checkout refused: no saved profile");
            return Ok(CheckoutStart::ProfileRequired);
        }

        let success_url = format!("{}/payment-success", origin);
        let cancel_url = format!("{}/payment-failure", origin);

        let items = vec![ShoppingItem {
            product_name: course.title.clone(),
            product_description: course.description.clone(),
            price_in_cents: COURSE_PRICE_CENTS,
            currency: COURSE_PRICE_CURRENCY.into(),
            quantity: 1,
        }];

        // Persist intent first; a stale value is harmless and gets
        // overwritten by the next attempt.
        store_pending_purchase(
            self.store.as_ref(),
            &PendingPurchase {
                course_id: course.id.clone(),
                provider: PaymentProvider::Stripe,
                provider_session_id: None,
            },
        );

        let payload = self
            .backend
            .create_checkout_session(&items, &success_url, &cancel_url)
            .await?;

        let session: SessionPayload = serde_json::from_str(&payload)?;
        let (id, url) = match (session.id, session.url) {
            (Some(id), Some(url)) if !id.is_empty() && !url.is_empty() => (id, url),
            _ => {
                return Err(CheckoutError::MalformedPayload(
                    "payload lacks id or url".into(),
                ))
            }
        };

        tracing::info!(course_id = %course.id, session_id = %id, "created checkout session");
        Ok(CheckoutStart::Redirect(url))
    }

    /// Start a PayPal checkout for a course
    ///
    /// Registers the pending payment with the backend under a
    /// client-generated session id, then hands back the return URL
    /// carrying that id as the `token` parameter. There is no provider
    /// approval endpoint in this integration yet; a real one redirects
    /// to PayPal here instead of straight to the return page.
    pub async fn begin_paypal(
        &self,
        course: &Course,
        profile: Option<&UserProfile>,
        origin: &str,
    ) -> Result<CheckoutStart> {
        if profile.is_none() {
            tracing::debug!(course_id = %course.id, "checkout refused: no saved profile");
            return Ok(CheckoutStart::ProfileRequired);
        }

        let session_id = paypal_session_id();

        store_pending_purchase(
            self.store.as_ref(),
            &PendingPurchase {
                course_id: course.id.clone(),
                provider: PaymentProvider::Paypal,
                provider_session_id: Some(session_id.clone()),
            },
        );

        self.backend
            .create_paypal_payment(&course.id, &session_id)
            .await?;

        tracing::info!(course_id = %course.id, session_id = %session_id, "created PayPal payment");

        let url = format!(
            "{}/payment-success?token={}&paymentSource=paypal",
            origin, session_id
        );
        Ok(CheckoutStart::Redirect(url))
    }
}

/// Client-generated PayPal session identifier
///
/// Timestamp plus random suffix, unpredictable enough that concurrent
/// browser sessions cannot collide.
fn paypal_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("paypal_{}_{}", millis, &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use crate::store::{MemoryParamStore, PENDING_COURSE_KEY, PENDING_PAYPAL_SESSION_KEY};
    use atelier_core::Tier;
    use chrono::Utc;
    use std::sync::atomic::Ordering;

    fn course() -> Course {
        Course {
            id: "c1".into(),
            title: "Draping Fundamentals".into(),
            description: "From muslin to silhouette".into(),
            tier: Tier::Paid,
            created_at: Utc::now(),
            modules: Vec::new(),
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new("Ada")
    }

    fn setup(mock: MockBackend) -> (Arc<MockBackend>, Arc<MemoryParamStore>, CheckoutInitiator) {
        let mock = Arc::new(mock);
        let store = Arc::new(MemoryParamStore::new());
        let initiator = CheckoutInitiator::new(mock.clone(), store.clone());
        (mock, store, initiator)
    }

    #[tokio::test]
    async fn test_stripe_checkout_redirects_and_persists_intent() {
        let (mock, store, initiator) = setup(MockBackend::new());
        let profile = profile();

        let start = initiator
            .begin_stripe(&course(), Some(&profile), "https://atelier.test")
            .await
            .unwrap();

        assert_eq!(
            start,
            CheckoutStart::Redirect("https://checkout.example.com/cs_test_1".into())
        );
        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));

        let items = mock.calls.last_items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Draping Fundamentals");
        assert_eq!(items[0].price_in_cents, COURSE_PRICE_CENTS);
        assert_eq!(items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_no_profile_triggers_profile_setup_without_backend_call() {
        let (mock, store, initiator) = setup(MockBackend::new());

        let start = initiator
            .begin_stripe(&course(), None, "https://atelier.test")
            .await
            .unwrap();

        assert_eq!(start, CheckoutStart::ProfileRequired);
        assert_eq!(mock.calls.create_checkout_session.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(PENDING_COURSE_KEY), None);
    }

    #[tokio::test]
    async fn test_payload_without_url_is_a_checkout_failure() {
        let (_, store, initiator) =
            setup(MockBackend::new().with_checkout_payload(r#"{"id":"cs_test_1"}"#));
        let profile = profile();

        let err = initiator
            .begin_stripe(&course(), Some(&profile), "https://atelier.test")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::MalformedPayload(_)));
        // The already-written intent is harmless; the next attempt
        // overwrites it.
        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_unparseable_payload_is_a_checkout_failure() {
        let (_, _, initiator) = setup(MockBackend::new().with_checkout_payload("not json"));
        let profile = profile();

        let err = initiator
            .begin_stripe(&course(), Some(&profile), "https://atelier.test")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Json(_)));
        assert_eq!(err.user_message(), "Invalid checkout session response");
    }

    #[tokio::test]
    async fn test_paypal_checkout_persists_both_keys_and_registers_payment() {
        let (mock, store, initiator) = setup(MockBackend::new());
        let profile = profile();

        let start = initiator
            .begin_paypal(&course(), Some(&profile), "https://atelier.test")
            .await
            .unwrap();

        let session_id = store.get(PENDING_PAYPAL_SESSION_KEY).unwrap();
        assert!(session_id.starts_with("paypal_"));
        assert_eq!(store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));

        let registered = mock.calls.last_paypal_create.lock().unwrap().clone();
        assert_eq!(registered, Some(("c1".into(), session_id.clone())));

        let CheckoutStart::Redirect(url) = start else {
            panic!("expected redirect");
        };
        assert!(url.contains(&format!("token={}", session_id)));
        assert!(url.contains("paymentSource=paypal"));
    }

    #[tokio::test]
    async fn test_paypal_without_profile_is_refused() {
        let (mock, _, initiator) = setup(MockBackend::new());

        let start = initiator
            .begin_paypal(&course(), None, "https://atelier.test")
            .await
            .unwrap();

        assert_eq!(start, CheckoutStart::ProfileRequired);
        assert_eq!(mock.calls.create_paypal_payment.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_paypal_session_ids_do_not_collide() {
        let a = paypal_session_id();
        let b = paypal_session_id();
        assert_ne!(a, b);
    }
}
