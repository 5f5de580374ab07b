//! Confirmation Resolver
//!
//! Runs when the browser returns from a payment provider. Determines
//! which provider the return came from, reconnects it to the pending
//! purchase, and confirms with the backend exactly once per page load.
//!
//! The page-level state machine is `loading → success` or
//! `loading → error`, both terminal. Re-renders and remounts within the
//! same navigation must not repeat the backend call; the resolver keeps
//! an instance-scoped one-shot guard for that.

use std::sync::{Arc, Mutex};

use atelier_core::CourseBackend;

use crate::cache::PurchaseCache;
use crate::error::{CheckoutError, MissingContext, Result};
use crate::store::{ParamStore, PENDING_COURSE_KEY, PENDING_PAYPAL_SESSION_KEY};

/// Query parameters of the payment return URL
///
/// Stripe returns `session_id`; the PayPal path returns `token` plus the
/// `paymentSource=paypal` marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnParams {
    pub session_id: Option<String>,
    pub token: Option<String>,
    pub payment_source: Option<String>,
}

impl ReturnParams {
    /// Parse from a raw query string; a leading `?` is tolerated
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let mut parts = pair.splitn(2, '=');
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key {
                "session_id" => params.session_id = Some(value.to_string()),
                "token" => params.token = Some(value.to_string()),
                "paymentSource" => params.payment_source = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }

    fn is_paypal_return(&self) -> bool {
        self.token.is_some() && self.payment_source.as_deref() == Some("paypal")
    }
}

/// Outcome of a confirmation attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// Resolution still in flight
    Loading,

    /// Purchase confirmed and caches invalidated
    Success,

    /// Confirmation failed; the message is ready for display
    Error(String),
}

enum ResolveState {
    Idle,
    InFlight,
    Done(ConfirmationOutcome),
}

/// One-shot resolver for the return-from-payment page
pub struct ConfirmationResolver {
    backend: Arc<dyn CourseBackend>,
    store: Arc<dyn ParamStore>,
    cache: Arc<PurchaseCache>,
    state: Mutex<ResolveState>,
}

impl ConfirmationResolver {
    pub fn new(
        backend: Arc<dyn CourseBackend>,
        store: Arc<dyn ParamStore>,
        cache: Arc<PurchaseCache>,
    ) -> Self {
        Self {
            backend,
            store,
            cache,
            state: Mutex::new(ResolveState::Idle),
        }
    }

    /// Resolve the payment return, at most once per resolver instance
    ///
    /// The first call performs the confirmation and records the terminal
    /// outcome. Later calls return the recorded outcome without touching
    /// the backend; a call that lands while the first is still in flight
    /// gets [`ConfirmationOutcome::Loading`].
    pub async fn resolve(&self, params: &ReturnParams) -> ConfirmationOutcome {
        {
            let mut state = self.state.lock().unwrap();
            match &*state {
                ResolveState::Done(outcome) => return outcome.clone(),
                ResolveState::InFlight => return ConfirmationOutcome::Loading,
                ResolveState::Idle => *state = ResolveState::InFlight,
            }
        }

        let outcome = match self.confirm(params).await {
            Ok(course_id) => {
                tracing::info!(course_id = %course_id, "purchase confirmed");
                ConfirmationOutcome::Success
            }
            Err(err) => {
                tracing::error!(error = %err, "payment confirmation failed");
                ConfirmationOutcome::Error(err.user_message())
            }
        };

        *self.state.lock().unwrap() = ResolveState::Done(outcome.clone());
        outcome
    }

    /// Outcome recorded so far, if resolution has finished
    pub fn outcome(&self) -> Option<ConfirmationOutcome> {
        match &*self.state.lock().unwrap() {
            ResolveState::Done(outcome) => Some(outcome.clone()),
            _ => None,
        }
    }

    /// Confirm against the backend, returning the confirmed course id
    ///
    /// Missing context is detected before any backend call. On a backend
    /// failure the `?` propagates before the clears run, so the stored
    /// keys survive for a retry or a support investigation.
    async fn confirm(&self, params: &ReturnParams) -> Result<String> {
        if params.is_paypal_return() {
            let session_id = self
                .store
                .get(PENDING_PAYPAL_SESSION_KEY)
                .ok_or(CheckoutError::Missing(MissingContext::PaypalSessionId))?;
            let course_id = self
                .store
                .get(PENDING_COURSE_KEY)
                .ok_or(CheckoutError::Missing(MissingContext::CourseId))?;

            self.backend.confirm_paypal_payment(&session_id).await?;

            self.store.clear(PENDING_COURSE_KEY);
            self.store.clear(PENDING_PAYPAL_SESSION_KEY);
            self.cache.invalidate_for_course(&course_id);
            Ok(course_id)
        } else {
            // Stripe supplies the session id on the return URL itself.
            let session_id = params
                .session_id
                .clone()
                .ok_or(CheckoutError::Missing(MissingContext::StripeSessionId))?;
            let course_id = self
                .store
                .get(PENDING_COURSE_KEY)
                .ok_or(CheckoutError::Missing(MissingContext::CourseId))?;

            self.backend
                .confirm_checkout_session(&session_id, &course_id)
                .await?;

            self.store.clear(PENDING_COURSE_KEY);
            self.cache.invalidate_for_course(&course_id);
            Ok(course_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initiator::{CheckoutInitiator, CheckoutStart};
    use crate::mock::MockBackend;
    use crate::store::MemoryParamStore;
    use atelier_core::{Course, Tier, UserProfile};
    use chrono::Utc;
    use std::sync::atomic::Ordering;

    struct Fixture {
        mock: Arc<MockBackend>,
        store: Arc<MemoryParamStore>,
        cache: Arc<PurchaseCache>,
        resolver: ConfirmationResolver,
    }

    fn fixture(mock: MockBackend) -> Fixture {
        let mock = Arc::new(mock);
        let store = Arc::new(MemoryParamStore::new());
        let cache = Arc::new(PurchaseCache::new(mock.clone()));
        let resolver = ConfirmationResolver::new(mock.clone(), store.clone(), cache.clone());
        Fixture {
            mock,
            store,
            cache,
            resolver,
        }
    }

    fn stripe_return(session_id: &str) -> ReturnParams {
        ReturnParams {
            session_id: Some(session_id.into()),
            ..Default::default()
        }
    }

    fn paypal_return(token: &str) -> ReturnParams {
        ReturnParams {
            token: Some(token.into()),
            payment_source: Some("paypal".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_parsing() {
        let params = ReturnParams::from_query("?session_id=sess_123&other=1");
        assert_eq!(params.session_id.as_deref(), Some("sess_123"));
        assert_eq!(params.token, None);

        let params = ReturnParams::from_query("token=pp_1&paymentSource=paypal");
        assert_eq!(params.token.as_deref(), Some("pp_1"));
        assert_eq!(params.payment_source.as_deref(), Some("paypal"));

        let params = ReturnParams::from_query("");
        assert_eq!(params, ReturnParams::default());

        // Empty values count as absent
        let params = ReturnParams::from_query("session_id=");
        assert_eq!(params.session_id, None);
    }

    #[tokio::test]
    async fn test_stripe_confirmation_happy_path() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_COURSE_KEY, "c1");
        // Prime the cache so invalidation is observable.
        assert!(!f.cache.has_purchased("c1").await.unwrap());

        let outcome = f.resolver.resolve(&stripe_return("sess_123")).await;

        assert_eq!(outcome, ConfirmationOutcome::Success);
        let confirmed = f.mock.calls.last_confirm.lock().unwrap().clone();
        assert_eq!(confirmed, Some(("sess_123".into(), "c1".into())));
        assert_eq!(f.store.get(PENDING_COURSE_KEY), None);
        // Cache was invalidated and now reflects the purchase.
        assert!(f.cache.has_purchased("c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_session_id_never_calls_backend() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_COURSE_KEY, "c1");

        let outcome = f.resolver.resolve(&ReturnParams::default()).await;

        let ConfirmationOutcome::Error(message) = outcome else {
            panic!("expected error outcome");
        };
        assert!(message.contains("Payment session ID is missing"));
        assert_eq!(
            f.mock.calls.confirm_checkout_session.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_missing_course_id_never_calls_backend() {
        let f = fixture(MockBackend::new());

        let outcome = f.resolver.resolve(&stripe_return("sess_123")).await;

        let ConfirmationOutcome::Error(message) = outcome else {
            panic!("expected error outcome");
        };
        assert!(message.contains("Course information is missing"));
        assert_eq!(
            f.mock.calls.confirm_checkout_session.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_stored_keys() {
        let f = fixture(MockBackend::new().with_confirm_error("Session expired"));
        f.store.store(PENDING_COURSE_KEY, "c1");

        let outcome = f.resolver.resolve(&stripe_return("sess_123")).await;

        let ConfirmationOutcome::Error(message) = outcome else {
            panic!("expected error outcome");
        };
        assert!(message.contains("Session expired"));
        // Keys survive for retry/support.
        assert_eq!(f.store.get(PENDING_COURSE_KEY).as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_resolution_is_one_shot() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_COURSE_KEY, "c1");

        let first = f.resolver.resolve(&stripe_return("sess_123")).await;
        let second = f.resolver.resolve(&stripe_return("sess_123")).await;

        assert_eq!(first, ConfirmationOutcome::Success);
        assert_eq!(second, ConfirmationOutcome::Success);
        assert_eq!(
            f.mock.calls.confirm_checkout_session.load(Ordering::SeqCst),
            1
        );
        assert_eq!(f.resolver.outcome(), Some(ConfirmationOutcome::Success));
    }

    #[tokio::test]
    async fn test_paypal_confirmation_happy_path() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_COURSE_KEY, "c2");
        f.store.store(PENDING_PAYPAL_SESSION_KEY, "pp_1");

        let outcome = f.resolver.resolve(&paypal_return("pp_1")).await;

        assert_eq!(outcome, ConfirmationOutcome::Success);
        let confirmed = f.mock.calls.last_paypal_confirm.lock().unwrap().clone();
        assert_eq!(confirmed.as_deref(), Some("pp_1"));
        assert_eq!(f.store.get(PENDING_COURSE_KEY), None);
        assert_eq!(f.store.get(PENDING_PAYPAL_SESSION_KEY), None);
    }

    #[tokio::test]
    async fn test_paypal_missing_stored_session() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_COURSE_KEY, "c2");

        let outcome = f.resolver.resolve(&paypal_return("pp_1")).await;

        let ConfirmationOutcome::Error(message) = outcome else {
            panic!("expected error outcome");
        };
        assert!(message.contains("PayPal session ID is missing"));
        assert_eq!(
            f.mock.calls.confirm_paypal_payment.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_paypal_missing_course_id() {
        let f = fixture(MockBackend::new());
        f.store.store(PENDING_PAYPAL_SESSION_KEY, "pp_1");

        let outcome = f.resolver.resolve(&paypal_return("pp_1")).await;

        let ConfirmationOutcome::Error(message) = outcome else {
            panic!("expected error outcome");
        };
        assert!(message.contains("Course information is missing"));
        assert_eq!(
            f.mock.calls.confirm_paypal_payment.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_paypal_failure_keeps_both_keys() {
        let f = fixture(MockBackend::new().with_confirm_error("Payment not approved"));
        f.store.store(PENDING_COURSE_KEY, "c2");
        f.store.store(PENDING_PAYPAL_SESSION_KEY, "pp_1");

        let outcome = f.resolver.resolve(&paypal_return("pp_1")).await;

        assert!(matches!(outcome, ConfirmationOutcome::Error(_)));
        assert_eq!(f.store.get(PENDING_COURSE_KEY).as_deref(), Some("c2"));
        assert_eq!(f.store.get(PENDING_PAYPAL_SESSION_KEY).as_deref(), Some("pp_1"));
    }

    #[tokio::test]
    async fn test_initiated_course_id_round_trips_to_resolver() {
        let f = fixture(MockBackend::new().with_checkout_payload(
            r#"{"id":"sess_123","url":"https://checkout.example.com/sess_123"}"#,
        ));
        let initiator = CheckoutInitiator::new(f.mock.clone(), f.store.clone());
        let profile = UserProfile::new("Ada");
        let course = Course {
            id: "c1".into(),
            title: "Tailoring".into(),
            description: String::new(),
            tier: Tier::Paid,
            created_at: Utc::now(),
            modules: Vec::new(),
        };

        let start = initiator
            .begin_stripe(&course, Some(&profile), "https://atelier.test")
            .await
            .unwrap();
        assert!(matches!(start, CheckoutStart::Redirect(_)));

        // Simulated provider return.
        let outcome = f.resolver.resolve(&stripe_return("sess_123")).await;

        assert_eq!(outcome, ConfirmationOutcome::Success);
        let confirmed = f.mock.calls.last_confirm.lock().unwrap().clone();
        assert_eq!(confirmed, Some(("sess_123".into(), "c1".into())));
    }
}
