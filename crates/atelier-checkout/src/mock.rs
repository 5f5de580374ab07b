//! Mock Backend
//!
//! For testing and demo purposes. Records every call with its arguments
//! and can be configured to refuse confirmations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use atelier_core::{
    BackendError, Course, CourseBackend, CoursePurchase, PaymentStatus, Result, ShoppingItem,
    Tier, UserProfile,
};

/// Call counters and recorded arguments
#[derive(Default)]
pub struct Calls {
    pub create_checkout_session: AtomicUsize,
    pub confirm_checkout_session: AtomicUsize,
    pub create_paypal_payment: AtomicUsize,
    pub confirm_paypal_payment: AtomicUsize,
    pub get_purchased_courses: AtomicUsize,
    pub has_purchased_course: AtomicUsize,

    /// Last (session_id, course_id) passed to confirm_checkout_session
    pub last_confirm: Mutex<Option<(String, String)>>,

    /// Last session_id passed to confirm_paypal_payment
    pub last_paypal_confirm: Mutex<Option<String>>,

    /// Last (course_id, session_id) passed to create_paypal_payment
    pub last_paypal_create: Mutex<Option<(String, String)>>,

    /// Last line items passed to create_checkout_session
    pub last_items: Mutex<Vec<ShoppingItem>>,
}

/// Mock platform backend with in-memory state
pub struct MockBackend {
    profile: RwLock<Option<UserProfile>>,
    courses: RwLock<Vec<Course>>,
    purchases: RwLock<Vec<CoursePurchase>>,
    checkout_payload: RwLock<String>,
    confirm_error: RwLock<Option<String>>,
    pub calls: Calls,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            profile: RwLock::new(None),
            courses: RwLock::new(Vec::new()),
            purchases: RwLock::new(Vec::new()),
            checkout_payload: RwLock::new(
                r#"{"id":"cs_test_1","url":"https://checkout.example.com/cs_test_1"}"#.into(),
            ),
            confirm_error: RwLock::new(None),
            calls: Calls::default(),
        }
    }

    /// Pretend the caller has a saved profile
    pub fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.write().unwrap() = Some(profile);
        self
    }

    /// Override the JSON payload returned by create_checkout_session
    pub fn with_checkout_payload(self, payload: impl Into<String>) -> Self {
        *self.checkout_payload.write().unwrap() = payload.into();
        self
    }

    /// Make every confirmation call fail with the given message
    pub fn with_confirm_error(self, message: impl Into<String>) -> Self {
        *self.confirm_error.write().unwrap() = Some(message.into());
        self
    }

    /// Seed the course catalog
    pub fn with_courses(self, courses: Vec<Course>) -> Self {
        *self.courses.write().unwrap() = courses;
        self
    }

    fn confirm_result(&self) -> Result<()> {
        match self.confirm_error.read().unwrap().clone() {
            Some(message) => Err(BackendError::Rejected(message)),
            None => Ok(()),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CourseBackend for MockBackend {
    async fn create_checkout_session(
        &self,
        items: &[ShoppingItem],
        _success_url: &str,
        _cancel_url: &str,
    ) -> Result<String> {
        self.calls
            .create_checkout_session
            .fetch_add(1, Ordering::SeqCst);
        *self.calls.last_items.lock().unwrap() = items.to_vec();
        Ok(self.checkout_payload.read().unwrap().clone())
    }

    async fn confirm_checkout_session(&self, session_id: &str, course_id: &str) -> Result<()> {
        self.calls
            .confirm_checkout_session
            .fetch_add(1, Ordering::SeqCst);
        *self.calls.last_confirm.lock().unwrap() =
            Some((session_id.to_string(), course_id.to_string()));

        self.confirm_result()?;

        self.purchases.write().unwrap().push(CoursePurchase {
            course_id: course_id.to_string(),
            user_id: "caller".into(),
            tier: Tier::Paid,
            payment_status: PaymentStatus::Completed,
            purchased_at: Utc::now(),
        });
        Ok(())
    }

    async fn create_paypal_payment(&self, course_id: &str, session_id: &str) -> Result<()> {
        self.calls
            .create_paypal_payment
            .fetch_add(1, Ordering::SeqCst);
        *self.calls.last_paypal_create.lock().unwrap() =
            Some((course_id.to_string(), session_id.to_string()));
        Ok(())
    }

    async fn confirm_paypal_payment(&self, session_id: &str) -> Result<()> {
        self.calls
            .confirm_paypal_payment
            .fetch_add(1, Ordering::SeqCst);
        *self.calls.last_paypal_confirm.lock().unwrap() = Some(session_id.to_string());
        self.confirm_result()
    }

    async fn get_purchased_courses(&self) -> Result<Vec<CoursePurchase>> {
        self.calls
            .get_purchased_courses
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.purchases.read().unwrap().clone())
    }

    async fn has_purchased_course(&self, course_id: &str) -> Result<bool> {
        self.calls.has_purchased_course.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .purchases
            .read()
            .unwrap()
            .iter()
            .any(|p| p.course_id == course_id && p.is_completed()))
    }

    async fn get_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.read().unwrap().clone())
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        Ok(self
            .courses
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == course_id)
            .cloned())
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.profile.read().unwrap().clone())
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()> {
        *self.profile.write().unwrap() = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_confirmations() {
        let mock = MockBackend::new();

        mock.confirm_checkout_session("sess_1", "c1").await.unwrap();

        assert_eq!(mock.calls.confirm_checkout_session.load(Ordering::SeqCst), 1);
        assert!(mock.has_purchased_course("c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_confirm_error() {
        let mock = MockBackend::new().with_confirm_error("Session expired");

        let err = mock.confirm_checkout_session("sess_1", "c1").await.unwrap_err();
        assert_eq!(err.user_message(), "Session expired");
        assert!(!mock.has_purchased_course("c1").await.unwrap());
    }
}
