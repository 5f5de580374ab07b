//! Backend Contract
//!
//! Defines the typed interface to the remote platform service. The
//! checkout flow works exclusively through this trait, so the transport
//! (HTTP client, test fake) can change without touching flow logic.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_core::CourseBackend;
//!
//! let payload = backend
//!     .create_checkout_session(&items, &success_url, &cancel_url)
//!     .await?;
//! // payload is the provider session as a raw JSON string; parse it.
//! ```

use async_trait::async_trait;

use crate::course::Course;
use crate::error::Result;
use crate::profile::UserProfile;
use crate::purchase::{CoursePurchase, ShoppingItem};

/// The remote platform service, as seen by the client
///
/// Implementations produce `Send` futures natively; on wasm32 the browser
/// runtime is single-threaded and its HTTP futures are not `Send`, so the
/// bound is relaxed there.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CourseBackend: Send + Sync {
    /// Create a payment-provider checkout session
    ///
    /// Returns the provider session payload as a raw JSON string. Callers
    /// must parse it; it is expected to contain at least `id` and `url`.
    async fn create_checkout_session(
        &self,
        items: &[ShoppingItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String>;

    /// Mark a checkout session as completed for a course
    ///
    /// Fails if the session is invalid, unpaid, or mismatched to the
    /// course.
    async fn confirm_checkout_session(&self, session_id: &str, course_id: &str) -> Result<()>;

    /// Register a pending PayPal payment for a course
    async fn create_paypal_payment(&self, course_id: &str, session_id: &str) -> Result<()>;

    /// Mark a pending PayPal payment as completed
    async fn confirm_paypal_payment(&self, session_id: &str) -> Result<()>;

    /// Purchase records for the calling user
    async fn get_purchased_courses(&self) -> Result<Vec<CoursePurchase>>;

    /// Whether the calling user has purchased a specific course
    async fn has_purchased_course(&self, course_id: &str) -> Result<bool>;

    /// Full course catalog
    async fn get_courses(&self) -> Result<Vec<Course>>;

    /// A single course by id
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>>;

    /// Saved profile for the calling user, if any
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>>;

    /// Save the calling user's profile
    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()>;
}
