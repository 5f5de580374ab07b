//! # atelier-checkout
//!
//! Checkout initiation and purchase confirmation for the atelier course
//! platform.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ Course page  │────▶│ Payment provider │────▶│ /payment-success │
//! │ (initiator)  │     │  (hosted page)   │     │    (resolver)    │
//! └──────────────┘     └──────────────────┘     └──────────────────┘
//!        │                                               │
//!        └──── pending purchase in tab storage ──────────┘
//! ```
//!
//! Navigating to the provider's hosted page destroys every piece of
//! in-memory client state, so the initiator persists the purchase intent
//! in tab-scoped storage *before* the redirect. When the browser returns,
//! the resolver reads the provider's return parameters plus the stored
//! intent, confirms the payment with the backend exactly once, and
//! invalidates the purchase cache so unlocked content shows up.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_checkout::{CheckoutInitiator, CheckoutStart};
//!
//! let initiator = CheckoutInitiator::new(backend, store);
//!
//! match initiator.begin_stripe(&course, profile.as_ref(), &origin).await? {
//!     CheckoutStart::Redirect(url) => { /* navigate the browser to url */ }
//!     CheckoutStart::ProfileRequired => { /* open profile setup instead */ }
//! }
//! ```

mod cache;
mod error;
mod initiator;
pub mod mock;
mod resolver;
mod store;

pub use cache::PurchaseCache;
pub use error::{CheckoutError, MissingContext, Result};
pub use initiator::{CheckoutInitiator, CheckoutStart, COURSE_PRICE_CENTS};
pub use resolver::{ConfirmationOutcome, ConfirmationResolver, ReturnParams};
pub use store::{
    clear_pending_purchase, store_pending_purchase, MemoryParamStore, ParamStore,
    PENDING_COURSE_KEY, PENDING_PAYPAL_SESSION_KEY,
};
