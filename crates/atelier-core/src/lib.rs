//! # atelier-core
//!
//! Domain model and backend contract for the atelier course platform.
//!
//! The platform backend (profiles, catalog, purchases, payment
//! confirmation) is an external collaborator. The client reaches it
//! exclusively through the [`CourseBackend`] trait, which mirrors the
//! documented interface operation for operation:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │   UI flow   │────▶│  CourseBackend   │────▶│  Remote service │
//! │  (checkout) │     │  (typed contract)│     │  (out of scope) │
//! └─────────────┘     └──────────────────┘     └─────────────────┘
//! ```
//!
//! Swapping the transport (HTTP client, test fake) never changes flow
//! logic — the checkout crate works exclusively through this interface.

pub mod backend;
pub mod course;
pub mod error;
pub mod profile;
pub mod purchase;

pub use backend::CourseBackend;
pub use course::{Course, CourseLevel, CourseModule, Tier};
pub use error::{BackendError, Result};
pub use profile::UserProfile;
pub use purchase::{
    CoursePurchase, PaymentProvider, PaymentStatus, PendingPurchase, ShoppingItem,
};
