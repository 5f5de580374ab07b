//! # atelier-client
//!
//! HTTP implementation of the [`atelier_core::CourseBackend`] contract.
//!
//! The backend service is an external collaborator; this crate is only
//! its transport. It compiles both natively and for wasm32, where the
//! frontend uses it with same-origin relative URLs.

mod http;

pub use http::{BackendConfig, HttpBackend};
