//! atelier Web Frontend
//!
//! Leptos-based WASM frontend for the atelier course platform.

mod app;
mod components;
mod context;
mod pages;
mod storage;

pub use app::App;
pub use context::CheckoutContext;
pub use storage::SessionStorageStore;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
