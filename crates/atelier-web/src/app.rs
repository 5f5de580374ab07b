//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::context::CheckoutContext;
use crate::pages::{
    CourseDetailPage, HomePage, PaymentFailurePage, PaymentSuccessPage, StorefrontPage,
};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(CheckoutContext::new());

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/storefront") view=StorefrontPage />
                    <Route path=path!("/courses/:id") view=CourseDetailPage />
                    <Route path=path!("/payment-success") view=PaymentSuccessPage />
                    <Route path=path!("/payment-failure") view=PaymentFailurePage />
                </Routes>
            </main>
        </Router>
    }
}
