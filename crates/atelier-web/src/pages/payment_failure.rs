//! Payment Failure Page
//!
//! The cancel target for both payment providers. Drops any pending
//! purchase context so the next checkout starts clean.

use leptos::prelude::*;

use atelier_checkout::clear_pending_purchase;

use crate::context::CheckoutContext;

#[component]
pub fn PaymentFailurePage() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();
    clear_pending_purchase(ctx.store.as_ref());

    view! {
        <div class="payment-result">
            <section class="card error">
                <h1>"Payment Cancelled"</h1>
                <p>"Your payment was not completed."</p>
                <p class="hint">
                    "Don't worry! No charges were made to your account. You can try again whenever you're ready."
                </p>
                <div class="actions">
                    <a href="/storefront" class="btn btn-primary">"Back to Courses"</a>
                    <a href="/" class="btn">"Go to Dashboard"</a>
                </div>
            </section>
        </div>
    }
}
