//! Payment Success Page
//!
//! The return target for both payment providers. Hands the URL
//! parameters to the shared confirmation resolver and renders one fixed
//! view per outcome. There is no automatic retry; the error view only
//! offers navigation away.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use atelier_checkout::{ConfirmationOutcome, ReturnParams};

use crate::context::CheckoutContext;

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();
    let query = use_query_map();

    let (state, set_state) = signal(ConfirmationOutcome::Loading);

    {
        let query = query.get_untracked();
        let params = ReturnParams {
            session_id: query.get("session_id").filter(|v| !v.is_empty()),
            token: query.get("token").filter(|v| !v.is_empty()),
            payment_source: query.get("paymentSource").filter(|v| !v.is_empty()),
        };

        let ctx = ctx.clone();
        leptos::task::spawn_local(async move {
            let outcome = ctx.resolver.resolve(&params).await;
            // Loading means another mount already owns the resolution;
            // leave the loading view up rather than regressing state.
            // The view itself may be gone by the time this resolves.
            if outcome != ConfirmationOutcome::Loading {
                set_state.try_set(outcome);
            }
        });
    }

    view! {
        <div class="payment-result">
            {move || match state.get() {
                ConfirmationOutcome::Loading => view! {
                    <section class="card">
                        <h1>"Confirming Payment..."</h1>
                        <p>"Please wait while we verify your purchase."</p>
                        <p class="hint">"This should only take a moment. Do not close this page."</p>
                    </section>
                }
                    .into_any(),
                ConfirmationOutcome::Success => view! {
                    <section class="card success">
                        <h1>"Payment Successful!"</h1>
                        <p>"Your course purchase has been completed successfully."</p>
                        <p class="hint">
                            "Course unlocked: you now have lifetime access to all course materials and future updates."
                        </p>
                        <div class="actions">
                            <a href="/" class="btn btn-primary">"Go to Dashboard"</a>
                            <a href="/storefront" class="btn">"Browse More Courses"</a>
                        </div>
                    </section>
                }
                    .into_any(),
                ConfirmationOutcome::Error(message) => view! {
                    <section class="card error">
                        <h1>"Payment Confirmation Error"</h1>
                        <p>{message}</p>
                        <p class="hint">
                            "If you were charged, your purchase will be processed. Please check your dashboard or contact support for assistance."
                        </p>
                        <div class="actions">
                            <a href="/" class="btn btn-primary">"Go to Dashboard"</a>
                            <a href="/storefront" class="btn">"Browse Courses"</a>
                        </div>
                    </section>
                }
                    .into_any(),
            }}
        </div>
    }
}
