//! Home / Dashboard Page

use leptos::prelude::*;

use atelier_core::CoursePurchase;

use crate::context::CheckoutContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();

    let (purchases, set_purchases) = signal(Vec::<CoursePurchase>::new());
    let (loading, set_loading) = signal(true);

    {
        let ctx = ctx.clone();
        leptos::task::spawn_local(async move {
            // The view may be gone by the time this resolves.
            if let Ok(records) = ctx.cache.purchased_courses().await {
                set_purchases.try_set(records);
            }
            set_loading.try_set(false);
        });
    }

    view! {
        <div class="home">
            <header class="hero">
                <h1>"atelier"</h1>
                <p class="tagline">"Fashion design courses, from first stitch to runway"</p>
                <div class="cta">
                    <a href="/storefront" class="btn btn-primary">"Browse Courses"</a>
                </div>
            </header>

            <section class="my-courses">
                <h2>"My Courses"</h2>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="loading">"..."</p> }
                >
                    <Show
                        when=move || !purchases.get().is_empty()
                        fallback=|| view! { <p>"No purchases yet."</p> }
                    >
                        <ul>
                            <For
                                each=move || purchases.get()
                                key=|p| p.course_id.clone()
                                children=move |p| {
                                    view! {
                                        <li>
                                            <a href=format!("/courses/{}", p.course_id)>
                                                {p.course_id.clone()}
                                            </a>
                                            <span class="tier">{p.tier.as_str()}</span>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </Show>
            </section>
        </div>
    }
}
