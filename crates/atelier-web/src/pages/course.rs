//! Course Detail Page
//!
//! Drives the checkout initiator: purchase buttons for both providers,
//! the profile-setup fallback, and the tier-gated module listing.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use atelier_checkout::CheckoutStart;
use atelier_core::{Course, UserProfile};

use crate::components::ProfileSetupForm;
use crate::context::CheckoutContext;

fn current_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

#[component]
pub fn CourseDetailPage() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();
    let params = use_params_map();
    let id = params.get_untracked().get("id").unwrap_or_default();

    let (course, set_course) = signal(Option::<Course>::None);
    let (profile, set_profile) = signal(Option::<UserProfile>::None);
    let (owned, set_owned) = signal(false);
    let (needs_profile, set_needs_profile) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);
    let (loading, set_loading) = signal(true);

    {
        let ctx = ctx.clone();
        let id = id.clone();
        leptos::task::spawn_local(async move {
            // The view may be gone by the time these resolve.
            match ctx.backend.get_course(&id).await {
                Ok(found) => {
                    set_course.try_set(found);
                }
                Err(err) => {
                    set_error.try_set(Some(err.user_message()));
                }
            }
            if let Ok(saved) = ctx.backend.get_caller_user_profile().await {
                set_profile.try_set(saved);
            }
            if let Ok(has) = ctx.cache.has_purchased(&id).await {
                set_owned.try_set(has);
            }
            set_loading.try_set(false);
        });
    }

    let begin = {
        let ctx = ctx.clone();
        move |paypal: bool| {
            if busy.get_untracked() {
                return;
            }
            set_busy.set(true);
            set_error.set(None);

            let ctx = ctx.clone();
            leptos::task::spawn_local(async move {
                let Some(course) = course.get_untracked() else {
                    set_busy.set(false);
                    return;
                };
                let saved = profile.get_untracked();
                let origin = current_origin();

                let start = if paypal {
                    ctx.initiator
                        .begin_paypal(&course, saved.as_ref(), &origin)
                        .await
                } else {
                    ctx.initiator
                        .begin_stripe(&course, saved.as_ref(), &origin)
                        .await
                };

                match start {
                    // Navigation ends this execution context; nothing
                    // runs after a successful redirect.
                    Ok(CheckoutStart::Redirect(url)) => redirect(&url),
                    Ok(CheckoutStart::ProfileRequired) => {
                        set_needs_profile.try_set(true);
                        set_busy.try_set(false);
                    }
                    Err(err) => {
                        set_error.try_set(Some(err.user_message()));
                        set_busy.try_set(false);
                    }
                }
            });
        }
    };
    let begin_stripe = {
        let begin = begin.clone();
        move |_| begin(false)
    };
    let begin_paypal = move |_| begin(true);

    let on_profile_saved = Callback::new(move |saved: UserProfile| {
        set_profile.set(Some(saved));
        set_needs_profile.set(false);
    });
    let form_backend = ctx.backend.clone();

    view! {
        <div class="course-detail">
            <a href="/storefront" class="back">"Back to Courses"</a>

            <Show when=move || loading.get()>
                <p class="loading">"..."</p>
            </Show>

            <Show when=move || !loading.get() && course.get().is_none()>
                <section class="not-found">
                    <h1>"Course Not Found"</h1>
                    <p>"The course you're looking for doesn't exist."</p>
                </section>
            </Show>

            {move || {
                course.get().map(|course| {
                    let viewer = profile.get().map(|p| p.tier).unwrap_or_default();
                    let modules: Vec<_> = course
                        .visible_modules(viewer)
                        .into_iter()
                        .cloned()
                        .collect();
                    let hidden = course.modules.len() - modules.len();

                    view! {
                        <section class="course">
                            <h1>{course.title.clone()}</h1>
                            <span class="tier">{course.tier.as_str()}</span>
                            <p class="description">{course.description.clone()}</p>

                            <ul class="modules">
                                {modules
                                    .into_iter()
                                    .map(|m| view! {
                                        <li>
                                            <span class="title">{m.title.clone()}</span>
                                            <span class="level">{format!("{:?}", m.level)}</span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                            <Show when=move || (hidden > 0)>
                                <p class="locked">
                                    {format!("{} more modules unlock with a higher tier", hidden)}
                                </p>
                            </Show>
                        </section>
                    }
                })
            }}

            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || owned.get()>
                <p class="owned">"You own this course."</p>
            </Show>

            <Show when=move || {
                !loading.get() && !owned.get()
                    && course.get().map(|c| !c.is_free()).unwrap_or(false)
            }>
                <div class="buy">
                    <button
                        class="btn btn-primary"
                        on:click=begin_stripe.clone()
                        disabled=move || busy.get()
                    >
                        "Buy with Card"
                    </button>
                    <button
                        class="btn"
                        on:click=begin_paypal.clone()
                        disabled=move || busy.get()
                    >
                        "Buy with PayPal"
                    </button>
                </div>
            </Show>

            <Show when=move || needs_profile.get()>
                <ProfileSetupForm backend=form_backend.clone() on_saved=on_profile_saved />
            </Show>
        </div>
    }
}
