//! Course Storefront Page

use leptos::prelude::*;

use atelier_core::Course;

use crate::context::CheckoutContext;

#[component]
pub fn StorefrontPage() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();

    let (courses, set_courses) = signal(Vec::<Course>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    {
        let ctx = ctx.clone();
        leptos::task::spawn_local(async move {
            // The view may be gone by the time this resolves.
            match ctx.backend.get_courses().await {
                Ok(catalog) => {
                    set_courses.try_set(catalog);
                }
                Err(err) => {
                    set_error.try_set(Some(err.user_message()));
                }
            }
            set_loading.try_set(false);
        });
    }

    view! {
        <div class="storefront">
            <h1>"Courses"</h1>

            <Show when=move || loading.get()>
                <p class="loading">"..."</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="courses">
                <For
                    each=move || courses.get()
                    key=|course| course.id.clone()
                    children=move |course| {
                        let href = format!("/courses/{}", course.id);
                        view! {
                            <a class="course-card" href=href>
                                <h2>{course.title.clone()}</h2>
                                <p>{course.description.clone()}</p>
                                <span class="tier">{course.tier.as_str()}</span>
                            </a>
                        }
                    }
                />
            </div>
        </div>
    }
}
