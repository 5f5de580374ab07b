//! UI Components

use std::sync::Arc;

use leptos::prelude::*;

use atelier_core::{CourseBackend, UserProfile};

/// Profile-setup form, shown when checkout needs a saved profile
#[component]
pub fn ProfileSetupForm(
    backend: Arc<dyn CourseBackend>,
    on_saved: Callback<UserProfile>,
) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let save = move |_| {
        let value = name.get().trim().to_string();
        if value.is_empty() || saving.get() {
            return;
        }
        set_saving.set(true);

        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            let profile = UserProfile::new(value);
            match backend.save_caller_user_profile(&profile).await {
                Ok(()) => on_saved.run(profile),
                Err(err) => {
                    set_error.try_set(Some(err.user_message()));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <div class="profile-setup">
            <h2>"Set Up Your Profile"</h2>
            <p>"We need a profile before you can purchase a course."</p>
            <div class="field">
                <label>"Name"</label>
                <input
                    type="text"
                    placeholder="Your name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </div>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn-primary" on:click=save disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save Profile" }}
            </button>
        </div>
    }
}
