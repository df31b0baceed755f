use crate::auth::use_auth;
use crate::components::layout::use_notifier;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::models::UserUpdate;

#[component]
pub fn UserProfilePage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (full_name, set_full_name) = signal(
        auth.current_user()
            .and_then(|u| u.full_name)
            .unwrap_or_default(),
    );
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = full_name.get();
        let pass = password.get();
        let update = UserUpdate {
            full_name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
            password: Some(pass).filter(|p| !p.is_empty()),
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            match auth.update_profile(update).await {
                Ok(_) => {
                    set_password.set(String::new());
                    notifier.success("Profile updated");
                }
                Err(e) => notifier.error(format!("Failed to update profile: {}", e)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto p-4">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h1 class="card-title text-2xl">"Profile"</h1>
                    {move || auth.current_user().map(|u| view! {
                        <div class="text-sm text-base-content/70">
                            <p>{format!("Email: {}", u.email)}</p>
                            <p>{format!("Role: {}", u.role)}</p>
                        </div>
                    })}
                    <input
                        type="text"
                        placeholder="Full name"
                        class="input input-bordered w-full"
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        prop:value=full_name
                    />
                    <input
                        type="password"
                        placeholder="New password (leave blank to keep)"
                        class="input input-bordered w-full"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>"Save"</button>
                </form>
            </div>
        </div>
    }
}
