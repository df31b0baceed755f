use crate::auth::use_auth;
use crate::components::layout::use_notifier;
use crate::web::router::{Link, current_query, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::models::{LoginCredentials, UserCreate};

#[component]
fn ErrorAlert(error_msg: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error_msg.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || error_msg.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let credentials = LoginCredentials::new(email.get(), password.get());
        spawn_local(async move {
            match auth.login(credentials).await {
                Ok(_) if auth.state.get_untracked().is_authenticated => {
                    router.navigate(&AppRoute::post_login_target(&current_query()))
                }
                // 令牌已签发但用户资料获取失败，会话已被清除
                Ok(_) => set_error_msg.set(Some("Signed in, but your profile could not be loaded".to_string())),
                Err(e) if e.is_unauthorized() => {
                    set_error_msg.set(Some("Incorrect email or password".to_string()));
                }
                Err(e) => set_error_msg.set(Some(format!("Login failed: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Sign in"</h1>
                    <p class="text-base-content/70">"Use your account email and password"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert error_msg=error_msg />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "No account? " <Link to="/register" class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let (email, set_email) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Email and password are required".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let mut user = UserCreate::new(email.get(), password.get());
        let name = full_name.get();
        if !name.trim().is_empty() {
            user = user.with_full_name(name.trim());
        }

        spawn_local(async move {
            match auth.register(user).await {
                Ok(user) => {
                    notifier.success(format!("Account {} created, please log in", user.email));
                    router.navigate(&AppRoute::Login.to_path());
                }
                Err(e) => set_error_msg.set(Some(format!("Registration failed: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Create account"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert error_msg=error_msg />

                        <input
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered"
                            required
                        />
                        <input
                            type="text"
                            placeholder="Full name (optional)"
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                            prop:value=full_name
                            class="input input-bordered"
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                            required
                        />
                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            "Register"
                        </button>
                        <p class="text-sm text-center">
                            "Already registered? " <Link to="/login" class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
