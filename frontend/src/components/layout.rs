use crate::auth::use_auth;
use crate::store::use_cart;
use crate::web::router::{Link, use_router};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use storefront::AppRoute;

/// 全局通知：消息内容, 是否出错
#[derive(Clone, Copy)]
pub struct Notifier(RwSignal<Option<(String, bool)>>);

impl Notifier {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.show(msg.into(), false);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.show(msg.into(), true);
    }

    fn show(&self, msg: String, is_err: bool) {
        let slot = self.0;
        slot.set(Some((msg.clone(), is_err)));
        // 3秒后清除通知，期间若已被新消息替换则保留新消息
        Timeout::new(3_000, move || {
            slot.update(|current| {
                if current.as_ref().is_some_and(|(m, _)| *m == msg) {
                    *current = None;
                }
            });
        })
        .forget();
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn Toast() -> impl IntoView {
    let Notifier(notification) = use_notifier();

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notification.get().is_some_and(|(_, e)| e);
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || notification.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let cart = use_cart();
    let router = use_router();
    let count = cart.item_count();

    let on_logout = move |_| {
        auth.logout();
        router.navigate(&AppRoute::Login.to_path());
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1">
                <Link to="/products" class="btn btn-ghost text-xl">"Storefront"</Link>
            </div>
            <div class="flex-none gap-2">
                <Link to="/cart" class="btn btn-ghost">
                    "Cart"
                    <span class="badge badge-primary">{move || count.get()}</span>
                </Link>
                <Show
                    when=move || auth.state.get().is_authenticated
                    fallback=|| view! {
                        <Link to="/login" class="btn btn-ghost">"Login"</Link>
                        <Link to="/register" class="btn btn-primary btn-sm">"Register"</Link>
                    }
                >
                    <Link to="/products/create" class="btn btn-ghost">"Add Product"</Link>
                    <Link to="/orders" class="btn btn-ghost">"Orders"</Link>
                    <Link to="/profile" class="btn btn-ghost">
                        {move || auth.current_user().map(|u| u.email).unwrap_or_default()}
                    </Link>
                    <button class="btn btn-outline btn-sm" on:click=on_logout>"Logout"</button>
                </Show>
            </div>
        </div>
    }
}

/// 页面加载中的占位
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 格式化金额
pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}
