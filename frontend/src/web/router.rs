//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 每次导航都先交给核心库的守卫求值，再写入 History 并更新当前路由。

use leptos::prelude::*;
use storefront::guard::{self, GuardDecision};
use storefront::{AppRoute, SessionStorage};
use wasm_bindgen::prelude::*;

use super::BrowserStorage;

/// 获取当前浏览器路径（含查询串）
fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

/// 当前地址的查询串（含开头的 `?`）
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 守卫只看 localStorage 中是否有令牌；认证信号仅用于触发重新求值。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    session: StoredValue<SessionStorage<BrowserStorage>>,
    /// 认证状态（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(session: SessionStorage<BrowserStorage>, is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::default());
        Self {
            current_route,
            set_route,
            session: StoredValue::new(session),
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 写入 History -> 加载
    pub fn navigate(&self, path: &str) {
        self.apply(path, true);
    }

    /// 与 `navigate` 相同，但替换当前 History 记录
    pub fn replace(&self, path: &str) {
        self.apply(path, false);
    }

    fn evaluate(&self, path: &str) -> GuardDecision {
        self.session.with_value(|session| guard::evaluate(path, session))
    }

    fn apply(&self, path: &str, use_push: bool) {
        let decision = self.evaluate(path);
        if decision.is_redirect() {
            tracing::info!(from = path, to = decision.location(), "navigation redirected");
        }

        if use_push {
            push_history_state(decision.location());
        } else {
            replace_history_state(decision.location());
        }
        self.set_route.set(decision.route().clone());
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑，重定向只替换当前记录
            router.apply(&current_location(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 首次运行时对初始地址求值。
    fn setup_auth_redirect(&self) {
        let router = *self;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let location = current_location();
            let decision = router.evaluate(&location);
            if decision.is_redirect() || decision.route() != &router.current_route.get_untracked() {
                tracing::debug!(is_auth, location = %location, "re-evaluating current route");
                router.apply(&location, false);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    session: SessionStorage<BrowserStorage>,
    is_authenticated: Signal<bool>,
) -> RouterService {
    let router = RouterService::new(session, is_authenticated);

    // 先同步解析初始地址，避免首帧渲染默认路由
    router.replace(&current_location());
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 守卫使用的会话存储
    session: SessionStorage<BrowserStorage>,
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session, is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
