//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 会话逻辑在核心库的 `SessionManager` 中，这里只负责把它的状态同步到信号。

use crate::api::Api;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use storefront::models::{LoginCredentials, Token, User, UserCreate, UserUpdate};
use storefront::{AuthState, Result, SessionManager};

type Session = SessionManager<crate::web::FetchHttpClient, crate::web::BrowserStorage>;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
    /// 启动时是否仍在校验已保存的令牌
    pub is_loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
    manager: StoredValue<Rc<Session>, LocalStorage>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(api: Rc<Api>) -> Self {
        let manager = Rc::new(SessionManager::new(api));
        let (state, set_state) = signal(manager.state());
        let (is_loading, set_loading) = signal(false);
        Self {
            state,
            set_state,
            is_loading,
            set_loading,
            manager: StoredValue::new_local(manager),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.current_user.clone())
    }

    fn manager(&self) -> Rc<Session> {
        self.manager.get_value()
    }

    fn sync(&self) {
        self.set_state.set(self.manager().state());
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<Token> {
        let result = self.manager().login(&credentials).await;
        self.sync();
        result
    }

    pub async fn register(&self, user: UserCreate) -> Result<User> {
        self.manager().register(&user).await
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        self.manager().logout();
        self.sync();
    }

    pub async fn refresh(&self) {
        self.manager().refresh_current_user().await;
        self.sync();
    }

    pub async fn update_profile(&self, update: UserUpdate) -> Result<User> {
        let result = self.manager().update_profile(&update).await;
        self.sync();
        result
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 如果 localStorage 中有上次保存的令牌，则用它恢复当前用户。
pub fn init_auth(ctx: &AuthContext) {
    if ctx.manager().get_token().is_none() {
        return;
    }

    let ctx = *ctx;
    ctx.set_loading.set(true);
    spawn_local(async move {
        ctx.refresh().await;
        ctx.set_loading.set(false);
    });
}
