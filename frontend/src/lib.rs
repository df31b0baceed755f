//! Storefront 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api`: 浏览器中的 API 客户端实例
//! - `auth`: 认证状态管理
//! - `store`: 购物车与分类上下文
//! - `web::router`: 路由服务（核心引擎），守卫逻辑来自核心库
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod cart;
    pub mod layout;
    pub mod login;
    pub mod orders;
    pub mod product_form;
    pub mod products;
    pub mod profile;
}
pub mod logging;
mod store;
pub(crate) mod web;

use crate::api::{ApiContext, new_api};
use crate::auth::{AuthContext, init_auth};
use crate::components::cart::{CartPage, CheckoutPage};
use crate::components::layout::{NavBar, Notifier, Spinner, Toast};
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::orders::{OrderDetailPage, OrderHistoryPage};
use crate::components::product_form::ProductFormPage;
use crate::components::products::{ProductDetailPage, ProductListPage};
use crate::components::profile::UserProfilePage;
use crate::store::{CartContext, CategoryContext};

use leptos::prelude::*;
use std::rc::Rc;
use storefront::AppRoute;

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。未知路径已在解析时落到商品列表。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::ProductList => view! { <ProductListPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::CreateProduct => view! { <ProductFormPage /> }.into_any(),
        AppRoute::EditProduct(id) => view! { <ProductFormPage id=id /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Checkout => view! { <CheckoutPage /> }.into_any(),
        AppRoute::OrderHistory => view! { <OrderHistoryPage /> }.into_any(),
        AppRoute::OrderDetail(id) => view! { <OrderDetailPage id=id /> }.into_any(),
        AppRoute::UserProfile => view! { <UserProfilePage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API 客户端与全局状态
    let api = Rc::new(new_api());
    let session = api.session_storage().clone();
    provide_context(ApiContext::new(api.clone()));
    provide_context(CartContext::new());
    provide_context(CategoryContext::new());
    provide_context(Notifier::new());

    // 2. 认证上下文，存在已保存令牌时恢复当前用户
    let auth_ctx = AuthContext::new(api);
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router session=session is_authenticated=is_authenticated>
            <NavBar />
            <Toast />
            <main class="min-h-screen bg-base-200 font-sans">
                // 会话恢复完成前不渲染页面
                <Show when=move || !auth_ctx.is_loading.get() fallback=|| view! { <Spinner /> }>
                    <RouterOutlet matcher=route_matcher />
                </Show>
            </main>
        </Router>
    }
}
