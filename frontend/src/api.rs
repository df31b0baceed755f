//! 浏览器中的 API 客户端实例
//!
//! 核心库的 `StorefrontApi` 配上 fetch 传输和 localStorage 存储。

use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use std::rc::Rc;
use storefront::{ClientConfig, StorefrontApi};

pub type Api = StorefrontApi<FetchHttpClient, BrowserStorage>;

/// 构建期注入的后端地址，未设置时使用默认值
const API_URL_OVERRIDE: Option<&str> = option_env!("STOREFRONT_API_URL");

pub fn new_api() -> Api {
    let config = ClientConfig::from_override(API_URL_OVERRIDE);
    tracing::info!(base_url = config.base_url(), "api client configured");
    StorefrontApi::new(FetchHttpClient, BrowserStorage, config)
}

/// API 上下文
///
/// `Rc` 不满足 `Send`，因此放在 local 存储的 `StoredValue` 中共享；
/// 上下文本身是 `Copy`，可以被视图闭包捕获，在使用时再取出客户端。
#[derive(Clone, Copy)]
pub struct ApiContext(StoredValue<Rc<Api>, LocalStorage>);

impl ApiContext {
    pub fn new(api: Rc<Api>) -> Self {
        Self(StoredValue::new_local(api))
    }

    pub fn get(&self) -> Rc<Api> {
        self.0.get_value()
    }

    /// 后端资源的完整地址
    pub fn asset_url(&self, path: &str) -> String {
        self.0.with_value(|api| api.config().asset_url(path))
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext should be provided")
}
