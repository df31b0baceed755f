//! 浏览器 Web API 封装模块
//!
//! 为核心库的 trait 提供浏览器实现，并集中管理 History 路由。

mod http;
pub mod router;
mod storage;

pub use http::FetchHttpClient;
pub use storage::BrowserStorage;
