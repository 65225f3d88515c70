//! 资产管理系统前端的会话层
//!
//! 由三部分组成，依赖方向自上而下：
//! - `guard`: 导航守卫，在每次路由切换前检查认证状态
//! - `session`: 会话存储，登录/登出/获取当前用户
//! - `client`: HTTP 客户端封装，注入 CSRF 与 Token，统一处理 401
//!
//! 浏览器相关的能力（fetch、Cookie、存储、页面跳转）都以 trait 形式注入，
//! 具体实现位于 frontend crate；原生目标可使用 `native_store` 组装基于 `ReqwestHttpClient` 的会话存储。

pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, ClientContext};
pub use config::RuntimeConfig;
pub use cookie::{CookieSource, read_cookie};
pub use error::{ClientError, ClientErrorStatus, ClientResult};
pub use guard::{AuthProbe, GuardDecision, GuardPolicy, NavigationGuard, Resolution};
pub use navigation::{Location, NoopLocation};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::{AppRoute, LOGIN_PATH, ROOT_PATH};
pub use session::{Session, SessionHandle, SessionStore};
pub use storage::{KeyValueStorage, MemoryStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::{ReqwestHttpClient, native_store};

pub use assetdesk_shared as shared;
