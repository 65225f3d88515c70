//! 资产管理系统前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `assetdesk`: 会话层（HTTP 封装、会话存储、导航守卫），与浏览器无关
//! - `web`: 浏览器原生 API 封装，为会话层提供 fetch、Cookie、存储与页面跳转
//! - `session`: 会话上下文，把会话状态同步为 Leptos 信号
//! - `components`: UI 组件层

mod components {
    pub mod barcode_summary;
    pub mod dashboard;
    pub mod layout;
    pub mod login;
}
mod session;

use crate::components::barcode_summary::BarcodeSummaryView;
use crate::components::dashboard::DashboardView;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::session::SessionContext;

use assetdesk::config::{
    VAR_API_BASE_URL, VAR_API_PREFIX, VAR_APP_NAME, VAR_APP_VERSION, VAR_REQUEST_TIMEOUT_MS,
};
use assetdesk::{AppRoute, RuntimeConfig};
use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod cookie;
    mod http;
    mod location;
    pub mod router;
    mod storage;

    pub use cookie::DocumentCookies;
    pub use http::FetchHttpClient;
    pub use location::BrowserLocation;
    pub use storage::BrowserStorage;
}

use web::router::{Router, RouterOutlet};

/// 编译期注入的配置项
///
/// 构建时设置 `ASSETDESK_API_BASE_URL` 等环境变量即可覆盖默认值。
fn build_env(name: &str) -> Option<String> {
    let value = match name {
        VAR_API_BASE_URL => option_env!("ASSETDESK_API_BASE_URL"),
        VAR_API_PREFIX => option_env!("ASSETDESK_API_PREFIX"),
        VAR_APP_NAME => option_env!("ASSETDESK_APP_NAME"),
        VAR_APP_VERSION => option_env!("ASSETDESK_APP_VERSION"),
        VAR_REQUEST_TIMEOUT_MS => option_env!("ASSETDESK_REQUEST_TIMEOUT_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <Layout>
                <DashboardView />
            </Layout>
        }
        .into_any(),
        AppRoute::BarcodeSummary => view! {
            <Layout>
                <BarcodeSummaryView />
            </Layout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 解析配置
    let config = RuntimeConfig::from_lookup(build_env);
    if cfg!(debug_assertions) {
        log::debug!("当前环境配置: {:?}", config);
    }

    // 2. 创建会话上下文（会话状态在此创建，登出或 401 时重置）
    let session = SessionContext::new(&config);
    provide_context(session);
    provide_context(config.clone());

    view! {
        // 3. 路由器组件：通过会话上下文执行守卫
        <Router session=session app_name=config.app_name.clone()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
