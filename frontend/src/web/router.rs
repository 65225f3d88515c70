//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程：请求 -> 守卫(NavigationGuard) -> 写入 History -> 更新路由信号。

use std::rc::Rc;

use assetdesk::{AppRoute, NavigationGuard, Resolution};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use super::location::current_path;
use crate::session::{AppSessionStore, SessionContext};

pub type AppGuard = NavigationGuard<Rc<AppSessionStore>>;

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

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// 路由器服务
///
/// 当前路由为 `None` 表示首次导航的守卫仍在等待后端响应。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<Option<AppRoute>>,
    set_route: WriteSignal<Option<AppRoute>>,
    guard: StoredValue<Rc<AppGuard>, LocalStorage>,
    app_name: StoredValue<String>,
}

impl RouterService {
    fn new(session: SessionContext, app_name: String) -> Self {
        let (current_route, set_route) = signal(None);
        let guard = NavigationGuard::new(session.store());

        Self {
            current_route,
            set_route,
            guard: StoredValue::new_local(Rc::new(guard)),
            app_name: StoredValue::new(app_name),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<Option<AppRoute>> {
        self.current_route
    }

    /// 导航到指定路径（新增历史记录）
    pub fn navigate(&self, path: &str) {
        self.start(path.to_string(), HistoryMode::Push);
    }

    fn start(&self, path: String, mode: HistoryMode) {
        let router = *self;
        spawn_local(async move {
            router.resolve(path, mode).await;
        });
    }

    async fn resolve(self, path: String, mode: HistoryMode) {
        let guard = self.guard.get_value();

        match guard.resolve(&path).await {
            Resolution::Commit(route) => {
                self.commit(route, mode);
                if let Some(next) = guard.after_each(route) {
                    self.start(next, HistoryMode::Replace);
                }
            }
            Resolution::Superseded => {
                log::debug!("[Router] Navigation to {} superseded", path);
            }
            Resolution::RedirectLoop => {
                log::warn!("[Router] Redirect loop while navigating to {}", path);
            }
        }
    }

    fn commit(&self, route: AppRoute, mode: HistoryMode) {
        let path = route.to_path();
        // 目标与当前地址相同时不新增历史记录
        if mode == HistoryMode::Push && current_path() != path {
            push_history_state(path);
        } else {
            replace_history_state(path);
        }

        let app_name = self.app_name.get_value();
        match route.title() {
            Some(title) => set_document_title(&format!("{} - {}", title, app_name)),
            None => set_document_title(&app_name),
        }

        self.set_route.set(Some(route));
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        // popstate 时也执行守卫逻辑
        let closure = Closure::<dyn Fn()>::new(move || {
            router.start(current_path(), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并执行首次导航
fn provide_router(session: SessionContext, app_name: String) -> RouterService {
    let router = RouterService::new(session, app_name);

    router.init_popstate_listener();
    router.start(current_path(), HistoryMode::Replace);

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
#[component]
pub fn Router(
    /// 会话上下文，守卫通过它检查认证状态
    session: SessionContext,
    /// 应用名称，用于页面标题
    #[prop(into)]
    app_name: String,
    children: Children,
) -> impl IntoView {
    provide_router(session, app_name);

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

    move || match router.current_route().get() {
        Some(route) => matcher(route),
        None => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}
