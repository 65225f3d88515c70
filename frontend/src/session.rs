//! 会话上下文
//!
//! 把会话层的 `SessionStore` 接入 Leptos：会话状态的每次变更都同步到一个信号，
//! 组件和路由服务通过 Context 读取。

use std::rc::Rc;

use assetdesk::{ApiClient, ClientContext, RuntimeConfig, Session, SessionHandle, SessionStore};
use assetdesk_shared::UserRecord;
use leptos::prelude::*;

use crate::web::{BrowserLocation, BrowserStorage, DocumentCookies, FetchHttpClient};

pub type AppSessionStore = SessionStore<FetchHttpClient>;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: StoredValue<Rc<AppSessionStore>, LocalStorage>,
    /// 会话快照（只读镜像）
    state: RwSignal<Session>,
}

impl SessionContext {
    /// 创建会话上下文，应用启动时调用一次
    pub fn new(config: &RuntimeConfig) -> Self {
        let handle = SessionHandle::new();
        let state = RwSignal::new(handle.snapshot());
        handle.subscribe(move |session| state.set(session.clone()));

        let context = ClientContext {
            local_storage: Rc::new(BrowserStorage::Local),
            session_storage: Rc::new(BrowserStorage::Session),
            cookies: Rc::new(DocumentCookies),
            location: Rc::new(BrowserLocation),
        };
        let client = ApiClient::new(
            FetchHttpClient::new(config.request_timeout_ms),
            config.clone(),
            context,
            handle,
        );

        Self {
            store: StoredValue::new_local(Rc::new(SessionStore::new(client))),
            state,
        }
    }

    pub fn store(&self) -> Rc<AppSessionStore> {
        self.store.get_value()
    }

    /// 获取认证状态信号
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().authenticated)
    }

    pub fn user_signal(&self) -> Signal<Option<UserRecord>> {
        let state = self.state;
        Signal::derive(move || state.get().user)
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
