//! 测试用的宿主环境替身

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::client::{ApiClient, ClientContext};
use crate::config::RuntimeConfig;
use crate::cookie::{CookieSource, read_cookie};
use crate::error::ClientResult;
use crate::navigation::Location;
use crate::request::{HttpClient, HttpRequest, HttpResponse, MockHttpClient};
use crate::session::{SessionHandle, SessionStore};
use crate::storage::MemoryStorage;

/// 模拟 `document.cookie`
#[derive(Default)]
pub struct MemoryCookies {
    raw: RefCell<String>,
}

impl MemoryCookies {
    pub fn set_raw(&self, raw: &str) {
        *self.raw.borrow_mut() = raw.to_string();
    }
}

impl CookieSource for MemoryCookies {
    fn cookie(&self, name: &str) -> Option<String> {
        read_cookie(&self.raw.borrow(), name)
    }
}

/// 记录所有整页跳转
#[derive(Default)]
pub struct RecordingLocation {
    pub visits: RefCell<Vec<String>>,
}

impl Location for RecordingLocation {
    fn assign(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
    }
}

/// 可以挂起指定 URL 的传输层，用来构造“请求进行中”的场景
pub struct GatedHttpClient {
    pub inner: MockHttpClient,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedHttpClient {
    pub fn new(inner: MockHttpClient) -> Self {
        Self {
            inner,
            gates: RefCell::new(HashMap::new()),
        }
    }

    /// 下一次请求 `url` 时挂起，直到返回的 Sender 被触发或丢弃
    pub fn hold(&self, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(url.to_string(), rx);
        tx
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for GatedHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let gate = self.gates.borrow_mut().remove(&req.url);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.inner.send(req).await
    }
}

pub fn api_url(path: &str) -> String {
    RuntimeConfig::default().full_api_url(path)
}

pub struct Fixture {
    pub local: Rc<MemoryStorage>,
    pub session_storage: Rc<MemoryStorage>,
    pub cookies: Rc<MemoryCookies>,
    pub location: Rc<RecordingLocation>,
    pub session: SessionHandle,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            local: Rc::new(MemoryStorage::new()),
            session_storage: Rc::new(MemoryStorage::new()),
            cookies: Rc::new(MemoryCookies::default()),
            location: Rc::new(RecordingLocation::default()),
            session: SessionHandle::new(),
        }
    }

    pub fn context(&self) -> ClientContext {
        ClientContext {
            local_storage: self.local.clone(),
            session_storage: self.session_storage.clone(),
            cookies: self.cookies.clone(),
            location: self.location.clone(),
        }
    }

    pub fn client_with<C: HttpClient>(&self, transport: C) -> ApiClient<C> {
        ApiClient::new(
            transport,
            RuntimeConfig::default(),
            self.context(),
            self.session.clone(),
        )
    }

    pub fn client(&self) -> ApiClient<MockHttpClient> {
        self.client_with(MockHttpClient::new())
    }

    pub fn store(&self) -> SessionStore<MockHttpClient> {
        SessionStore::new(self.client())
    }

    pub fn visits(&self) -> Vec<String> {
        self.location.visits.borrow().clone()
    }
}
