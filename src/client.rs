//! HTTP 客户端封装
//!
//! 所有业务请求都经过 `ApiClient`：
//! - 发送前：注入 CSRF Token、默认 Content-Type、`Authorization: Token ...`，并携带 Cookie
//! - 收到 401：清除本地 Token、重置会话、整页跳转到登录页，然后把错误交还调用方
//! - 其他失败：原样交还调用方

use std::rc::Rc;

use assetdesk_shared::{
    ApiRequest, AUTH_SCHEME, CONTENT_TYPE_JSON, CSRF_COOKIE_NAME, ErrorBody, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE, HEADER_CSRF_TOKEN, TOKEN_STORAGE_KEY,
};

use crate::config::RuntimeConfig;
use crate::cookie::CookieSource;
use crate::error::{ClientError, ClientResult};
use crate::navigation::Location;
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::route::LOGIN_PATH;
use crate::session::SessionHandle;
use crate::storage::KeyValueStorage;


/// 宿主环境提供的能力
///
/// 浏览器端对应 LocalStorage、SessionStorage、`document.cookie` 和 `window.location`。
#[derive(Clone)]
pub struct ClientContext {
    pub local_storage: Rc<dyn KeyValueStorage>,
    pub session_storage: Rc<dyn KeyValueStorage>,
    pub cookies: Rc<dyn CookieSource>,
    pub location: Rc<dyn Location>,
}

/// 带凭据注入和 401 处理的 API 客户端
pub struct ApiClient<C: HttpClient> {
    transport: C,
    config: RuntimeConfig,
    context: ClientContext,
    session: SessionHandle,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(
        transport: C,
        config: RuntimeConfig,
        context: ClientContext,
        session: SessionHandle,
    ) -> Self {
        Self {
            transport,
            config,
            context,
            session,
        }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// 构造指向 API 前缀下 `path` 的请求
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(&self.config.full_api_url(path), method)
    }

    /// 请求拦截：注入凭据相关的请求头
    pub fn prepare(&self, mut req: HttpRequest) -> HttpRequest {
        if let Some(csrf) = self.context.cookies.cookie(CSRF_COOKIE_NAME) {
            req.set_header(HEADER_CSRF_TOKEN, csrf);
        }

        if req.method.is_mutating() && !req.has_header(HEADER_CONTENT_TYPE) {
            req.set_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        }

        if let Some(token) = self
            .context
            .local_storage
            .get(TOKEN_STORAGE_KEY)
            .filter(|t| !t.is_empty())
        {
            req.set_header(HEADER_AUTHORIZATION, format!("{} {}", AUTH_SCHEME, token));
        }

        req.include_credentials = true;
        req
    }

    /// 发送请求
    ///
    /// 2xx 原样返回；其余状态转换为 `ClientError`。
    pub async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let req = self.prepare(req);
        let url = req.url.clone();
        let method = req.method;

        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| e.in_op_with("http.send", format!("{} {}", method.as_str(), url)))?;

        if resp.is_success() {
            return Ok(resp);
        }

        let message = failure_message(&resp);
        if resp.status == 401 {
            self.handle_unauthorized();
            return Err(ClientError::unauthorized(message).in_op_with("http.send", url));
        }

        log::debug!("[Http] {} {} -> {}", method.as_str(), url, resp.status);
        Err(ClientError::rejected(resp.status, message).in_op_with("http.send", url))
    }

    /// 调用一个类型化接口
    pub async fn call<R: ApiRequest>(&self, payload: &R) -> ClientResult<R::Response> {
        let mut req = self.request(R::METHOD, R::PATH);
        if R::METHOD.is_mutating() {
            let body = serde_json::to_value(payload)?;
            if !body.is_null() {
                req = req.with_body(body);
            }
        }

        let resp = self.send(req).await?;
        resp.json::<R::Response>()
            .map_err(|e| e.in_op_with("http.decode", R::PATH))
    }

    // 401 的全局副作用：每个响应只执行一次
    fn handle_unauthorized(&self) {
        log::info!("[Http] Unauthorized. Clearing token and redirecting to login.");
        self.context.local_storage.remove(TOKEN_STORAGE_KEY);
        self.session.reset();
        self.context.location.assign(LOGIN_PATH);
    }
}

fn failure_message(resp: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("请求失败: HTTP {}", resp.status))
}
