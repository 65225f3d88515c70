//! 原生传输实现 (reqwest)
//!
//! 浏览器之外运行时使用：Cookie 存在共享的 Jar 中，
//! 登录接口下发的会话 Cookie 和 `csrftoken` 会被后续请求自动带上。

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

use crate::client::{ApiClient, ClientContext};
use crate::config::RuntimeConfig;
use crate::cookie::{CookieSource, read_cookie};
use crate::error::{ClientError, ClientResult};
use crate::navigation::NoopLocation;
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::{SessionHandle, SessionStore};
use crate::storage::MemoryStorage;

#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    jar: Arc<Jar>,
    origin: Url,
}

impl ReqwestHttpClient {
    pub fn new(config: &RuntimeConfig) -> ClientResult<Self> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    pub fn with_jar(config: &RuntimeConfig, jar: Arc<Jar>) -> ClientResult<Self> {
        let origin = Url::parse(&config.api_base_url).map_err(|e| {
            ClientError::invalid_input(format!("无效的 API_BASE_URL: {}", config.api_base_url))
                .with_source(e)
        })?;

        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(Duration::from_millis(u64::from(config.request_timeout_ms)))
            .build()
            .map_err(|e| ClientError::network(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            jar,
            origin,
        })
    }

    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }
}

/// 组装原生端的会话存储
///
/// 存储放在内存中，Cookie 从传输层的 Jar 读取；没有页面可跳转，401 时只清理状态。
pub fn native_store(config: &RuntimeConfig) -> ClientResult<SessionStore<ReqwestHttpClient>> {
    let transport = ReqwestHttpClient::new(config)?;
    let context = ClientContext {
        local_storage: Rc::new(MemoryStorage::new()),
        session_storage: Rc::new(MemoryStorage::new()),
        cookies: Rc::new(transport.clone()),
        location: Rc::new(NoopLocation),
    };
    let client = ApiClient::new(transport, config.clone(), context, SessionHandle::new());
    Ok(SessionStore::new(client))
}

impl CookieSource for ReqwestHttpClient {
    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        read_cookie(header.to_str().ok()?, name)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_csrf_cookie_from_jar() {
        let config = RuntimeConfig::default();
        let jar = Arc::new(Jar::default());
        let url = Url::parse("http://localhost:8002/api/auth/login/").unwrap();
        jar.add_cookie_str("csrftoken=abc123; Path=/", &url);
        jar.add_cookie_str("sessionid=s1; Path=/", &url);

        let client = ReqwestHttpClient::with_jar(&config, jar).unwrap();
        assert_eq!(client.cookie("csrftoken").as_deref(), Some("abc123"));
        assert_eq!(client.cookie("missing"), None);
    }

    #[tokio::test]
    async fn test_native_store_reports_unreachable_backend() {
        // 端口 9 (discard) 上没有服务
        let config = RuntimeConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 2_000,
            ..RuntimeConfig::from_env()
        };
        let store = native_store(&config).unwrap();

        let err = store.fetch_current_user().await.unwrap_err();

        assert_eq!(err.status, crate::error::ClientErrorStatus::Network);
        assert!(!store.is_authenticated());
        assert_eq!(store.client().context().cookies.cookie("csrftoken"), None);
    }

    #[test]
    fn test_native_store_rejects_invalid_base_url() {
        let config = RuntimeConfig {
            api_base_url: "::".to_string(),
            ..RuntimeConfig::default()
        };
        assert!(native_store(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = RuntimeConfig {
            api_base_url: "not a url".to_string(),
            ..RuntimeConfig::default()
        };
        let err = ReqwestHttpClient::new(&config).err().unwrap();
        assert_eq!(err.status, crate::error::ClientErrorStatus::InvalidInput);
    }
}
