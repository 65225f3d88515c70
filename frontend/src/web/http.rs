//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现会话层的 `HttpClient`。

use assetdesk::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, Headers, Request, RequestCredentials, RequestInit, Response};

/// 基于 fetch 的传输层
#[derive(Debug, Clone, Copy)]
pub struct FetchHttpClient {
    timeout_ms: u32,
}

impl FetchHttpClient {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| ClientError::network(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::network(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_credentials(if req.include_credentials {
            RequestCredentials::Include
        } else {
            RequestCredentials::SameOrigin
        });
        opts.set_signal(Some(&AbortSignal::timeout_with_u32(self.timeout_ms)));

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ClientError::network(format!("请求构建失败: {:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::network(format!("网络错误: {:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            ClientError::network(format!("Response 类型转换失败: {:?}", e))
        })?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| ClientError::network(format!("读取响应失败: {:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::network(format!("读取响应失败: {:?}", e)))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
