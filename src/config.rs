//! 运行时配置
//!
//! 每一项都可以通过同名变量覆盖，读不到（或为空）时使用默认值。
//! 变量的来源由调用方决定：浏览器端在编译期注入，原生端读取进程环境。

// =========================================================
// 默认值
// =========================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8002";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_APP_NAME: &str = "资产管理系统";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

pub const VAR_API_BASE_URL: &str = "API_BASE_URL";
pub const VAR_API_PREFIX: &str = "API_PREFIX";
pub const VAR_APP_NAME: &str = "APP_NAME";
pub const VAR_APP_VERSION: &str = "APP_VERSION";
pub const VAR_REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";

/// 运行时配置结构体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub api_prefix: String,
    pub app_name: String,
    pub app_version: String,
    pub request_timeout_ms: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RuntimeConfig {
    /// 通过查找函数解析每一项配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let request_timeout_ms = lookup(VAR_REQUEST_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        Self {
            api_base_url: read(VAR_API_BASE_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_prefix: normalize_prefix(&read(VAR_API_PREFIX, DEFAULT_API_PREFIX)),
            app_name: read(VAR_APP_NAME, DEFAULT_APP_NAME),
            app_version: read(VAR_APP_VERSION, DEFAULT_APP_VERSION),
            request_timeout_ms,
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 拼接完整的 API 地址：base + prefix + path
    pub fn full_api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}{}", self.api_base_url, self.api_prefix, path)
        } else {
            format!("{}{}/{}", self.api_base_url, self.api_prefix, path)
        }
    }
}

// 统一成 "/api" 形式：有前导斜杠，无尾随斜杠；"/" 视为空前缀
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.api_base_url, "http://localhost:8002");
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.app_name, "资产管理系统");
        assert_eq!(cfg.app_version, "1.0.0");
        assert_eq!(cfg.request_timeout_ms, 10_000);
        assert_eq!(
            cfg.full_api_url("/auth/login/"),
            "http://localhost:8002/api/auth/login/"
        );
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[
            ("API_BASE_URL", "https://assets.example.com/"),
            ("API_PREFIX", "v2/"),
            ("APP_NAME", ""),
            ("REQUEST_TIMEOUT_MS", "2500"),
        ]));
        assert_eq!(cfg.api_base_url, "https://assets.example.com");
        assert_eq!(cfg.api_prefix, "/v2");
        assert_eq!(cfg.app_name, DEFAULT_APP_NAME);
        assert_eq!(cfg.request_timeout_ms, 2500);
        assert_eq!(
            cfg.full_api_url("auth/user/"),
            "https://assets.example.com/v2/auth/user/"
        );
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_MS", "soon")]));
        assert_eq!(cfg.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_MS", "0")]));
        assert_eq!(cfg.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_root_prefix_means_no_prefix() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[("API_PREFIX", "/")]));
        assert_eq!(
            cfg.full_api_url("/auth/user/"),
            "http://localhost:8002/auth/user/"
        );
    }
}
