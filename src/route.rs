//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 控制面板
    Dashboard,
    /// 条码汇总（根路径的默认子页面）
    BarcodeSummary,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 查询串和锚点被忽略，尾随斜杠被规整；`/` 重定向到默认子页面。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::default_child(),
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/barcode-summary" => Self::BarcodeSummary,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => "/dashboard",
            Self::BarcodeSummary => "/barcode-summary",
            Self::NotFound => "/404",
        }
    }

    /// 根路径 `/` 的重定向目标
    pub fn default_child() -> Self {
        Self::BarcodeSummary
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 页面标题（可选）
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::BarcodeSummary => Some("条码汇总"),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
