use assetdesk::Location;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// `window.location` 整页跳转
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocation;

impl Location for BrowserLocation {
    fn assign(&self, path: &str) {
        // 已经在目标页时不再重载，避免登录失败时清掉页面上的错误提示
        if current_path() == path {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}
