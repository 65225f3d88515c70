//! 浏览器存储封装模块
//!
//! 使用 `web_sys::Storage` 实现会话层的 `KeyValueStorage`。

use assetdesk::KeyValueStorage;

/// 浏览器存储
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    /// window.localStorage，跨标签页、跨重启保留
    Local,
    /// window.sessionStorage，随标签页关闭清除
    Session,
}

impl BrowserStorage {
    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self {
            BrowserStorage::Local => window.local_storage().ok()?,
            BrowserStorage::Session => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, key: &str) -> bool {
        self.storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        self.storage().and_then(|s| s.clear().ok()).is_some()
    }
}
