//! 键值存储抽象
//!
//! 对应浏览器的 LocalStorage / SessionStorage。接口是同步的，和浏览器 API 保持一致。

use std::cell::RefCell;
use std::collections::HashMap;

/// 键值存储特性
///
/// 写操作返回是否成功，失败（如存储被禁用）不会中断调用方。
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
    /// 清空全部键值
    fn clear(&self) -> bool;
}

/// 内存存储
///
/// 用于原生目标和测试。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }

    fn clear(&self) -> bool {
        self.entries.borrow_mut().clear();
        true
    }
}
