/// 整页跳转
///
/// 与路由服务的 History 导航不同，这里会重新加载页面，丢弃所有内存状态。
pub trait Location {
    fn assign(&self, path: &str);
}

/// 忽略跳转请求
///
/// 原生目标没有页面可以跳转，401 的其余处理（清除 Token、重置会话）照常进行。
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLocation;

impl Location for NoopLocation {
    fn assign(&self, path: &str) {
        log::debug!("[Location] ignoring navigation to {}", path);
    }
}
