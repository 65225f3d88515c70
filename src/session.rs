//! 会话状态管理
//!
//! `SessionHandle` 是会话状态的唯一持有者，在应用启动时创建，
//! 由 `ApiClient`（401 时重置）与 `SessionStore`（登录/登出/获取用户）共享。

use std::cell::RefCell;
use std::rc::Rc;

use assetdesk_shared::{Credentials, CurrentUserRequest, LoginResponse, LogoutRequest, UserRecord};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;

#[cfg(test)]
mod tests;

/// 会话快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserRecord>,
    pub authenticated: bool,
}

struct SessionCell {
    session: Session,
    /// 每次重置加一，用来识别过期的异步结果
    epoch: u64,
}

type Listener = Rc<dyn Fn(&Session)>;

/// 共享的会话句柄
#[derive(Clone)]
pub struct SessionHandle {
    cell: Rc<RefCell<SessionCell>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(SessionCell {
                session: Session::default(),
                epoch: 0,
            })),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.cell.borrow().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.cell.borrow().session.authenticated
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.cell.borrow().session.user.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.cell.borrow().epoch
    }

    /// 注册状态监听器，每次状态变更后以新快照调用
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// 标记为已认证；`user` 为 `None` 时保留已有的用户记录
    pub fn establish(&self, user: Option<UserRecord>) {
        {
            let mut cell = self.cell.borrow_mut();
            if user.is_some() {
                cell.session.user = user;
            }
            cell.session.authenticated = true;
        }
        self.notify();
    }

    /// 仅当会话自 `epoch` 起未被重置时才标记为已认证
    pub fn establish_if_current(&self, epoch: u64, user: Option<UserRecord>) -> bool {
        if self.epoch() != epoch {
            return false;
        }
        self.establish(user);
        true
    }

    /// 回到匿名状态，并使所有进行中的获取失效
    pub fn reset(&self) {
        {
            let mut cell = self.cell.borrow_mut();
            cell.session = Session::default();
            cell.epoch += 1;
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // 先复制出监听器列表，允许监听器内部再次订阅
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

// =========================================================
// 会话存储 (Session Store)
// =========================================================

/// 登录、登出与当前用户获取
pub struct SessionStore<C: HttpClient> {
    client: ApiClient<C>,
    session: SessionHandle,
}

impl<C: HttpClient> SessionStore<C> {
    pub fn new(client: ApiClient<C>) -> Self {
        let session = client.session().clone();
        Self { client, session }
    }

    pub fn client(&self) -> &ApiClient<C> {
        &self.client
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.session.user()
    }

    /// 登录
    ///
    /// Token 不在这里保存：后端通过 Cookie 下发会话，后续请求由客户端自动携带。
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let resp = self
            .client
            .call(credentials)
            .await
            .map_err(|e| e.in_op_with("session.login", credentials.username.as_str()))?;

        self.session.establish(resp.user.clone());
        log::info!("[Session] Logged in as {}", credentials.username);
        Ok(resp)
    }

    /// 登出
    ///
    /// 无论后端调用是否成功，本地都回到匿名状态并清空所有持久化数据。
    pub async fn logout(&self) {
        if let Err(e) = self.client.call(&LogoutRequest).await {
            log::warn!("[Session] Logout request failed: {}", e);
        }

        self.session.reset();
        let context = self.client.context();
        context.local_storage.clear();
        context.session_storage.clear();
        log::info!("[Session] Logged out");
    }

    /// 获取当前用户
    ///
    /// 失败时状态不变并返回错误，守卫据此判断“未登录”。
    /// 请求途中会话被重置（登出或 401）时丢弃结果。
    pub async fn fetch_current_user(&self) -> ClientResult<UserRecord> {
        let epoch = self.session.epoch();
        let resp = self
            .client
            .call(&CurrentUserRequest)
            .await
            .map_err(|e| e.in_op("session.fetch_current_user"))?;

        if !self
            .session
            .establish_if_current(epoch, Some(resp.user.clone()))
        {
            log::debug!("[Session] Discarding stale current-user result");
            return Err(ClientError::superseded("会话已在请求期间重置")
                .in_op("session.fetch_current_user"));
        }
        Ok(resp.user)
    }
}
