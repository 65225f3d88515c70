//! 导航守卫
//!
//! 每次路由切换前执行，流程：请求 -> 验证(Guard) -> 重定向/放行。
//! 守卫自身不保存会话状态，每次都从 `AuthProbe` 读取最新值。

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::route::{AppRoute, LOGIN_PATH, ROOT_PATH};
use crate::session::SessionStore;


/// 一次导航最多跟随的重定向次数
const MAX_REDIRECTS: usize = 4;

/// 守卫读取认证状态的接口
#[async_trait::async_trait(?Send)]
pub trait AuthProbe {
    fn is_authenticated(&self) -> bool;
    /// 向后端确认当前会话，成功即视为已登录
    async fn verify(&self) -> ClientResult<()>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> AuthProbe for SessionStore<C> {
    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }

    async fn verify(&self) -> ClientResult<()> {
        self.fetch_current_user().await.map(|_| ())
    }
}

#[async_trait::async_trait(?Send)]
impl<P: AuthProbe> AuthProbe for Rc<P> {
    fn is_authenticated(&self) -> bool {
        self.as_ref().is_authenticated()
    }

    async fn verify(&self) -> ClientResult<()> {
        self.as_ref().verify().await
    }
}

/// 守卫策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardPolicy {
    /// 导航完成后再检查一次认证状态
    pub enforce_after_navigation: bool,
}

/// 导航序号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NavigationTicket(u64);

/// 前置守卫的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行到目标路由
    Proceed,
    /// 改为导航到给定路径
    Redirect(String),
    /// 等待期间已开始了更新的导航，本次结果作废
    Superseded,
}

/// 一次完整导航（含重定向）的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Commit(AppRoute),
    Superseded,
    RedirectLoop,
}

pub struct NavigationGuard<P: AuthProbe> {
    probe: P,
    policy: GuardPolicy,
    sequence: Cell<u64>,
}

impl<P: AuthProbe> NavigationGuard<P> {
    pub fn new(probe: P) -> Self {
        Self::with_policy(probe, GuardPolicy::default())
    }

    pub fn with_policy(probe: P, policy: GuardPolicy) -> Self {
        Self {
            probe,
            policy,
            sequence: Cell::new(0),
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// 开始一次新的导航，之前签发的序号随即过期
    pub fn begin(&self) -> NavigationTicket {
        let next = self.sequence.get() + 1;
        self.sequence.set(next);
        NavigationTicket(next)
    }

    pub fn is_current(&self, ticket: NavigationTicket) -> bool {
        self.sequence.get() == ticket.0
    }

    /// **核心方法：前置守卫**
    pub async fn before_each(&self, ticket: NavigationTicket, target: AppRoute) -> GuardDecision {
        let is_auth = self.probe.is_authenticated();

        if !is_auth && !target.is_login() {
            let outcome = self.probe.verify().await;
            if !self.is_current(ticket) {
                log::debug!("[Guard] Navigation to {} superseded", target);
                return GuardDecision::Superseded;
            }
            return match outcome {
                Ok(()) => GuardDecision::Proceed,
                Err(e) => {
                    log::info!("[Guard] Access to {} denied ({}). Redirecting to login.", target, e);
                    GuardDecision::Redirect(LOGIN_PATH.to_string())
                }
            };
        }

        if target.is_login() && is_auth {
            log::info!("[Guard] Already authenticated. Redirecting to root.");
            return GuardDecision::Redirect(ROOT_PATH.to_string());
        }

        GuardDecision::Proceed
    }

    /// 后置检查（仅在策略开启时生效）
    pub fn after_each(&self, current: AppRoute) -> Option<String> {
        if self.policy.enforce_after_navigation
            && !self.probe.is_authenticated()
            && !current.is_login()
        {
            log::info!("[Guard] Not authenticated after navigating to {}", current);
            return Some(LOGIN_PATH.to_string());
        }
        None
    }

    /// 解析一次导航：执行前置守卫并跟随重定向
    pub async fn resolve(&self, path: &str) -> Resolution {
        let ticket = self.begin();
        let mut target = AppRoute::from_path(path);

        for _ in 0..MAX_REDIRECTS {
            match self.before_each(ticket, target).await {
                GuardDecision::Proceed => {
                    if !self.is_current(ticket) {
                        return Resolution::Superseded;
                    }
                    return Resolution::Commit(target);
                }
                GuardDecision::Redirect(next) => target = AppRoute::from_path(&next),
                GuardDecision::Superseded => return Resolution::Superseded,
            }
        }

        log::warn!("[Guard] Too many redirects while navigating to {}", path);
        Resolution::RedirectLoop
    }
}
