use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

pub use protocol::{ApiRequest, CurrentUserRequest, HttpMethod, LogoutRequest};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_CSRF_TOKEN: &str = "X-CSRFToken";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 后端签发的防伪 Cookie 名
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
/// LocalStorage 中保存 Bearer Token 的键
pub const TOKEN_STORAGE_KEY: &str = "token";
/// `Authorization` 头使用的认证方案
pub const AUTH_SCHEME: &str = "Token";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录表单
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

// 密码不进入日志
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 后端返回的用户记录
///
/// 会话层只关心它是否存在，不解释其中的字段；字段仅供界面展示，
/// 缺失或为 `null` 都按未提供处理，未知字段忽略。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

impl UserRecord {
    /// 界面显示名：优先使用姓名，缺省时回退到用户名
    pub fn display_name(&self) -> String {
        let full = format!(
            "{}{}",
            self.last_name.as_deref().unwrap_or_default(),
            self.first_name.as_deref().unwrap_or_default()
        );
        if full.trim().is_empty() {
            self.username.clone().unwrap_or_default()
        } else {
            full
        }
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    #[serde(default)]
    pub user: UserRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// 失败响应体
///
/// 业务接口使用 `error`，框架层（如权限拒绝）使用 `detail`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "s3cret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn test_login_response_without_staff_flags() {
        let body = r#"{"message":"ok","user":{"id":7,"username":"bob","email":"b@x.io","first_name":"","last_name":""}}"#;
        let resp: LoginResponse = serde_json::from_str(body).unwrap();
        let user = resp.user.unwrap();
        assert_eq!(user.id, Some(7));
        assert!(!user.is_staff());
        assert_eq!(user.display_name(), "bob");
    }

    #[test]
    fn test_user_record_tolerates_nulls_and_unknown_fields() {
        let body = r#"{"user":{"username":"alice","email":null,"is_staff":null,"groups":["ops"]}}"#;
        let resp: CurrentUserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.user.id, None);
        assert_eq!(resp.user.email, None);
        assert!(!resp.user.is_staff());
        assert_eq!(resp.user.display_name(), "alice");
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"用户名或密码错误","detail":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("用户名或密码错误"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Not authenticated"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Not authenticated"));
    }
}
