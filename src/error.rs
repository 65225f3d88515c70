use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 客户端错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorStatus {
    /// 网络/传输层失败，未拿到任何响应
    Network,
    /// 401: 会话失效或凭据错误
    Unauthorized,
    /// 其他非 2xx 响应
    Rejected,
    /// 请求体序列化或响应体解析失败
    Serialization,
    /// 配置或调用参数无效
    InvalidInput,
    /// 结果已过期（会话在请求途中被重置）
    Superseded,
}

impl ClientErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorStatus::Network => "NETWORK_ERROR",
            ClientErrorStatus::Unauthorized => "UNAUTHORIZED",
            ClientErrorStatus::Rejected => "REQUEST_REJECTED",
            ClientErrorStatus::Serialization => "JSON_PARSE_ERROR",
            ClientErrorStatus::InvalidInput => "INVALID_INPUT",
            ClientErrorStatus::Superseded => "SUPERSEDED",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "http.send", "session.login"
    pub operation: String,
    /// 额外的细节信息，如 URL
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - status: 错误类型
/// - message: 错误消息（优先取自后端的 `error`/`detail` 字段）
/// - http_status: 如果拿到了响应，记录其状态码
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct ClientError {
    pub status: ClientErrorStatus,
    pub message: String,
    http_status: Option<u16>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(status: ClientErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_status: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        let mut err = Self::new(ClientErrorStatus::Unauthorized, message);
        err.http_status = Some(401);
        err
    }

    pub fn rejected(http_status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ClientErrorStatus::Rejected, message);
        err.http_status = Some(http_status);
        err
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Serialization, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::InvalidInput, message)
    }

    pub fn superseded(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Superseded, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 响应状态码；传输层失败时为 `None`
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == ClientErrorStatus::Unauthorized
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::serialization(e.to_string()).with_source(e)
    }
}
