use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// API 调用错误
    Api(ApiError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 会话错误（已归类，可直接展示给用户）
    Session(SessionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Session(e) => write!(f, "会话错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Session(e) => Some(e),
        }
    }
}

/// API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败（连接失败、超时等）
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 登录状态失效（令牌过期或被顶替）
    Unauthorized {
        endpoint: String,
    },
    /// API 返回空结果
    EmptyResponse {
        endpoint: String,
    },
    /// 请求频率限制
    RateLimited {
        endpoint: String,
        retry_after: Option<u64>,
    },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadResponse {
                endpoint,
                status,
                message,
            } => {
                write!(
                    f,
                    "API返回错误响应 ({}): status={}, message={:?}",
                    endpoint, status, message
                )
            }
            ApiError::Unauthorized { endpoint } => {
                write!(f, "登录状态失效: {}", endpoint)
            }
            ApiError::EmptyResponse { endpoint } => {
                write!(f, "API返回空结果: {}", endpoint)
            }
            ApiError::RateLimited {
                endpoint,
                retry_after,
            } => {
                write!(
                    f,
                    "API请求频率限制 ({}), 建议等待: {:?}秒",
                    endpoint, retry_after
                )
            }
            ApiError::JsonParseFailed { source } => {
                write!(f, "JSON解析失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文件失败
    DeleteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::DeleteFailed { path, source } => {
                write!(f, "删除文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::DeleteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    EnvVarNotFound {
        var_name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// 会话层错误
///
/// 所有网关错误在离开会话前都会被归类成下列几种之一，
/// `Display` 输出面向用户，原始传输错误只保留在 `detail` 里供日志使用。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// 网络/连接异常，可重试，不改变考试状态
    #[error("网络连接异常，请稍后重试")]
    Network { detail: String },
    /// 登录失效，由全局拦截器强制登出
    #[error("登录状态已失效，请重新登录")]
    Unauthorized,
    /// 业务规则拒绝（次数用尽、考试已关闭等），不可重试
    #[error("{message}")]
    Rejected { message: String },
    /// 服务器返回的数据缺少必要字段
    #[error("服务器返回的数据不完整: {detail}")]
    Inconsistent { detail: String },
    #[error("当前状态不允许该操作: {state}")]
    InvalidState { state: String },
    #[error("题目不存在: {question_id}")]
    UnknownQuestion { question_id: String },
    #[error("答案与题型不匹配: {question_id}")]
    InvalidAnswer { question_id: String },
}

impl SessionError {
    /// 用户能否通过重试解决
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Network { .. })
    }

    /// 业务拒绝后禁止再次发起开始/交卷
    pub fn is_blocking(&self) -> bool {
        matches!(self, SessionError::Rejected { .. })
    }
}

impl From<&ApiError> for SessionError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => SessionError::Unauthorized,
            ApiError::BadResponse {
                status, message, ..
            } if (400..500).contains(status) && *status != 408 => SessionError::Rejected {
                message: message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("请求被服务器拒绝 ({})", status)),
            },
            other => SessionError::Network {
                detail: other.to_string(),
            },
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        SessionError::from(&err)
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建缺少配置项错误
    pub fn config_missing(var_name: impl Into<String>) -> Self {
        AppError::Config(ConfigError::EnvVarNotFound {
            var_name: var_name.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_response(status: u16, message: Option<&str>) -> ApiError {
        ApiError::BadResponse {
            endpoint: "exams/e1/students/s1/start".to_string(),
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_client_errors_become_rejections() {
        let err = SessionError::from(bad_response(409, Some("考试次数已用完")));
        assert_eq!(
            err,
            SessionError::Rejected {
                message: "考试次数已用完".to_string()
            }
        );
        assert!(err.is_blocking());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_rejection_without_message_gets_generic_text() {
        let err = SessionError::from(bad_response(403, None));
        assert_eq!(err.to_string(), "请求被服务器拒绝 (403)");
    }

    #[test]
    fn test_server_and_transport_errors_are_retryable() {
        assert!(SessionError::from(bad_response(503, None)).is_retryable());
        assert!(SessionError::from(bad_response(408, None)).is_retryable());

        let transport = ApiError::RequestFailed {
            endpoint: "exams/e1".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )),
        };
        let err = SessionError::from(&transport);
        assert!(err.is_retryable());
        // 原始传输错误不直接展示给用户
        assert!(!err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_unauthorized_maps_directly() {
        let err = SessionError::from(ApiError::Unauthorized {
            endpoint: "exams/e1".to_string(),
        });
        assert_eq!(err, SessionError::Unauthorized);
    }
}
