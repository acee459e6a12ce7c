use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 考试服务 API 配置 ---
    /// 考试服务 API 根地址
    pub api_base_url: String,
    /// 启动时写入的访问令牌（为空则沿用令牌文件中的值）
    pub access_token: Option<String>,
    /// 访问令牌持久化文件
    pub token_file: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,

    // --- 考试会话配置 ---
    /// 考试ID
    pub exam_id: String,
    /// 学生ID
    pub student_id: String,
    /// 倒计时刷新间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 交卷前等待未完成答案保存的最长时间（秒）
    pub submit_flush_timeout_secs: u64,
    /// 排考结束时间与时长推算截止时间相差超过该值时告警（分钟）
    pub deadline_mismatch_warn_minutes: i64,

    // --- 命令行驱动配置 ---
    /// 答题卡 TOML 文件
    pub answer_sheet: String,
    /// 答题完成后是否立即交卷（否则等待到时自动交卷）
    pub submit_after_answering: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            access_token: None,
            token_file: ".exam_token".to_string(),
            request_timeout_secs: 15,
            exam_id: String::new(),
            student_id: String::new(),
            tick_interval_ms: 1000,
            submit_flush_timeout_secs: 5,
            deadline_mismatch_warn_minutes: 10,
            answer_sheet: "answers.toml".to_string(),
            submit_after_answering: true,
            verbose_logging: false,
            output_log_file: "exam_session.log".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，环境变量仍然优先
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(config.with_env_overrides())
    }

    /// 根据 `EXAM_CONFIG` 决定读取文件还是只读环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("EXAM_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Ok(Self::from_env()),
        }
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            api_base_url: std::env::var("EXAM_API_BASE_URL").unwrap_or(base.api_base_url),
            access_token: std::env::var("EXAM_ACCESS_TOKEN").ok().filter(|v| !v.is_empty()).or(base.access_token),
            token_file: std::env::var("EXAM_TOKEN_FILE").unwrap_or(base.token_file),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.request_timeout_secs),
            exam_id: std::env::var("EXAM_ID").unwrap_or(base.exam_id),
            student_id: std::env::var("STUDENT_ID").unwrap_or(base.student_id),
            tick_interval_ms: std::env::var("TICK_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.tick_interval_ms),
            submit_flush_timeout_secs: std::env::var("SUBMIT_FLUSH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.submit_flush_timeout_secs),
            deadline_mismatch_warn_minutes: std::env::var("DEADLINE_MISMATCH_WARN_MINUTES").ok().and_then(|v| v.parse().ok()).unwrap_or(base.deadline_mismatch_warn_minutes),
            answer_sheet: std::env::var("ANSWER_SHEET").unwrap_or(base.answer_sheet),
            submit_after_answering: std::env::var("SUBMIT_AFTER_ANSWERING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.submit_after_answering),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(base.output_log_file),
        }
    }

    /// 校验会话必需的字段
    pub fn validate(&self) -> AppResult<()> {
        if self.exam_id.trim().is_empty() {
            return Err(AppError::config_missing("EXAM_ID"));
        }
        if self.student_id.trim().is_empty() {
            return Err(AppError::config_missing("STUDENT_ID"));
        }
        if self.tick_interval_ms == 0 {
            return Err(AppError::Config(crate::error::ConfigError::EnvVarParseFailed {
                var_name: "TICK_INTERVAL_MS".to_string(),
                value: "0".to_string(),
                expected_type: "正整数".to_string(),
            }));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
