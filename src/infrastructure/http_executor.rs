//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client`，只暴露"发请求、解 JSON"的能力，
//! 同时充当全局拦截器：附加 Bearer 令牌，收到 401 时强制登出。

use crate::error::{ApiError, AppError, AppResult};
use crate::state::AuthState;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP 执行器
///
/// 职责：
/// - 持有 HTTP 连接池和登录状态
/// - 不认识考试 / 题目
/// - 把传输层失败统一转换为 `ApiError`
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<AuthState>,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(base_url: impl Into<String>, timeout: Duration, auth: Arc<AuthState>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::api_request_failed("client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// GET 并反序列化响应
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.send(endpoint, self.client.get(self.url(endpoint))).await?;
        decode(endpoint, response).await
    }

    /// POST（可带 JSON 请求体）并反序列化响应
    pub async fn post_json<B, T>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(endpoint, self.post(endpoint, body)).await?;
        decode(endpoint, response).await
    }

    /// POST，只关心是否成功
    pub async fn post_ack<B>(&self, endpoint: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(endpoint, self.post(endpoint, body)).await?;
        Ok(())
    }

    fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: Option<&B>) -> RequestBuilder {
        let builder = self.client.post(self.url(endpoint));
        match body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        let builder = match self.auth.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        debug!("➡️ 请求 {}", endpoint);

        let response = builder
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        debug!("⬅️ {} -> {}", endpoint, status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            let message = response.text().await.ok().and_then(|b| extract_message(&b));
            self.auth
                .force_logout(message.as_deref().unwrap_or("访问令牌已失效"))
                .await;
            return Err(ApiError::Unauthorized {
                endpoint: endpoint.to_string(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            warn!("API 请求频繁限制: {}", endpoint);
            return Err(ApiError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
            });
        }

        let message = response.text().await.ok().and_then(|b| extract_message(&b));
        Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|e| ApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        source: Box::new(e),
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyResponse {
            endpoint: endpoint.to_string(),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::JsonParseFailed {
        source: Box::new(e),
    })
}

/// 从错误响应体中提取提示信息
///
/// 优先读取 JSON 的 `message` / `error` / `detail` 字段，否则使用原始文本。
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
        return ["message", "error", "detail"]
            .iter()
            .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }

    Some(crate::utils::logging::truncate_text(body, 200))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::TokenStore;

    #[test]
    fn test_extract_message_variants() {
        assert_eq!(
            extract_message(r#"{"message": "考试已结束"}"#).as_deref(),
            Some("考试已结束")
        );
        assert_eq!(
            extract_message(r#"{"detail": "attempt limit reached"}"#).as_deref(),
            Some("attempt limit reached")
        );
        assert_eq!(extract_message(r#"{"code": 1}"#), None);
        assert_eq!(extract_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(extract_message("   "), None);
    }

    #[test]
    fn test_url_joining_ignores_extra_slashes() {
        let auth = Arc::new(AuthState::anonymous(TokenStore::new("unused")));
        let executor =
            HttpExecutor::new("http://localhost:8080/api/", Duration::from_secs(1), auth).unwrap();
        assert_eq!(
            executor.url("/exams/e1"),
            "http://localhost:8080/api/exams/e1"
        );
    }
}
