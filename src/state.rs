//! 应用级状态容器
//!
//! 当前用户和登录标记不再是全局变量，而是显式注入的 `AuthState`，
//! 只能通过下面的方法修改。

use crate::error::AppResult;
use crate::infrastructure::TokenStore;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

#[derive(Debug, Default)]
struct AuthInner {
    token: Option<String>,
    user_id: Option<String>,
    logout_reason: Option<String>,
}

/// 登录状态
#[derive(Debug)]
pub struct AuthState {
    store: TokenStore,
    inner: RwLock<AuthInner>,
}

impl AuthState {
    /// 未登录状态
    pub fn anonymous(store: TokenStore) -> Self {
        Self {
            store,
            inner: RwLock::new(AuthInner::default()),
        }
    }

    /// 从令牌文件恢复
    pub async fn restore(store: TokenStore) -> AppResult<Self> {
        let token = store.load().await?;
        if token.is_some() {
            info!("🔑 已从 {} 恢复访问令牌", store.path().display());
        }
        Ok(Self {
            store,
            inner: RwLock::new(AuthInner {
                token,
                ..Default::default()
            }),
        })
    }

    /// 登录：保存令牌并记录当前用户
    pub async fn sign_in(&self, token: impl Into<String>, user_id: impl Into<String>) -> AppResult<()> {
        let token = token.into();
        self.store.save(&token).await?;
        let mut inner = self.write();
        inner.token = Some(token);
        inner.user_id = Some(user_id.into());
        inner.logout_reason = None;
        Ok(())
    }

    /// 记录当前用户（令牌沿用已恢复的值）
    pub fn set_current_user(&self, user_id: impl Into<String>) {
        self.write().user_id = Some(user_id.into());
    }

    /// 强制登出，由 HTTP 层在收到 401 时调用
    pub async fn force_logout(&self, reason: &str) {
        {
            let mut inner = self.write();
            if inner.token.is_none() && inner.logout_reason.is_some() {
                return;
            }
            inner.token = None;
            inner.user_id = None;
            inner.logout_reason = Some(reason.to_string());
        }
        warn!("🔒 登录状态失效，已强制登出: {}", reason);
        if let Err(e) = self.store.clear().await {
            warn!("清理令牌文件失败: {}", e);
        }
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    pub fn current_user(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    pub fn logout_reason(&self) -> Option<String> {
        self.read().logout_reason.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_then_forced_logout_clears_everything() {
        let path = std::env::temp_dir().join(format!("exam_session_auth_{}", std::process::id()));
        let store = TokenStore::new(&path);
        let auth = AuthState::anonymous(store.clone());
        assert!(!auth.is_authenticated());

        auth.sign_in("tok-1", "stu-42").await.unwrap();
        assert_eq!(auth.bearer_token().as_deref(), Some("tok-1"));
        assert_eq!(auth.current_user().as_deref(), Some("stu-42"));
        assert_eq!(store.load().await.unwrap().as_deref(), Some("tok-1"));

        auth.force_logout("会话已在其他设备登录").await;
        assert!(!auth.is_authenticated());
        assert!(auth.current_user().is_none());
        assert_eq!(auth.logout_reason().as_deref(), Some("会话已在其他设备登录"));
        assert_eq!(store.load().await.unwrap(), None);

        let restored = AuthState::restore(store).await.unwrap();
        assert!(!restored.is_authenticated());
    }
}
