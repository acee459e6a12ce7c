//! 访问令牌的持久化存储
//!
//! 考试状态不在本地持久化，刷新后全部从服务端重建；这里只保存令牌。

use crate::error::{AppError, AppResult, FileError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取令牌，文件不存在或内容为空时返回 `None`
    pub async fn load(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::file_read_failed(self.path.display().to_string(), e)),
        }
    }

    pub async fn save(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }
        fs::write(&self.path, token)
            .await
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        debug!("令牌已写入 {}", self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::File(FileError::DeleteFailed {
                path: self.path.display().to_string(),
                source: Box::new(e),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> TokenStore {
        let dir = std::env::temp_dir().join(format!(
            "exam_session_token_{}_{}",
            name,
            std::process::id()
        ));
        TokenStore::new(dir.join("token"))
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = temp_store("roundtrip");
        assert_eq!(store.load().await.unwrap(), None);

        store.save("abc.def.ghi\n").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("abc.def.ghi"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        // 重复清理不报错
        store.clear().await.unwrap();
    }
}
