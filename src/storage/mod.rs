/// 세션 저장소
/// 로그인 토큰과 사용자 정보를 프로세스 재시작 후에도 유지한다.
// region:    --- Imports
use crate::api::models::User;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Session Model
/// 저장되는 세션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}
// endregion: --- Session Model

// region:    --- Session Store Trait
/// 세션 저장소 트레이트
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<StoredSession>>;
    async fn save(&self, session: &StoredSession) -> Result<()>;
    async fn clear(&self) -> Result<()>;

    /// 저장된 토큰만 조회
    async fn token(&self) -> Result<Option<String>> {
        Ok(self.load().await?.map(|s| s.token))
    }
}
// endregion: --- Session Store Trait

// region:    --- File Session Store
/// JSON 파일 기반 세션 저장소
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // 손상된 파일은 세션 없음으로 취급
                warn!(
                    "{:<12} --> 세션 파일 파싱 실패 {}: {}",
                    "Storage",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_vec_pretty(session).map_err(|e| AppError::Decode(e.to_string()))?;
        tokio::fs::write(&self.path, raw).await?;
        debug!("{:<12} --> 세션 저장: {}", "Storage", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
// endregion: --- File Session Store

// region:    --- Memory Session Store
/// 메모리 세션 저장소 (테스트, 일회성 실행용)
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().await = None;
        Ok(())
    }
}
// endregion: --- Memory Session Store
