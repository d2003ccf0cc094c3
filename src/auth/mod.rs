/// 인증 컨텍스트
/// 현재 사용자와 토큰을 보관하고 로그인/로그아웃 수명 주기를 관리한다.
// region:    --- Imports
use crate::api::models::User;
use crate::api::ApiClient;
use crate::error::{AppError, Result, ValidationError};
use crate::storage::{SessionStore, StoredSession};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Auth State
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 저장된 세션 확인 중
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }
}

/// 보호된 화면 접근 판단 결과
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAccess {
    Pending,
    Denied,
    Granted(User),
}
// endregion: --- Auth State

// region:    --- Auth Context
pub struct AuthContext {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    state: watch::Sender<AuthState>,
}

impl AuthContext {
    /// API 클라이언트와 같은 세션 저장소를 사용한다
    pub fn new(api: ApiClient) -> Self {
        let store = api.session_store();
        let (state, _) = watch::channel(AuthState::default());
        Self { api, store, state }
    }

    /// 저장된 세션 복원 (validate가 참이면 서버에 토큰 확인)
    pub async fn initialize(&self, validate: bool) -> Result<()> {
        let session = match self.store.load().await {
            Ok(session) => session,
            Err(e) => {
                self.state.send_modify(|s| s.loading = false);
                return Err(e);
            }
        };

        let session = match session {
            Some(session) if validate => match self.api.me().await {
                Ok(_) => Some(session),
                Err(AppError::Request { status, message }) if status == 401 => {
                    warn!(
                        "{:<12} --> 저장된 토큰 거부됨 ({}): {}",
                        "Auth", status, message
                    );
                    if let Err(e) = self.store.clear().await {
                        warn!("{:<12} --> 세션 삭제 실패: {}", "Auth", e);
                    }
                    None
                }
                Err(e) => {
                    self.state.send_modify(|s| s.loading = false);
                    return Err(e);
                }
            },
            other => other,
        };

        info!(
            "{:<12} --> 세션 초기화 완료: 로그인={}",
            "Auth",
            session.is_some()
        );
        self.state.send_replace(AuthState {
            user: session.as_ref().map(|s| s.user.clone()),
            token: session.map(|s| s.token),
            loading: false,
        });
        Ok(())
    }

    /// 로그인
    pub async fn login(&self, email: &str, senha: &str) -> Result<User> {
        if email.trim().is_empty() || senha.is_empty() {
            return Err(ValidationError::InvalidCredentials.into());
        }

        let response = match self.api.login(email, senha).await {
            Ok(response) => response,
            Err(AppError::Request { status, message }) if status == 401 || status == 400 => {
                warn!("{:<12} --> 로그인 실패 ({}): {}", "Auth", status, message);
                return Err(ValidationError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let session = StoredSession {
            token: response.token,
            user: response.user,
        };
        self.store.save(&session).await?;

        info!("{:<12} --> 로그인 성공: {}", "Auth", session.user.email);
        let user = session.user.clone();
        self.state.send_replace(AuthState {
            user: Some(session.user),
            token: Some(session.token),
            loading: false,
        });
        Ok(user)
    }

    /// 로그아웃 (네트워크 호출 없음, 항상 상태를 비운다)
    pub async fn logout(&self) {
        self.state.send_replace(AuthState {
            user: None,
            token: None,
            loading: false,
        });
        if let Err(e) = self.store.clear().await {
            warn!("{:<12} --> 세션 삭제 실패: {}", "Auth", e);
        }
        info!("{:<12} --> 로그아웃", "Auth");
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// 보호된 화면 접근 가드
    pub fn access(&self) -> RouteAccess {
        let state = self.state.borrow();
        if state.loading {
            return RouteAccess::Pending;
        }
        match &state.user {
            Some(user) => RouteAccess::Granted(user.clone()),
            None => RouteAccess::Denied,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
// endregion: --- Auth Context
