// region:    --- Imports
use crate::api::models::User;
use crate::auth::AuthContext;
use crate::error::Result;
use crate::toast::{ToastRequest, ToastStore};

// endregion: --- Imports

/// 관리자 로그인 화면
pub struct LoginView {
    toasts: ToastStore,
}

impl LoginView {
    pub fn new(toasts: ToastStore) -> Self {
        Self { toasts }
    }

    /// 로그인 시도. 실패하면 인증 상태는 그대로 두고 토스트로 알린다.
    pub async fn submit(&self, auth: &AuthContext, email: &str, senha: &str) -> Result<User> {
        match auth.login(email, senha).await {
            Ok(user) => {
                self.toasts.show(ToastRequest::info(
                    "Login realizado",
                    format!("Bem-vindo, {}!", user.nome),
                ));
                Ok(user)
            }
            Err(e) => {
                self.toasts.show(ToastRequest::error("Erro", e.to_string()));
                Err(e)
            }
        }
    }
}
