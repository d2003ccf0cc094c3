// region:    --- Imports
use super::guarded;
use crate::api::models::Dashboard;
use crate::auth::{AuthContext, RouteAccess};
use crate::error::{AppError, Result};
use crate::toast::{ToastRequest, ToastStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Dashboard View
/// 관리자 대시보드 화면
pub struct DashboardView {
    toasts: ToastStore,
    data: Option<Dashboard>,
    cancel: CancellationToken,
}

impl DashboardView {
    pub fn new(toasts: ToastStore) -> Self {
        Self {
            toasts,
            data: None,
            cancel: CancellationToken::new(),
        }
    }

    /// 접근 가능할 때만 집계 조회. 접근 판단 결과를 돌려준다.
    pub async fn load(&mut self, auth: &AuthContext) -> Result<RouteAccess> {
        let access = auth.access();
        if !matches!(access, RouteAccess::Granted(_)) {
            warn!("{:<12} --> 대시보드 접근 불가: {:?}", "View", access);
            return Ok(access);
        }

        info!("{:<12} --> 대시보드 로드", "View");
        match guarded(&self.cancel, auth.api().get_dashboard()).await {
            Ok(data) => {
                self.data = Some(data);
                Ok(access)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                error!("{:<12} --> 대시보드 로드 실패: {}", "View", e);
                self.toasts.show(ToastRequest::error(
                    "Erro",
                    "Não foi possível carregar os dados do dashboard.",
                ));
                Err(e)
            }
        }
    }

    /// 로그아웃 후 안내 토스트
    pub async fn logout(&mut self, auth: &AuthContext) {
        auth.logout().await;
        self.data = None;
        self.toasts.show(ToastRequest::info(
            "Logout realizado",
            "Você foi desconectado com sucesso.",
        ));
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn data(&self) -> Option<&Dashboard> {
        self.data.as_ref()
    }
}
// endregion: --- Dashboard View
