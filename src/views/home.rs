// region:    --- Imports
use super::guarded;
use crate::api::models::{Configuration, Item};
use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::toast::{ToastRequest, ToastStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Home View
/// 공개 상품 목록 화면
pub struct HomeView {
    api: ApiClient,
    toasts: ToastStore,
    campanha_id: Option<i64>,
    items: Vec<Item>,
    config: Configuration,
    cancel: CancellationToken,
}

impl HomeView {
    pub fn new(api: ApiClient, toasts: ToastStore, campanha_id: Option<i64>) -> Self {
        Self {
            api,
            toasts,
            campanha_id,
            items: Vec::new(),
            config: Configuration::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// 상품 목록과 설정 동시 조회
    pub async fn load(&mut self) -> Result<()> {
        info!("{:<12} --> 상품 목록 로드", "View");
        let fetched = guarded(&self.cancel, async {
            tokio::try_join!(
                self.api.get_items(self.campanha_id),
                self.api.get_configuration()
            )
        })
        .await;

        match fetched {
            Ok((items, config)) => {
                self.items = items;
                self.config = config;
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                error!("{:<12} --> 상품 목록 로드 실패: {}", "View", e);
                self.toasts.show(ToastRequest::error(
                    "Erro",
                    "Não foi possível carregar os itens.",
                ));
                Err(e)
            }
        }
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
// endregion: --- Home View
