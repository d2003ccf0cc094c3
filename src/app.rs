// region:    --- Imports
use crate::api::ApiClient;
use crate::auth::AuthContext;
use crate::config::Config;
use crate::storage::{FileSessionStore, SessionStore};
use crate::toast::ToastStore;
use std::sync::Arc;

// endregion: --- Imports

/// 화면들이 참조로 공유하는 애플리케이션 컨텍스트
pub struct AppContext {
    pub api: ApiClient,
    pub auth: AuthContext,
    pub toasts: ToastStore,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_file.clone()));
        Self::with_store(&config.api_url, store)
    }

    pub fn with_store(api_url: &str, store: Arc<dyn SessionStore>) -> Self {
        let api = ApiClient::new(api_url, store);
        Self {
            auth: AuthContext::new(api.clone()),
            api,
            toasts: ToastStore::default(),
        }
    }
}
