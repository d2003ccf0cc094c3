// region:    --- Imports
use super::models::{
    AuditEntry, Bid, BidFilters, Campaign, CampaignUpdate, Category, CategoryInput,
    Configuration, ConfigurationUpdate, Created, Dashboard, Item, ItemUpdate, LoginRequest,
    LoginResponse, MeResponse, MessageResponse, NewBid, NewCampaign, NewItem, NewUser, User,
    UserUpdate,
};
use crate::error::{AppError, Result};
use crate::storage::SessionStore;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

// endregion: --- Imports

/// 서버가 메시지를 주지 않았을 때의 기본 오류 메시지
pub const GENERIC_ERROR_MESSAGE: &str = "Erro na requisição";

// region:    --- Api Client
/// 경매 백엔드 REST 클라이언트
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 토큰을 읽는 세션 저장소
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    /// 요청 빌더 생성 (auth 플래그가 있으면 저장된 토큰 첨부)
    async fn builder(&self, method: Method, endpoint: &str, auth: bool) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if auth {
            if let Some(token) = self.store.token().await? {
                builder = builder.bearer_auth(token);
            }
        }
        Ok(builder)
    }

    /// 요청 전송 및 상태 코드 검사
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(AppError::Network)?;
        let label = format!("{} {}", request.method(), request.url().path());
        debug!("{:<12} --> {}", "ApiClient", label);

        let response = self.http.execute(request).await.map_err(|e| {
            error!("{:<12} --> API Error: {} 전송 실패: {}", "ApiClient", label, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        error!(
            "{:<12} --> API Error: {} -> {}: {}",
            "ApiClient", label, status, message
        );
        Err(AppError::Request {
            status: status.as_u16(),
            message,
        })
    }

    /// 요청 전송 후 JSON 본문 디코딩
    async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await.map_err(AppError::Network)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("{:<12} --> API Error: 응답 디코딩 실패: {}", "ApiClient", e);
            AppError::Decode(e.to_string())
        })
    }

    // region:    --- Auth

    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse> {
        let req = self.builder(Method::POST, "/login", false).await?;
        self.request(req.json(&LoginRequest { email, senha })).await
    }

    /// 저장된 토큰 유효성 확인
    pub async fn me(&self) -> Result<MeResponse> {
        let req = self.builder(Method::GET, "/me", true).await?;
        self.request(req).await
    }

    // endregion: --- Auth

    // region:    --- Campaigns

    pub async fn get_campaigns(&self, status: Option<&str>) -> Result<Vec<Campaign>> {
        let mut req = self.builder(Method::GET, "/campanhas", false).await?;
        if let Some(status) = status {
            req = req.query(&[("status", status)]);
        }
        self.request(req).await
    }

    pub async fn get_campaign(&self, id: i64) -> Result<Campaign> {
        let req = self
            .builder(Method::GET, &format!("/campanhas/{id}"), false)
            .await?;
        self.request(req).await
    }

    pub async fn create_campaign(&self, data: &NewCampaign) -> Result<Created> {
        let req = self.builder(Method::POST, "/campanhas", true).await?;
        self.request(req.json(data)).await
    }

    pub async fn update_campaign(&self, id: i64, data: &CampaignUpdate) -> Result<MessageResponse> {
        let req = self
            .builder(Method::PUT, &format!("/campanhas/{id}"), true)
            .await?;
        self.request(req.json(data)).await
    }

    pub async fn delete_campaign(&self, id: i64) -> Result<MessageResponse> {
        let req = self
            .builder(Method::DELETE, &format!("/campanhas/{id}"), true)
            .await?;
        self.request(req).await
    }

    // endregion: --- Campaigns

    // region:    --- Categories

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        let req = self.builder(Method::GET, "/categorias", false).await?;
        self.request(req).await
    }

    pub async fn create_category(&self, data: &CategoryInput) -> Result<Created> {
        let req = self.builder(Method::POST, "/categorias", true).await?;
        self.request(req.json(data)).await
    }

    pub async fn update_category(&self, id: i64, data: &CategoryInput) -> Result<MessageResponse> {
        let req = self
            .builder(Method::PUT, &format!("/categorias/{id}"), true)
            .await?;
        self.request(req.json(data)).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<MessageResponse> {
        let req = self
            .builder(Method::DELETE, &format!("/categorias/{id}"), true)
            .await?;
        self.request(req).await
    }

    // endregion: --- Categories

    // region:    --- Items

    pub async fn get_items(&self, campanha_id: Option<i64>) -> Result<Vec<Item>> {
        let mut req = self.builder(Method::GET, "/itens", false).await?;
        if let Some(campanha_id) = campanha_id {
            req = req.query(&[("campanha_id", campanha_id)]);
        }
        self.request(req).await
    }

    pub async fn get_item(&self, id: i64) -> Result<Item> {
        let req = self
            .builder(Method::GET, &format!("/itens/{id}"), false)
            .await?;
        self.request(req).await
    }

    pub async fn create_item(&self, data: &NewItem) -> Result<Created> {
        let req = self.builder(Method::POST, "/itens", true).await?;
        self.request(req.json(data)).await
    }

    pub async fn update_item(&self, id: i64, data: &ItemUpdate) -> Result<MessageResponse> {
        let req = self
            .builder(Method::PUT, &format!("/itens/{id}"), true)
            .await?;
        self.request(req.json(data)).await
    }

    pub async fn delete_item(&self, id: i64) -> Result<MessageResponse> {
        let req = self
            .builder(Method::DELETE, &format!("/itens/{id}"), true)
            .await?;
        self.request(req).await
    }

    // endregion: --- Items

    // region:    --- Bids

    pub async fn get_bids(&self, filters: &BidFilters) -> Result<Vec<Bid>> {
        let req = self.builder(Method::GET, "/lances", true).await?;
        self.request(req.query(filters)).await
    }

    /// 공개 입찰 등록 (인증 불필요)
    pub async fn create_bid(&self, bid: &NewBid) -> Result<Created> {
        let req = self.builder(Method::POST, "/lances", false).await?;
        self.request(req.json(bid)).await
    }

    pub async fn get_latest_bids(&self) -> Result<Vec<Bid>> {
        let req = self.builder(Method::GET, "/lances/ultimos", true).await?;
        self.request(req).await
    }

    /// 입찰 내역 CSV
    pub async fn export_bids_csv(&self) -> Result<String> {
        let req = self.builder(Method::GET, "/lances/exportar", true).await?;
        self.send(req)
            .await?
            .text()
            .await
            .map_err(AppError::Network)
    }

    // endregion: --- Bids

    // region:    --- Dashboard & Configuration

    pub async fn get_dashboard(&self) -> Result<Dashboard> {
        let req = self.builder(Method::GET, "/dashboard", true).await?;
        self.request(req).await
    }

    pub async fn get_configuration(&self) -> Result<Configuration> {
        let req = self.builder(Method::GET, "/configuracoes", false).await?;
        self.request(req).await
    }

    pub async fn update_configuration(&self, data: &ConfigurationUpdate) -> Result<MessageResponse> {
        let req = self.builder(Method::POST, "/configuracoes", true).await?;
        self.request(req.json(data)).await
    }

    pub async fn get_audit_log(&self) -> Result<Vec<AuditEntry>> {
        let req = self.builder(Method::GET, "/auditoria", true).await?;
        self.request(req).await
    }

    // endregion: --- Dashboard & Configuration

    // region:    --- Users

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let req = self.builder(Method::GET, "/usuarios", true).await?;
        self.request(req).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        let req = self
            .builder(Method::GET, &format!("/usuarios/{id}"), true)
            .await?;
        self.request(req).await
    }

    pub async fn create_user(&self, data: &NewUser) -> Result<Created> {
        let req = self.builder(Method::POST, "/usuarios", true).await?;
        self.request(req.json(data)).await
    }

    pub async fn update_user(&self, id: i64, data: &UserUpdate) -> Result<MessageResponse> {
        let req = self
            .builder(Method::PUT, &format!("/usuarios/{id}"), true)
            .await?;
        self.request(req.json(data)).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<MessageResponse> {
        let req = self
            .builder(Method::DELETE, &format!("/usuarios/{id}"), true)
            .await?;
        self.request(req).await
    }

    // endregion: --- Users
}
// endregion: --- Api Client

/// 오류 응답 본문에서 메시지 추출
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}
