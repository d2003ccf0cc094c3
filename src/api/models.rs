use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

// region:    --- Shared

// 다른 리소스를 가리키는 참조 {id, nome}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: i64,
    pub nome: String,
}

// 단순 메시지 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// 생성 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub id: i64,
}

// endregion: --- Shared

// region:    --- Items

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub nome: String,
    pub lance_inicial: f64,
    pub lance_atual: f64,
    #[serde(default)]
    pub banner_16_9: Option<String>,
    #[serde(default)]
    pub banner_1_1: Option<String>,
    pub campanha: Reference,
    pub categoria: Reference,
    #[serde(default)]
    pub ultimos_lances: Vec<BidSummary>,
}

// 상품 상세의 최근 입찰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSummary {
    pub valor: f64,
    #[serde(with = "timestamp")]
    pub data: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub nome: String,
    pub campanha_id: i64,
    pub categoria_id: i64,
    pub lance_inicial: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_16_9: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_1_1: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campanha_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lance_inicial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_16_9: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_1_1: Option<String>,
}

// endregion: --- Items

// region:    --- Bids

// 입찰 생성 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBid {
    pub item_id: i64,
    pub valor: f64,
    pub nome_participante: String,
    pub telefone: String,
}

// 관리자 입찰 목록 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub valor: f64,
    pub nome_participante: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(with = "timestamp")]
    pub data_lance: NaiveDateTime,
    pub item: Reference,
    #[serde(default)]
    pub categoria: Option<Reference>,
}

/// 입찰 목록 필터
#[derive(Debug, Clone, Default, Serialize)]
pub struct BidFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<String>,
}

// endregion: --- Bids

// region:    --- Campaigns & Categories

// 캠페인 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub nome: String,
    pub ano: i32,
    pub status: String,
    #[serde(default)]
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCampaign {
    pub nome: String,
    pub ano: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

// 카테고리 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInput {
    pub nome: String,
}

// endregion: --- Campaigns & Categories

// region:    --- Configuration

pub const DEFAULT_INSTITUTION: &str = "Leilão Missionário";
pub const DEFAULT_CURRENCY: &str = "R$";
pub const DEFAULT_HOME_MESSAGE: &str = "Participe e contribua com nossa missão!";

// 기관 설정 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default = "default_institution", deserialize_with = "institution_or_default")]
    pub nome_instituicao: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_currency", deserialize_with = "currency_or_default")]
    pub moeda: String,
    #[serde(default = "default_home_message", deserialize_with = "home_message_or_default")]
    pub mensagem_home: String,
}

fn default_institution() -> String {
    DEFAULT_INSTITUTION.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_home_message() -> String {
    DEFAULT_HOME_MESSAGE.to_string()
}

// null 또는 빈 문자열이면 기본값
fn text_or<'de, D: Deserializer<'de>>(deserializer: D, default: &str) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string()))
}

fn institution_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, DEFAULT_INSTITUTION)
}

fn currency_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, DEFAULT_CURRENCY)
}

fn home_message_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, DEFAULT_HOME_MESSAGE)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            id: None,
            nome_instituicao: DEFAULT_INSTITUTION.to_string(),
            logo: None,
            telefone: None,
            email: None,
            moeda: DEFAULT_CURRENCY.to_string(),
            mensagem_home: DEFAULT_HOME_MESSAGE.to_string(),
        }
    }
}

impl Configuration {
    /// 통화 기호를 붙여 금액 표시
    pub fn format_amount(&self, valor: f64) -> String {
        format!("{} {:.2}", self.moeda, valor)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigurationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_instituicao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moeda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensagem_home: Option<String>,
}

// endregion: --- Configuration

// region:    --- Dashboard & Audit

// 대시보드 집계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub campanhas_ativas: i64,
    pub total_itens: i64,
    pub total_lances: i64,
    pub valor_arrecadado: f64,
    #[serde(default)]
    pub ultimos_lances: Vec<Bid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditUser {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

// 감사 로그
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub acao: String,
    #[serde(with = "timestamp")]
    pub data_acao: NaiveDateTime,
    #[serde(default)]
    pub usuario: Option<AuditUser>,
}

// endregion: --- Dashboard & Audit

// region:    --- Users & Auth

// 관리자 사용자 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub permissao: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.permissao == "admin"
    }

    /// 캠페인, 상품, 카테고리 관리 권한
    pub fn can_manage(&self) -> bool {
        matches!(self.permissao.as_str(), "admin" | "gestor")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub permissao: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissao: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub senha: &'a str,
}

// 로그인 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// 토큰에서 복원된 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub id: i64,
    pub email: String,
    pub permissao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: TokenIdentity,
}

// endregion: --- Users & Auth

// region:    --- Timestamp

/// ISO-8601 시각 (오프셋 유무 모두 허용, 오프셋이 있으면 UTC로 변환)
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, FORMAT))
            .ok()
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

// endregion: --- Timestamp
