// region:    --- Imports
use std::env;
use std::path::PathBuf;
use tracing::info;

// endregion: --- Imports

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

// region:    --- Config
/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn load() -> Self {
        Self {
            api_url: var_or("LEILAO_API_URL", DEFAULT_API_URL),
            session_file: env::var("LEILAO_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
        }
    }

    /// API 주소 덮어쓰기
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{:<12} --> {key} 미설정, 기본값 사용: {default}", "Config");
        default.to_string()
    })
}

fn default_session_file() -> PathBuf {
    let base = env::var("HOME").map(PathBuf::from).unwrap_or_default();
    base.join(".leilao").join("session.json")
}
// endregion: --- Config
