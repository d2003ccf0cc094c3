// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Validation Error
/// 네트워크 호출 전에 클라이언트에서 걸러지는 입력 오류
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Por favor, informe seu nome.")]
    NameRequired,

    #[error("Por favor, informe um telefone válido.")]
    PhoneInvalid,

    #[error("O lance deve ser maior que {current:.2}")]
    AmountTooLow { current: f64 },

    #[error("Credenciais inválidas!")]
    InvalidCredentials,
}

impl ValidationError {
    /// 안정적인 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name_required",
            ValidationError::PhoneInvalid => "phone_invalid",
            ValidationError::AmountTooLow { .. } => "amount_too_low",
            ValidationError::InvalidCredentials => "invalid_credentials",
        }
    }
}
// endregion: --- Validation Error

// region:    --- App Error
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Falha de conexão: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),

    #[error("Falha no armazenamento da sessão: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Operação cancelada")]
    Cancelled,
}

impl AppError {
    /// 검증 오류라면 해당 코드 반환
    pub fn validation_code(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(e) => Some(e.code()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
// endregion: --- App Error
