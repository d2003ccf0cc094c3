use serde::{Deserialize, Serialize};

use super::mask::mask_phone;

/// 다음 입찰 기본값에 더하는 최소 증가분
pub const MIN_INCREMENT: f64 = 0.01;

/// 유효한 전화번호의 최소 숫자 개수
pub const MIN_PHONE_DIGITS: usize = 10;

// 입찰 입력 폼
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidForm {
    pub valor: String,
    pub nome_participante: String,
    pub telefone: String,
}

impl BidForm {
    /// 입력 중인 전화번호에 마스크 적용
    pub fn set_phone(&mut self, input: &str) {
        self.telefone = mask_phone(input);
    }

    pub fn set_name(&mut self, input: &str) {
        self.nome_participante = input.to_string();
    }

    pub fn set_amount(&mut self, input: &str) {
        self.valor = input.to_string();
    }
}

// 입찰 처리 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BidPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// 성공한 입찰 다음에 보여줄 기본 금액
pub fn next_default_amount(valor: f64) -> String {
    format!("{:.2}", valor + MIN_INCREMENT)
}
