/// 입찰 관련 커맨드 처리
/// 1. 입력 검증
/// 2. 입찰 등록
// region:    --- Imports
use super::mask::digits_only;
use super::model::{BidForm, MIN_PHONE_DIGITS};
use crate::api::models::{Created, NewBid};
use crate::api::AuctionBackend;
use crate::error::{Result, ValidationError};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Clone)]
pub struct PlaceBidCommand {
    pub item_id: i64,
    /// 클라이언트가 마지막으로 본 최고 입찰가
    pub current_bid: f64,
    pub form: BidForm,
}

/// 1. 입력 검증 (이름 → 전화번호 → 금액 순서)
pub fn validate_bid(cmd: &PlaceBidCommand) -> std::result::Result<NewBid, ValidationError> {
    let form = &cmd.form;

    if form.nome_participante.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if digits_only(&form.telefone).len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::PhoneInvalid);
    }

    let valor = match form.valor.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > cmd.current_bid => v,
        _ => {
            return Err(ValidationError::AmountTooLow {
                current: cmd.current_bid,
            })
        }
    };

    Ok(NewBid {
        item_id: cmd.item_id,
        valor,
        nome_participante: form.nome_participante.clone(),
        telefone: form.telefone.clone(),
    })
}

/// 2. 입찰 등록
/// 검증을 통과한 입찰만 전달되어야 한다.
pub async fn submit_bid(bid: &NewBid, backend: &impl AuctionBackend) -> Result<Created> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: item={} valor={:.2}",
        "Bid", bid.item_id, bid.valor
    );

    let created = backend.create_bid(bid).await.map_err(|e| {
        warn!("{:<12} --> 입찰 등록 실패: {}", "Bid", e);
        e
    })?;

    info!(
        "{:<12} --> 입찰 등록 완료: id={} valor={:.2}",
        "Bid", created.id, bid.valor
    );
    Ok(created)
}
// endregion: --- Commands
