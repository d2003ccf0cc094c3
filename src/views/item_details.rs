/// 상품 상세 화면
/// 상품과 기관 설정을 불러오고 입찰 폼을 검증, 제출한다.
/// 최고 입찰가는 로컬에서 올리지 않고 항상 서버에서 다시 읽는다.
// region:    --- Imports
use super::guarded;
use crate::api::models::{Configuration, Created, Item};
use crate::api::AuctionBackend;
use crate::bidding::{next_default_amount, submit_bid, validate_bid, BidForm, BidPhase, PlaceBidCommand};
use crate::error::{AppError, Result, ValidationError};
use crate::toast::{ToastRequest, ToastStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Item Details View
pub struct ItemDetailsView<B: AuctionBackend> {
    backend: B,
    toasts: ToastStore,
    item_id: i64,
    item: Option<Item>,
    config: Configuration,
    form: BidForm,
    phase: BidPhase,
    loading: bool,
    cancel: CancellationToken,
}

impl<B: AuctionBackend> ItemDetailsView<B> {
    pub fn new(backend: B, toasts: ToastStore, item_id: i64) -> Self {
        Self {
            backend,
            toasts,
            item_id,
            item: None,
            config: Configuration::default(),
            form: BidForm::default(),
            phase: BidPhase::Idle,
            loading: true,
            cancel: CancellationToken::new(),
        }
    }

    /// 상품과 설정 동시 조회
    pub async fn load(&mut self) -> Result<()> {
        info!("{:<12} --> 상품 상세 로드 id: {}", "View", self.item_id);
        let fetched = guarded(&self.cancel, async {
            tokio::try_join!(
                self.backend.get_item(self.item_id),
                self.backend.get_configuration()
            )
        })
        .await;

        match fetched {
            Ok((item, config)) => {
                self.form.valor = next_default_amount(item.lance_atual);
                self.item = Some(item);
                self.config = config;
                self.loading = false;
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                error!("{:<12} --> 상품 로드 실패: {}", "View", e);
                self.toasts.show(ToastRequest::error(
                    "Erro",
                    "Não foi possível carregar os dados do item.",
                ));
                self.loading = false;
                Err(e)
            }
        }
    }

    /// 입찰 제출
    pub async fn submit(&mut self) -> Result<Created> {
        if self.item.is_none() {
            self.load().await?;
        }
        // load가 성공하면 item은 항상 Some
        let current_bid = self
            .item
            .as_ref()
            .map_or(f64::INFINITY, |item| item.lance_atual);

        self.transition(BidPhase::Validating);
        let cmd = PlaceBidCommand {
            item_id: self.item_id,
            current_bid,
            form: self.form.clone(),
        };
        let bid = match validate_bid(&cmd) {
            Ok(bid) => bid,
            Err(e) => {
                let description = self.validation_message(&e);
                self.toasts.show(ToastRequest::error("Erro", description));
                self.finish(BidPhase::Failed);
                return Err(e.into());
            }
        };

        self.transition(BidPhase::Submitting);
        let created = match guarded(&self.cancel, submit_bid(&bid, &self.backend)).await {
            Ok(created) => created,
            Err(AppError::Cancelled) => {
                self.transition(BidPhase::Idle);
                return Err(AppError::Cancelled);
            }
            Err(e) => {
                self.toasts.show(ToastRequest::error("Erro", e.to_string()));
                self.finish(BidPhase::Failed);
                return Err(e);
            }
        };

        self.toasts.show(ToastRequest::info(
            "Lance registrado!",
            "Seu lance foi registrado com sucesso.",
        ));

        // 서버 값으로 다시 읽기
        if let Err(AppError::Cancelled) = self.load().await {
            self.transition(BidPhase::Idle);
            return Ok(created);
        }

        self.form = BidForm {
            valor: next_default_amount(bid.valor),
            ..BidForm::default()
        };
        self.finish(BidPhase::Success);
        Ok(created)
    }

    /// 화면 종료: 진행 중인 요청 결과는 무시된다
    pub fn close(&self) {
        debug!("{:<12} --> 상품 상세 종료 id: {}", "View", self.item_id);
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn form(&self) -> &BidForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BidForm {
        &mut self.form
    }

    pub fn phase(&self) -> BidPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 최소 입찰 금액 안내
    pub fn minimum_bid(&self) -> Option<String> {
        self.item
            .as_ref()
            .map(|item| next_default_amount(item.lance_atual))
    }

    fn validation_message(&self, e: &ValidationError) -> String {
        match e {
            ValidationError::AmountTooLow { current } => format!(
                "O lance deve ser maior que {}",
                self.config.format_amount(*current)
            ),
            other => other.to_string(),
        }
    }

    fn transition(&mut self, phase: BidPhase) {
        debug!("{:<12} --> 입찰 단계 {:?} -> {:?}", "View", self.phase, phase);
        self.phase = phase;
    }

    /// 결과 단계를 거쳐 Idle로 복귀
    fn finish(&mut self, outcome: BidPhase) {
        self.transition(outcome);
        self.transition(BidPhase::Idle);
    }
}
// endregion: --- Item Details View

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{BidSummary, NewBid, Reference};
    use crate::toast::ToastVariant;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // 서버처럼 최고가를 검증하고 갱신하는 가짜 백엔드
    struct MockBackend {
        item: Mutex<Item>,
        bid_calls: AtomicUsize,
        item_calls: AtomicUsize,
        /// 이 횟수 이후의 get_item은 실패
        item_limit: Option<usize>,
        /// 입찰이 받아들여지는 순간 화면을 닫는다
        close_on_bid: Option<CancellationToken>,
    }

    impl MockBackend {
        fn new(lance_atual: f64) -> Self {
            Self {
                item: Mutex::new(Item {
                    id: 1,
                    nome: "Cesta de café".to_string(),
                    lance_inicial: 20.0,
                    lance_atual,
                    banner_16_9: None,
                    banner_1_1: None,
                    campanha: Reference { id: 1, nome: "Missões".to_string() },
                    categoria: Reference { id: 1, nome: "Cestas".to_string() },
                    ultimos_lances: Vec::new(),
                }),
                bid_calls: AtomicUsize::new(0),
                item_calls: AtomicUsize::new(0),
                item_limit: None,
                close_on_bid: None,
            }
        }
    }

    #[async_trait]
    impl AuctionBackend for MockBackend {
        async fn get_item(&self, _id: i64) -> Result<Item> {
            let calls = self.item_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.item_limit.is_some_and(|limit| calls > limit) {
                return Err(AppError::Request {
                    status: 500,
                    message: "Erro interno".to_string(),
                });
            }
            Ok(self.item.lock().unwrap().clone())
        }

        async fn get_configuration(&self) -> Result<Configuration> {
            Ok(Configuration::default())
        }

        async fn create_bid(&self, bid: &NewBid) -> Result<Created> {
            let calls = self.bid_calls.fetch_add(1, Ordering::SeqCst) + 1;
            let mut item = self.item.lock().unwrap();
            if bid.valor <= item.lance_atual {
                return Err(AppError::Request {
                    status: 400,
                    message: format!(
                        "O lance deve ser maior que o lance atual de R$ {:.2}",
                        item.lance_atual
                    ),
                });
            }
            item.lance_atual = bid.valor;
            if let Some(cancel) = &self.close_on_bid {
                cancel.cancel();
            }
            item.ultimos_lances.insert(
                0,
                BidSummary {
                    valor: bid.valor,
                    data: NaiveDateTime::default(),
                },
            );
            Ok(Created {
                message: "Lance registrado com sucesso!".to_string(),
                id: calls as i64,
            })
        }
    }

    fn fill(view: &mut ItemDetailsView<MockBackend>, nome: &str, telefone: &str, valor: &str) {
        let form = view.form_mut();
        form.set_name(nome);
        form.set_phone(telefone);
        form.set_amount(valor);
    }

    #[tokio::test]
    async fn load_prefills_minimum_amount() {
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), ToastStore::default(), 1);
        assert!(view.is_loading());
        view.load().await.unwrap();

        assert!(!view.is_loading());
        assert_eq!(view.form().valor, "50.01");
        assert_eq!(view.minimum_bid().as_deref(), Some("50.01"));
    }

    #[tokio::test]
    async fn successful_bid_refetches_and_resets_form() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.load().await.unwrap();
        fill(&mut view, "Maria", "11987654321", "51.00");

        let created = view.submit().await.unwrap();
        assert_eq!(created.id, 1);

        assert_eq!(view.item().unwrap().lance_atual, 51.0);
        assert_eq!(view.item().unwrap().ultimos_lances[0].valor, 51.0);
        assert_eq!(view.form().valor, "51.01");
        assert!(view.form().nome_participante.is_empty());
        assert!(view.form().telefone.is_empty());
        assert_eq!(view.phase(), BidPhase::Idle);
        assert_eq!(toasts.visible()[0].title, "Lance registrado!");
    }

    #[tokio::test]
    async fn empty_name_never_reaches_backend() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.load().await.unwrap();
        fill(&mut view, "  ", "11987654321", "51.00");

        let err = view.submit().await.unwrap_err();
        assert_eq!(err.validation_code(), Some("name_required"));
        assert_eq!(view.backend().bid_calls.load(Ordering::SeqCst), 0);

        let visible = toasts.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].variant, ToastVariant::Destructive);
        assert_eq!(view.form().valor, "51.00");
    }

    #[tokio::test]
    async fn low_amount_is_rejected_with_currency_message() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.load().await.unwrap();
        fill(&mut view, "Maria", "11987654321", "50.00");

        let err = view.submit().await.unwrap_err();
        assert_eq!(err.validation_code(), Some("amount_too_low"));
        assert_eq!(view.backend().bid_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            toasts.visible()[0].description.as_deref(),
            Some("O lance deve ser maior que R$ 50.00")
        );
    }

    #[tokio::test]
    async fn server_rejection_preserves_form() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.load().await.unwrap();

        // 다른 입찰자가 먼저 60.00을 낸 상황
        view.backend().item.lock().unwrap().lance_atual = 60.0;
        fill(&mut view, "Maria", "11987654321", "55.00");

        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, AppError::Request { status: 400, .. }));
        assert_eq!(view.form().valor, "55.00");
        assert_eq!(view.form().nome_participante, "Maria");
        assert_eq!(
            toasts.visible()[0].description.as_deref(),
            Some("O lance deve ser maior que o lance atual de R$ 60.00")
        );
    }

    #[tokio::test]
    async fn closed_view_ignores_results() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.close();

        let err = view.load().await.unwrap_err();
        assert!(matches!(err, AppError::Cancelled));
        assert!(view.item().is_none());
        assert!(toasts.toasts().is_empty());
    }

    #[tokio::test]
    async fn failed_refetch_still_counts_bid() {
        let toasts = ToastStore::default();
        let backend = MockBackend {
            item_limit: Some(1),
            ..MockBackend::new(50.0)
        };
        let mut view = ItemDetailsView::new(backend, toasts.clone(), 1);
        view.load().await.unwrap();
        fill(&mut view, "Maria", "11987654321", "51.00");

        let created = view.submit().await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(view.backend().bid_calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.form().valor, "51.01");
        assert!(view.form().nome_participante.is_empty());
        assert_eq!(view.phase(), BidPhase::Idle);

        let visible = toasts.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible[0].description.as_deref(),
            Some("Não foi possível carregar os dados do item.")
        );
    }

    #[tokio::test]
    async fn closing_during_refetch_returns_to_idle() {
        let toasts = ToastStore::default();
        let mut view = ItemDetailsView::new(MockBackend::new(50.0), toasts.clone(), 1);
        view.load().await.unwrap();
        view.backend.close_on_bid = Some(view.cancellation_token());
        fill(&mut view, "Maria", "11987654321", "51.00");

        let created = view.submit().await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(view.phase(), BidPhase::Idle);
        // 닫힌 화면은 갱신하지 않는다
        assert_eq!(view.item().unwrap().lance_atual, 50.0);
        assert_eq!(view.form().nome_participante, "Maria");
        assert_eq!(toasts.visible()[0].title, "Lance registrado!");
    }
}
