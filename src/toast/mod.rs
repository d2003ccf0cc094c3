/// 토스트 알림 저장소
/// 화면과 분리된 발행/구독 상태 컨테이너. 전역 변수 대신 핸들을 복제해서 넘긴다.
// region:    --- Imports
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;

// endregion: --- Imports

/// 동시에 보이는 토스트 최대 개수
pub const TOAST_LIMIT: usize = 1;
/// 자동으로 닫히기까지의 시간
pub const TOAST_DURATION: Duration = Duration::from_secs(5);
/// 닫힌 토스트가 목록에서 제거되기까지의 시간
pub const TOAST_REMOVE_DELAY: Duration = Duration::from_secs(1000);

// region:    --- Toast Model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// 토스트 생성 요청
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRequest {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl ToastRequest {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub open: bool,
}
// endregion: --- Toast Model

// region:    --- Toast Store
#[derive(Debug, Clone, Copy)]
pub struct ToastSettings {
    pub limit: usize,
    /// None이면 자동으로 닫지 않음
    pub duration: Option<Duration>,
    pub remove_delay: Duration,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            limit: TOAST_LIMIT,
            duration: Some(TOAST_DURATION),
            remove_delay: TOAST_REMOVE_DELAY,
        }
    }
}

struct Inner {
    next_id: AtomicU64,
    state: watch::Sender<Vec<Toast>>,
    settings: ToastSettings,
}

#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<Inner>,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(ToastSettings::default())
    }
}

impl ToastStore {
    pub fn new(settings: ToastSettings) -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(0),
                state,
                settings,
            }),
        }
    }

    /// 토스트 표시. 새 토스트가 앞에 오고 limit을 넘는 오래된 항목은 밀려난다.
    pub fn show(&self, request: ToastRequest) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let limit = self.inner.settings.limit;
        debug!("{:<12} --> 토스트 표시 id={}: {}", "Toast", id, request.title);

        self.inner.state.send_modify(|toasts| {
            toasts.insert(
                0,
                Toast {
                    id,
                    title: request.title,
                    description: request.description,
                    variant: request.variant,
                    open: true,
                },
            );
            toasts.truncate(limit);
        });

        if let Some(duration) = self.inner.settings.duration {
            self.schedule(duration, move |store| store.dismiss(Some(id)));
        }
        id
    }

    /// 토스트 내용 변경
    pub fn update(&self, id: u64, request: ToastRequest) {
        self.inner.state.send_if_modified(|toasts| {
            match toasts.iter_mut().find(|t| t.id == id) {
                Some(toast) => {
                    toast.title = request.title;
                    toast.description = request.description;
                    toast.variant = request.variant;
                    true
                }
                None => false,
            }
        });
    }

    /// 토스트 닫기. id가 없으면 전부 닫는다.
    pub fn dismiss(&self, id: Option<u64>) {
        let mut closed = Vec::new();
        self.inner.state.send_if_modified(|toasts| {
            for toast in toasts.iter_mut() {
                if toast.open && id.map_or(true, |id| toast.id == id) {
                    toast.open = false;
                    closed.push(toast.id);
                }
            }
            !closed.is_empty()
        });

        let delay = self.inner.settings.remove_delay;
        for id in closed {
            self.schedule(delay, move |store| store.remove(id));
        }
    }

    /// 닫힌 토스트 제거
    pub fn remove(&self, id: u64) {
        self.inner.state.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id || t.open);
            toasts.len() != before
        });
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.state.borrow().clone()
    }

    /// 현재 열려 있는 토스트
    pub fn visible(&self) -> Vec<Toast> {
        self.inner
            .state
            .borrow()
            .iter()
            .filter(|t| t.open)
            .cloned()
            .collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.state.subscribe()
    }

    /// 지연 작업 예약 (tokio 런타임이 없으면 무시)
    fn schedule(&self, delay: Duration, task: impl FnOnce(&ToastStore) + Send + 'static) {
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                task(&ToastStore { inner });
            }
        });
    }
}
// endregion: --- Toast Store
