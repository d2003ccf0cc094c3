pub mod dashboard;
pub mod home;
pub mod item_details;
pub mod login;

// region:    --- Imports
use crate::error::{AppError, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

pub use dashboard::DashboardView;
pub use home::HomeView;
pub use item_details::ItemDetailsView;
pub use login::LoginView;

// endregion: --- Imports

/// 화면이 닫히면 진행 중인 요청 결과를 버린다
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = fut => result,
    }
}
