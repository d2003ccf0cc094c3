pub mod client;
pub mod models;

// region:    --- Imports
use crate::error::Result;
use async_trait::async_trait;
use models::{Configuration, Created, Item, NewBid};

pub use client::{ApiClient, GENERIC_ERROR_MESSAGE};

// endregion: --- Imports

// region:    --- Auction Backend Trait
/// 상품 상세 화면이 사용하는 백엔드 연산
#[async_trait]
pub trait AuctionBackend: Send + Sync {
    async fn get_item(&self, id: i64) -> Result<Item>;
    async fn get_configuration(&self) -> Result<Configuration>;
    async fn create_bid(&self, bid: &NewBid) -> Result<Created>;
}

#[async_trait]
impl AuctionBackend for ApiClient {
    async fn get_item(&self, id: i64) -> Result<Item> {
        ApiClient::get_item(self, id).await
    }

    async fn get_configuration(&self) -> Result<Configuration> {
        ApiClient::get_configuration(self).await
    }

    async fn create_bid(&self, bid: &NewBid) -> Result<Created> {
        ApiClient::create_bid(self, bid).await
    }
}
// endregion: --- Auction Backend Trait
