pub mod api;
pub mod app;
pub mod auth;
pub mod bidding;
pub mod config;
pub mod error;
pub mod storage;
pub mod toast;
pub mod views;
