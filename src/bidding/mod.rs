pub mod commands;
pub mod mask;
pub mod model;

pub use commands::{submit_bid, validate_bid, PlaceBidCommand};
pub use mask::{digits_only, mask_phone};
pub use model::{next_default_amount, BidForm, BidPhase};
