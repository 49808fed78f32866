//! Thin adapters from government feed XML to raw records.
//!
//! This crate only reshapes bytes: each parser walks the document with an
//! event reader and copies element text verbatim into the `Raw*` shapes from
//! `smartcart-normalize`. No validation and no repair: corrupted fields
//! ride through untouched for the normalizers to judge.

pub mod error;
pub mod price;
pub mod promo;
pub mod store;

pub use error::FeedError;
pub use price::{parse_price_feed, PriceFeed};
pub use promo::{parse_promo_feed, PromoFeed};
pub use store::parse_store_feed;
