//! Normalization pipeline for Israeli government retail feeds.
//!
//! Raw price, promotion, and store-hierarchy records go in; canonical
//! entities plus per-record audit outcomes come out. The pass is pure
//! computation with no I/O, no clock reads, and no ambient state;
//! collaborators (current time, category classifier, item-price lookup,
//! chain registry) are injected through [`NormalizeContext`].

pub mod context;
pub mod dates;
pub mod error;
pub mod item;
pub mod numeric;
pub mod outcome;
pub mod pipeline;
pub mod promotion;
pub mod raw;
pub mod store;
pub mod text;
pub mod units;

pub use context::{CategoryClassifier, ItemPriceLookup, NormalizeContext};
pub use error::NormalizeError;
pub use item::{normalize_item, NormalizedItem};
pub use outcome::{FieldRepair, Outcome};
pub use pipeline::{
    run_chains, run_items, run_promotions, BatchReport, ChainBatch, ItemBatch, PromotionBatch,
    Rejection,
};
pub use promotion::{normalize_promotion, NormalizedPromotion};
pub use raw::{
    OneOrMany, RawChainRecord, RawItemRecord, RawPromotionItemRef, RawPromotionItems,
    RawPromotionRecord, RawStoreRecord, RawSubChainRecord,
};
pub use store::{normalize_chain, NormalizedChain};
pub use units::{normalize_unit_token, UnitMatch};
