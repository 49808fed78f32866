//! Raw feed record shapes, field-for-field as the government XML publishes
//! them.
//!
//! Nothing here is validated: any field may be empty, numeric-looking
//! garbage, or semantically wrong. These types exist so that corruption
//! handling happens in the normalizers, not at the deserialization boundary.
//! The one exception is the single-object-or-list ambiguity in
//! `PromotionItems`, which is materialized to a list immediately on
//! ingestion, before any business logic sees it.

use serde::{Deserialize, Serialize};

/// One raw price-feed item record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawItemRecord {
    #[serde(rename = "PriceUpdateDate")]
    pub price_update_date: String,
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "ItemType")]
    pub item_type: String,
    #[serde(rename = "ItemNm")]
    pub item_nm: String,
    #[serde(rename = "ManufacturerName")]
    pub manufacturer_name: String,
    #[serde(rename = "ManufactureCountry")]
    pub manufacture_country: String,
    #[serde(rename = "ManufacturerItemDescription")]
    pub manufacturer_item_description: String,
    #[serde(rename = "UnitQty")]
    pub unit_qty: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "UnitOfMeasure")]
    pub unit_of_measure: String,
    #[serde(rename = "bIsWeighted")]
    pub b_is_weighted: String,
    #[serde(rename = "QtyInPackage")]
    pub qty_in_package: String,
    #[serde(rename = "ItemPrice")]
    pub item_price: String,
    #[serde(rename = "UnitOfMeasurePrice")]
    pub unit_of_measure_price: String,
    #[serde(rename = "AllowDiscount")]
    pub allow_discount: String,
    #[serde(rename = "ItemStatus")]
    pub item_status: String,
}

/// A value that the feed serializes either as a single object or as a list.
///
/// Coerced to a `Vec` via [`OneOrMany::into_vec`] at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Materializes to a list: a single object becomes a one-element list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// One entry of a promotion's applicable-items list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPromotionItemRef {
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "IsGiftItem")]
    pub is_gift_item: String,
    #[serde(rename = "ItemType")]
    pub item_type: String,
}

/// The `PromotionItems` block; `Item` may arrive as one object or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPromotionItems {
    #[serde(rename = "count")]
    pub count: String,
    #[serde(rename = "Item")]
    pub item: OneOrMany<RawPromotionItemRef>,
}

/// The `Clubs` block inside `AdditionalRestrictions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawClubs {
    #[serde(rename = "ClubId")]
    pub club_id: String,
}

/// The `AdditionalRestrictions` block of a promotion record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRestrictions {
    #[serde(rename = "AdditionalIsCoupon")]
    pub additional_is_coupon: String,
    #[serde(rename = "AdditionalGiftCount")]
    pub additional_gift_count: String,
    #[serde(rename = "Clubs")]
    pub clubs: RawClubs,
    #[serde(rename = "AdditionalIsTotal")]
    pub additional_is_total: String,
    #[serde(rename = "AdditionalIsActive")]
    pub additional_is_active: String,
}

/// One raw promotion-feed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPromotionRecord {
    #[serde(rename = "PromotionId")]
    pub promotion_id: String,
    #[serde(rename = "PromotionDescription")]
    pub promotion_description: String,
    #[serde(rename = "PromotionUpdateDate")]
    pub promotion_update_date: String,
    #[serde(rename = "PromotionStartDate")]
    pub promotion_start_date: String,
    #[serde(rename = "PromotionStartHour")]
    pub promotion_start_hour: String,
    #[serde(rename = "PromotionEndDate")]
    pub promotion_end_date: String,
    #[serde(rename = "PromotionEndHour")]
    pub promotion_end_hour: String,
    #[serde(rename = "RewardType")]
    pub reward_type: String,
    #[serde(rename = "DiscountType")]
    pub discount_type: String,
    #[serde(rename = "DiscountRate")]
    pub discount_rate: String,
    #[serde(rename = "AllowMultipleDiscounts")]
    pub allow_multiple_discounts: String,
    #[serde(rename = "MinQty")]
    pub min_qty: String,
    #[serde(rename = "MAXQTY")]
    pub max_qty: String,
    #[serde(rename = "DiscountedPrice")]
    pub discounted_price: String,
    #[serde(rename = "DiscountedPricePerMida")]
    pub discounted_price_per_mida: String,
    #[serde(rename = "MinNoOfItemOfered")]
    pub min_no_of_item_ofered: String,
    #[serde(rename = "AdditionalRestrictions")]
    pub additional_restrictions: RawRestrictions,
    #[serde(rename = "PromotionItems")]
    pub promotion_items: RawPromotionItems,
    #[serde(rename = "Remarks")]
    pub remarks: String,
}

/// One raw store record inside a sub-chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStoreRecord {
    #[serde(rename = "StoreId")]
    pub store_id: String,
    #[serde(rename = "ChainId")]
    pub chain_id: String,
    #[serde(rename = "SubChainId")]
    pub sub_chain_id: String,
    #[serde(rename = "StoreName")]
    pub store_name: String,
    #[serde(rename = "Street")]
    pub street: String,
    #[serde(rename = "StreetNumber")]
    pub street_number: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "EnglishCity")]
    pub english_city: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
}

/// One raw sub-chain record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubChainRecord {
    #[serde(rename = "SubChainId")]
    pub sub_chain_id: String,
    #[serde(rename = "SubChainName")]
    pub sub_chain_name: String,
    #[serde(rename = "Stores")]
    pub stores: Vec<RawStoreRecord>,
}

/// One raw chain record: the root of a store-hierarchy feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawChainRecord {
    #[serde(rename = "ChainId")]
    pub chain_id: String,
    #[serde(rename = "ChainName")]
    pub chain_name: String,
    #[serde(rename = "LastUpdateDate")]
    pub last_update_date: String,
    #[serde(rename = "SubChains")]
    pub sub_chains: Vec<RawSubChainRecord>,
}
