//! Canonical promotion model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discount structure of a promotion, classified from its Hebrew
/// description.
///
/// Only `FixedPrice` and `BundleDeal` are evidenced by the observed feeds;
/// the remaining variants exist so downstream consumers have a stable
/// vocabulary, but the normalizer never assigns a type the description does
/// not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    /// A specific discounted price, e.g. "חרוסת 180 גר -4.9".
    FixedPrice,
    /// N items for a total of M shekels, e.g. "2 ב26".
    BundleDeal,
    PercentageOff,
    BuyXGetY,
    VolumeDiscount,
    Clearance,
    /// Description did not match any known shape.
    Unknown,
}

impl std::fmt::Display for PromotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PromotionType::FixedPrice => "fixed_price",
            PromotionType::BundleDeal => "bundle_deal",
            PromotionType::PercentageOff => "percentage_off",
            PromotionType::BuyXGetY => "buy_x_get_y",
            PromotionType::VolumeDiscount => "volume_discount",
            PromotionType::Clearance => "clearance",
            PromotionType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Conditions restricting who can use a promotion and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRestrictions {
    pub requires_coupon: bool,
    /// Set when the explicit flag says so *or* when a non-empty club id is
    /// present; the feeds are inconsistent about the flag.
    pub requires_club_membership: bool,
    pub club_id: Option<String>,
    pub allow_multiple_discounts: bool,
    /// Minimum stock a store must hold to participate
    /// (`MinNoOfItemOfered` in the feed). 0 when absent.
    pub minimum_store_stock: u32,
    pub has_gift_items: bool,
    pub gift_item_count: u32,
    /// Applies store-wide rather than to the listed item codes.
    pub is_store_wide: bool,
}

/// A promotion normalized from one raw feed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Feed promotion id. Non-empty.
    pub promotion_id: String,
    /// Display description, cleaned.
    pub description: String,
    /// Hebrew description as published, cleaned.
    pub description_hebrew: String,
    pub start_date: DateTime<Utc>,
    /// Always after `start_date`; records violating this are rejected.
    pub end_date: DateTime<Utc>,
    /// Feed-published update instant for this record.
    pub last_updated: DateTime<Utc>,
    /// Whether the window contained the pipeline's injected current time.
    pub is_active: bool,
    pub promotion_type: PromotionType,
    /// Base price of the associated items, when the caller's price lookup
    /// resolved one.
    pub original_price: Option<f64>,
    pub discounted_price: f64,
    pub minimum_quantity: u32,
    /// `None` means unlimited (the feed publishes 0 for that).
    pub maximum_quantity: Option<u32>,
    /// Number of items in a bundle deal, from the "N ב-M" description shape.
    pub bundle_size: Option<u32>,
    /// Total bundle price in shekels.
    pub bundle_price: Option<f64>,
    /// Effective per-item price for bundle deals.
    pub price_per_unit: Option<f64>,
    /// Item codes the promotion applies to. Never empty.
    pub item_codes: Vec<String>,
    /// Raw `RewardType` code preserved verbatim; semantics beyond the
    /// constant observed value are unknown.
    pub reward_type: Option<String>,
    /// Raw `DiscountType` code preserved verbatim, same caveat.
    pub discount_type: Option<String>,
    pub discount_rate: Option<f64>,
    pub restrictions: PromotionRestrictions,
    /// `original_price - discounted_price`, only when an original price is
    /// known. Zero is a valid savings value, distinct from absent.
    pub savings_amount: Option<f64>,
    pub savings_percentage: Option<f64>,
    pub remarks: Option<String>,
}

impl Promotion {
    /// Number of item codes the promotion applies to.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_codes.len()
    }

    /// Whether the promotion window contains `at`.
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at < self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_promotion() -> Promotion {
        Promotion {
            promotion_id: "1001".to_string(),
            description: "2 ב26".to_string(),
            description_hebrew: "2 ב26".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 5, 31, 23, 59, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
            is_active: true,
            promotion_type: PromotionType::BundleDeal,
            original_price: None,
            discounted_price: 13.0,
            minimum_quantity: 2,
            maximum_quantity: None,
            bundle_size: Some(2),
            bundle_price: Some(26.0),
            price_per_unit: Some(13.0),
            item_codes: vec!["7290000000001".to_string(), "7290000000002".to_string()],
            reward_type: Some("1".to_string()),
            discount_type: Some("1".to_string()),
            discount_rate: None,
            restrictions: PromotionRestrictions {
                requires_coupon: false,
                requires_club_membership: false,
                club_id: None,
                allow_multiple_discounts: true,
                minimum_store_stock: 10,
                has_gift_items: false,
                gift_item_count: 0,
                is_store_wide: false,
            },
            savings_amount: None,
            savings_percentage: None,
            remarks: None,
        }
    }

    #[test]
    fn item_count_matches_codes() {
        assert_eq!(make_promotion().item_count(), 2);
    }

    #[test]
    fn active_inside_window() {
        let promo = make_promotion();
        let mid = Utc.with_ymd_and_hms(2025, 5, 15, 12, 0, 0).unwrap();
        assert!(promo.is_active_at(mid));
    }

    #[test]
    fn inactive_before_start_and_at_end() {
        let promo = make_promotion();
        let before = Utc.with_ymd_and_hms(2025, 4, 30, 23, 59, 59).unwrap();
        assert!(!promo.is_active_at(before));
        assert!(!promo.is_active_at(promo.end_date));
    }

    #[test]
    fn serde_roundtrip_promotion() {
        let promo = make_promotion();
        let json = serde_json::to_string(&promo).expect("serialization failed");
        let decoded: Promotion = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, promo);
    }
}
