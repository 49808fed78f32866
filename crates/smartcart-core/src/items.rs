//! Canonical grocery item model and its supporting enumerations.
//!
//! Everything here is the *output* side of normalization: immutable value
//! objects with validated fields. The raw feed shapes live in
//! `smartcart-normalize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit-of-measure classification for an item's quantity.
///
/// The government feeds encode this as free Hebrew text with several spelling
/// variants and a literal all-zeros placeholder for corrupted data. The
/// corrupted form maps to [`UnitType::Unknown`] rather than being kept as a
/// valid-looking string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Quantity measured in grams ("גרם").
    Gram,
    /// Price quoted per kilogram ("לק\"ג"), typical for loose produce.
    KilogramRate,
    /// Quantity measured in liters ("ליטר").
    Liter,
    /// Quantity measured in milliliters ("מ\"ל").
    Milliliter,
    /// Countable unit ("יח'").
    Piece,
    /// Missing or corrupted unit data.
    Unknown,
}

impl UnitType {
    /// Returns the canonical Hebrew token for this unit as published in
    /// well-formed feed records. `Unknown` has no canonical token.
    #[must_use]
    pub fn hebrew_token(&self) -> Option<&'static str> {
        match self {
            UnitType::Gram => Some("גרם"),
            UnitType::KilogramRate => Some("לק\"ג"),
            UnitType::Liter => Some("ליטר"),
            UnitType::Milliliter => Some("מ\"ל"),
            UnitType::Piece => Some("יח'"),
            UnitType::Unknown => None,
        }
    }

    /// Returns `true` for units that imply the item is sold by weight or
    /// volume rather than by count.
    #[must_use]
    pub fn is_weighable(&self) -> bool {
        matches!(
            self,
            UnitType::Gram | UnitType::KilogramRate | UnitType::Liter | UnitType::Milliliter
        )
    }

    /// The comparison basis used when standardizing a price expressed in
    /// this unit. `Unknown` has no basis, so no standardized price can be
    /// derived from it.
    #[must_use]
    pub fn standard_unit(&self) -> Option<StandardUnit> {
        match self {
            UnitType::Gram => Some(StandardUnit::Per100g),
            UnitType::KilogramRate => Some(StandardUnit::PerKg),
            UnitType::Liter => Some(StandardUnit::PerLiter),
            UnitType::Milliliter => Some(StandardUnit::Per100ml),
            UnitType::Piece => Some(StandardUnit::PerPiece),
            UnitType::Unknown => None,
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnitType::Gram => "gram",
            UnitType::KilogramRate => "kilogram_rate",
            UnitType::Liter => "liter",
            UnitType::Milliliter => "milliliter",
            UnitType::Piece => "piece",
            UnitType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Fixed comparison bases for cross-product price comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardUnit {
    /// Price per 100 grams. The most common basis for packaged food.
    Per100g,
    /// Price per kilogram, for items already quoted at a per-kg rate.
    PerKg,
    /// Price per liter.
    PerLiter,
    /// Price per 100 milliliters, for small liquid items.
    Per100ml,
    /// Price per single countable unit.
    PerPiece,
}

impl std::fmt::Display for StandardUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StandardUnit::Per100g => "per_100g",
            StandardUnit::PerKg => "per_kg",
            StandardUnit::PerLiter => "per_liter",
            StandardUnit::Per100ml => "per_100ml",
            StandardUnit::PerPiece => "per_piece",
        };
        write!(f, "{s}")
    }
}

/// Item classification from the feed's `ItemType` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Pre-packaged item with a fixed barcode ("1" in the feed).
    Regular,
    /// Weighed at the register ("2" in the feed).
    Weighted,
    /// Missing or unrecognized code.
    Unknown,
}

impl ItemType {
    /// Maps a raw feed code to an item type. Anything other than the two
    /// documented codes is `Unknown`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => ItemType::Regular,
            "2" => ItemType::Weighted,
            _ => ItemType::Unknown,
        }
    }
}

/// Retail chains observed in the feeds.
///
/// Chains are identified in feed filenames and store records by their
/// official issuer code; the mapping from code (and from Hebrew brand
/// markers in store names) to this enum lives in [`crate::chains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreChain {
    Yohananof,
    RamiLevy,
    OsherAd,
    Shufersal,
    /// Unbranded or unrecognized chain.
    Unknown,
}

impl std::fmt::Display for StoreChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StoreChain::Yohananof => "yohananof",
            StoreChain::RamiLevy => "rami_levy",
            StoreChain::OsherAd => "osher_ad",
            StoreChain::Shufersal => "shufersal",
            StoreChain::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Product categories assignable by an injected classifier.
///
/// The normalization core never assigns these itself; it only carries the
/// value a classifier returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    SpicesSeasoning,
    OilsVinegars,
    GrainsCereals,
    MeatPoultry,
    DairyEggs,
    Beverages,
    BeveragesHot,
    SnacksSweets,
    BakingCooking,
    Alcohol,
    Household,
    Frozen,
    Produce,
    SpreadsSauces,
    Unknown,
}

/// A grocery item normalized from one raw feed record, ready for price
/// comparison and search.
///
/// Prices are `f64` at this boundary; a persistence layer converts to
/// fixed-point decimal at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Feed item code (barcode or internal code). Non-empty; unique per
    /// store + chain.
    pub item_code: String,
    /// Display name, cleaned but script-mixing left intact.
    pub item_name: String,
    /// Hebrew name as published, cleaned.
    pub item_name_hebrew: String,
    /// Shelf price in shekels. Never negative.
    pub price: f64,
    /// Feed-published unit price in shekels. Never negative.
    pub unit_price: f64,
    /// Manufacturer, with the feed's "לא ידוע" placeholder normalized away.
    pub manufacturer: Option<String>,
    pub manufacturer_country: Option<String>,
    /// Manufacturer item description, cleaned.
    pub description: String,
    /// Quantity in `unit_quantity` units. Positive unless the unit is
    /// [`UnitType::Unknown`].
    pub quantity: f64,
    pub unit_quantity: UnitType,
    /// Raw unit-of-measure text after cleaning, e.g. `"100 גרם"`.
    pub unit_of_measure: String,
    /// Canonical rendering of `unit_of_measure`, e.g. `"100 גרם"` with the
    /// unit token in its canonical spelling.
    pub unit_of_measure_normalized: String,
    pub is_weighted: bool,
    pub quantity_in_package: Option<f64>,
    pub item_type: ItemType,
    /// Feed-published update instant for this record.
    pub last_updated: DateTime<Utc>,
    pub chain_id: String,
    pub store_id: String,
    pub store_chain: StoreChain,
    /// Set by the injected classifier; absent when no classifier is
    /// configured.
    pub category: Option<ProductCategory>,
    pub subcategory: Option<String>,
    pub tags: Vec<String>,
    /// Order-preserving, deduplicated search tokens derived from the name.
    pub search_terms: Vec<String>,
    /// Price normalized to `standard_unit`. Present only together with
    /// `standard_unit`.
    pub price_per_standard_unit: Option<f64>,
    pub standard_unit: Option<StandardUnit>,
}

impl GroceryItem {
    /// Returns the standardized price together with its basis, or `None`
    /// when no basis could be derived (unknown unit or zero quantity).
    #[must_use]
    pub fn standardized_price(&self) -> Option<(f64, StandardUnit)> {
        match (self.price_per_standard_unit, self.standard_unit) {
            (Some(price), Some(unit)) => Some((price, unit)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_item() -> GroceryItem {
        GroceryItem {
            item_code: "7290000000001".to_string(),
            item_name: "טחינה גולמית 500 גרם".to_string(),
            item_name_hebrew: "טחינה גולמית 500 גרם".to_string(),
            price: 12.9,
            unit_price: 2.58,
            manufacturer: Some("אחווה".to_string()),
            manufacturer_country: Some("ישראל".to_string()),
            description: String::new(),
            quantity: 500.0,
            unit_quantity: UnitType::Gram,
            unit_of_measure: "100 גרם".to_string(),
            unit_of_measure_normalized: "100 גרם".to_string(),
            is_weighted: false,
            quantity_in_package: None,
            item_type: ItemType::Regular,
            last_updated: Utc.with_ymd_and_hms(2025, 5, 25, 10, 24, 0).unwrap(),
            chain_id: "7290058140886".to_string(),
            store_id: "006".to_string(),
            store_chain: StoreChain::RamiLevy,
            category: None,
            subcategory: None,
            tags: Vec::new(),
            search_terms: vec!["טחינה".to_string(), "גולמית".to_string()],
            price_per_standard_unit: Some(2.58),
            standard_unit: Some(StandardUnit::Per100g),
        }
    }

    #[test]
    fn unit_type_weighable() {
        assert!(UnitType::Gram.is_weighable());
        assert!(UnitType::KilogramRate.is_weighable());
        assert!(UnitType::Liter.is_weighable());
        assert!(UnitType::Milliliter.is_weighable());
        assert!(!UnitType::Piece.is_weighable());
        assert!(!UnitType::Unknown.is_weighable());
    }

    #[test]
    fn unit_type_standard_unit_mapping() {
        assert_eq!(UnitType::Gram.standard_unit(), Some(StandardUnit::Per100g));
        assert_eq!(
            UnitType::KilogramRate.standard_unit(),
            Some(StandardUnit::PerKg)
        );
        assert_eq!(
            UnitType::Milliliter.standard_unit(),
            Some(StandardUnit::Per100ml)
        );
        assert_eq!(UnitType::Unknown.standard_unit(), None);
    }

    #[test]
    fn item_type_from_code() {
        assert_eq!(ItemType::from_code("1"), ItemType::Regular);
        assert_eq!(ItemType::from_code(" 2 "), ItemType::Weighted);
        assert_eq!(ItemType::from_code("0"), ItemType::Unknown);
        assert_eq!(ItemType::from_code(""), ItemType::Unknown);
        assert_eq!(ItemType::from_code("garbage"), ItemType::Unknown);
    }

    #[test]
    fn standardized_price_requires_both_fields() {
        let item = make_item();
        assert_eq!(
            item.standardized_price(),
            Some((2.58, StandardUnit::Per100g))
        );

        let mut missing_unit = make_item();
        missing_unit.standard_unit = None;
        missing_unit.price_per_standard_unit = None;
        assert!(missing_unit.standardized_price().is_none());
    }

    #[test]
    fn store_chain_display_matches_serde() {
        let json = serde_json::to_string(&StoreChain::RamiLevy).unwrap();
        assert_eq!(json, "\"rami_levy\"");
        assert_eq!(StoreChain::RamiLevy.to_string(), "rami_levy");
    }

    #[test]
    fn serde_roundtrip_item() {
        let item = make_item();
        let json = serde_json::to_string(&item).expect("serialization failed");
        let decoded: GroceryItem = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, item);
    }
}
