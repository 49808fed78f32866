//! Per-record audit outcomes.
//!
//! Every normalizer reports not just its output but what it had to do to
//! get there. Repairs are a closed set so reports stay machine-readable.

use serde::{Deserialize, Serialize};

/// A single field-level repair applied while normalizing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRepair {
    /// Price field failed the tolerant parser; defaulted to 0.
    PriceUnparsable,
    /// Feed unit price failed the tolerant parser; defaulted to 0.
    UnitPriceUnparsable,
    /// Quantity field failed the tolerant parser; defaulted to 0.
    QuantityUnparsable,
    /// Quantity replaced by the unit-of-measure-derived value after the two
    /// disagreed beyond tolerance.
    QuantityCorrected,
    /// Standardized price computed locally, overriding a disagreeing feed
    /// `UnitOfMeasurePrice`.
    PriceRecomputed,
    /// Unit resolved by scanning the unit-of-measure text after the unit
    /// field itself was corrupted.
    UnitInferred,
    /// Weighted flag inferred from the unit type after the raw flag was
    /// absent or ambiguous.
    WeightedInferred,
    /// Package quantity was non-empty but unparsable; treated as absent.
    PackageQuantityUnparsable,
    /// Record update timestamp unparsable; the pipeline's injected time was
    /// used instead.
    UpdateDateUnparsable,
    /// Promotion start/end hour missing or unparsable; window defaulted to
    /// full-day bounds.
    HourDefaulted,
    /// Promotion minimum quantity missing or unparsable; defaulted to 1.
    MinQuantityDefaulted,
    /// Discounted price unusable as published but recovered from another
    /// field or from the description.
    DiscountedPriceRecovered,
    /// Discounted price unusable and unrecoverable; defaulted to 0.
    DiscountedPriceUnparsable,
    /// Store record carried chain/sub-chain ids that contradict its owning
    /// ancestors; the ancestors' ids were stamped.
    StoreIdMismatch,
    /// Store zip code failed validation; retained but flagged.
    ZipCodeInvalid,
    /// Store address empty or placeholder; retained but flagged.
    AddressInvalid,
}

impl FieldRepair {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRepair::PriceUnparsable => "price_unparsable",
            FieldRepair::UnitPriceUnparsable => "unit_price_unparsable",
            FieldRepair::QuantityUnparsable => "quantity_unparsable",
            FieldRepair::QuantityCorrected => "quantity_corrected",
            FieldRepair::PriceRecomputed => "price_recomputed",
            FieldRepair::UnitInferred => "unit_inferred",
            FieldRepair::WeightedInferred => "weighted_inferred",
            FieldRepair::PackageQuantityUnparsable => "package_quantity_unparsable",
            FieldRepair::UpdateDateUnparsable => "update_date_unparsable",
            FieldRepair::HourDefaulted => "hour_defaulted",
            FieldRepair::MinQuantityDefaulted => "min_quantity_defaulted",
            FieldRepair::DiscountedPriceRecovered => "discounted_price_recovered",
            FieldRepair::DiscountedPriceUnparsable => "discounted_price_unparsable",
            FieldRepair::StoreIdMismatch => "store_id_mismatch",
            FieldRepair::ZipCodeInvalid => "zip_code_invalid",
            FieldRepair::AddressInvalid => "address_invalid",
        }
    }
}

impl std::fmt::Display for FieldRepair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a record came through normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No field needed repair.
    Clean,
    /// One or more fields were corrected; the list says which.
    Repaired(Vec<FieldRepair>),
}

impl Outcome {
    /// Builds an outcome from the repairs collected during normalization.
    #[must_use]
    pub fn from_repairs(repairs: Vec<FieldRepair>) -> Self {
        if repairs.is_empty() {
            Outcome::Clean
        } else {
            Outcome::Repaired(repairs)
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Outcome::Clean)
    }

    /// The repairs applied, empty for clean records.
    #[must_use]
    pub fn repairs(&self) -> &[FieldRepair] {
        match self {
            Outcome::Clean => &[],
            Outcome::Repaired(repairs) => repairs,
        }
    }
}
