//! Item normalization: one raw price-feed record to one canonical
//! [`GroceryItem`].
//!
//! The algorithm is built to survive any single field being garbage. Field
//! corruption is repaired and flagged; only a missing item code or a record
//! with no usable price *and* no usable quantity rejects.

use smartcart_core::{GroceryItem, ItemType, StandardUnit, StoreChain, UnitType};
use tracing::debug;

use crate::context::NormalizeContext;
use crate::dates::parse_feed_datetime;
use crate::error::NormalizeError;
use crate::numeric::parse_lenient;
use crate::outcome::{FieldRepair, Outcome};
use crate::raw::RawItemRecord;
use crate::text::{clean_text, derive_search_terms, normalize_placeholder, parse_flag};
use crate::units::{infer_unit_from_text, leading_quantity, normalize_unit_token};

/// Quantity disagreement tolerance: the reconciled quantity wins when the
/// declared quantity is more than double or less than half the
/// unit-of-measure-derived value.
const QUANTITY_RATIO_TOLERANCE: f64 = 2.0;

/// Relative disagreement above which the feed's `UnitOfMeasurePrice` is
/// considered wrong and the locally computed value is used. Catches the
/// documented "10 gram priced as 100 gram" anomaly without flagging
/// rounding noise.
const UNIT_PRICE_RELATIVE_TOLERANCE: f64 = 0.1;

/// A normalized item together with its audit outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub item: GroceryItem,
    pub outcome: Outcome,
}

/// Normalizes one raw item record.
///
/// Never panics, whatever the input; malformed fields are defaulted and
/// recorded in the outcome.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingItemCode`] when the item code is empty
/// after cleaning, or [`NormalizeError::UnrecoverablePricing`] when price
/// and quantity are both zero with nothing to recover either from.
pub fn normalize_item(
    raw: &RawItemRecord,
    store_id: &str,
    chain_id: &str,
    ctx: &NormalizeContext<'_>,
) -> Result<NormalizedItem, NormalizeError> {
    let item_code = clean_text(&raw.item_code);
    if item_code.is_empty() {
        return Err(NormalizeError::MissingItemCode);
    }

    let mut repairs: Vec<FieldRepair> = Vec::new();

    // Step 1: tolerant numeric parsing. Failures default to zero, flagged.
    let price = parse_numeric_field(&raw.item_price, FieldRepair::PriceUnparsable, &mut repairs);
    let unit_price = parse_numeric_field(
        &raw.unit_of_measure_price,
        FieldRepair::UnitPriceUnparsable,
        &mut repairs,
    );
    let mut quantity =
        parse_numeric_field(&raw.quantity, FieldRepair::QuantityUnparsable, &mut repairs);

    // Step 2: unit resolution, falling back to the unit-of-measure text when
    // the dedicated field is corrupted.
    let unit_match = normalize_unit_token(&raw.unit_qty);
    let mut unit = unit_match.unit;
    if unit_match.confidence == 0.0 {
        if let Some(inferred) = infer_unit_from_text(&raw.unit_of_measure) {
            unit = inferred;
            repairs.push(FieldRepair::UnitInferred);
        }
    }

    // Step 3: quantity reconciliation against the unit-of-measure prefix.
    let measure_quantity = leading_quantity(&raw.unit_of_measure);
    if let Some(measure_qty) = measure_quantity {
        let disagrees = quantity > measure_qty * QUANTITY_RATIO_TOLERANCE
            || quantity < measure_qty / QUANTITY_RATIO_TOLERANCE;
        if quantity <= 0.0 || disagrees {
            quantity = measure_qty;
            repairs.push(FieldRepair::QuantityCorrected);
        }
    }

    // A unit without a magnitude is not usable for comparison.
    if quantity <= 0.0 {
        quantity = 0.0;
        unit = UnitType::Unknown;
    }

    if price <= 0.0 && quantity <= 0.0 {
        return Err(NormalizeError::UnrecoverablePricing { item_code });
    }

    // Step 4: standardized price, preferring the computed value over a
    // disagreeing feed value.
    let standard_unit = unit.standard_unit();
    let price_per_standard_unit = standard_unit.and_then(|su| {
        let computed = compute_standard_price(price, quantity, su)?;
        if unit_price > 0.0 {
            let relative = (computed - unit_price).abs() / computed.max(unit_price);
            if relative > UNIT_PRICE_RELATIVE_TOLERANCE {
                repairs.push(FieldRepair::PriceRecomputed);
            }
        }
        Some(computed)
    });

    // Step 5: weighted flag, inferred from the unit when the raw flag does
    // not decide it.
    let is_weighted = match parse_flag(&raw.b_is_weighted) {
        Some(flag) => flag,
        None => {
            let inferred = unit.is_weighable();
            if inferred || !raw.b_is_weighted.trim().is_empty() {
                repairs.push(FieldRepair::WeightedInferred);
            }
            inferred
        }
    };

    let quantity_in_package = match parse_lenient(&raw.qty_in_package) {
        Some(qty) if qty > 0.0 => Some(qty),
        Some(_) => None,
        None => {
            if !raw.qty_in_package.trim().is_empty() {
                repairs.push(FieldRepair::PackageQuantityUnparsable);
            }
            None
        }
    };

    let last_updated = match parse_feed_datetime(&raw.price_update_date) {
        Some(dt) => dt,
        None => {
            repairs.push(FieldRepair::UpdateDateUnparsable);
            ctx.now
        }
    };

    let item_name_hebrew = clean_text(&raw.item_nm);
    let description = clean_text(&raw.manufacturer_item_description);
    let unit_of_measure = clean_text(&raw.unit_of_measure);
    let unit_of_measure_normalized =
        normalized_measure_text(&unit_of_measure, unit, measure_quantity);

    // Step 6: category assignment is the injected classifier's call alone.
    let category = ctx
        .classifier
        .and_then(|classifier| classifier.classify(&item_name_hebrew));

    let store_chain = ctx
        .chains
        .map_or(StoreChain::Unknown, |registry| {
            registry.brand_for_chain_id(chain_id)
        });

    let search_terms = derive_search_terms(&item_name_hebrew);

    let item = GroceryItem {
        item_code,
        item_name: item_name_hebrew.clone(),
        item_name_hebrew,
        price,
        unit_price,
        manufacturer: normalize_placeholder(&raw.manufacturer_name),
        manufacturer_country: normalize_placeholder(&raw.manufacture_country),
        description,
        quantity,
        unit_quantity: unit,
        unit_of_measure,
        unit_of_measure_normalized,
        is_weighted,
        quantity_in_package,
        item_type: ItemType::from_code(&raw.item_type),
        last_updated,
        chain_id: clean_text(chain_id),
        store_id: clean_text(store_id),
        store_chain,
        category,
        subcategory: None,
        tags: Vec::new(),
        search_terms,
        price_per_standard_unit,
        standard_unit,
    };

    let outcome = Outcome::from_repairs(repairs);
    if let Outcome::Repaired(list) = &outcome {
        debug!(item_code = %item.item_code, repairs = ?list, "item repaired");
    }

    Ok(NormalizedItem { item, outcome })
}

fn parse_numeric_field(raw: &str, repair: FieldRepair, repairs: &mut Vec<FieldRepair>) -> f64 {
    match parse_lenient(raw) {
        Some(value) if value >= 0.0 => value,
        Some(_) | None => {
            if !raw.trim().is_empty() {
                repairs.push(repair);
            }
            0.0
        }
    }
}

/// Price normalized to the comparison basis: per 100 g, per kg, per liter,
/// per 100 ml, or per piece.
fn compute_standard_price(price: f64, quantity: f64, basis: StandardUnit) -> Option<f64> {
    if price <= 0.0 || quantity <= 0.0 {
        return None;
    }
    let per_unit = price / quantity;
    let value = match basis {
        StandardUnit::Per100g | StandardUnit::Per100ml => per_unit * 100.0,
        StandardUnit::PerKg | StandardUnit::PerLiter | StandardUnit::PerPiece => per_unit,
    };
    Some(round_agorot(value))
}

/// Canonical rendering of the unit-of-measure text: the numeric prefix (when
/// present) plus the unit's canonical Hebrew token.
fn normalized_measure_text(cleaned: &str, unit: UnitType, prefix: Option<f64>) -> String {
    match unit.hebrew_token() {
        Some(token) => match prefix {
            Some(qty) => format!("{} {token}", format_quantity(qty)),
            None => token.to_string(),
        },
        None => cleaned.to_string(),
    }
}

/// Formats a quantity without a spurious fractional part: `100.0` prints as
/// `100`, `1.5` stays `1.5`.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Round to whole agorot (two decimal places) so recomputed prices compare
/// cleanly against feed-published ones.
fn round_agorot(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
