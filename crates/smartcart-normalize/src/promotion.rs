//! Promotion normalization: one raw promotion-feed record to one canonical
//! [`Promotion`].
//!
//! The promotion type comes only from the Hebrew description grammar; the
//! feed's `RewardType`/`DiscountType` codes are constant in observed data
//! and are preserved verbatim instead of being guessed at.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use smartcart_core::{Promotion, PromotionRestrictions, PromotionType};
use tracing::debug;

use crate::context::NormalizeContext;
use crate::dates::{merge_date_and_hour, parse_feed_datetime};
use crate::error::NormalizeError;
use crate::numeric::{parse_lenient, parse_lenient_u32};
use crate::outcome::{FieldRepair, Outcome};
use crate::raw::RawPromotionRecord;
use crate::text::{clean_text, normalize_placeholder, parse_flag};

/// Bundle-deal description shape: "2 ב26", "2 ב-26", "3 ב 10.90".
static BUNDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*ב-?\s*(\d+(?:\.\d+)?)").unwrap());

/// Trailing signed price with no bundle marker: "חרוסת 180 גר -4.9".
static TRAILING_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s*(\d+(?:\.\d+)?)\s*$").unwrap());

/// A normalized promotion together with its audit outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPromotion {
    pub promotion: Promotion,
    pub outcome: Outcome,
}

/// What the description grammar extracted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParsedDescription {
    promotion_type: PromotionType,
    bundle_size: Option<u32>,
    bundle_price: Option<f64>,
    fixed_price: Option<f64>,
}

/// Normalizes one raw promotion record.
///
/// # Errors
///
/// Rejects records with a missing promotion id, an empty applicable-item
/// list, or a start/end window that is unparseable or inverted. Everything
/// else is repaired and flagged.
pub fn normalize_promotion(
    raw: &RawPromotionRecord,
    ctx: &NormalizeContext<'_>,
) -> Result<NormalizedPromotion, NormalizeError> {
    let promotion_id = clean_text(&raw.promotion_id);
    if promotion_id.is_empty() {
        return Err(NormalizeError::MissingPromotionId);
    }

    // Materialize the one-or-many item list before anything else touches it.
    let item_refs = raw.promotion_items.item.clone().into_vec();
    let item_codes: Vec<String> = item_refs
        .iter()
        .map(|item| clean_text(&item.item_code))
        .filter(|code| !code.is_empty())
        .collect();
    if item_codes.is_empty() {
        return Err(NormalizeError::EmptyPromotionItems { promotion_id });
    }

    let mut repairs: Vec<FieldRepair> = Vec::new();

    let start_of_day = NaiveTime::MIN;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);

    let Some((start_date, start_defaulted)) = merge_date_and_hour(
        &raw.promotion_start_date,
        &raw.promotion_start_hour,
        start_of_day,
    ) else {
        return Err(NormalizeError::UnparseablePromotionWindow { promotion_id });
    };
    let Some((end_date, end_defaulted)) =
        merge_date_and_hour(&raw.promotion_end_date, &raw.promotion_end_hour, end_of_day)
    else {
        return Err(NormalizeError::UnparseablePromotionWindow { promotion_id });
    };
    if start_defaulted || end_defaulted {
        repairs.push(FieldRepair::HourDefaulted);
    }

    if end_date <= start_date {
        return Err(NormalizeError::InvalidPromotionWindow { promotion_id });
    }

    let description = clean_text(&raw.promotion_description);
    let parsed = parse_description(&description);

    // Discounted price recovery chain: the published field, then the
    // per-unit variant, then whatever the description itself states.
    let mut discounted_price = 0.0;
    match parse_lenient(&raw.discounted_price) {
        Some(price) if price > 0.0 => discounted_price = price,
        _ => {
            if let Some(price) = parse_lenient(&raw.discounted_price_per_mida).filter(|p| *p > 0.0)
            {
                discounted_price = price;
                repairs.push(FieldRepair::DiscountedPriceRecovered);
            } else if let Some(price) = description_price(&parsed) {
                discounted_price = price;
                repairs.push(FieldRepair::DiscountedPriceRecovered);
            } else {
                repairs.push(FieldRepair::DiscountedPriceUnparsable);
            }
        }
    }

    let minimum_quantity = match parse_lenient_u32(&raw.min_qty) {
        Some(qty) if qty > 0 => qty,
        _ => {
            if !raw.min_qty.trim().is_empty() {
                repairs.push(FieldRepair::MinQuantityDefaulted);
            }
            1
        }
    };

    // 0 means unlimited in the feed.
    let maximum_quantity = parse_lenient_u32(&raw.max_qty).filter(|qty| *qty > 0);

    let last_updated = match parse_feed_datetime(&raw.promotion_update_date) {
        Some(dt) => dt,
        None => {
            repairs.push(FieldRepair::UpdateDateUnparsable);
            ctx.now
        }
    };

    let restrictions = normalize_restrictions(raw, &item_refs);

    // Savings need the items' base prices, owned by the caller. Without a
    // lookup (or a resolvable price) the fields stay unset.
    let original_price = ctx.price_lookup.and_then(|lookup| {
        item_codes
            .iter()
            .find_map(|code| lookup.price_for(code))
            .filter(|price| *price > 0.0)
    });
    let savings_amount = original_price
        .filter(|_| discounted_price > 0.0)
        .map(|original| original - discounted_price);
    let savings_percentage = original_price.zip(savings_amount).and_then(
        |(original, amount)| {
            if original > 0.0 {
                Some(amount / original * 100.0)
            } else {
                None
            }
        },
    );

    let price_per_unit = match (parsed.bundle_size, parsed.bundle_price) {
        (Some(size), Some(total)) if size > 0 => Some(total / f64::from(size)),
        _ => None,
    };

    let promotion = Promotion {
        promotion_id,
        description: description.clone(),
        description_hebrew: description,
        start_date,
        end_date,
        last_updated,
        is_active: start_date <= ctx.now && ctx.now < end_date,
        promotion_type: parsed.promotion_type,
        original_price,
        discounted_price,
        minimum_quantity,
        maximum_quantity,
        bundle_size: parsed.bundle_size,
        bundle_price: parsed.bundle_price,
        price_per_unit,
        item_codes,
        reward_type: normalize_placeholder(&raw.reward_type),
        discount_type: normalize_placeholder(&raw.discount_type),
        discount_rate: parse_lenient(&raw.discount_rate),
        restrictions,
        savings_amount,
        savings_percentage,
        remarks: normalize_placeholder(&raw.remarks),
    };

    let outcome = Outcome::from_repairs(repairs);
    if let Outcome::Repaired(list) = &outcome {
        debug!(promotion_id = %promotion.promotion_id, repairs = ?list, "promotion repaired");
    }

    Ok(NormalizedPromotion { promotion, outcome })
}

/// Classifies a cleaned Hebrew description.
///
/// "N ב-M" is a bundle deal; a trailing signed price with no bundle marker
/// is a fixed price; anything else is `Unknown`. The grammar never guesses
/// a type the text does not support.
fn parse_description(description: &str) -> ParsedDescription {
    if let Some(captures) = BUNDLE_RE.captures(description) {
        let size = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
        let total = captures.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
        if let (Some(size), Some(total)) = (size, total) {
            if size > 0 && total > 0.0 {
                return ParsedDescription {
                    promotion_type: PromotionType::BundleDeal,
                    bundle_size: Some(size),
                    bundle_price: Some(total),
                    fixed_price: None,
                };
            }
        }
    }

    if let Some(captures) = TRAILING_PRICE_RE.captures(description) {
        if let Some(price) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            if price > 0.0 {
                return ParsedDescription {
                    promotion_type: PromotionType::FixedPrice,
                    bundle_size: None,
                    bundle_price: None,
                    fixed_price: Some(price),
                };
            }
        }
    }

    ParsedDescription {
        promotion_type: PromotionType::Unknown,
        bundle_size: None,
        bundle_price: None,
        fixed_price: None,
    }
}

/// The price the description itself implies, used as a last-resort recovery
/// for a corrupted `DiscountedPrice` field.
fn description_price(parsed: &ParsedDescription) -> Option<f64> {
    match (parsed.bundle_size, parsed.bundle_price, parsed.fixed_price) {
        (Some(size), Some(total), _) if size > 0 => Some(total / f64::from(size)),
        (_, _, Some(price)) => Some(price),
        _ => None,
    }
}

fn normalize_restrictions(
    raw: &RawPromotionRecord,
    item_refs: &[crate::raw::RawPromotionItemRef],
) -> PromotionRestrictions {
    let restrictions = &raw.additional_restrictions;

    let gift_item_count = parse_lenient_u32(&restrictions.additional_gift_count).unwrap_or(0);
    let any_gift_ref = item_refs
        .iter()
        .any(|item| parse_flag(&item.is_gift_item) == Some(true));

    let club_id = normalize_placeholder(&restrictions.clubs.club_id);

    PromotionRestrictions {
        requires_coupon: parse_flag(&restrictions.additional_is_coupon).unwrap_or(false),
        // A non-empty club id is authoritative; the explicit flag is
        // unreliable in observed data.
        requires_club_membership: club_id.is_some(),
        club_id,
        allow_multiple_discounts: parse_flag(&raw.allow_multiple_discounts).unwrap_or(false),
        minimum_store_stock: parse_lenient_u32(&raw.min_no_of_item_ofered).unwrap_or(0),
        has_gift_items: gift_item_count > 0 || any_gift_ref,
        gift_item_count,
        is_store_wide: parse_flag(&restrictions.additional_is_total).unwrap_or(false),
    }
}
