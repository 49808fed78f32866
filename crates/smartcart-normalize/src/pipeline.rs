//! Batch orchestration over raw feed records.
//!
//! Every record is processed independently: one rejection never aborts a
//! batch, and output order always follows input order. With the same raw
//! batch and the same injected context, a rerun produces identical output;
//! there is no randomness and no wall-clock read anywhere in the pass.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::NormalizeContext;
use crate::error::NormalizeError;
use crate::item::{normalize_item, NormalizedItem};
use crate::promotion::{normalize_promotion, NormalizedPromotion};
use crate::raw::{RawChainRecord, RawItemRecord, RawPromotionRecord};
use crate::store::{normalize_chain, NormalizedChain};

/// One rejected record: which it was and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The record's own id, or `"#<index>"` when the record did not carry
    /// one.
    pub record_id: String,
    pub reason: String,
}

/// Aggregate outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub accepted_count: usize,
    pub repaired_count: usize,
    pub rejected_count: usize,
    pub rejections: Vec<Rejection>,
}

impl BatchReport {
    /// Total records seen by the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted_count + self.repaired_count + self.rejected_count
    }

    /// Fraction of records rejected, 0 for an empty batch.
    #[must_use]
    pub fn rejection_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.rejected_count as f64 / total as f64;
        rate
    }

    fn record_accepted(&mut self, clean: bool) {
        if clean {
            self.accepted_count += 1;
        } else {
            self.repaired_count += 1;
        }
    }

    fn record_rejected(&mut self, index: usize, err: &NormalizeError) {
        let record_id = err
            .record_id()
            .map_or_else(|| format!("#{index}"), ToString::to_string);
        warn!(record_id = %record_id, reason = %err, "record rejected");
        self.rejections.push(Rejection {
            record_id,
            reason: err.to_string(),
        });
        self.rejected_count += 1;
    }
}

/// Normalized items in input order plus the batch report.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBatch {
    pub items: Vec<NormalizedItem>,
    pub report: BatchReport,
}

/// Runs the item normalizer over a raw batch for one store.
#[must_use]
pub fn run_items(
    records: &[RawItemRecord],
    store_id: &str,
    chain_id: &str,
    ctx: &NormalizeContext<'_>,
) -> ItemBatch {
    let mut items = Vec::with_capacity(records.len());
    let mut report = BatchReport::default();

    for (index, raw) in records.iter().enumerate() {
        match normalize_item(raw, store_id, chain_id, ctx) {
            Ok(normalized) => {
                report.record_accepted(normalized.outcome.is_clean());
                items.push(normalized);
            }
            Err(err) => report.record_rejected(index, &err),
        }
    }

    info!(
        store_id,
        chain_id,
        accepted = report.accepted_count,
        repaired = report.repaired_count,
        rejected = report.rejected_count,
        "item batch normalized"
    );
    ItemBatch { items, report }
}

/// Normalized promotions in input order plus the batch report.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionBatch {
    pub promotions: Vec<NormalizedPromotion>,
    pub report: BatchReport,
}

/// Runs the promotion normalizer over a raw batch.
#[must_use]
pub fn run_promotions(
    records: &[RawPromotionRecord],
    ctx: &NormalizeContext<'_>,
) -> PromotionBatch {
    let mut promotions = Vec::with_capacity(records.len());
    let mut report = BatchReport::default();

    for (index, raw) in records.iter().enumerate() {
        match normalize_promotion(raw, ctx) {
            Ok(normalized) => {
                report.record_accepted(normalized.outcome.is_clean());
                promotions.push(normalized);
            }
            Err(err) => report.record_rejected(index, &err),
        }
    }

    info!(
        accepted = report.accepted_count,
        repaired = report.repaired_count,
        rejected = report.rejected_count,
        "promotion batch normalized"
    );
    PromotionBatch { promotions, report }
}

/// Normalized chains in input order plus the batch report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBatch {
    pub chains: Vec<NormalizedChain>,
    pub report: BatchReport,
}

/// Runs the store-hierarchy normalizer over a raw batch. Chains never
/// reject, so the report only splits clean from repaired.
#[must_use]
pub fn run_chains(records: &[RawChainRecord], ctx: &NormalizeContext<'_>) -> ChainBatch {
    let mut chains = Vec::with_capacity(records.len());
    let mut report = BatchReport::default();

    for raw in records {
        let normalized = normalize_chain(raw, ctx);
        report.record_accepted(normalized.outcome.is_clean());
        chains.push(normalized);
    }

    info!(
        accepted = report.accepted_count,
        repaired = report.repaired_count,
        "chain batch normalized"
    );
    ChainBatch { chains, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 25, 12, 0, 0).unwrap()
    }

    fn make_raw_item(code: &str) -> RawItemRecord {
        RawItemRecord {
            price_update_date: "2025-05-25 10:24:00".to_string(),
            item_code: code.to_string(),
            item_type: "1".to_string(),
            item_nm: "פריט לדוגמה".to_string(),
            unit_qty: "גרם".to_string(),
            quantity: "100".to_string(),
            unit_of_measure: "100 גרם".to_string(),
            b_is_weighted: "0".to_string(),
            item_price: "10.00".to_string(),
            unit_of_measure_price: "10.00".to_string(),
            ..RawItemRecord::default()
        }
    }

    #[test]
    fn batch_with_empty_codes_rejects_only_those() {
        let mut records = Vec::new();
        for i in 0..100 {
            if i % 10 == 0 {
                records.push(make_raw_item(""));
            } else {
                records.push(make_raw_item(&format!("729000000{i:04}")));
            }
        }
        let ctx = NormalizeContext::new(ctx_now());
        let batch = run_items(&records, "006", "7290058140886", &ctx);
        assert_eq!(batch.report.rejected_count, 10);
        assert_eq!(
            batch.report.accepted_count + batch.report.repaired_count,
            90
        );
        assert_eq!(batch.items.len(), 90);
    }

    #[test]
    fn output_order_follows_input_order() {
        let records: Vec<RawItemRecord> = (0..20)
            .map(|i| make_raw_item(&format!("729000000{i:04}")))
            .collect();
        let ctx = NormalizeContext::new(ctx_now());
        let batch = run_items(&records, "006", "7290058140886", &ctx);
        let codes: Vec<&str> = batch
            .items
            .iter()
            .map(|n| n.item.item_code.as_str())
            .collect();
        let expected: Vec<String> = (0..20).map(|i| format!("729000000{i:04}")).collect();
        assert_eq!(codes, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn rejection_without_record_id_uses_index_placeholder() {
        let records = vec![make_raw_item("7290000000001"), make_raw_item("")];
        let ctx = NormalizeContext::new(ctx_now());
        let batch = run_items(&records, "006", "7290058140886", &ctx);
        assert_eq!(batch.report.rejections.len(), 1);
        assert_eq!(batch.report.rejections[0].record_id, "#1");
    }

    #[test]
    fn rerun_on_identical_batch_is_identical() {
        let records: Vec<RawItemRecord> = (0..10)
            .map(|i| make_raw_item(&format!("729000000{i:04}")))
            .collect();
        let ctx = NormalizeContext::new(ctx_now());
        let first = run_items(&records, "006", "7290058140886", &ctx);
        let second = run_items(&records, "006", "7290058140886", &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn rejection_rate_for_empty_batch_is_zero() {
        let report = BatchReport::default();
        assert!((report.rejection_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejection_rate_counts_rejected_over_total() {
        let records = vec![
            make_raw_item("7290000000001"),
            make_raw_item(""),
            make_raw_item(""),
            make_raw_item("7290000000002"),
        ];
        let ctx = NormalizeContext::new(ctx_now());
        let batch = run_items(&records, "006", "7290058140886", &ctx);
        assert!((batch.report.rejection_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn report_serializes_to_json() {
        let records = vec![make_raw_item("7290000000001"), make_raw_item("")];
        let ctx = NormalizeContext::new(ctx_now());
        let batch = run_items(&records, "006", "7290058140886", &ctx);
        let json = serde_json::to_string(&batch.report).unwrap();
        let decoded: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, batch.report);
    }
}
