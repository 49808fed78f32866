use thiserror::Error;

/// Rejection reasons for structurally unsalvageable records.
///
/// Field-level corruption is never an error; it is repaired and flagged in
/// the record's [`crate::Outcome`]. These variants cover the cases where no
/// canonical entity can be produced at all; the batch always continues past
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("item record rejected: missing item code")]
    MissingItemCode,

    #[error("item {item_code} rejected: price and quantity are both zero and unrecoverable")]
    UnrecoverablePricing { item_code: String },

    #[error("promotion record rejected: missing promotion id")]
    MissingPromotionId,

    #[error("promotion {promotion_id} rejected: no applicable item codes")]
    EmptyPromotionItems { promotion_id: String },

    #[error("promotion {promotion_id} rejected: unparseable start or end date")]
    UnparseablePromotionWindow { promotion_id: String },

    #[error("promotion {promotion_id} rejected: window ends at or before it starts")]
    InvalidPromotionWindow { promotion_id: String },
}

impl NormalizeError {
    /// The rejected record's id, when the record carried one.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        match self {
            NormalizeError::MissingItemCode | NormalizeError::MissingPromotionId => None,
            NormalizeError::UnrecoverablePricing { item_code } => Some(item_code),
            NormalizeError::EmptyPromotionItems { promotion_id }
            | NormalizeError::UnparseablePromotionWindow { promotion_id }
            | NormalizeError::InvalidPromotionWindow { promotion_id } => Some(promotion_id),
        }
    }
}
