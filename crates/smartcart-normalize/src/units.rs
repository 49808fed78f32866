//! Unit-of-measure token normalization.
//!
//! Feed unit tokens arrive in several Hebrew spellings, with apostrophe and
//! gershayim variants, and sometimes as a literal all-zeros placeholder.
//! Matching runs sentinel → exact → fuzzy, with a confidence score so
//! callers can decide how much to trust the result.

use smartcart_core::UnitType;

use crate::text::{clean_text, is_corruption_sentinel};

/// A unit-normalization result: the resolved unit plus how it was matched.
///
/// Confidence levels: `1.0` exact vocabulary match, `0.7` fuzzy match,
/// `0.0` sentinel or no match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMatch {
    pub unit: UnitType,
    pub confidence: f64,
}

impl UnitMatch {
    const fn unknown() -> Self {
        Self {
            unit: UnitType::Unknown,
            confidence: 0.0,
        }
    }
}

/// Canonical vocabulary: every exact spelling observed in the feeds, with
/// apostrophe (U+0027), geresh (U+05F3) and gershayim (U+05F4) variants.
const VOCABULARY: &[(&str, UnitType)] = &[
    ("גרם", UnitType::Gram),
    ("גר'", UnitType::Gram),
    ("גרמים", UnitType::Gram),
    ("לק\"ג", UnitType::KilogramRate),
    ("לק״ג", UnitType::KilogramRate),
    ("ק\"ג", UnitType::KilogramRate),
    ("ק״ג", UnitType::KilogramRate),
    ("קילוגרם", UnitType::KilogramRate),
    ("ליטר", UnitType::Liter),
    ("ליטרים", UnitType::Liter),
    ("מ\"ל", UnitType::Milliliter),
    ("מ״ל", UnitType::Milliliter),
    ("מ'ל", UnitType::Milliliter),
    ("מל'", UnitType::Milliliter),
    ("מיליליטר", UnitType::Milliliter),
    ("יח'", UnitType::Piece),
    ("יח׳", UnitType::Piece),
    ("יחידה", UnitType::Piece),
    ("יחידות", UnitType::Piece),
];

/// Normalizes a raw unit token.
///
/// Rule order:
/// 1. corruption sentinel (all-zeros, length ≥ 5) → `Unknown`, confidence 0;
/// 2. exact vocabulary match → that unit, confidence 1;
/// 3. fuzzy match tolerating missing or extra punctuation (`"גר"` matches
///    `"גרם"`) → matched unit, confidence 0.7;
/// 4. no match → `Unknown`, confidence 0.
#[must_use]
pub fn normalize_unit_token(raw: &str) -> UnitMatch {
    let token = clean_text(raw);
    if token.is_empty() || is_corruption_sentinel(&token) {
        return UnitMatch::unknown();
    }

    for (form, unit) in VOCABULARY {
        if token == *form {
            return UnitMatch {
                unit: *unit,
                confidence: 1.0,
            };
        }
    }

    let stripped = strip_punctuation(&token);
    if stripped.is_empty() {
        return UnitMatch::unknown();
    }
    for (form, unit) in VOCABULARY {
        let form_stripped = strip_punctuation(form);
        if stripped == form_stripped
            || (stripped.chars().count() >= 2 && form_stripped.starts_with(&stripped))
        {
            return UnitMatch {
                unit: *unit,
                confidence: 0.7,
            };
        }
    }

    UnitMatch::unknown()
}

/// Scans free text for any known unit word and returns the matching unit.
///
/// Used as a fallback when the dedicated unit field is corrupted but the
/// unit-of-measure text (e.g. `"100 גרם"`) still names one. Longer
/// vocabulary forms are tried first so `"מיליליטר"` is not claimed by a
/// shorter form's prefix.
#[must_use]
pub fn infer_unit_from_text(text: &str) -> Option<UnitType> {
    let cleaned = clean_text(text);
    if cleaned.is_empty() || is_corruption_sentinel(&cleaned) {
        return None;
    }

    let mut forms: Vec<&(&str, UnitType)> = VOCABULARY.iter().collect();
    forms.sort_by_key(|(form, _)| std::cmp::Reverse(form.chars().count()));

    for (form, unit) in forms {
        if cleaned.contains(form) {
            return Some(*unit);
        }
    }
    None
}

/// Parses the numeric prefix of a unit-of-measure string, e.g. the `100`
/// in `"100 גרם"`. Returns `None` when the text does not start with a
/// positive number.
#[must_use]
pub fn leading_quantity(text: &str) -> Option<f64> {
    let cleaned = clean_text(text);
    let prefix: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if prefix.is_empty() {
        return None;
    }
    match prefix.parse::<f64>() {
        Ok(value) if value > 0.0 => Some(value),
        _ => None,
    }
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '׳' | '״' | '.' | ','))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_token_is_unknown_with_zero_confidence() {
        let m = normalize_unit_token("00000");
        assert_eq!(m.unit, UnitType::Unknown);
        assert!((m.confidence - 0.0).abs() < f64::EPSILON);

        let m = normalize_unit_token("0000000000");
        assert_eq!(m.unit, UnitType::Unknown);
        assert!((m.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_match_full_confidence() {
        let m = normalize_unit_token("גרם");
        assert_eq!(m.unit, UnitType::Gram);
        assert!((m.confidence - 1.0).abs() < f64::EPSILON);

        let m = normalize_unit_token(" ליטר ");
        assert_eq!(m.unit, UnitType::Liter);
        assert!((m.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_match_gershayim_variant() {
        let m = normalize_unit_token("לק״ג");
        assert_eq!(m.unit, UnitType::KilogramRate);
        assert!((m.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_match_apostrophe_variants() {
        assert_eq!(normalize_unit_token("מ'ל").unit, UnitType::Milliliter);
        assert_eq!(normalize_unit_token("יח'").unit, UnitType::Piece);
    }

    #[test]
    fn fuzzy_match_truncated_gram() {
        let m = normalize_unit_token("גר");
        assert_eq!(m.unit, UnitType::Gram);
        assert!((m.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn fuzzy_match_missing_punctuation() {
        let m = normalize_unit_token("לקג");
        assert_eq!(m.unit, UnitType::KilogramRate);
        assert!((m.confidence - 0.7).abs() < f64::EPSILON);

        let m = normalize_unit_token("יח");
        assert_eq!(m.unit, UnitType::Piece);
        assert!((m.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn unmatched_token_is_unknown() {
        let m = normalize_unit_token("קופסה");
        assert_eq!(m.unit, UnitType::Unknown);
        assert!((m.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_token_is_unknown() {
        let m = normalize_unit_token("   ");
        assert_eq!(m.unit, UnitType::Unknown);
        assert!((m.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn infer_unit_from_measure_text() {
        assert_eq!(infer_unit_from_text("100 גרם"), Some(UnitType::Gram));
        assert_eq!(infer_unit_from_text("1 ליטר"), Some(UnitType::Liter));
        assert_eq!(infer_unit_from_text("0000000000"), None);
        assert_eq!(infer_unit_from_text("קופסה"), None);
    }

    #[test]
    fn leading_quantity_parses_numeric_prefix() {
        assert_eq!(leading_quantity("100 גרם"), Some(100.0));
        assert_eq!(leading_quantity("1.5 ליטר"), Some(1.5));
        assert_eq!(leading_quantity("גרם 100"), None);
        assert_eq!(leading_quantity("0 גרם"), None);
        assert_eq!(leading_quantity(""), None);
    }
}
