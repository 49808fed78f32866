//! Free-text cleaning and search-term derivation for Hebrew/mixed-language
//! feed strings.
//!
//! Everything here is total and side-effect-free: garbage in, cleaned
//! garbage out, never an error.

/// Minimum length of an all-zeros run treated as a corruption sentinel.
///
/// The feeds publish `"00000"` and `"0000000000"` where a unit token should
/// be; short zero runs (e.g. a literal quantity of `"0"`) are not sentinels.
const SENTINEL_MIN_LEN: usize = 5;

/// Feed placeholder strings meaning "no data", seen in manufacturer and
/// address fields.
const PLACEHOLDERS: &[&str] = &["לא ידוע", "unknown", "-", "."];

/// Cleans a raw feed string: trims, collapses internal whitespace runs to a
/// single space, strips control characters. Script mixing is left intact;
/// no transliteration.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_control() {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Returns `true` when a token is the feed's all-zeros corruption sentinel:
/// nothing but the digit `0`, at least [`SENTINEL_MIN_LEN`] long.
#[must_use]
pub fn is_corruption_sentinel(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.len() >= SENTINEL_MIN_LEN && trimmed.chars().all(|c| c == '0')
}

/// Cleans a string and converts empty or placeholder values to `None`.
#[must_use]
pub fn normalize_placeholder(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return None;
    }
    let lower = cleaned.to_lowercase();
    if PLACEHOLDERS.iter().any(|p| lower == *p) {
        return None;
    }
    Some(cleaned)
}

/// Coerces a raw flag string to a boolean.
///
/// Recognizes the numeric flags the feeds actually publish plus common
/// textual forms. Unrecognized or empty input is `None` so callers can apply
/// their own fallback.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "y" | "yes" | "כן" => Some(true),
        "0" | "false" | "n" | "no" | "לא" => Some(false),
        _ => None,
    }
}

/// Derives search tokens from an item name: order-preserving, deduplicated.
///
/// Tokenizes on whitespace and punctuation, then drops tokens shorter than
/// two characters and pure-numeric tokens with no unit suffix (so `"500"` is
/// dropped but `"500גרם"` survives).
#[must_use]
pub fn derive_search_terms(name: &str) -> Vec<String> {
    let cleaned = clean_text(name);
    let mut terms: Vec<String> = Vec::new();
    for token in cleaned.split(|c: char| !c.is_alphanumeric()) {
        if token.chars().count() < 2 {
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !terms.iter().any(|t| t == token) {
            terms.push(token.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_trims_and_collapses() {
        assert_eq!(clean_text("  שמן   זית \t כתית "), "שמן זית כתית");
    }

    #[test]
    fn clean_text_strips_control_characters() {
        assert_eq!(clean_text("abc\u{0000}def\u{001B}"), "abcdef");
    }

    #[test]
    fn clean_text_keeps_mixed_scripts() {
        assert_eq!(clean_text("תה ירוק Wissotzky 25"), "תה ירוק Wissotzky 25");
    }

    #[test]
    fn clean_text_empty_input() {
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn sentinel_all_zeros_long_enough() {
        assert!(is_corruption_sentinel("00000"));
        assert!(is_corruption_sentinel("0000000000"));
        assert!(is_corruption_sentinel("  00000  "));
    }

    #[test]
    fn sentinel_short_zero_run_is_not_sentinel() {
        assert!(!is_corruption_sentinel("0"));
        assert!(!is_corruption_sentinel("0000"));
    }

    #[test]
    fn sentinel_mixed_digits_is_not_sentinel() {
        assert!(!is_corruption_sentinel("00100"));
        assert!(!is_corruption_sentinel("גרם"));
    }

    #[test]
    fn placeholder_unknown_hebrew_becomes_none() {
        assert_eq!(normalize_placeholder("לא ידוע"), None);
        assert_eq!(normalize_placeholder("  Unknown "), None);
        assert_eq!(normalize_placeholder(""), None);
    }

    #[test]
    fn placeholder_real_value_survives() {
        assert_eq!(
            normalize_placeholder("  אסם  תעשיות "),
            Some("אסם תעשיות".to_string())
        );
    }

    #[test]
    fn parse_flag_numeric_and_textual() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" true "), Some(true));
        assert_eq!(parse_flag("לא"), Some(false));
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn search_terms_drop_short_and_numeric_tokens() {
        let terms = derive_search_terms("שמן זית כתית מעולה 750 מל");
        assert_eq!(terms, vec!["שמן", "זית", "כתית", "מעולה", "מל"]);
    }

    #[test]
    fn search_terms_keep_numeric_with_unit_suffix() {
        let terms = derive_search_terms("טחינה 500גרם");
        assert_eq!(terms, vec!["טחינה", "500גרם"]);
    }

    #[test]
    fn search_terms_dedup_preserves_order() {
        let terms = derive_search_terms("קפה קפה שחור קפה");
        assert_eq!(terms, vec!["קפה", "שחור"]);
    }

    #[test]
    fn search_terms_split_on_punctuation() {
        let terms = derive_search_terms("ג'ליבינס, תות-שדה");
        assert_eq!(terms, vec!["ליבינס", "תות", "שדה"]);
    }
}
