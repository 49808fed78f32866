//! Tolerant numeric parsing for feed fields.
//!
//! Feed numbers arrive as text with thousands separators, stray whitespace,
//! or outright garbage. Parsers here return `None` instead of failing so the
//! record-level normalizers can apply their own defaults and repair flags.

/// Parses a feed number, stripping thousands separators.
///
/// Returns `None` for empty input or any non-numeric residue: a field like
/// `"12,345.60"` parses, `"12x"` does not.
#[must_use]
pub fn parse_lenient(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let without_separators: String = trimmed.chars().filter(|c| *c != ',').collect();
    without_separators.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a feed integer via [`parse_lenient`], truncating any fractional
/// part (the feeds publish counts as `"2.0000"`).
///
/// Returns `None` for negative values or garbage.
#[must_use]
pub fn parse_lenient_u32(value: &str) -> Option<u32> {
    let parsed = parse_lenient(value)?;
    if !(0.0..=f64::from(u32::MAX)).contains(&parsed) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let truncated = parsed.trunc() as u32;
    Some(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_lenient("12.90"), Some(12.9));
        assert_eq!(parse_lenient("  7 "), Some(7.0));
        assert_eq!(parse_lenient("0.0000"), Some(0.0));
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_lenient("12,345.60"), Some(12345.6));
        assert_eq!(parse_lenient("1,000"), Some(1000.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("   "), None);
        assert_eq!(parse_lenient("12x"), None);
        assert_eq!(parse_lenient("שתיים"), None);
        assert_eq!(parse_lenient("NaN"), None);
    }

    #[test]
    fn u32_truncates_feed_decimals() {
        assert_eq!(parse_lenient_u32("2.0000"), Some(2));
        assert_eq!(parse_lenient_u32("10"), Some(10));
    }

    #[test]
    fn u32_rejects_negative_and_garbage() {
        assert_eq!(parse_lenient_u32("-1"), None);
        assert_eq!(parse_lenient_u32("abc"), None);
        assert_eq!(parse_lenient_u32(""), None);
    }
}
