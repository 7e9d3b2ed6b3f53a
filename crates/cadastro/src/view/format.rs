//! Display formatting for client fields.
//!
//! CPF masking keeps most of the tax id hidden by default; the canonical
//! formatted form is only produced for the explicit reveal toggle. Dates
//! render in Brazilian day-first order.

use chrono::{DateTime, Utc};

use crate::client::digits_only;

/// Masking character used for hidden CPF digits.
const MASK_CHAR: char = '•';

/// Placeholder shown when a CPF has too few digits to partially reveal.
const MASK_PLACEHOLDER: &str = "••••••";

/// Mask a CPF for display: first 5 digits visible, the rest hidden.
///
/// Fewer than 6 digits yields a fixed fully-masked placeholder so the
/// digit count is not leaked; an empty value renders empty.
#[must_use]
pub fn mask_cpf(cpf: &str) -> String {
    let digits = digits_only(cpf);
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() < 6 {
        return MASK_PLACEHOLDER.to_string();
    }

    let mut masked = digits[..5].to_string();
    masked.extend(std::iter::repeat(MASK_CHAR).take(digits.len() - 5));
    masked
}

/// Format a CPF in the canonical `XXX.XXX.XXX-XX` grouping.
///
/// Anything that is not exactly 11 digits is returned as its bare digit
/// string; the checksum is not checked.
#[must_use]
pub fn format_cpf(cpf: &str) -> String {
    let digits = digits_only(cpf);
    if digits.len() != 11 {
        return digits;
    }
    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    )
}

/// Format an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Values longer than a date (e.g. with a time part) are truncated to the
/// date first; anything that doesn't look like an ISO date passes through
/// unchanged. Empty input renders empty.
#[must_use]
pub fn format_date(value: &str) -> String {
    let date = value.trim();
    // get() instead of slicing: arbitrary input may not split on a char boundary
    let date = date.get(..10).unwrap_or(date);

    if is_iso_date(date) {
        format!("{}/{}/{}", &date[8..10], &date[5..7], &date[..4])
    } else {
        date.to_string()
    }
}

/// Format a creation instant as `DD/MM/YYYY HH:MM`.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%d/%m/%Y %H:%M").to_string()
}

/// Escape text for insertion into HTML markup.
///
/// Every user-supplied field goes through this before rendering; it is a
/// security requirement, not cosmetic formatting.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Check for the `YYYY-MM-DD` shape without validating the calendar.
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && value
            .chars()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mask_cpf_full() {
        assert_eq!(mask_cpf("12345678901"), "12345••••••");
    }

    #[test]
    fn test_mask_cpf_accepts_formatted_input() {
        assert_eq!(mask_cpf("123.456.789-01"), "12345••••••");
    }

    #[test]
    fn test_mask_cpf_short_value_fully_masked() {
        assert_eq!(mask_cpf("12345"), "••••••");
        assert_eq!(mask_cpf("1"), "••••••");
    }

    #[test]
    fn test_mask_cpf_six_digits_partially_visible() {
        assert_eq!(mask_cpf("123456"), "12345•");
    }

    #[test]
    fn test_mask_cpf_empty() {
        assert_eq!(mask_cpf(""), "");
        assert_eq!(mask_cpf("---"), "");
    }

    #[test]
    fn test_format_cpf_canonical() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_format_cpf_strips_existing_formatting() {
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn test_format_cpf_wrong_length_passes_digits_through() {
        assert_eq!(format_cpf("12345"), "12345");
        assert_eq!(format_cpf("123456789012"), "123456789012");
    }

    #[test]
    fn test_format_date_iso() {
        assert_eq!(format_date("1990-05-03"), "03/05/1990");
    }

    #[test]
    fn test_format_date_truncates_time_part() {
        assert_eq!(format_date("1990-05-03T12:00:00"), "03/05/1990");
    }

    #[test]
    fn test_format_date_non_iso_passthrough() {
        assert_eq!(format_date("03/05/1990"), "03/05/1990");
        assert_eq!(format_date("unknown"), "unknown");
    }

    #[test]
    fn test_format_date_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }

    #[test]
    fn test_format_timestamp() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(instant), "15/01/2024 10:30");
    }

    #[test]
    fn test_escape_html_script_tag() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#039;");
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Ana Silva"), "Ana Silva");
        assert_eq!(escape_html("José"), "José");
    }

    #[test]
    fn test_escape_html_ampersand_first() {
        // The ampersand in an existing entity is escaped too
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
