//! Price normalization and formatting for French booking e-mails.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a raw price substring ("1 234,56", "1.234,56", "1,234.56 €") into a decimal.
///
/// When both separators occur, the later one is the decimal point. A lone comma
/// is a decimal point only if it is followed by at most two characters.
/// Returns `None` when no number is left after cleanup, or when the number
/// does not fit in a `Decimal` (about 28 significant digits); the field is then
/// treated as not found.
pub fn normalize_price(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\u{00a0}' | '\u{202f}'))
        .collect();

    let separated = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(comma), None) => {
            let fraction = &compact[comma + 1..];
            if compact.matches(',').count() == 1 && fraction.chars().count() <= 2 {
                compact.replace(',', ".")
            } else {
                compact.replace(',', "")
            }
        }
        (None, _) => compact,
    };

    let cleaned: String = separated
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    if cleaned.starts_with('.') {
        Decimal::from_str(&format!("0{}", cleaned)).ok()
    } else {
        Decimal::from_str(cleaned).ok()
    }
}

/// Format as `150.00 EUR`.
pub fn format_eur(amount: Decimal) -> String {
    format!("{:.2} EUR", amount.round_dp(2))
}

/// Format in French style: `1 234,56 €`.
pub fn format_eur_fr(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = digits.split_once('.').unwrap_or((digits, "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{}{},{} €", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_french_and_mixed_formats() {
        assert_eq!(normalize_price("1 234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_price("1.234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_price("1,234.56"), Some(dec("1234.56")));
        assert_eq!(normalize_price("1\u{00a0}234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_price("1\u{202f}234,56 €"), Some(dec("1234.56")));
    }

    #[test]
    fn test_normalize_lone_comma() {
        assert_eq!(normalize_price("12,5"), Some(dec("12.5")));
        assert_eq!(normalize_price("150,00"), Some(dec("150.00")));
        // Three digits after the comma: thousands separator.
        assert_eq!(normalize_price("12,500"), Some(dec("12500")));
        assert_eq!(normalize_price("1,234,567"), Some(dec("1234567")));
    }

    #[test]
    fn test_normalize_plain_and_noisy() {
        assert_eq!(normalize_price("89"), Some(dec("89")));
        assert_eq!(normalize_price("89.90"), Some(dec("89.90")));
        assert_eq!(normalize_price("EUR 75,00"), Some(dec("75.00")));
        assert_eq!(normalize_price("12,"), Some(dec("12")));
    }

    #[test]
    fn test_normalize_no_value() {
        assert_eq!(normalize_price(""), None);
        assert_eq!(normalize_price("   "), None);
        assert_eq!(normalize_price(",."), None);
        assert_eq!(normalize_price("EUR"), None);
        // Two dots survive cleanup and cannot be parsed.
        assert_eq!(normalize_price("1.234.567"), None);
        // Beyond Decimal's range.
        assert_eq!(normalize_price("99999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(dec("150")), "150.00 EUR");
        assert_eq!(format_eur(dec("29.999")), "30.00 EUR");
        assert_eq!(format_eur(dec("0")), "0.00 EUR");
    }

    #[test]
    fn test_format_eur_fr() {
        assert_eq!(format_eur_fr(dec("1234.56")), "1 234,56 €");
        assert_eq!(format_eur_fr(dec("12345678.9")), "12 345 678,90 €");
        assert_eq!(format_eur_fr(dec("30")), "30,00 €");
        assert_eq!(format_eur_fr(dec("-1500")), "-1 500,00 €");
    }
}
