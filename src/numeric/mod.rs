//! Arbitrary-precision decimal formatting for token amounts
//!
//! Smallest-unit amounts routinely exceed 2^53, so every conversion here
//! goes through `BigDecimal` rather than f64. The precision and rounding
//! policy is carried explicitly by [`FormatConfig`] instead of living in
//! process-wide state, so two formatters with different policies can
//! coexist.

use std::fmt;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;

/// Precision policy for a [`DecimalFormatter`]
#[derive(Debug, Clone, Copy)]
pub struct FormatConfig {
    /// Fractional digits retained when formatting; excess digits are
    /// dropped with `rounding`, never carried into the integer part.
    pub max_fractional_digits: i64,
    pub rounding: RoundingMode,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_fractional_digits: 30,
            rounding: RoundingMode::Down,
        }
    }
}

/// Locale-independent decimal formatter with comma grouping
#[derive(Debug, Clone, Default)]
pub struct DecimalFormatter {
    config: FormatConfig,
}

impl DecimalFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Format a decimal value with thousands separators.
    ///
    /// Empty and non-numeric input both map to the empty string so a
    /// half-typed amount field degrades to blank instead of failing.
    pub fn format_with_commas<V: fmt::Display>(&self, value: V) -> String {
        let raw = value.to_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let decimal = match self.parse_decimal(trimmed) {
            Some(decimal) => decimal,
            None => return String::new(),
        };

        let rendered = plain_string(&decimal.normalized());
        let (integer_part, fractional_part) = match rendered.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (rendered.as_str(), None),
        };

        let grouped = group_thousands(integer_part);
        match fractional_part {
            Some(frac) => format!("{}.{}", grouped, frac),
            None => grouped,
        }
    }

    /// Strip grouping separators from a display string.
    ///
    /// Total inverse of [`format_with_commas`](Self::format_with_commas);
    /// everything except commas passes through untouched.
    pub fn parse_formatted_value(&self, formatted_value: &str) -> String {
        formatted_value.replace(',', "")
    }

    /// Normalize a smallest-unit amount to a human decimal: raw / 10^decimals.
    ///
    /// Exact; the division is a scale shift, not arithmetic.
    pub fn units_to_decimal(&self, raw: u128, decimals: u8) -> BigDecimal {
        BigDecimal::new(BigInt::from(raw), i64::from(decimals)).normalized()
    }

    /// Render a smallest-unit amount as a plain decimal string
    pub fn format_units(&self, raw: u128, decimals: u8) -> String {
        plain_string(&self.units_to_decimal(raw, decimals))
    }

    /// Scale a human decimal amount to smallest units, truncating digits
    /// beyond the token's precision. Returns `None` for negative amounts
    /// or amounts too large for u128.
    pub fn decimal_to_units(&self, value: &BigDecimal, decimals: u8) -> Option<u128> {
        let scaled = value.with_scale_round(i64::from(decimals), self.config.rounding);
        let (digits, _) = scaled.into_bigint_and_exponent();
        u128::try_from(digits).ok()
    }

    /// Parse user input, applying the configured fractional-digit cap.
    pub fn parse_decimal(&self, input: &str) -> Option<BigDecimal> {
        // Accept the partial forms an amount field produces (".5", "5.").
        let candidate = if let Some(rest) = input.strip_prefix('.') {
            format!("0.{}", rest)
        } else if let Some(rest) = input.strip_suffix('.') {
            rest.to_string()
        } else {
            input.to_string()
        };

        let decimal: BigDecimal = candidate.parse().ok()?;
        if decimal.fractional_digit_count() > self.config.max_fractional_digits {
            Some(decimal.with_scale_round(self.config.max_fractional_digits, self.config.rounding))
        } else {
            Some(decimal)
        }
    }
}

/// Render a decimal in plain notation.
///
/// `BigDecimal`'s `Display` switches to exponential notation once the
/// adjusted exponent drops below -6; token amounts must never do that,
/// so the string is assembled from the raw digits and exponent instead.
pub fn plain_string(decimal: &BigDecimal) -> String {
    let (digits, exponent) = decimal.as_bigint_and_exponent();
    let signed = digits.to_string();
    let (sign, magnitude) = match signed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", signed.as_str()),
    };

    if magnitude == "0" {
        return "0".to_string();
    }

    let rendered = if exponent <= 0 {
        // Integer with exponent trailing zeros
        let zeros = "0".repeat(exponent.unsigned_abs() as usize);
        format!("{}{}", magnitude, zeros)
    } else {
        let point = exponent as usize;
        if magnitude.len() > point {
            let split = magnitude.len() - point;
            format!("{}.{}", &magnitude[..split], &magnitude[split..])
        } else {
            // All digits are fractional; pad with leading zeros
            let zeros = "0".repeat(point - magnitude.len());
            format!("0.{}{}", zeros, magnitude)
        }
    };

    format!("{}{}", sign, rendered)
}

/// Group an integer digit string every three digits from the right
fn group_thousands(integer_part: &str) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> DecimalFormatter {
        DecimalFormatter::default()
    }

    #[test]
    fn test_groups_integer_part() {
        let f = formatter();
        assert_eq!(f.format_with_commas("1234567"), "1,234,567");
        assert_eq!(f.format_with_commas("100"), "100");
        assert_eq!(f.format_with_commas("1000"), "1,000");
        assert_eq!(f.format_with_commas(0), "0");
    }

    #[test]
    fn test_fractional_part_unchanged() {
        let f = formatter();
        assert_eq!(f.format_with_commas("1234.56789"), "1,234.56789");
        assert_eq!(f.format_with_commas("0.000000001"), "0.000000001");
    }

    #[test]
    fn test_empty_and_non_numeric_map_to_empty() {
        let f = formatter();
        assert_eq!(f.format_with_commas(""), "");
        assert_eq!(f.format_with_commas("   "), "");
        assert_eq!(f.format_with_commas("abc"), "");
        assert_eq!(f.format_with_commas("1.2.3"), "");
    }

    #[test]
    fn test_truncates_to_thirty_fractional_digits() {
        let f = formatter();
        // 31st fractional digit is 8; truncation drops it, never rounds up.
        let formatted = f.format_with_commas("1234567.8912345678901234567890123456789");
        assert_eq!(formatted, "1,234,567.891234567890123456789012345678");
    }

    #[test]
    fn test_never_exponential_for_small_magnitudes() {
        let f = formatter();
        // Below 1e-6 BigDecimal's Display would switch to "1E-9".
        assert_eq!(f.format_with_commas("0.000000001"), "0.000000001");
        assert_eq!(f.format_with_commas("-0.000000001"), "-0.000000001");

        let tiny: BigDecimal = "0.000000001".parse().unwrap();
        assert_eq!(f.format_with_commas(tiny), "0.000000001");

        assert_eq!(f.format_units(1, 9), "0.000000001");
        assert_eq!(f.format_units(42, 12), "0.000000000042");
    }

    #[test]
    fn test_plain_string_rendering() {
        let cases = [
            ("0", "0"),
            ("0.000", "0"),
            ("1500", "1500"),
            ("0.5", "0.5"),
            ("12.345", "12.345"),
            ("-0.0004", "-0.0004"),
        ];
        for (input, expected) in cases {
            let decimal: BigDecimal = input.parse().unwrap();
            assert_eq!(plain_string(&decimal.normalized()), expected);
        }

        // Negative exponent after normalization: 42000 -> digits 42, exp -3.
        let decimal: BigDecimal = "42000".parse().unwrap();
        assert_eq!(plain_string(&decimal.normalized()), "42000");
    }

    #[test]
    fn test_never_exponential_for_large_magnitudes() {
        let f = formatter();
        let formatted = f.format_with_commas("123456789012345678901234567890");
        assert!(!formatted.contains('e') && !formatted.contains('E'));
        assert_eq!(formatted, "123,456,789,012,345,678,901,234,567,890");
    }

    #[test]
    fn test_negative_values() {
        let f = formatter();
        assert_eq!(f.format_with_commas("-1234567.5"), "-1,234,567.5");
        assert_eq!(f.format_with_commas("-100"), "-100");
    }

    #[test]
    fn test_parse_formatted_value_strips_commas() {
        let f = formatter();
        assert_eq!(f.parse_formatted_value("1,234,567.89"), "1234567.89");
        assert_eq!(f.parse_formatted_value("42"), "42");
        assert_eq!(f.parse_formatted_value(""), "");
    }

    #[test]
    fn test_round_trip_modulo_grouping() {
        let f = formatter();
        for input in [
            "1234567",
            "0.25",
            "987654321.123456",
            "5",
            "-42000",
            "0.000000001",
        ] {
            let formatted = f.format_with_commas(input);
            assert_eq!(f.parse_formatted_value(&formatted), input);
        }
    }

    #[test]
    fn test_partial_input_forms() {
        let f = formatter();
        assert_eq!(f.format_with_commas(".5"), "0.5");
        assert_eq!(f.format_with_commas("1234."), "1,234");
    }

    #[test]
    fn test_units_to_decimal() {
        let f = formatter();
        assert_eq!(f.units_to_decimal(1_500_000_000, 9).to_string(), "1.5");
        assert_eq!(f.units_to_decimal(0, 9).to_string(), "0");
        // Beyond f64's integer range, still exact.
        let huge = 123_456_789_012_345_678_901_234_567u128;
        assert_eq!(
            f.units_to_decimal(huge, 9).to_string(),
            "123456789012345678.901234567"
        );
    }

    #[test]
    fn test_decimal_to_units_truncates_excess_digits() {
        let f = formatter();
        let value: BigDecimal = "1.5".parse().unwrap();
        assert_eq!(f.decimal_to_units(&value, 9), Some(1_500_000_000));

        // 9 decimals: the 10th digit is dropped, not rounded.
        let value: BigDecimal = "0.1234567899".parse().unwrap();
        assert_eq!(f.decimal_to_units(&value, 9), Some(123_456_789));

        let negative: BigDecimal = "-1".parse().unwrap();
        assert_eq!(f.decimal_to_units(&negative, 9), None);
    }
}
