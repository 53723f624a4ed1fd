// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number and currency formatting.
//!
//! Counters display grouped integers in a [`NumberLocale`]. Currency amounts
//! always use the `fr-FR` rules of `Intl.NumberFormat` with
//! `style: "currency"`: narrow no-break space (U+202F) between digit
//! groups, a decimal comma, and a no-break space (U+00A0) before the symbol.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Narrow no-break space, the `fr` digit group separator.
const NARROW_NBSP: char = '\u{202f}';
/// No-break space, between a French amount and its currency symbol.
const NBSP: char = '\u{a0}';

/// Digit grouping conventions for counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberLocale {
    /// `1,000`
    #[default]
    En,
    /// `1 000` (narrow no-break space)
    Fr,
}

impl NumberLocale {
    /// Picks a locale from a BCP 47 tag such as `navigator.language`.
    ///
    /// French tags (`fr`, `fr-FR`, `fr-CA`, ...) select [`Fr`](Self::Fr);
    /// everything else selects [`En`](Self::En).
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("fr") {
            Self::Fr
        } else {
            Self::En
        }
    }

    /// Separator between groups of three digits.
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::En => ',',
            Self::Fr => NARROW_NBSP,
        }
    }
}

/// Formats `value` with thousands grouping.
#[must_use]
pub fn group_digits(value: u64, locale: NumberLocale) -> String {
    insert_separators(&value.to_string(), locale.group_separator())
}

fn insert_separators(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// `fr-FR` symbol and minor digits for an uppercased ISO 4217 code.
fn currency_rule(code: &str) -> (&str, usize) {
    match code {
        "EUR" => ("€", 2),
        "USD" => ("$US", 2),
        "GBP" => ("£GB", 2),
        "XAF" => ("FCFA", 0),
        "CHF" => ("CHF", 2),
        "JPY" => ("JPY", 0),
        other => (other, 2),
    }
}

/// Fraction digits that print any `f64` without rounding.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Formats an amount as `fr-FR` currency, e.g. `1 234,50 €`.
///
/// `currency` is an ISO 4217 code, matched case-insensitively. Unknown codes
/// use two minor digits and the code itself as the symbol. The exact value of
/// `amount` is rounded half away from zero, and negative zero keeps its sign.
#[must_use]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let (symbol, minor_digits) = currency_rule(&code);

    if amount.is_nan() {
        return format!("NaN{NBSP}{symbol}");
    }
    let mut out = String::new();
    if amount.is_sign_negative() {
        out.push('-');
    }
    if amount.is_infinite() {
        out.push('∞');
    } else {
        let (whole, fraction) = round_half_away(amount.abs(), minor_digits);
        out.push_str(&insert_separators(&whole, NARROW_NBSP));
        if !fraction.is_empty() {
            out.push(',');
            out.push_str(&fraction);
        }
    }
    out.push(NBSP);
    out.push_str(symbol);
    out
}

/// Rounds a finite, non-negative `x` to `digits` fraction digits, half away
/// from zero, on its exact decimal expansion.
///
/// Returns the integer digits and the fraction digits.
fn round_half_away(x: f64, digits: usize) -> (String, String) {
    let exact = format!("{x:.prec$}", prec = EXACT_FRACTION_DIGITS);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((&exact, ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(core::iter::repeat(b'0')).take(digits))
        .collect();
    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let fraction = kept.split_off(kept.len() - digits);
    (
        kept.into_iter().map(char::from).collect(),
        fraction.into_iter().map(char::from).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_en() {
        assert_eq!(group_digits(0, NumberLocale::En), "0");
        assert_eq!(group_digits(999, NumberLocale::En), "999");
        assert_eq!(group_digits(1000, NumberLocale::En), "1,000");
        assert_eq!(group_digits(1_234_567, NumberLocale::En), "1,234,567");
    }

    #[test]
    fn groups_fr() {
        assert_eq!(group_digits(25_000, NumberLocale::Fr), "25\u{202f}000");
    }

    #[test]
    fn locale_from_tag() {
        assert_eq!(NumberLocale::from_tag("fr-FR"), NumberLocale::Fr);
        assert_eq!(NumberLocale::from_tag("FR"), NumberLocale::Fr);
        assert_eq!(NumberLocale::from_tag("fr_CA"), NumberLocale::Fr);
        assert_eq!(NumberLocale::from_tag("en-US"), NumberLocale::En);
        assert_eq!(NumberLocale::from_tag("fy"), NumberLocale::En);
        assert_eq!(NumberLocale::from_tag(""), NumberLocale::En);
    }

    #[test]
    fn euro_default_format() {
        assert_eq!(format_currency(1234.5, "EUR"), "1\u{202f}234,50\u{a0}€");
        assert_eq!(format_currency(50.0, "eur"), "50,00\u{a0}€");
        assert_eq!(format_currency(0.0, "EUR"), "0,00\u{a0}€");
    }

    #[test]
    fn rounding_half_away_from_zero() {
        assert_eq!(format_currency(2.675_000_1, "EUR"), "2,68\u{a0}€");
        assert_eq!(format_currency(9.999, "EUR"), "10,00\u{a0}€");
        assert_eq!(format_currency(-3.5, "XAF"), "-4\u{a0}FCFA");
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(format_currency(15_000.0, "XAF"), "15\u{202f}000\u{a0}FCFA");
        assert_eq!(format_currency(1500.4, "JPY"), "1\u{202f}500\u{a0}JPY");
    }

    #[test]
    fn foreign_symbols() {
        assert_eq!(format_currency(20.0, "USD"), "20,00\u{a0}$US");
        assert_eq!(format_currency(20.0, "GBP"), "20,00\u{a0}£GB");
        assert_eq!(format_currency(20.0, "SEK"), "20,00\u{a0}SEK");
    }

    #[test]
    fn negative_and_non_finite() {
        assert_eq!(format_currency(-1234.0, "EUR"), "-1\u{202f}234,00\u{a0}€");
        assert_eq!(format_currency(-0.001, "EUR"), "-0,00\u{a0}€");
        assert_eq!(format_currency(-0.0, "EUR"), "-0,00\u{a0}€");
        assert_eq!(format_currency(f64::NAN, "EUR"), "NaN\u{a0}€");
        assert_eq!(format_currency(f64::INFINITY, "EUR"), "∞\u{a0}€");
        assert_eq!(format_currency(f64::NEG_INFINITY, "USD"), "-∞\u{a0}$US");
    }

    #[test]
    fn rounds_the_exact_binary_value() {
        // 1.115 is stored as 1.11499999999999999111...
        assert_eq!(format_currency(1.115, "EUR"), "1,11\u{a0}€");
        // 8.345 is stored as 8.34500000000000063948...
        assert_eq!(format_currency(8.345, "EUR"), "8,35\u{a0}€");
        // Exact ties round away from zero.
        assert_eq!(format_currency(0.125, "EUR"), "0,13\u{a0}€");
        assert_eq!(format_currency(-2.5, "JPY"), "-3\u{a0}JPY");
    }

    #[test]
    fn huge_amounts_keep_every_digit() {
        assert_eq!(
            format_currency(1e40, "EUR"),
            "10\u{202f}000\u{202f}000\u{202f}000\u{202f}000\u{202f}000\u{202f}303\u{202f}786\u{202f}028\u{202f}427\u{202f}003\u{202f}666\u{202f}890\u{202f}752,00\u{a0}€"
        );
        let max = format_currency(f64::MAX, "EUR");
        assert!(max.starts_with("179\u{202f}769\u{202f}313"), "{max}");
        assert!(max.ends_with(",00\u{a0}€"), "{max}");
        let min = format_currency(-f64::MAX, "XAF");
        assert!(min.starts_with("-179"), "{min}");
    }
}
