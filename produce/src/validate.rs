//! Format checks for produce fields.
//!
//! These are pure pass/fail checks on raw input. The field types in this
//! crate ([`Code`](crate::Code), [`Name`](crate::Name), [`Price`](crate::Price))
//! run them on construction, so most callers want those instead.

use std::sync::LazyLock;

use regex::Regex;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("name pattern is valid"));

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Za-z]{4}-){3}[0-9A-Za-z]{4}$").expect("code pattern is valid")
});

/// Number of cents in one unit of currency.
pub const CENTS_PER_UNIT: u64 = 100;

/// Allowed rounding error when scaling a float price to cents, in units of
/// `f64::EPSILON` relative to the cent count.
const CENT_TOLERANCE_ULPS: f64 = 4.0;

/// Largest cent count which an `f64` represents exactly (2^53).
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Check a produce name: a non-empty run of ASCII letters and digits.
pub fn validate_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Check a produce code: four groups of four ASCII letters or digits,
/// separated by hyphens, with nothing before or after.
pub fn validate_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Check a price given as a float: strictly positive with at most two
/// decimal places.
///
/// The price is scaled to cents and compared against the *nearest* whole
/// number, so binary representation error (e.g. `12.12 * 100.0 ==
/// 1211.9999999999998`) doesn't reject valid prices. The allowed error
/// scales with the magnitude of the price, so it only covers
/// representation error and never a genuine third decimal digit.
pub fn validate_price(price: f64) -> bool {
    float_to_cents(price).is_some()
}

/// Convert a float price to whole cents, if it is a valid price.
pub(crate) fn float_to_cents(price: f64) -> Option<u64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }

    let scaled = price * CENTS_PER_UNIT as f64;
    let cents = scaled.round();
    if cents < 1.0 || cents > MAX_EXACT_CENTS {
        return None;
    }

    if (scaled - cents).abs() > cents * f64::EPSILON * CENT_TOLERANCE_ULPS {
        return None;
    }

    Some(cents as u64)
}

/// Parse a decimal price string (`"12"`, `"12.1"`, `"12.12"`, `".5"`) into
/// whole cents without going through floating point.
///
/// Fractional digits past the second are accepted only if they are all
/// zero. Signs, exponents and whitespace are rejected.
pub(crate) fn decimal_to_cents(price: &str) -> Option<u64> {
    let (whole, fraction) = match price.split_once('.') {
        Some((_, "")) => return None,
        Some((whole, fraction)) => (whole, fraction),
        None => (price, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let fraction = match fraction.split_at_checked(2) {
        Some((cents, rest)) if rest.bytes().all(|b| b == b'0') => cents,
        Some(_) => return None,
        None => fraction,
    };

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction_cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse::<u64>().ok()?,
    };

    let cents = whole
        .checked_mul(CENTS_PER_UNIT)?
        .checked_add(fraction_cents)?;
    (cents > 0).then_some(cents)
}
