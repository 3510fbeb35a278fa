use num_traits::{pow, Signed, Zero};

use super::{Num, NumComponent};

// decimal strings only, e.g. "100", "0.001", "-2.5e3"
pub fn parse_decimal(s: &str) -> Option<Num> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };

    let (int, fract) = match mantissa.split_once('.') {
        Some((int, fract)) => (int, fract),
        None => (mantissa, ""),
    };
    if int.is_empty() && fract.is_empty() {
        return None;
    }
    if !all_digits(int) || !all_digits(fract) {
        return None;
    }

    let exponent: i64 = match exponent {
        Some(e) => parse_exponent(e)?,
        None => 0,
    };

    // unscaled value over 10^scale
    let digits = format!("{int}{fract}");
    let unscaled: NumComponent = digits.parse().ok()?;
    let unscaled = if negative { -unscaled } else { unscaled };
    let scale = fract.len() as i64 - exponent;

    let ten = NumComponent::from(10);
    let shift = pow(ten, scale.unsigned_abs() as usize);
    if scale >= 0 {
        Some(Num::new(unscaled, shift))
    } else {
        Some(Num::from_integer(unscaled * shift))
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }
    // i32 range, like most decimal types
    let e: i32 = s.parse().ok()?;
    Some(e as i64)
}

/// Renders `n` with at most `places` fractional digits.
///
/// Halves round away from zero, trailing zeros are dropped and the output is
/// always positional (no exponent).
pub fn fmt_decimal(n: &Num, places: u32) -> String {
    let places = places as usize;
    let shift = Num::from_integer(pow(NumComponent::from(10), places));
    let scaled = (n * shift).round().to_integer();
    if scaled.is_zero() {
        return "0".to_owned();
    }

    let digits = scaled.abs().to_string();
    let digits = format!("{digits:0>width$}", width = places + 1);
    let (int, fract) = digits.split_at(digits.len() - places);
    let fract = fract.trim_end_matches('0');

    let mut out = String::with_capacity(digits.len() + 2);
    if scaled.is_negative() {
        out.push('-');
    }
    out += int;
    if !fract.is_empty() {
        out.push('.');
        out += fract;
    }
    out
}

/// Exact rendering of a rational, as `numer/denom` or just `numer`.
pub fn fmt_fraction(n: &Num) -> String {
    if n.is_integer() {
        n.numer().to_string()
    } else {
        format!("{}/{}", n.numer(), n.denom())
    }
}

#[test]
fn parse_test() {
    assert_eq!(parse_decimal("3.14159"), Some(num!(314159, 100000)));
    assert_eq!(parse_decimal("0.001"), Some(num!(1, 1000)));
    assert_eq!(parse_decimal("100"), Some(num!(100, 1)));
    assert_eq!(parse_decimal("-2.5"), Some(num!(-5, 2)));
    assert_eq!(parse_decimal("+.5"), Some(num!(1, 2)));
    assert_eq!(parse_decimal("5."), Some(num!(5, 1)));
    assert_eq!(parse_decimal("1e3"), Some(num!(1000, 1)));
    assert_eq!(parse_decimal("1.5E-2"), Some(num!(3, 200)));
    assert_eq!(parse_decimal("000.0100"), Some(num!(1, 100)));
}

#[test]
fn parse_rejects_garbage() {
    for bad in ["", ".", "-", "1.2.3", "1_000", "abc", "1e", "1e+", "0x10", " 1", "1,5"] {
        assert_eq!(parse_decimal(bad), None, "{bad:?} should not parse");
    }
}

#[test]
fn fmt_test() {
    assert_eq!(fmt_decimal(&num!(100, 1), 15), "100");
    assert_eq!(fmt_decimal(&num!(1, 1000), 15), "0.001");
    assert_eq!(fmt_decimal(&num!(18, 5), 15), "3.6");
    assert_eq!(fmt_decimal(&num!(-1, 4), 15), "-0.25");
    // 15 places, last one rounded up
    assert_eq!(fmt_decimal(&num!(1, 60), 15), "0.016666666666667");
    assert_eq!(fmt_decimal(&num!(1, 3), 15), "0.333333333333333");
    assert_eq!(fmt_decimal(&num!(2, 3), 2), "0.67");
}

#[test]
fn fmt_rounds_half_away_from_zero() {
    assert_eq!(fmt_decimal(&num!(5, 1000), 2), "0.01");
    assert_eq!(fmt_decimal(&num!(-5, 1000), 2), "-0.01");
    assert_eq!(fmt_decimal(&num!(4, 1000), 2), "0");
    assert_eq!(fmt_decimal(&num!(-4, 1000), 2), "0");
    assert_eq!(fmt_decimal(&num!(199, 100), 0), "2");
}

#[test]
fn fmt_never_uses_exponent() {
    let big = Num::from_integer(pow(NumComponent::from(10), 40));
    assert_eq!(fmt_decimal(&big, 15), format!("1{}", "0".repeat(40)));
    assert_eq!(fmt_fraction(&num!(6, 4)), "3/2");
    assert_eq!(fmt_fraction(&num!(7, 1)), "7");
}
