use rust_decimal::Decimal;
use std::str::FromStr;

/// Ordered parser strategies, tried left to right; first success wins.
const STRATEGIES: &[fn(&str) -> Option<Decimal>] = &[
    parse_grouped,
    parse_decimal_comma,
    parse_multiplier,
    parse_plain,
];

/// Parse a raw substring suspected to encode a number.
///
/// Handles the numeric formats seen across Brazilian lab reports:
/// - "1.234,56" (dot grouping, decimal comma) -> 1234.56
/// - "3,5" (decimal comma) -> 3.5
/// - "1,234" (comma grouping) -> 1234
/// - "4,5 x 10^6" (multiplier notation) -> 4500000
/// - "0.030" / "68" (plain)
///
/// Strict: the entire trimmed substring must be consumed (a lone trailing
/// '.' is dropped first). Failure is None, never a zero or a truncation.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    STRATEGIES.iter().find_map(|parse| parse(s))
}

/// Separator-grouped forms: dot grouping with a decimal comma ("1.234,56"),
/// dot grouping alone with two or more groups ("1.234.567"), and comma
/// grouping ("1,234"). A single dot group with no second separator is a
/// decimal point, not grouping, and is left to `parse_plain`.
fn parse_grouped(s: &str) -> Option<Decimal> {
    if let Some((int_part, frac)) = s.split_once(',') {
        if frac.len() <= 2 && is_digits(frac) && is_grouped(int_part, '.') {
            return decimal_from(&format!("{}.{}", int_part.replace('.', ""), frac));
        }
        if is_grouped(s, ',') {
            return decimal_from(&s.replace(',', ""));
        }
        return None;
    }
    if s.matches('.').count() >= 2 && is_grouped(s, '.') {
        return decimal_from(&s.replace('.', ""));
    }
    None
}

/// Plain decimal comma ("3,5"). A comma is a decimal separator only when
/// followed by one or two digits.
fn parse_decimal_comma(s: &str) -> Option<Decimal> {
    let (int_part, frac) = s.split_once(',')?;
    if !is_digits(int_part) || frac.is_empty() || frac.len() > 2 || !is_digits(frac) {
        return None;
    }
    decimal_from(&format!("{int_part}.{frac}"))
}

/// Multiplier notation: "10 x 10^3", "4,5 x 10^6", "4.5x10^6".
/// The mantissa reuses the non-scientific strategies; the result is
/// mantissa * 10^exponent with overflow-checked scaling.
fn parse_multiplier(s: &str) -> Option<Decimal> {
    let lower = s.to_lowercase();
    let (mantissa_str, rest) = lower.split_once('x')?;
    let exp_str = rest.trim().strip_prefix("10^")?;
    let exponent: i32 = exp_str.parse().ok()?;

    let mantissa_str = mantissa_str.trim();
    let mantissa = parse_grouped(mantissa_str)
        .or_else(|| parse_decimal_comma(mantissa_str))
        .or_else(|| parse_plain(mantissa_str))?;

    scale_by_pow10(mantissa, exponent)
}

/// Plain decimal dot or integer ("68", "0.030", "1.234").
fn parse_plain(s: &str) -> Option<Decimal> {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    decimal_from(s)
}

fn scale_by_pow10(value: Decimal, exponent: i32) -> Option<Decimal> {
    // Decimal holds 28-29 significant digits; larger exponents cannot fit.
    if exponent.unsigned_abs() > 28 {
        return None;
    }
    let ten = Decimal::from(10u32);
    let mut out = value;
    for _ in 0..exponent.unsigned_abs() {
        out = if exponent >= 0 {
            out.checked_mul(ten)?
        } else {
            out.checked_div(ten)?
        };
    }
    Some(out)
}

fn is_grouped(s: &str, sep: char) -> bool {
    let groups: Vec<&str> = s.split(sep).collect();
    if groups.len() < 2 {
        return false;
    }
    let first = groups[0];
    if first.is_empty() || first.len() > 3 || !is_digits(first) {
        return false;
    }
    groups[1..].iter().all(|g| g.len() == 3 && is_digits(g))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn decimal_from(s: &str) -> Option<Decimal> {
    Decimal::from_str(s).ok()
}
