//! Culture- and style-aware literal parsing for every conversion target.
//!
//! Numeric text is first normalized into sign, integral digits, fraction
//! digits and exponent according to the requested [`NumberStyles`] and
//! [`Culture`]. Each target then decides whether the literal fits: a
//! malformed literal is a format error, a well-formed literal outside the
//! target's range is an overflow.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::culture::{Culture, DateOrder, NumberStyles};
use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::FromValue;

/// A type that can be parsed from text under explicit styles and culture.
pub trait Parse: FromValue {
    /// Styles used by the plain strict/defaulting conversions.
    const DEFAULT_STYLES: NumberStyles;

    fn parse_text(text: &str, styles: NumberStyles, culture: &Culture) -> Result<Self>;
}

/// Largest `Decimal` magnitude, as digits.
const DECIMAL_MAX_DIGITS: &str = "79228162514264337593543950335";
const DECIMAL_MAX_SCALE: usize = 28;

static TIME_SPAN_RE: OnceLock<Regex> = OnceLock::new();

fn time_span_re() -> &'static Regex {
    TIME_SPAN_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<neg>-)?(?:(?P<days>[0-9]+)\.)?(?P<hours>[0-9]+):(?P<minutes>[0-9]+)(?::(?P<seconds>[0-9]+)(?:\.(?P<fraction>[0-9]{1,7}))?)?$",
        )
        .expect("time span pattern is valid")
    })
}

/// Numeric literal split into its parts, separators removed.
#[derive(Debug, Default, PartialEq)]
struct Literal {
    negative: bool,
    integral: String,
    fraction: String,
    exponent: i64,
    hex: bool,
}

impl Literal {
    /// Shifts the decimal point by the exponent. Returns `None` when the
    /// integral part would exceed `max_integral` significant digits.
    fn shifted(&self, max_integral: usize) -> Option<(String, String)> {
        let mut digits = format!("{}{}", self.integral, self.fraction);
        let point = self.integral.len() as i64 + self.exponent;
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Some((String::new(), String::new()));
        }
        let leading_zeros = (digits.len() - significant.len()) as i64;
        if point - leading_zeros > max_integral as i64 {
            return None;
        }
        if point <= 0 {
            let padding = "0".repeat((-point).min(64) as usize);
            return Some((String::new(), format!("{padding}{digits}")));
        }
        let point = point as usize;
        if point >= digits.len() {
            digits.push_str(&"0".repeat(point - digits.len()));
            return Some((digits, String::new()));
        }
        let fraction = digits.split_off(point);
        Some((digits, fraction))
    }
}

fn strip_white(text: &str, styles: NumberStyles) -> &str {
    let mut s = text;
    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        s = s.trim_start();
    }
    if styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
        s = s.trim_end();
    }
    s
}

fn check_styles(styles: NumberStyles) -> Result<()> {
    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER)
        && !NumberStyles::HEX_NUMBER.contains(styles)
    {
        return Err(Error::InvalidArgument(
            "hexadecimal styles can only be combined with whitespace styles".to_string(),
        ));
    }
    Ok(())
}

fn take_sign<'a>(s: &'a str, culture: &Culture, leading: bool) -> (Option<bool>, &'a str) {
    let (neg, pos) = (culture.negative_sign, culture.positive_sign);
    if leading {
        if let Some(rest) = s.strip_prefix(neg) {
            return (Some(true), rest);
        }
        if let Some(rest) = s.strip_prefix(pos) {
            return (Some(false), rest);
        }
    } else {
        if let Some(rest) = s.strip_suffix(neg) {
            return (Some(true), rest);
        }
        if let Some(rest) = s.strip_suffix(pos) {
            return (Some(false), rest);
        }
    }
    (None, s)
}

fn normalize(text: &str, styles: NumberStyles, culture: &Culture, target: &TypeTag) -> Result<Literal> {
    check_styles(styles)?;
    let bad = || Error::format(text, target);
    let mut s = strip_white(text, styles);

    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        return Ok(Literal { integral: s.to_string(), hex: true, ..Literal::default() });
    }

    let mut sign = None;
    let mut parenthesized = false;

    if styles.contains(NumberStyles::ALLOW_CURRENCY_SYMBOL) {
        if let Some(rest) = s.strip_prefix(culture.currency_symbol) {
            s = rest.trim_start();
        }
    }
    if styles.contains(NumberStyles::ALLOW_PARENTHESES) {
        if let Some(inner) = s.strip_prefix('(') {
            s = inner.strip_suffix(')').ok_or_else(bad)?;
            parenthesized = true;
        }
    }
    if styles.contains(NumberStyles::ALLOW_LEADING_SIGN) {
        let (found, rest) = take_sign(s, culture, true);
        sign = found;
        s = rest;
    }
    if styles.contains(NumberStyles::ALLOW_CURRENCY_SYMBOL) {
        if let Some(rest) = s.strip_prefix(culture.currency_symbol) {
            s = rest;
        }
        if let Some(rest) = s.strip_suffix(culture.currency_symbol) {
            s = rest.trim_end();
        }
    }
    if styles.contains(NumberStyles::ALLOW_TRAILING_SIGN) && sign.is_none() {
        let (found, rest) = take_sign(s, culture, false);
        sign = found;
        s = rest;
    }
    if parenthesized && sign.is_some() {
        return Err(bad());
    }

    let mut literal = Literal {
        negative: parenthesized || sign == Some(true),
        ..Literal::default()
    };

    let allow_thousands = styles.contains(NumberStyles::ALLOW_THOUSANDS);
    let allow_point = styles.contains(NumberStyles::ALLOW_DECIMAL_POINT);
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            literal.integral.push(c);
            rest = &rest[1..];
        } else if allow_thousands && !literal.integral.is_empty() && rest.starts_with(culture.group_separator) {
            rest = &rest[culture.group_separator.len()..];
        } else {
            break;
        }
    }
    if allow_point {
        if let Some(after) = rest.strip_prefix(culture.decimal_separator) {
            rest = after;
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            literal.fraction = rest[..end].to_string();
            rest = &rest[end..];
        }
    }
    if literal.integral.is_empty() && literal.fraction.is_empty() {
        return Err(bad());
    }
    if styles.contains(NumberStyles::ALLOW_EXPONENT) {
        if let Some(after) = rest.strip_prefix(['e', 'E']) {
            let (negative_exp, digits) = match after.strip_prefix('-') {
                Some(d) => (true, d),
                None => (false, after.strip_prefix('+').unwrap_or(after)),
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(bad());
            }
            // Absurd exponents saturate; shifting decides overflow vs zero.
            let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX / 2).min(i64::MAX / 2);
            literal.exponent = if negative_exp { -magnitude } else { magnitude };
            rest = "";
        }
    }
    if !rest.is_empty() {
        return Err(bad());
    }
    Ok(literal)
}

/// Parses an integer literal into an `i128` checked against `[min, max]`.
///
/// Hex literals are bit patterns of `bits` width, so `FF` is `-1` for `i8`.
fn parse_integer(
    text: &str,
    styles: NumberStyles,
    culture: &Culture,
    target: TypeTag,
    bits: u32,
    min: i128,
    max: i128,
) -> Result<i128> {
    let literal = normalize(text, styles, culture, &target)?;
    let overflow = || Error::overflow(text, &target);

    if literal.hex {
        let digits = literal.integral.trim_start_matches('0');
        if digits.len() > (bits as usize) / 4 {
            return Err(overflow());
        }
        let raw = if digits.is_empty() { 0 } else { u128::from_str_radix(digits, 16).map_err(|_| overflow())? };
        let value = if min < 0 && raw >= 1u128 << (bits - 1) {
            raw as i128 - (1i128 << bits)
        } else {
            raw as i128
        };
        return Ok(value);
    }

    let (integral, fraction) = literal.shifted(39).ok_or_else(overflow)?;
    if fraction.chars().any(|c| c != '0') {
        return Err(overflow());
    }
    let magnitude = if integral.is_empty() {
        0
    } else {
        integral.parse::<i128>().map_err(|_| overflow())?
    };
    let value = if literal.negative { -magnitude } else { magnitude };
    if value < min || value > max {
        return Err(overflow());
    }
    Ok(value)
}

macro_rules! parse_int {
    ($($t:ty => $tag:ident),+) => {
        $(
            impl Parse for $t {
                const DEFAULT_STYLES: NumberStyles = NumberStyles::INTEGER;

                fn parse_text(text: &str, styles: NumberStyles, culture: &Culture) -> Result<Self> {
                    let value = parse_integer(
                        text,
                        styles,
                        culture,
                        TypeTag::$tag,
                        <$t>::BITS,
                        <$t>::MIN as i128,
                        <$t>::MAX as i128,
                    )?;
                    <$t>::try_from(value).map_err(|_| Error::overflow(text, TypeTag::$tag))
                }
            }
        )+
    };
}

parse_int!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64
);

/// Recognizes `NaN`, `Infinity` and `∞` with an optional culture sign.
fn special_float(text: &str, culture: &Culture) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix(culture.negative_sign) {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix(culture.positive_sign).unwrap_or(trimmed)),
    };
    let value = if body.eq_ignore_ascii_case("nan") {
        f64::NAN
    } else if body.eq_ignore_ascii_case("infinity") || body == "\u{221e}" {
        f64::INFINITY
    } else {
        return None;
    };
    Some(if negative { -value } else { value })
}

fn canonical_float(literal: &Literal) -> String {
    let integral = if literal.integral.is_empty() { "0" } else { &literal.integral };
    let fraction = if literal.fraction.is_empty() { "0" } else { &literal.fraction };
    let sign = if literal.negative { "-" } else { "" };
    format!("{sign}{integral}.{fraction}e{}", literal.exponent)
}

macro_rules! parse_float {
    ($($t:ty => $tag:ident),+) => {
        $(
            impl Parse for $t {
                const DEFAULT_STYLES: NumberStyles = NumberStyles::FLOAT.union(NumberStyles::ALLOW_THOUSANDS);

                fn parse_text(text: &str, styles: NumberStyles, culture: &Culture) -> Result<Self> {
                    if let Some(special) = special_float(text, culture) {
                        return Ok(special as $t);
                    }
                    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
                        return Err(Error::InvalidArgument(
                            "hexadecimal styles are not supported for floating-point targets".to_string(),
                        ));
                    }
                    let literal = normalize(text, styles, culture, &TypeTag::$tag)?;
                    let value = <$t>::from_str(&canonical_float(&literal))
                        .map_err(|_| Error::format(text, TypeTag::$tag))?;
                    if value.is_infinite() {
                        return Err(Error::overflow(text, TypeTag::$tag));
                    }
                    Ok(value)
                }
            }
        )+
    };
}

parse_float!(f32 => F32, f64 => F64);

impl Parse for Decimal {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::NUMBER;

    fn parse_text(text: &str, styles: NumberStyles, culture: &Culture) -> Result<Self> {
        if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
            return Err(Error::InvalidArgument(
                "hexadecimal styles are not supported for decimal targets".to_string(),
            ));
        }
        let literal = normalize(text, styles, culture, &TypeTag::Decimal)?;
        let overflow = || Error::overflow(text, TypeTag::Decimal);
        let (integral, fraction) = literal
            .shifted(DECIMAL_MAX_DIGITS.len())
            .ok_or_else(overflow)?;
        let integral = integral.trim_start_matches('0');
        if integral.len() == DECIMAL_MAX_DIGITS.len() && integral > DECIMAL_MAX_DIGITS {
            return Err(overflow());
        }
        let scale = DECIMAL_MAX_SCALE.saturating_sub(integral.len()).min(fraction.len());
        let integral = if integral.is_empty() { "0" } else { integral };
        let sign = if literal.negative { "-" } else { "" };
        let canonical = if scale == 0 {
            format!("{sign}{integral}")
        } else {
            format!("{sign}{integral}.{}", &fraction[..scale])
        };
        let kept = Decimal::from_str(&canonical).map_err(|_| overflow())?;

        let last_kept = canonical.chars().last().unwrap_or('0');
        if !rounds_up(&fraction[scale..], last_kept) {
            return Ok(kept);
        }
        let unit = Decimal::new(if literal.negative { -1 } else { 1 }, scale as u32);
        kept.checked_add(unit).ok_or_else(overflow)
    }
}

/// Half-to-even decision for digits dropped past the last kept one.
fn rounds_up(dropped: &str, last_kept: char) -> bool {
    let mut digits = dropped.chars();
    match digits.next() {
        Some('6'..='9') => true,
        Some('5') => digits.any(|c| c != '0') || matches!(last_kept, '1' | '3' | '5' | '7' | '9'),
        _ => false,
    }
}

impl Parse for bool {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::empty();

    fn parse_text(text: &str, _styles: NumberStyles, _culture: &Culture) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::format(text, TypeTag::Bool))
        }
    }
}

impl Parse for String {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::empty();

    fn parse_text(text: &str, _styles: NumberStyles, _culture: &Culture) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl Parse for Uuid {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::empty();

    fn parse_text(text: &str, _styles: NumberStyles, _culture: &Culture) -> Result<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(trimmed);
        Uuid::parse_str(inner).map_err(|_| Error::format(text, TypeTag::Guid))
    }
}

const ISO_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn culture_date_formats(order: DateOrder) -> &'static [&'static str] {
    match order {
        DateOrder::MonthDayYear => &["%m/%d/%Y", "%m-%d-%Y"],
        DateOrder::DayMonthYear => &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"],
        DateOrder::YearMonthDay => &["%Y/%m/%d", "%Y.%m.%d"],
    }
}

const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S%.f", " %H:%M", " %I:%M:%S %p", " %I:%M %p"];

impl Parse for NaiveDateTime {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::empty();

    fn parse_text(text: &str, _styles: NumberStyles, culture: &Culture) -> Result<Self> {
        let trimmed = text.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(with_offset.naive_utc());
        }
        for format in ISO_DATE_TIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(parsed);
            }
        }
        let date_formats = std::iter::once("%Y-%m-%d").chain(culture_date_formats(culture.date_order).iter().copied());
        for date_format in date_formats {
            if let Some(midnight) = NaiveDate::parse_from_str(trimmed, date_format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
            {
                return Ok(midnight);
            }
            for suffix in TIME_SUFFIXES {
                let format = format!("{date_format}{suffix}");
                if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, &format) {
                    return Ok(parsed);
                }
            }
        }
        Err(Error::format(text, TypeTag::DateTime))
    }
}

impl Parse for TimeDelta {
    const DEFAULT_STYLES: NumberStyles = NumberStyles::empty();

    /// Accepts `[-]d` (whole days) or `[-][d.]hh:mm[:ss[.fffffff]]`.
    fn parse_text(text: &str, _styles: NumberStyles, _culture: &Culture) -> Result<Self> {
        let trimmed = text.trim();
        let overflow = || Error::overflow(text, TypeTag::TimeSpan);
        let number = |s: &str| s.parse::<i64>().map_err(|_| overflow());

        let (negative, days_only) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if !days_only.is_empty() && days_only.chars().all(|c| c.is_ascii_digit()) {
            let span = TimeDelta::try_days(number(days_only)?).ok_or_else(overflow)?;
            return Ok(if negative { -span } else { span });
        }

        let caps = time_span_re()
            .captures(trimmed)
            .ok_or_else(|| Error::format(text, TypeTag::TimeSpan))?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or("0");
        let days = number(field("days"))?;
        let hours = number(field("hours"))?;
        let minutes = number(field("minutes"))?;
        let seconds = number(field("seconds"))?;
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(overflow());
        }
        let ticks = match caps.name("fraction") {
            Some(m) => format!("{:0<7}", m.as_str()).parse::<i64>().map_err(|_| overflow())?,
            None => 0,
        };

        let span = TimeDelta::try_days(days)
            .and_then(|d| d.checked_add(&TimeDelta::try_hours(hours)?))
            .and_then(|d| d.checked_add(&TimeDelta::try_minutes(minutes)?))
            .and_then(|d| d.checked_add(&TimeDelta::try_seconds(seconds)?))
            .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(ticks * 100)))
            .ok_or_else(overflow)?;
        Ok(if caps.name("neg").is_some() { -span } else { span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant() -> Culture {
        Culture::invariant()
    }

    #[test]
    fn integers_accept_whitespace_and_sign() {
        assert_eq!(i32::parse_text("  -42 ", NumberStyles::INTEGER, &invariant()).unwrap(), -42);
        assert_eq!(i32::parse_text("+7", NumberStyles::INTEGER, &invariant()).unwrap(), 7);
    }

    #[test]
    fn integers_distinguish_format_from_overflow() {
        let err = i32::parse_text("12a", NumberStyles::INTEGER, &invariant()).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        let err = i32::parse_text("2147483648", NumberStyles::INTEGER, &invariant()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
        let err = u8::parse_text("-1", NumberStyles::INTEGER, &invariant()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
        let err = i64::parse_text("99999999999999999999999999999999999999999999", NumberStyles::INTEGER, &invariant())
            .unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
    }

    #[test]
    fn thousands_and_parentheses_follow_culture() {
        let pt = Culture::from_name("pt-BR").unwrap();
        let styles = NumberStyles::NUMBER | NumberStyles::ALLOW_PARENTHESES;
        assert_eq!(i32::parse_text("1.234.567", styles, &pt).unwrap(), 1_234_567);
        assert_eq!(i32::parse_text("(1.000)", styles, &pt).unwrap(), -1000);
        assert_eq!(i32::parse_text("1.000,00", styles, &pt).unwrap(), 1000);
        let err = i32::parse_text("1.000,50", styles, &pt).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
    }

    #[test]
    fn trailing_sign_is_opt_in() {
        assert_eq!(i32::parse_text("15-", NumberStyles::NUMBER, &invariant()).unwrap(), -15);
        assert!(i32::parse_text("15-", NumberStyles::INTEGER, &invariant()).is_err());
    }

    #[test]
    fn hex_literals_are_bit_patterns() {
        assert_eq!(i32::parse_text("FFFFFFFF", NumberStyles::HEX_NUMBER, &invariant()).unwrap(), -1);
        assert_eq!(u8::parse_text("ff", NumberStyles::HEX_NUMBER, &invariant()).unwrap(), 255);
        let err = u8::parse_text("100", NumberStyles::HEX_NUMBER, &invariant()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
        let err = i32::parse_text("10", NumberStyles::HEX_NUMBER | NumberStyles::ALLOW_LEADING_SIGN, &invariant())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn exponents_shift_integers() {
        assert_eq!(i32::parse_text("1.5e3", NumberStyles::FLOAT, &invariant()).unwrap(), 1500);
        assert_eq!(i64::parse_text("25e-1", NumberStyles::FLOAT, &invariant()).unwrap_err().to_string(),
            Error::overflow("25e-1", TypeTag::I64).to_string());
    }

    #[test]
    fn floats_respect_culture_and_overflow() {
        let de = Culture::from_name("de-DE").unwrap();
        assert_eq!(f64::parse_text("1.234,5", f64::DEFAULT_STYLES, &de).unwrap(), 1234.5);
        assert_eq!(f32::parse_text("-0.25", f32::DEFAULT_STYLES, &invariant()).unwrap(), -0.25);
        assert!(f64::parse_text("NaN", f64::DEFAULT_STYLES, &invariant()).unwrap().is_nan());
        assert_eq!(f64::parse_text("-Infinity", f64::DEFAULT_STYLES, &invariant()).unwrap(), f64::NEG_INFINITY);
        let err = f32::parse_text("1e39", f32::DEFAULT_STYLES, &invariant()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
    }

    #[test]
    fn decimals_keep_precision_and_detect_overflow() {
        let d = Decimal::parse_text("12345.6789", Decimal::DEFAULT_STYLES, &invariant()).unwrap();
        assert_eq!(d.to_string(), "12345.6789");
        assert!(Decimal::parse_text(DECIMAL_MAX_DIGITS, Decimal::DEFAULT_STYLES, &invariant()).is_ok());
        let err = Decimal::parse_text("79228162514264337593543950336", Decimal::DEFAULT_STYLES, &invariant())
            .unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
    }

    #[test]
    fn decimals_round_excess_digits_half_to_even() {
        let parse = |text: &str| {
            Decimal::parse_text(text, Decimal::DEFAULT_STYLES, &invariant()).unwrap().to_string()
        };
        assert_eq!(parse("0.12345678901234567890123456789"), "0.1234567890123456789012345679");
        assert_eq!(parse("-0.12345678901234567890123456789"), "-0.1234567890123456789012345679");
        assert_eq!(parse("0.00000000000000000000000000005"), "0.0000000000000000000000000000");
        assert_eq!(parse("0.00000000000000000000000000015"), "0.0000000000000000000000000002");
        assert_eq!(parse("0.000000000000000000000000000051"), "0.0000000000000000000000000001");
        assert_eq!(parse("1.99999999999999999999999999999"), "2.000000000000000000000000000");
        assert_eq!(parse("79228162514264337593543950335.4"), DECIMAL_MAX_DIGITS);
        let err = Decimal::parse_text("79228162514264337593543950335.5", Decimal::DEFAULT_STYLES, &invariant())
            .unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
    }

    #[test]
    fn time_spans_reject_non_ascii_digits() {
        let err = TimeDelta::parse_text("\u{661}:\u{660}\u{660}", TimeDelta::DEFAULT_STYLES, &invariant())
            .unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn booleans_and_guids() {
        assert!(bool::parse_text(" TRUE ", bool::DEFAULT_STYLES, &invariant()).unwrap());
        assert!(bool::parse_text("1", bool::DEFAULT_STYLES, &invariant()).is_err());
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let braced = format!("{{{id}}}");
        assert_eq!(
            Uuid::parse_text(&braced, Uuid::DEFAULT_STYLES, &invariant()).unwrap().to_string(),
            id
        );
        assert!(Uuid::parse_text("not-a-guid", Uuid::DEFAULT_STYLES, &invariant()).is_err());
    }

    #[test]
    fn dates_follow_culture_order() {
        let us = Culture::from_name("en-US").unwrap();
        let br = Culture::from_name("pt-BR").unwrap();
        let us_date = NaiveDateTime::parse_text("03/04/2024", NumberStyles::empty(), &us).unwrap();
        let br_date = NaiveDateTime::parse_text("03/04/2024", NumberStyles::empty(), &br).unwrap();
        assert_eq!(us_date.format("%Y-%m-%d").to_string(), "2024-03-04");
        assert_eq!(br_date.format("%Y-%m-%d").to_string(), "2024-04-03");
        let iso = NaiveDateTime::parse_text("2024-01-02T03:04:05", NumberStyles::empty(), &us).unwrap();
        assert_eq!(iso.to_string(), "2024-01-02 03:04:05");
        assert!(NaiveDateTime::parse_text("2024-13-01", NumberStyles::empty(), &us).is_err());
    }

    #[test]
    fn time_spans_parse_days_and_ticks() {
        let span = TimeDelta::parse_text("1.02:03:04.5", NumberStyles::empty(), &invariant()).unwrap();
        assert_eq!(span, TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(3)
            + TimeDelta::seconds(4) + TimeDelta::milliseconds(500));
        assert_eq!(TimeDelta::parse_text("-3", NumberStyles::empty(), &invariant()).unwrap(), -TimeDelta::days(3));
        let err = TimeDelta::parse_text("00:60:00", NumberStyles::empty(), &invariant()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
        let err = TimeDelta::parse_text("ten minutes", NumberStyles::empty(), &invariant()).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }
}
