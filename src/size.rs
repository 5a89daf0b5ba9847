//! Length values with units.
//!
//! A [`Size`] stores its magnitude in inches together with the resolution
//! (pixels per inch) used whenever the value is converted to or from
//! device pixels. Every public size parameter in this crate accepts
//! anything implementing [`IntoSize`]: bare numbers are inches, strings may
//! carry one of the `pt`, `in`, `cm`, `mm` or `px` suffixes.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::SizeError;

pub const MM_PER_INCH: f64 = 25.4;
pub const PT_PER_INCH: f64 = 72.0;

/// Resolution used when none is given explicitly.
pub const DEFAULT_DPI: f64 = 96.0;

/// Length units understood by [`Size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Pt,
    In,
    Cm,
    Mm,
    Px,
}

impl Unit {
    /// All known units, in suffix-matching order.
    pub const ALL: [Unit; 5] = [Unit::Pt, Unit::In, Unit::Cm, Unit::Mm, Unit::Px];

    /// The textual suffix of this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Px => "px",
        }
    }

    /// Split a trailing unit suffix off `text`, if there is one.
    fn split_suffix(text: &str) -> Option<(&str, Unit)> {
        Unit::ALL
            .iter()
            .find_map(|unit| text.strip_suffix(unit.suffix()).map(|number| (number, *unit)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.suffix() == s)
            .ok_or_else(|| SizeError::invalid(s, (0, s.len()), format!("unknown unit `{s}`")))
    }
}

/// A length, stored in inches, with the resolution used for pixel
/// conversions.
///
/// Equality and ordering only look at the length; the resolution is
/// carried along for pixel conversions. Arithmetic keeps the resolution of
/// the `Size` operand (the left one when both are sizes).
#[derive(Clone, Copy, Debug)]
pub struct Size {
    value: f64,
    dpi: f64,
}

impl Default for Size {
    fn default() -> Self {
        Size::ZERO
    }
}

impl Size {
    pub const ZERO: Size = Size::inches(0.0);

    /// Create a Size from inches (const-friendly, unchecked).
    /// Use [`Size::new`] for user-provided values.
    #[inline]
    pub const fn inches(value: f64) -> Size {
        Size {
            value,
            dpi: DEFAULT_DPI,
        }
    }

    /// Create a Size from points (const-friendly, unchecked).
    #[inline]
    pub const fn points(value: f64) -> Size {
        Size::inches(value / PT_PER_INCH)
    }

    /// Build a size from a number (inches), a unit string or another size.
    pub fn new(value: impl IntoSize) -> Result<Size, SizeError> {
        value.into_size(None)
    }

    /// Same as [`Size::new`] but with an explicit resolution. When `value`
    /// is already a `Size` only its resolution is replaced.
    pub fn new_with_dpi(value: impl IntoSize, dpi: f64) -> Result<Size, SizeError> {
        value.into_size(Some(dpi))
    }

    /// Parse a number with an optional unit suffix, e.g. `"12pt"` or `"2"`.
    pub fn parse(text: &str) -> Result<Size, SizeError> {
        Size::parse_with_dpi(text, DEFAULT_DPI)
    }

    /// Parse a number with an optional unit suffix using the given
    /// resolution for `px` values.
    pub fn parse_with_dpi(text: &str, dpi: f64) -> Result<Size, SizeError> {
        let dpi = check_dpi(dpi)?;
        let leading = text.len() - text.trim_start().len();
        let trimmed = text.trim();

        let (number, unit) = Unit::split_suffix(trimmed).unwrap_or((trimmed, Unit::In));
        let magnitude = match number.trim().parse::<f64>() {
            Ok(magnitude) => magnitude,
            Err(_) => return Err(parse_failure(text, leading, trimmed)),
        };

        let value = match unit {
            Unit::Pt => magnitude / PT_PER_INCH,
            Unit::In => magnitude,
            Unit::Cm => magnitude / (MM_PER_INCH / 10.0),
            Unit::Mm => magnitude / MM_PER_INCH,
            Unit::Px => magnitude / dpi,
        };
        Size::checked(value, dpi)
    }

    fn checked(value: f64, dpi: f64) -> Result<Size, SizeError> {
        if value.is_finite() {
            Ok(Size { value, dpi })
        } else {
            Err(SizeError::NonFinite { value })
        }
    }

    /// Copy of this size with a different resolution.
    pub fn to_dpi(self, dpi: f64) -> Size {
        Size { dpi, ..self }
    }

    /// Resolution in pixels per inch.
    #[inline]
    pub fn dpi(self) -> f64 {
        self.dpi
    }

    /// Size in inches.
    #[inline]
    pub fn in_inches(self) -> f64 {
        self.value
    }

    /// Size in points.
    #[inline]
    pub fn pt(self) -> f64 {
        self.value * PT_PER_INCH
    }

    /// Size in millimeters.
    #[inline]
    pub fn mm(self) -> f64 {
        self.value * MM_PER_INCH
    }

    /// Size in centimeters.
    #[inline]
    pub fn cm(self) -> f64 {
        self.value * MM_PER_INCH / 10.0
    }

    /// Size in whole pixels, rounding half to even.
    #[inline]
    pub fn px(self) -> i64 {
        (self.value * self.dpi).round_ties_even() as i64
    }

    /// Size in fractional pixels.
    #[inline]
    pub fn pxf(self) -> f64 {
        self.value * self.dpi
    }

    /// Format for display in the given unit, e.g. `"25.4mm"`.
    pub fn format(self, unit: Unit) -> String {
        let number = match unit {
            Unit::In => fmt_g(self.value),
            Unit::Pt => fmt_g(self.value * PT_PER_INCH),
            Unit::Cm => fmt_g(self.value * MM_PER_INCH / 10.0),
            Unit::Mm => fmt_g(self.value * MM_PER_INCH),
            Unit::Px => fmt_g(self.px() as f64),
        };
        format!("{number}{unit}")
    }

    /// Convert `other` using this size's resolution.
    pub fn coerce(self, other: impl IntoSize) -> Result<Size, SizeError> {
        other.into_size(Some(self.dpi))
    }

    /// Add anything convertible to a size; strings are parsed with this
    /// size's resolution.
    pub fn checked_add(self, other: impl IntoSize) -> Result<Size, SizeError> {
        Ok(self + self.coerce(other)?)
    }

    /// Subtract anything convertible to a size.
    pub fn checked_sub(self, other: impl IntoSize) -> Result<Size, SizeError> {
        Ok(self - self.coerce(other)?)
    }

    /// Floor division by a factor.
    pub fn floor_div(self, rhs: f64) -> Size {
        Size {
            value: (self.value / rhs).floor(),
            dpi: self.dpi,
        }
    }

    /// The larger of two sizes; `self` wins ties.
    pub fn max(self, other: Size) -> Size {
        if other > self { other } else { self }
    }

    /// The smaller of two sizes; `self` wins ties.
    pub fn min(self, other: Size) -> Size {
        if other < self { other } else { self }
    }

    /// Whether the length is exactly zero.
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }
}

fn check_dpi(dpi: f64) -> Result<f64, SizeError> {
    if dpi.is_finite() && dpi > 0.0 {
        Ok(dpi)
    } else {
        Err(SizeError::InvalidDpi { dpi })
    }
}

/// Build the error for a string that did not parse, pointing at an
/// unrecognized suffix when the rest is a valid number.
fn parse_failure(text: &str, leading: usize, trimmed: &str) -> SizeError {
    let stem = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if stem.len() < trimmed.len() && stem.trim().parse::<f64>().is_ok() {
        let suffix = &trimmed[stem.len()..];
        SizeError::invalid(
            text,
            (leading + stem.len(), suffix.len()),
            format!("unrecognized unit suffix `{suffix}`"),
        )
    } else {
        SizeError::invalid(text, (leading, trimmed.len()), "malformed number")
    }
}

/// Format a number like C's `%g`: six significant digits, trailing zeros
/// trimmed, exponent form outside `1e-4 ..= 1e6`.
pub(crate) fn fmt_g(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Let the formatter do the rounding, then read back the exponent.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Python-style representation, e.g. `"2.0in"`.
impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}in", self.value)
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::parse(s)
    }
}

impl From<f64> for Size {
    fn from(value: f64) -> Self {
        Size::inches(value)
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Size) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Size) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl PartialEq<f64> for Size {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl PartialOrd<f64> for Size {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

impl Add for Size {
    type Output = Size;
    fn add(self, rhs: Size) -> Size {
        Size { value: self.value + rhs.value, dpi: self.dpi }
    }
}

impl Sub for Size {
    type Output = Size;
    fn sub(self, rhs: Size) -> Size {
        Size { value: self.value - rhs.value, dpi: self.dpi }
    }
}

impl Add<f64> for Size {
    type Output = Size;
    fn add(self, rhs: f64) -> Size {
        Size { value: self.value + rhs, dpi: self.dpi }
    }
}

impl Sub<f64> for Size {
    type Output = Size;
    fn sub(self, rhs: f64) -> Size {
        Size { value: self.value - rhs, dpi: self.dpi }
    }
}

impl Add<Size> for f64 {
    type Output = Size;
    fn add(self, rhs: Size) -> Size {
        Size { value: self + rhs.value, dpi: rhs.dpi }
    }
}

impl Sub<Size> for f64 {
    type Output = Size;
    fn sub(self, rhs: Size) -> Size {
        Size { value: self - rhs.value, dpi: rhs.dpi }
    }
}

impl Mul<f64> for Size {
    type Output = Size;
    fn mul(self, rhs: f64) -> Size {
        Size { value: self.value * rhs, dpi: self.dpi }
    }
}

impl Mul<Size> for f64 {
    type Output = Size;
    fn mul(self, rhs: Size) -> Size {
        Size { value: rhs.value * self, dpi: rhs.dpi }
    }
}

impl Div<f64> for Size {
    type Output = Size;
    fn div(self, rhs: f64) -> Size {
        Size { value: self.value / rhs, dpi: self.dpi }
    }
}

impl Neg for Size {
    type Output = Size;
    fn neg(self) -> Size {
        Size { value: -self.value, dpi: self.dpi }
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        self.value += rhs.value;
    }
}

impl SubAssign for Size {
    fn sub_assign(&mut self, rhs: Size) {
        self.value -= rhs.value;
    }
}

// ============================================================================
// Conversions into Size
// ============================================================================

/// Anything that can be turned into a [`Size`].
///
/// `dpi` overrides the resolution of the result; without it numbers and
/// strings get [`DEFAULT_DPI`] and sizes keep their own.
pub trait IntoSize {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError>;
}

impl IntoSize for Size {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
        match dpi {
            Some(dpi) => Ok(self.to_dpi(check_dpi(dpi)?)),
            None => Ok(self),
        }
    }
}

impl IntoSize for &Size {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
        (*self).into_size(dpi)
    }
}

impl IntoSize for &str {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
        Size::parse_with_dpi(self, dpi.unwrap_or(DEFAULT_DPI))
    }
}

impl IntoSize for String {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
        self.as_str().into_size(dpi)
    }
}

impl IntoSize for &String {
    fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
        self.as_str().into_size(dpi)
    }
}

macro_rules! numeric_into_size {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoSize for $ty {
                fn into_size(self, dpi: Option<f64>) -> Result<Size, SizeError> {
                    let dpi = check_dpi(dpi.unwrap_or(DEFAULT_DPI))?;
                    Size::checked(self as f64, dpi)
                }
            }
        )*
    };
}

numeric_into_size!(f64, f32, i32, i64, u32, u64, usize);

// ============================================================================
// Restricted string parsing
// ============================================================================

/// String-to-size converter with unit restrictions, for option parsing.
///
/// Bare numbers get `default_unit`. When `accepted` is non-empty the unit
/// must be one of them; a unit listed in `rejected` is refused.
#[derive(Clone, Debug)]
pub struct SizeParser {
    pub default_unit: Unit,
    pub accepted: Vec<Unit>,
    pub rejected: Vec<Unit>,
}

impl Default for SizeParser {
    fn default() -> Self {
        SizeParser::new(Unit::In)
    }
}

impl SizeParser {
    pub fn new(default_unit: Unit) -> Self {
        SizeParser {
            default_unit,
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn with_accepted(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.accepted = units.into_iter().collect();
        self
    }

    pub fn with_rejected(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.rejected = units.into_iter().collect();
        self
    }

    pub fn parse(&self, text: &str) -> Result<Size, SizeError> {
        let trimmed = text.trim();
        let value = if trimmed.parse::<f64>().is_ok() {
            format!("{trimmed}{}", self.default_unit)
        } else {
            trimmed.to_string()
        };

        let Some((_, unit)) = Unit::split_suffix(&value) else {
            return Err(SizeError::invalid(
                &value,
                (0, value.len()),
                "does not contain a valid unit",
            ));
        };
        let unit_span = (value.len() - unit.suffix().len(), unit.suffix().len());

        if !self.accepted.is_empty() && !self.accepted.contains(&unit) {
            return Err(SizeError::invalid(&value, unit_span, format!("unit `{unit}` is not accepted")));
        }
        if self.rejected.contains(&unit) {
            return Err(SizeError::invalid(&value, unit_span, format!("unit `{unit}` is rejected")));
        }

        Size::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn construct_from_numbers() {
        assert_eq!(Size::default().in_inches(), 0.0);
        assert_eq!(Size::new(1).unwrap().in_inches(), 1.0);
        assert_eq!(Size::new(1.0).unwrap().in_inches(), 1.0);
        assert_eq!(Size::new(1.0).unwrap().dpi(), DEFAULT_DPI);
    }

    #[test]
    fn construct_from_strings() {
        assert_eq!(Size::parse("1").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse("0.01").unwrap().in_inches(), 0.01);
        assert_eq!(Size::parse("100").unwrap().in_inches(), 100.0);

        assert_eq!(Size::parse("72pt").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse("6.6pt").unwrap().in_inches(), 6.6 / 72.0);
        assert_eq!(Size::parse("2.54cm").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse("2.54mm").unwrap().in_inches(), 0.1);
        assert_eq!(Size::parse("96px").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse(" 2in ").unwrap().in_inches(), 2.0);
    }

    #[test]
    fn px_uses_resolution() {
        assert_eq!(Size::parse_with_dpi("96px", 96.0).unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse_with_dpi("300px", 300.0).unwrap().in_inches(), 1.0);
        assert_eq!(Size::new_with_dpi("1in", 300.0).unwrap().px(), 300);
    }

    #[test]
    fn unknown_suffix_is_an_error() {
        let err = Size::parse("12pf").unwrap_err();
        match err {
            SizeError::InvalidValue { span, reason, .. } => {
                assert_eq!(span.offset(), 2);
                assert_eq!(span.len(), 2);
                assert!(reason.contains("pf"), "reason: {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(Size::parse("").is_err());
        assert!(Size::parse("pt").is_err());
        assert!(Size::parse("1.2.3in").is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(Size::new(f64::NAN), Err(SizeError::NonFinite { .. })));
        assert!(matches!(Size::new(f64::INFINITY), Err(SizeError::NonFinite { .. })));
        assert!(matches!(Size::parse("inf"), Err(SizeError::NonFinite { .. })));
        assert!(matches!(Size::new_with_dpi(1, 0.0), Err(SizeError::InvalidDpi { .. })));
    }

    #[test]
    fn arithmetic() {
        let s1 = Size::parse("144pt").unwrap();
        let s2 = Size::parse("72pt").unwrap();

        assert_eq!((s1 + s2).in_inches(), 3.0);
        assert_eq!((s1 - s2).in_inches(), 1.0);
        assert_eq!((s1 * 3.0).in_inches(), 6.0);
        assert_eq!((3.0 * s1).in_inches(), 6.0);
        assert_eq!((s1 / 4.0).in_inches(), 0.5);
        assert_eq!(s1.floor_div(3.0).in_inches(), 0.0);
        assert_eq!((-s1).in_inches(), -2.0);

        assert_eq!((s1 + 1.0).in_inches(), 3.0);
        assert_eq!((1.0 + s1).in_inches(), 3.0);
        assert_eq!(s1.checked_add("72pt").unwrap().in_inches(), 3.0);
        assert_eq!((s1 - 1.0).in_inches(), 1.0);
        assert_eq!((3.0 - s1).in_inches(), 1.0);
        assert_eq!(s1.checked_sub("72pt").unwrap().in_inches(), 1.0);
        assert!(s1.checked_add("72pf").is_err());

        let mut s3 = s1;
        s3 += s2;
        s3 -= Size::inches(0.5);
        assert_eq!(s3.in_inches(), 2.5);
    }

    #[test]
    fn arithmetic_keeps_resolution() {
        let hi = Size::new_with_dpi(1, 300.0).unwrap();
        let lo = Size::inches(1.0);
        assert_eq!((hi + lo).dpi(), 300.0);
        assert_eq!((lo + hi).dpi(), DEFAULT_DPI);
        assert_eq!((2.0 * hi).dpi(), 300.0);
        assert_eq!(hi.checked_add("300px").unwrap().in_inches(), 2.0);
    }

    #[test]
    fn conversions() {
        let s1 = Size::parse("144pt").unwrap();
        assert_eq!(s1.pt(), 144.0);
        assert_eq!(s1.in_inches(), 2.0);
        assert_close(s1.mm(), 50.8);
        assert_close(s1.cm(), 5.08);
        assert_eq!(s1.px(), 192);
        assert_eq!(s1.pxf(), 192.0);
    }

    #[test]
    fn px_rounds_half_to_even() {
        assert_eq!(Size::new_with_dpi(2.5, 1.0).unwrap().px(), 2);
        assert_eq!(Size::new_with_dpi(3.5, 1.0).unwrap().px(), 4);
        assert_eq!(Size::new_with_dpi(-0.5, 1.0).unwrap().px(), 0);
    }

    #[test]
    fn copy_with_new_resolution() {
        let s1 = Size::parse("144pt").unwrap();
        let s2 = Size::new(s1 * 2.0).unwrap();
        assert_eq!(s2.in_inches(), 4.0);
        let s3 = Size::new_with_dpi(s1, 300.0).unwrap();
        assert_eq!(s3, s1);
        assert_eq!(s3.dpi(), 300.0);
        assert_eq!(s1.to_dpi(72.0).px(), 144);
    }

    #[test]
    fn display() {
        assert_eq!(Size::default().to_string(), "0.0in");
        assert_eq!(Size::inches(2.0).to_string(), "2.0in");
        assert_eq!(Size::parse("1.5in").unwrap().to_string(), "1.5in");
    }

    #[test]
    fn format_in_units() {
        assert_eq!(Size::inches(1.0).format(Unit::In), "1in");
        assert_eq!(Size::parse("2in").unwrap().format(Unit::Pt), "144pt");
        assert_eq!(Size::parse("30mm").unwrap().format(Unit::Cm), "3cm");
        assert_eq!(Size::parse("72pt").unwrap().format(Unit::Mm), "25.4mm");
        assert_eq!(Size::parse("25.4mm").unwrap().format(Unit::Px), "96px");
    }

    #[test]
    fn format_round_trips() {
        for unit in Unit::ALL {
            for x in [0.0, 1.0, 144.0, 0.01] {
                let size = Size::parse(&format!("{x}{unit}")).unwrap();
                let text = size.format(unit);
                let number: f64 = text.strip_suffix(unit.suffix()).unwrap().parse().unwrap();
                let tolerance = if unit == Unit::Px { 0.5 } else { 1e-9 };
                assert!(
                    (number - x).abs() <= tolerance,
                    "{x}{unit} formatted as {text}"
                );
            }
        }
    }

    #[test]
    fn fmt_g_matches_printf() {
        assert_eq!(fmt_g(0.0), "0");
        assert_eq!(fmt_g(1.0), "1");
        assert_eq!(fmt_g(25.4), "25.4");
        assert_eq!(fmt_g(0.01), "0.01");
        assert_eq!(fmt_g(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_g(123456.0), "123456");
        assert_eq!(fmt_g(1234567.0), "1.23457e+06");
        assert_eq!(fmt_g(0.00001), "1e-05");
        assert_eq!(fmt_g(-2.5), "-2.5");
    }

    #[test]
    fn comparisons() {
        let inch = Size::parse("1in").unwrap();
        assert!(inch < Size::parse("73pt").unwrap());
        assert!(inch > Size::parse("71pt").unwrap());
        assert!(inch <= Size::parse("72pt").unwrap());
        assert!(inch >= Size::parse("72pt").unwrap());
        assert!(inch == Size::parse("72pt").unwrap());
        assert!(inch != Size::parse("71pt").unwrap());
        assert!(inch == 1.0);
        assert!(inch < 2.0);
    }

    #[test]
    fn unit_consistency() {
        assert_eq!(Size::parse("72pt").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse("2.54cm").unwrap().in_inches(), 1.0);
        assert_eq!(Size::parse_with_dpi("96px", 96.0).unwrap().in_inches(), 1.0);
    }

    #[test]
    fn parser_default_unit() {
        assert_eq!(SizeParser::default().parse("96").unwrap().in_inches(), 96.0);
        assert_eq!(SizeParser::new(Unit::Px).parse("96").unwrap().px(), 96);
        assert_eq!(SizeParser::new(Unit::In).parse("72pt").unwrap().in_inches(), 1.0);
    }

    #[test]
    fn parser_accepted_units() {
        let parser = SizeParser::default().with_accepted([Unit::Pt, Unit::In]);
        assert_eq!(parser.parse("72pt").unwrap().pt(), 72.0);
        assert_eq!(parser.parse("1").unwrap().in_inches(), 1.0);
        assert_eq!(parser.parse("2in").unwrap().in_inches(), 2.0);
        assert!(parser.parse("96px").is_err());

        // default unit is "in"
        let parser = SizeParser::default().with_accepted([Unit::Mm, Unit::Cm]);
        assert!(parser.parse("1").is_err());
    }

    #[test]
    fn parser_rejected_units() {
        let parser = SizeParser::default().with_rejected([Unit::Pt, Unit::In]);
        assert_eq!(parser.parse("96px").unwrap().px(), 96);
        assert!(parser.parse("1in").is_err());
        assert!(parser.parse("72pt").is_err());
        assert!(parser.parse("2").is_err());
        assert!(parser.parse("2furlongs").is_err());
    }

    #[test]
    fn unit_from_str() {
        assert_eq!("mm".parse::<Unit>().unwrap(), Unit::Mm);
        assert!("em".parse::<Unit>().is_err());
    }
}
