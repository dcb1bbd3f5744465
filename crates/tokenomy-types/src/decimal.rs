//! Exact decimal values for money crossing the API boundary
//!
//! Every price, amount and balance is a [`DecimalValue`]: an unbounded
//! integer mantissa with a decimal scale. No binary floating point is
//! involved anywhere, JSON numbers included. They are read from their source
//! text, which `serde_json`'s `arbitrary_precision` feature keeps around.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::MalformedNumber;

/// Largest decimal exponent, either direction, of a non-zero value
///
/// Aligning two values costs memory proportional to the gap between their
/// exponents, so literals beyond this are refused.
pub const MAX_EXPONENT: i64 = 1_000_000;

/// Zeros written out in full by `Display` before it switches to `<digits>e<exp>`
const PLAIN_ZEROS: usize = 32;

/// Significant digits kept by [`DecimalValue::checked_div`]
const DIV_PRECISION: u64 = 100;

/// Exact decimal number
///
/// Equality, ordering and hashing follow the numeric value, so `1.50` and
/// `1.5` are the same value. [`Display`](fmt::Display) keeps the scale of the
/// literal and always parses back to an equal value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecimalValue(BigDecimal);

impl DecimalValue {
    /// Zero
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// One
    pub fn one() -> Self {
        Self(BigDecimal::new(BigInt::from(1u8), 0))
    }

    /// Parse a decimal literal as sent on the wire
    ///
    /// Accepts an optional sign, digits with an optional fraction, and an
    /// optional exponent (`5e-6`). Anything else, including surrounding
    /// whitespace and digit separators, is rejected. Any number of digits is
    /// held exactly; zero is accepted with any exponent.
    pub fn parse(literal: &str) -> Result<Self, MalformedNumber> {
        let parts = Literal::split(literal).ok_or_else(|| MalformedNumber::new(literal))?;

        let mut digits = format!("{}{}", parts.int_part, parts.frac_part);
        let leading = digits.len() - digits.trim_start_matches('0').len();
        digits.replace_range(..leading, "");
        let frac_len = parts.frac_part.len() as i64;

        if digits.is_empty() {
            // Zero keeps a fractional scale ("0.00") but no exponent
            let scale = parse_exponent(parts.exponent)
                .and_then(|exp| frac_len.checked_sub(exp))
                .map_or(0, |scale| scale.clamp(0, MAX_EXPONENT));
            return Ok(Self(BigDecimal::new(BigInt::zero(), scale)));
        }

        let mut scale = parse_exponent(parts.exponent)
            .and_then(|exp| frac_len.checked_sub(exp))
            .ok_or_else(|| MalformedNumber::new(literal))?;

        if scale.abs() > MAX_EXPONENT {
            let significant = digits.trim_end_matches('0').len();
            scale -= (digits.len() - significant) as i64;
            digits.truncate(significant);
            if scale.abs() > MAX_EXPONENT {
                return Err(MalformedNumber::new(literal));
            }
        }

        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| MalformedNumber::new(literal))?;
        if parts.negative {
            mantissa = -mantissa;
        }

        Ok(Self(BigDecimal::new(mantissa, scale)))
    }

    /// The value as a `rust_decimal::Decimal`, when it fits one exactly
    pub fn to_decimal(&self) -> Option<Decimal> {
        let (mut mantissa, scale) = self.0.normalized().into_bigint_and_exponent();

        let scale = if scale < 0 {
            let shift = u32::try_from(-scale).ok().filter(|s| *s <= 28)?;
            mantissa *= BigInt::from(10u8).pow(shift);
            0
        } else {
            u32::try_from(scale).ok()?
        };

        Decimal::try_from_i128_with_scale(mantissa.to_i128()?, scale).ok()
    }

    /// Returns true if the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// Returns true if the value is strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Same value with trailing fractional zeros removed
    pub fn normalize(&self) -> Self {
        Self(self.0.normalized())
    }

    /// Round to `dp` fractional digits, halves to even
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round(i64::from(dp)))
    }

    /// Division, `None` when dividing by zero
    ///
    /// Quotients that do not terminate are rounded to 100 significant digits.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let quotient = &self.0 / &rhs.0;
        Some(Self(quotient.with_prec(DIV_PRECISION)))
    }
}

/// Pieces of a syntactically valid literal
struct Literal<'a> {
    negative: bool,
    int_part: &'a str,
    frac_part: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> Literal<'a> {
    /// `None` unless `s` is `[+-]digits[.digits][(e|E)[+-]digits]`
    fn split(s: &'a str) -> Option<Self> {
        let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
            None => (s, None),
        };

        let negative = mantissa.starts_with('-');
        let unsigned = mantissa.strip_prefix(is_sign).unwrap_or(mantissa);

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };

        if !is_digits(int_part) || !frac_part.map_or(true, is_digits) {
            return None;
        }
        if let Some(exp) = exponent {
            if !is_digits(exp.strip_prefix(is_sign).unwrap_or(exp)) {
                return None;
            }
        }

        Some(Self {
            negative,
            int_part,
            frac_part: frac_part.unwrap_or(""),
            exponent,
        })
    }
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Exponent as an `i64`; `None` when it does not fit
fn parse_exponent(exponent: Option<&str>) -> Option<i64> {
    match exponent {
        None => Some(0),
        Some(exp) => exp.parse().ok(),
    }
}

impl FromStr for DecimalValue {
    type Err = MalformedNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&Value> for DecimalValue {
    type Error = MalformedNumber;

    /// Read a JSON string or number; numbers are taken from their source text
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::parse(&n.to_string()),
            other => Err(MalformedNumber::new(other.to_string())),
        }
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mantissa, scale) = self.0.as_bigint_and_exponent();
        let digits = mantissa.magnitude().to_string();

        let body = match scale.cmp(&0) {
            Ordering::Equal => digits,
            _ if mantissa.is_zero() && scale < 0 => digits,
            Ordering::Less => {
                let zeros = scale.unsigned_abs() as usize;
                if zeros <= PLAIN_ZEROS {
                    format!("{}{}", digits, "0".repeat(zeros))
                } else {
                    format!("{}e{}", digits, zeros)
                }
            }
            Ordering::Greater => {
                let scale = scale as usize;
                if digits.len() > scale {
                    let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                    format!("{}.{}", int_part, frac_part)
                } else if scale - digits.len() <= PLAIN_ZEROS {
                    format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
                } else {
                    format!("{}e-{}", digits, scale)
                }
            }
        };

        f.pad_integral(mantissa.sign() != Sign::Minus, "", &body)
    }
}

impl fmt::Debug for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalValue({})", self)
    }
}

impl Hash for DecimalValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            return BigInt::zero().hash(state);
        }
        let (mantissa, scale) = self.0.normalized().into_bigint_and_exponent();
        mantissa.hash(state);
        scale.hash(state);
    }
}

impl Default for DecimalValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for DecimalValue {
    fn from(value: Decimal) -> Self {
        Self(BigDecimal::new(
            BigInt::from(value.mantissa()),
            i64::from(value.scale()),
        ))
    }
}

impl From<i64> for DecimalValue {
    fn from(value: i64) -> Self {
        Self(BigDecimal::new(BigInt::from(value), 0))
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for DecimalValue {
            type Output = DecimalValue;

            fn $method(self, rhs: DecimalValue) -> DecimalValue {
                DecimalValue($trait::$method(self.0, rhs.0))
            }
        }

        impl<'a> $trait<&'a DecimalValue> for &'a DecimalValue {
            type Output = DecimalValue;

            fn $method(self, rhs: &'a DecimalValue) -> DecimalValue {
                DecimalValue($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for DecimalValue {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for DecimalValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

impl<'a> std::iter::Sum<&'a DecimalValue> for DecimalValue {
    fn sum<I: Iterator<Item = &'a DecimalValue>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| &acc + v)
    }
}

impl Serialize for DecimalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The exchange mixes JSON strings and JSON numbers for the same fields.
/// Going through `Value` lets serde_json hand over a number's original text.
impl<'de> Deserialize<'de> for DecimalValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(_) | Value::Number(_) => {
                DecimalValue::try_from(&value).map_err(de::Error::custom)
            }
            other => Err(de::Error::custom(format!(
                "expected a decimal number or a decimal string, got {}",
                other
            ))),
        }
    }
}
