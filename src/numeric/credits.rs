//! Non-negative decimal with an unbounded exponent.
//!
//! A value is stored as `mantissa × 10^exponent` with the mantissa kept in
//! `[1, 10)` as an exact [`Decimal`]. This keeps 24 fractional mantissa
//! digits of precision at any magnitude, well past the ~10^28 ceiling of a
//! bare `Decimal` and without the drift of `f64` above 10^15.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits retained in a normalised mantissa.
const MANTISSA_DP: u32 = 24;

/// Largest exponent still written as plain digits in the canonical form.
const PLAIN_MAX_EXPONENT: i64 = 20;

/// Exponent gap beyond which the smaller operand of `+`/`-` is negligible.
const ALIGN_LIMIT: i64 = MANTISSA_DP as i64 + 1;

/// Exponent bound accepted by the parser and held by arithmetic results.
pub const MAX_EXPONENT: i64 = i64::MAX / 4;

/// Errors produced when parsing a canonical currency string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCreditsError {
    #[error("empty currency string")]
    Empty,

    #[error("invalid mantissa: {0}")]
    InvalidMantissa(String),

    #[error("invalid exponent: {0}")]
    InvalidExponent(String),

    #[error("currency cannot be negative: {0}")]
    Negative(String),
}

/// Arbitrary-precision, non-negative currency amount.
///
/// Subtraction saturates at zero; division is only offered as
/// [`Credits::checked_div`] so a zero divisor can never yield infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credits {
    mantissa: Decimal,
    exponent: i64,
}

impl Credits {
    pub const ZERO: Credits = Credits {
        mantissa: Decimal::ZERO,
        exponent: 0,
    };

    pub const ONE: Credits = Credits {
        mantissa: Decimal::ONE,
        exponent: 0,
    };

    /// Builds a normalised value from an arbitrary mantissa and exponent.
    fn from_parts(mut mantissa: Decimal, mut exponent: i64) -> Self {
        if mantissa.is_zero() || mantissa.is_sign_negative() {
            return Self::ZERO;
        }
        while mantissa >= Decimal::TEN {
            mantissa /= Decimal::TEN;
            exponent = exponent.saturating_add(1);
        }
        while mantissa < Decimal::ONE {
            mantissa *= Decimal::TEN;
            exponent = exponent.saturating_sub(1);
        }
        mantissa = mantissa.round_dp(MANTISSA_DP);
        if mantissa >= Decimal::TEN {
            mantissa /= Decimal::TEN;
            exponent = exponent.saturating_add(1);
        }
        if exponent < -MAX_EXPONENT {
            return Self::ZERO;
        }
        Self {
            mantissa: mantissa.normalize(),
            exponent: exponent.min(MAX_EXPONENT),
        }
    }

    /// Converts a float, mapping negative, NaN and infinite inputs to zero.
    ///
    /// The mantissa is rounded to 14 decimals so values such as
    /// `1.1400000000000001` land on the decimal the caller meant.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        let exponent = value.log10().floor();
        let scaled = value / 10f64.powf(exponent);
        match Decimal::from_f64(scaled) {
            Some(m) => Self::from_parts(m.round_dp(14), exponent as i64),
            None => Self::ZERO,
        }
    }

    /// Builds `10^log` from a base-10 logarithm.
    pub fn from_log10(log: f64) -> Self {
        if !log.is_finite() {
            return Self::ZERO;
        }
        let exponent = log.floor();
        let mantissa = 10f64.powf(log - exponent);
        match Decimal::from_f64(mantissa) {
            Some(m) => Self::from_parts(m.round_dp(14), exponent as i64),
            None => Self::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Base-10 exponent of the leading digit (0 for zero).
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Normalised mantissa in `[1, 10)` (0 for zero).
    pub fn mantissa(&self) -> Decimal {
        self.mantissa
    }

    /// `self / divisor`, or `None` when the divisor is zero.
    pub fn checked_div(self, divisor: Credits) -> Option<Credits> {
        if divisor.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        let mantissa = self.mantissa.checked_div(divisor.mantissa)?;
        Some(Self::from_parts(mantissa, self.exponent.saturating_sub(divisor.exponent)))
    }

    /// Multiplies by a float factor (negative or non-finite factors give zero).
    pub fn mul_f64(self, factor: f64) -> Credits {
        self * Credits::from_f64(factor)
    }

    /// Raises to a power.
    ///
    /// Non-negative integral exponents use exact square-and-multiply; any
    /// other exponent goes through log space.
    pub fn pow(self, power: f64) -> Credits {
        if power == 0.0 {
            return Self::ONE;
        }
        if self.is_zero() || !power.is_finite() {
            return Self::ZERO;
        }
        if power > 0.0 && power.fract() == 0.0 && power <= 1_048_576.0 {
            let mut n = power as u64;
            let mut base = self;
            let mut acc = Self::ONE;
            while n > 0 {
                if n & 1 == 1 {
                    acc = acc * base;
                }
                n >>= 1;
                if n > 0 {
                    base = base * base;
                }
            }
            return acc;
        }
        match self.log10() {
            Some(log) => Self::from_log10(log * power),
            None => Self::ZERO,
        }
    }

    /// Base-10 logarithm, `None` for zero.
    pub fn log10(&self) -> Option<f64> {
        if self.is_zero() {
            return None;
        }
        self.mantissa
            .to_f64()
            .map(|m| self.exponent as f64 + m.log10())
    }

    /// Rounds down to a whole number.
    pub fn floor(self) -> Credits {
        if self.is_zero() || self.exponent < 0 {
            return Self::ZERO;
        }
        if self.exponent >= MANTISSA_DP as i64 {
            return self;
        }
        let whole = (self.mantissa * pow10(self.exponent as u32)).floor();
        Self::from_parts(whole, 0)
    }

    /// Lossy conversion for bounded quantities and display.
    pub fn to_f64(&self) -> f64 {
        let mantissa = self.mantissa.to_f64().unwrap_or(0.0);
        mantissa * 10f64.powi(self.exponent.clamp(-400, 400) as i32)
    }

    /// Canonical, lossless string form used for persistence.
    ///
    /// Plain digits for exponents in `0..=20`, `<mantissa>e<exponent>`
    /// otherwise.
    pub fn to_canonical_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if (0..=PLAIN_MAX_EXPONENT).contains(&self.exponent) {
            let plain = self.mantissa * pow10(self.exponent as u32);
            return plain.normalize().to_string();
        }
        format!("{}e{}", self.mantissa.normalize(), self.exponent)
    }
}

fn pow10(exp: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(exp), 0)
}

impl Default for Credits {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Credits {
    fn from(value: u64) -> Self {
        Self::from_parts(Decimal::from(value), 0)
    }
}

impl FromStr for Credits {
    type Err = ParseCreditsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCreditsError::Empty);
        }
        let (mantissa_str, exponent) = match s.find(['e', 'E']) {
            Some(idx) => {
                let exp_str = &s[idx + 1..];
                let exp = exp_str
                    .parse::<i64>()
                    .ok()
                    .filter(|e| e.unsigned_abs() <= MAX_EXPONENT as u64)
                    .ok_or_else(|| ParseCreditsError::InvalidExponent(exp_str.to_string()))?;
                (&s[..idx], exp)
            }
            None => (s, 0),
        };
        let mantissa = Decimal::from_str(mantissa_str)
            .map_err(|_| ParseCreditsError::InvalidMantissa(mantissa_str.to_string()))?;
        if mantissa.is_sign_negative() && !mantissa.is_zero() {
            return Err(ParseCreditsError::Negative(s.to_string()));
        }
        Ok(Self::from_parts(mantissa, exponent))
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl Ord for Credits {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .exponent
                .cmp(&other.exponent)
                .then_with(|| self.mantissa.cmp(&other.mantissa)),
        }
    }
}

impl PartialOrd for Credits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Credits {
    type Output = Credits;

    fn add(self, rhs: Credits) -> Credits {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        let (hi, lo) = if self.exponent >= rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let gap = hi.exponent.saturating_sub(lo.exponent);
        if gap > ALIGN_LIMIT {
            return hi;
        }
        let aligned = lo.mantissa * Decimal::new(1, gap as u32);
        Self::from_parts(hi.mantissa + aligned, hi.exponent)
    }
}

impl Sub for Credits {
    type Output = Credits;

    /// Saturating: never goes below zero.
    fn sub(self, rhs: Credits) -> Credits {
        if rhs >= self {
            return Self::ZERO;
        }
        if rhs.is_zero() {
            return self;
        }
        let gap = self.exponent.saturating_sub(rhs.exponent);
        if gap > ALIGN_LIMIT {
            return self;
        }
        let aligned = rhs.mantissa * Decimal::new(1, gap as u32);
        Self::from_parts(self.mantissa - aligned, self.exponent)
    }
}

impl Mul for Credits {
    type Output = Credits;

    fn mul(self, rhs: Credits) -> Credits {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(self.mantissa * rhs.mantissa, self.exponent.saturating_add(rhs.exponent))
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Credits) {
        *self = *self + rhs;
    }
}

impl SubAssign for Credits {
    fn sub_assign(&mut self, rhs: Credits) {
        *self = *self - rhs;
    }
}

impl MulAssign for Credits {
    fn mul_assign(&mut self, rhs: Credits) {
        *self = *self * rhs;
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Self {
        iter.fold(Credits::ZERO, |acc, c| acc + c)
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

struct CreditsVisitor;

impl<'de> Visitor<'de> for CreditsVisitor {
    type Value = Credits;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative decimal string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Credits, E> {
        Credits::from_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Credits, E> {
        Ok(Credits::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Credits, E> {
        if v < 0 {
            return Err(E::custom(ParseCreditsError::Negative(v.to_string())));
        }
        Ok(Credits::from(v as u64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Credits, E> {
        if !v.is_finite() || v < 0.0 {
            return Err(E::custom(ParseCreditsError::InvalidMantissa(v.to_string())));
        }
        Ok(Credits::from_f64(v))
    }
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CreditsVisitor)
    }
}
