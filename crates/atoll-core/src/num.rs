//! Integer tick/lot numeric types.
//!
//! The simulated exchange quotes prices in whole ticks and volumes in whole
//! lots, so both wrap `i64`. Newtypes keep prices and quantities from being
//! mixed in calculations. Fair-price *estimates* are `rust_decimal::Decimal`
//! and live upstream in the signal crate; conversions between the two worlds
//! go through [`Price::from_decimal`] (truncation, matching the exchange's
//! integer tick grid).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Price in whole ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> i64 {
        self.0
    }

    /// Convert to a decimal estimate.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Truncate a decimal estimate onto the integer tick grid.
    ///
    /// Truncation (not rounding) matches the harness convention for placing
    /// orders at a fractional fair price. Values outside the `i64` range
    /// collapse to zero; callers never produce such estimates from a valid
    /// book.
    #[inline]
    pub fn from_decimal(value: Decimal) -> Self {
        Self(value.trunc().to_i64().unwrap_or(0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Signed quantity in whole lots.
///
/// Positive = buy interest, negative = sell interest. This sign convention
/// runs through the whole system: resting ask volumes arrive negative from
/// the feed, and emitted sell orders carry negative quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qty(pub i64);

impl Qty {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn abs(&self) -> i64 {
        self.0.abs()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_sell(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Qty {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Qty {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Qty {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Qty {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
