//! Precision-safe currency amounts.
//!
//! The ledger prices assets in e8s, the smallest subdivision of one ICP
//! (10^-8). Display amounts use `rust_decimal` so conversions never pick up
//! floating-point error.

use crate::error::{CoreError, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Number of e8s in one ICP.
pub const E8S_PER_ICP: u64 = 100_000_000;

/// Amount in whole ICP with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icp(pub Decimal);

impl Icp {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Convert from a floating-point amount.
    pub fn from_f64(value: f64) -> Result<Self> {
        Decimal::from_f64(value)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidAmount(format!("{value} is not representable")))
    }
}

impl fmt::Display for Icp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ICP", self.0.normalize())
    }
}

/// Parses `"2.5"`, `"45 ICP"` and `"45icp"`.
impl FromStr for Icp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number = if trimmed.len() >= 3
            && trimmed.is_char_boundary(trimmed.len() - 3)
            && trimmed[trimmed.len() - 3..].eq_ignore_ascii_case("icp")
        {
            trimmed[..trimmed.len() - 3].trim_end()
        } else {
            trimmed
        };
        Ok(Self(Decimal::from_str(number)?))
    }
}

impl From<Decimal> for Icp {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Icp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Amount in e8s, the ledger's smallest currency unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct E8s(pub u64);

impl E8s {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for E8s {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} e8s", self.0)
    }
}

impl From<u64> for E8s {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Convert ICP to e8s.
///
/// Fractional e8s are truncated (floored), never rounded up.
pub fn icp_to_e8s(icp: Icp) -> Result<E8s> {
    if icp.0.is_sign_negative() && !icp.0.is_zero() {
        return Err(CoreError::InvalidAmount(format!(
            "negative amount {}",
            icp.0
        )));
    }

    icp.0
        .checked_mul(Decimal::from(E8S_PER_ICP))
        .and_then(|e8s| e8s.floor().to_u64())
        .map(E8s)
        .ok_or_else(|| CoreError::InvalidAmount(format!("{} ICP overflows e8s", icp.0)))
}

/// Convert e8s to ICP.
pub fn e8s_to_icp(e8s: E8s) -> Icp {
    Icp(Decimal::from(e8s.0) / Decimal::from(E8S_PER_ICP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_icp_to_e8s_exact() {
        assert_eq!(icp_to_e8s(Icp::new(dec!(0.1))).unwrap(), E8s(10_000_000));
        assert_eq!(icp_to_e8s(Icp::new(dec!(2.5))).unwrap(), E8s(250_000_000));
        assert_eq!(icp_to_e8s(Icp::ZERO).unwrap(), E8s::ZERO);
    }

    #[test]
    fn test_icp_to_e8s_floors_sub_unit() {
        assert_eq!(icp_to_e8s(Icp::new(dec!(0.000000009))).unwrap(), E8s(0));
        // 1.999999999 ICP is 199_999_999.9 e8s
        assert_eq!(
            icp_to_e8s(Icp::new(dec!(1.999999999))).unwrap(),
            E8s(199_999_999)
        );
    }

    #[test]
    fn test_icp_to_e8s_rejects_negative() {
        assert!(matches!(
            icp_to_e8s(Icp::new(dec!(-1))),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_icp_to_e8s_rejects_overflow() {
        let huge: Icp = "79228162514264337593543950335".parse().unwrap();
        assert!(matches!(
            icp_to_e8s(huge),
            Err(CoreError::InvalidAmount(_))
        ));

        // fits in Decimal but not in u64
        assert!(matches!(
            icp_to_e8s(Icp::new(dec!(200000000000))),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_icp_from_f64() {
        let icp = Icp::from_f64(0.1).unwrap();
        assert_eq!(icp_to_e8s(icp).unwrap(), E8s(10_000_000));

        let tiny = Icp::from_f64(0.000000009).unwrap();
        assert_eq!(icp_to_e8s(tiny).unwrap(), E8s(0));

        assert!(Icp::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_e8s_to_icp() {
        assert_eq!(e8s_to_icp(E8s(100_000_000)), Icp::new(dec!(1)));
        assert_eq!(e8s_to_icp(E8s(250_000_000)), Icp::new(dec!(2.5)));
    }

    #[test]
    fn test_icp_parse_display_strings() {
        assert_eq!("45 ICP".parse::<Icp>().unwrap(), Icp::new(dec!(45)));
        assert_eq!("2.5".parse::<Icp>().unwrap(), Icp::new(dec!(2.5)));
        assert_eq!(" 8icp ".parse::<Icp>().unwrap(), Icp::new(dec!(8)));
        assert!("free".parse::<Icp>().is_err());
    }

    #[test]
    fn test_icp_display() {
        assert_eq!(Icp::new(dec!(2.50)).to_string(), "2.5 ICP");
    }
}
