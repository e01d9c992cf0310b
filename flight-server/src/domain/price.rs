//! Fare prices in minor currency units.

use std::fmt;

/// Error returned when parsing or constructing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: {reason}")]
pub struct InvalidPrice {
    reason: &'static str,
}

impl InvalidPrice {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A non-negative fare price, stored in minor currency units (cents).
///
/// Prices are kept as integers so they have a total order and exact
/// arithmetic; the ordered index is keyed by this type. Construction
/// rejects negative, non-finite and out-of-range values, so any `Price`
/// value is valid.
///
/// # Examples
///
/// ```
/// use flight_server::domain::Price;
///
/// let fare = Price::from_major(450.0).unwrap();
/// assert_eq!(fare.as_minor(), 45_000);
/// assert_eq!(fare.to_string(), "450.00");
///
/// assert!(Price::from_major(-1.0).is_err());
/// assert!(Price::from_major(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u32);

impl Price {
    /// Largest representable price in major units.
    const MAX_MAJOR: f64 = (u32::MAX / 100) as f64;

    /// Construct a price from minor currency units (cents).
    pub fn from_minor(minor: u32) -> Self {
        Price(minor)
    }

    /// Construct a price from major currency units (e.g. `450.0` dollars).
    ///
    /// Fractions beyond cents are rounded to the nearest cent.
    pub fn from_major(major: f64) -> Result<Self, InvalidPrice> {
        if !major.is_finite() {
            return Err(InvalidPrice::new("must be a finite number"));
        }
        if major < 0.0 {
            return Err(InvalidPrice::new("must be non-negative"));
        }
        if major > Self::MAX_MAJOR {
            return Err(InvalidPrice::new("exceeds maximum representable price"));
        }

        Ok(Price((major * 100.0).round() as u32))
    }

    /// Parse a price from a decimal string such as `"450"` or `"450.00"`.
    pub fn parse(s: &str) -> Result<Self, InvalidPrice> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidPrice::new("must be a decimal number"))?;
        Self::from_major(value)
    }

    /// Returns the price in minor currency units (cents).
    pub fn as_minor(&self) -> u32 {
        self.0
    }

    /// Absolute difference from another price, in minor units.
    pub fn abs_diff(&self, other: Price) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self)
    }
}
