//! Core types: Price, OrderId, instrument/publisher identifiers

use std::fmt;

/// Price in units of 10⁻⁹ of the quote currency.
///
/// `Price(100_500_000_000)` represents 100.5. Using fixed-point avoids
/// floating-point errors in financial calculations; floats never appear
/// outside the I/O boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    /// Sentinel for "no price" (empty price field on the wire).
    pub const UNDEFINED: Price = Price(i64::MIN + 1);

    pub const ZERO: Price = Price(0);

    /// Number of price units per 1.0 of the quote currency.
    pub const SCALE: i64 = 1_000_000_000;

    /// Returns true if this is the "no price" sentinel.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self == Price::UNDEFINED
    }
}

impl fmt::Display for Price {
    /// Fixed-point with exactly nine fractional digits; `UNDEFINED`
    /// renders as the empty string, matching the wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return Ok(());
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:09}",
            sign,
            abs / Price::SCALE as u64,
            abs % Price::SCALE as u64
        )
    }
}

/// Order identifier carried by the feed. Unique per book; the feed's
/// convention makes it unique enough process-wide for trade correlation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instrument identifier assigned by the feed.
pub type InstrumentId = u32;

/// Publisher (venue) identifier assigned by the feed.
pub type PublisherId = u16;

/// Order or level size in shares/contracts.
pub type Size = u32;
