//! Quote tick and consolidated quote bar representations.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// A raw bid/ask observation from a data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTick {
    pub time: NaiveDateTime,
    pub bid: Decimal,
    pub ask: Decimal,
}

impl QuoteTick {
    /// Midpoint of bid and ask, the price a consolidated bar is built from.
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}

/// A consolidated bar covering one fixed time bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl QuoteBar {
    /// The bar's representative price.
    pub fn value(&self) -> Decimal {
        self.close
    }
}
