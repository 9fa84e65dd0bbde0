//! Portfolio state: cash and held quantities.
//!
//! All mutation happens through executed fills; strategy code only reads.

use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: Decimal,
    pub initial_cash: Decimal,
    pub holdings: HashMap<String, Decimal>,
}

impl Portfolio {
    pub fn new(initial_cash: Decimal) -> Self {
        Portfolio {
            cash: initial_cash,
            initial_cash,
            holdings: HashMap::new(),
        }
    }

    /// Held quantity for a symbol, zero when never traded.
    pub fn quantity(&self, symbol: &str) -> Decimal {
        self.holdings.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// True when any holding is non-zero.
    pub fn invested(&self) -> bool {
        self.holdings.values().any(|q| !q.is_zero())
    }

    /// Apply an executed fill: cash moves by the signed notional, the holding
    /// by the signed quantity.
    pub fn apply_fill(&mut self, symbol: &str, quantity: Decimal, price: Decimal) {
        self.cash -= quantity * price;
        let held = self.holdings.entry(symbol.to_string()).or_insert(Decimal::ZERO);
        *held += quantity;
    }

    /// Cash plus the marked value of the symbol's holding.
    pub fn total_value(&self, symbol: &str, price: Decimal) -> Decimal {
        self.cash + self.quantity(symbol) * price
    }
}
