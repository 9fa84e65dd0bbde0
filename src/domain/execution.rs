//! Order execution and fill simulation.
//!
//! Market orders fill at the consolidated bar value. Rejections are recorded,
//! never raised: submitting code is fire-and-forget and reads the outcome only
//! through the order log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

use super::portfolio::Portfolio;

/// Venue-level execution parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Maximum gross exposure as a multiple of equity.
    pub leverage: Decimal,
    pub allow_shorting: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            leverage: Decimal::ONE,
            allow_shorting: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    ZeroQuantity,
    ShortingNotAllowed,
    InsufficientBuyingPower,
    /// Set-holdings request against a non-positive price; the target quantity
    /// is undefined.
    Unpriceable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::ZeroQuantity => "zero quantity",
            RejectReason::ShortingNotAllowed => "shorting not allowed",
            RejectReason::InsufficientBuyingPower => "insufficient buying power",
            RejectReason::Unpriceable => "unpriceable at non-positive price",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Filled { fill_price: Decimal },
    Rejected(RejectReason),
}

/// One submitted order and what became of it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub quantity: Decimal,
    pub outcome: OrderOutcome,
}

impl OrderRecord {
    pub fn is_filled(&self) -> bool {
        matches!(self.outcome, OrderOutcome::Filled { .. })
    }
}

/// Submit a signed-quantity market order. On acceptance the fill is applied to
/// the portfolio at the bar value.
pub fn market_order(
    portfolio: &mut Portfolio,
    symbol: &str,
    quantity: Decimal,
    price: Decimal,
    date: NaiveDate,
    config: &ExecutionConfig,
) -> OrderRecord {
    let record = |outcome| OrderRecord {
        date,
        symbol: symbol.to_string(),
        quantity,
        outcome,
    };

    if quantity.is_zero() {
        return record(OrderOutcome::Rejected(RejectReason::ZeroQuantity));
    }

    let held = portfolio.quantity(symbol);
    let new_held = held + quantity;

    if !config.allow_shorting && new_held < Decimal::ZERO && new_held < held {
        return record(OrderOutcome::Rejected(RejectReason::ShortingNotAllowed));
    }

    let cash_after = portfolio.cash - quantity * price;
    let equity_after = cash_after + new_held * price;
    let exposure_after = (new_held * price).abs();

    if exposure_after > equity_after * config.leverage {
        return record(OrderOutcome::Rejected(RejectReason::InsufficientBuyingPower));
    }

    portfolio.apply_fill(symbol, quantity, price);
    record(OrderOutcome::Filled { fill_price: price })
}

/// Submit a "set total holdings to `weight` times portfolio value" request,
/// expressed as the delta market order from the current holding.
pub fn set_holdings(
    portfolio: &mut Portfolio,
    symbol: &str,
    weight: Decimal,
    price: Decimal,
    date: NaiveDate,
    config: &ExecutionConfig,
) -> OrderRecord {
    if price <= Decimal::ZERO {
        return OrderRecord {
            date,
            symbol: symbol.to_string(),
            quantity: Decimal::ZERO,
            outcome: OrderOutcome::Rejected(RejectReason::Unpriceable),
        };
    }

    let target = weight * portfolio.total_value(symbol, price) / price;
    let delta = target - portfolio.quantity(symbol);
    market_order(portfolio, symbol, delta, price, date, config)
}
