//! Regression engine: subscription config and the event loop.
//!
//! The loop replays raw quote ticks through the consolidator and invokes the
//! sizing rule once per completed bar, in order, with no overlap. Portfolio
//! state is read fresh at each invocation; order outcomes land in the order
//! log and are never fed back to the rule. The failure-branch halt is a
//! one-shot signal after which no further bars are delivered.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::consolidator::{fill_forward, TimeBarConsolidator};
use super::error::FractraderError;
use super::execution::{self, ExecutionConfig, OrderRecord};
use super::portfolio::Portfolio;
use super::quote::{QuoteBar, QuoteTick};
use super::sizing::{self, SizingAction};

/// Supported instrument classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    Crypto,
}

/// Raw subscription resolution; consolidation period is configured separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Daily,
}

/// One-time environment and subscription configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_cash: Decimal,
    /// Carried for subscription parity; crypto is the only supported class.
    pub security_type: SecurityType,
    pub symbol: String,
    pub market: String,
    /// Raw feed resolution, for subscription parity; consolidation is
    /// governed by `consolidator_days`.
    pub resolution: Resolution,
    pub consolidator_days: i64,
    pub leverage: Decimal,
    pub allow_shorting: bool,
    pub fill_forward: bool,
    /// Accepted for venue parity; crypto markets trade around the clock so no
    /// session filtering applies.
    pub extended_hours: bool,
    /// Benchmark symbol; must match the traded symbol (single-feed engine),
    /// so the benchmark series is sampled from the traded bars.
    pub benchmark: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Everything the run produced.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub portfolio: Portfolio,
    pub orders: Vec<OrderRecord>,
    pub equity_curve: Vec<EquityPoint>,
    pub benchmark: Vec<BenchmarkPoint>,
    pub bars: usize,
    pub halted: bool,
}

impl BacktestResult {
    pub fn filled_orders(&self) -> usize {
        self.orders.iter().filter(|o| o.is_filled()).count()
    }

    pub fn rejected_orders(&self) -> usize {
        self.orders.len() - self.filled_orders()
    }
}

/// Run the regression scenario over raw ticks.
///
/// Ticks must be chronologically ordered; ticks outside the configured date
/// range are dropped before consolidation.
pub fn run_engine(
    ticks: &[QuoteTick],
    config: &EngineConfig,
) -> Result<BacktestResult, FractraderError> {
    for pair in ticks.windows(2) {
        if pair[1].time < pair[0].time {
            return Err(FractraderError::UnorderedData {
                symbol: config.symbol.clone(),
                time: pair[1].time,
            });
        }
    }

    let mut consolidator = TimeBarConsolidator::new(config.consolidator_days);
    let mut bars: Vec<QuoteBar> = Vec::new();
    for tick in ticks {
        let date = tick.time.date();
        if date < config.start_date || date > config.end_date {
            continue;
        }
        if let Some(bar) = consolidator.update(tick) {
            bars.push(bar);
        }
    }
    if let Some(bar) = consolidator.flush() {
        bars.push(bar);
    }

    let bars = if config.fill_forward {
        fill_forward(&bars, config.consolidator_days)
    } else {
        bars
    };

    let execution_config = ExecutionConfig {
        leverage: config.leverage,
        allow_shorting: config.allow_shorting,
    };

    let mut portfolio = Portfolio::new(config.initial_cash);
    let mut orders: Vec<OrderRecord> = Vec::new();
    let mut equity_curve: Vec<EquityPoint> = Vec::new();
    let mut benchmark: Vec<BenchmarkPoint> = Vec::new();
    let mut halted = false;
    let mut delivered = 0usize;

    for bar in &bars {
        delivered += 1;
        let price = bar.value();
        benchmark.push(BenchmarkPoint {
            date: bar.date,
            value: price,
        });

        let cash = portfolio.cash;
        let held = portfolio.quantity(&config.symbol);
        let invested = portfolio.invested();
        let decision = sizing::evaluate(cash, price, held, invested);

        for action in &decision.actions {
            let record = match action {
                SizingAction::Market { quantity } => execution::market_order(
                    &mut portfolio,
                    &config.symbol,
                    *quantity,
                    price,
                    bar.date,
                    &execution_config,
                ),
                SizingAction::SetHoldings { weight } => execution::set_holdings(
                    &mut portfolio,
                    &config.symbol,
                    *weight,
                    price,
                    bar.date,
                    &execution_config,
                ),
            };
            orders.push(record);
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: portfolio.total_value(&config.symbol, price),
        });

        if decision.halt {
            halted = true;
            break;
        }
    }

    Ok(BacktestResult {
        portfolio,
        orders,
        equity_curve,
        benchmark,
        bars: delivered,
        halted,
    })
}
