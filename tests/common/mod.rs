#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fractrader::domain::backtest::{EngineConfig, Resolution, SecurityType};
use fractrader::domain::error::FractraderError;
pub use fractrader::domain::quote::QuoteTick;
use fractrader::ports::data_port::QuoteDataPort;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

pub struct MockQuoteDataPort {
    pub data: HashMap<String, Vec<QuoteTick>>,
    pub errors: HashMap<String, String>,
}

impl MockQuoteDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_ticks(mut self, symbol: &str, ticks: Vec<QuoteTick>) -> Self {
        self.data.insert(symbol.to_string(), ticks);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl QuoteDataPort for MockQuoteDataPort {
    fn fetch_quotes(
        &self,
        symbol: &str,
        _market: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<QuoteTick>, FractraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(FractraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|t| {
                let date = t.time.date();
                date >= start_date && date <= end_date
            })
            .collect())
    }

    fn list_symbols(&self, _market: &str) -> Result<Vec<String>, FractraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
        _market: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, FractraderError> {
        let ticks = match self.data.get(symbol) {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(None),
        };
        let first = ticks.iter().map(|t| t.time).min().unwrap();
        let last = ticks.iter().map(|t| t.time).max().unwrap();
        Ok(Some((first, last, ticks.len())))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tick(y: i32, m: u32, d: u32, h: u32, price: Decimal) -> QuoteTick {
    QuoteTick {
        time: date(y, m, d).and_hms_opt(h, 0, 0).unwrap(),
        bid: price,
        ask: price,
    }
}

pub fn scenario_config() -> EngineConfig {
    EngineConfig {
        start_date: date(2015, 11, 12),
        end_date: date(2016, 4, 1),
        initial_cash: dec!(100000),
        security_type: SecurityType::Crypto,
        symbol: "BTCUSD".into(),
        market: "GDAX".into(),
        resolution: Resolution::Daily,
        consolidator_days: 1,
        leverage: dec!(3.3),
        allow_shorting: false,
        fill_forward: true,
        extended_hours: true,
        benchmark: "BTCUSD".into(),
    }
}

/// Price path that walks the whole decision table: an entry at 399, then a
/// collapse to zero so the held quantity matches each checkpoint offset on
/// consecutive bars.
pub fn cascade_ticks() -> Vec<QuoteTick> {
    let mut ticks = vec![tick(2015, 11, 12, 12, dec!(399))];
    for d in 13..=20 {
        ticks.push(tick(2015, 11, d, 12, Decimal::ZERO));
    }
    ticks
}
