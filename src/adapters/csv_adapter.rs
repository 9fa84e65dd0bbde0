//! CSV quote data adapter.
//!
//! One file per subscription, named `{SYMBOL}_{MARKET}.csv`, with a header
//! and `time,bid,ask` rows; `time` is `YYYY-MM-DD HH:MM:SS` (UTC).

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::FractraderError;
use crate::domain::quote::QuoteTick;
use crate::ports::data_port::QuoteDataPort;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, market: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, market))
    }

    fn read_all(&self, symbol: &str, market: &str) -> Result<Vec<QuoteTick>, FractraderError> {
        let path = self.csv_path(symbol, market);
        let content = fs::read_to_string(&path).map_err(|e| FractraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut ticks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FractraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let time_str = record.get(0).ok_or_else(|| FractraderError::Data {
                reason: "missing time column".into(),
            })?;
            let time = NaiveDateTime::parse_from_str(time_str, "%Y-%m-%d %H:%M:%S").map_err(
                |e| FractraderError::Data {
                    reason: format!("invalid time format: {}", e),
                },
            )?;

            let bid = parse_decimal(&record, 1, "bid")?;
            let ask = parse_decimal(&record, 2, "ask")?;

            ticks.push(QuoteTick { time, bid, ask });
        }

        Ok(ticks)
    }
}

fn parse_decimal(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
) -> Result<Decimal, FractraderError> {
    record
        .get(index)
        .ok_or_else(|| FractraderError::Data {
            reason: format!("missing {} column", column),
        })?
        .trim()
        .parse()
        .map_err(|e| FractraderError::Data {
            reason: format!("invalid {} value: {}", column, e),
        })
}

impl QuoteDataPort for CsvQuoteAdapter {
    fn fetch_quotes(
        &self,
        symbol: &str,
        market: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<QuoteTick>, FractraderError> {
        let ticks = self.read_all(symbol, market)?;
        Ok(ticks
            .into_iter()
            .filter(|t| {
                let date = t.time.date();
                date >= start_date && date <= end_date
            })
            .collect())
    }

    fn list_symbols(&self, market: &str) -> Result<Vec<String>, FractraderError> {
        let suffix = format!("_{}.csv", market);
        let mut symbols = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(symbol) = name.strip_suffix(&suffix) {
                symbols.push(symbol.to_string());
            }
        }
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
        market: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, FractraderError> {
        let ticks = self.read_all(symbol, market)?;
        let earliest = ticks.iter().map(|t| t.time).min();
        let latest = ticks.iter().map(|t| t.time).max();
        match (earliest, latest) {
            (Some(first), Some(last)) => Ok(Some((first, last, ticks.len()))),
            _ => Ok(None),
        }
    }
}
