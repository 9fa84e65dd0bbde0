//! Quote data access port trait.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::error::FractraderError;
use crate::domain::quote::QuoteTick;

pub trait QuoteDataPort {
    /// Fetch ticks for a symbol on a market venue, restricted to the given
    /// date range, in chronological order.
    fn fetch_quotes(
        &self,
        symbol: &str,
        market: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<QuoteTick>, FractraderError>;

    fn list_symbols(&self, market: &str) -> Result<Vec<String>, FractraderError>;

    fn data_range(
        &self,
        symbol: &str,
        market: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, FractraderError>;
}
