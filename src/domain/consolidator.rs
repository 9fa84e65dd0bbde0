//! Time-bucketed quote bar consolidation.
//!
//! Aggregates raw ticks into fixed-period bars. Buckets are aligned on
//! calendar day numbers, so a one-day period produces one bar per UTC date.
//! Input must already be in chronological order; the engine rejects unordered
//! data before it reaches the consolidator.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use super::quote::{QuoteBar, QuoteTick};

#[derive(Debug, Clone)]
struct WorkingBar {
    bucket: i64,
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
}

impl WorkingBar {
    fn into_bar(self) -> QuoteBar {
        QuoteBar {
            date: self.date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

/// Consolidates ticks into bars of `period_days` consecutive calendar days.
#[derive(Debug, Clone)]
pub struct TimeBarConsolidator {
    period_days: i64,
    current: Option<WorkingBar>,
}

impl TimeBarConsolidator {
    pub fn new(period_days: i64) -> Self {
        Self {
            period_days: period_days.max(1),
            current: None,
        }
    }

    fn bucket_of(&self, date: NaiveDate) -> i64 {
        i64::from(date.num_days_from_ce()).div_euclid(self.period_days)
    }

    /// Feed one tick. Returns the completed previous bucket's bar when this
    /// tick opens a new bucket.
    pub fn update(&mut self, tick: &QuoteTick) -> Option<QuoteBar> {
        let date = tick.time.date();
        let bucket = self.bucket_of(date);
        let mid = tick.mid();

        match self.current.as_mut() {
            Some(working) if working.bucket == bucket => {
                if mid > working.high {
                    working.high = mid;
                }
                if mid < working.low {
                    working.low = mid;
                }
                working.close = mid;
                None
            }
            _ => {
                let finished = self.current.take().map(WorkingBar::into_bar);
                self.current = Some(WorkingBar {
                    bucket,
                    date,
                    open: mid,
                    high: mid,
                    low: mid,
                    close: mid,
                });
                finished
            }
        }
    }

    /// Emit the in-progress bucket, if any. Called once at end of data.
    pub fn flush(&mut self) -> Option<QuoteBar> {
        self.current.take().map(WorkingBar::into_bar)
    }

    pub fn period_days(&self) -> i64 {
        self.period_days
    }
}

/// Fill gaps between consolidated bars with flat bars carrying the previous
/// close, one per missing period. Applied when the subscription requests
/// fill-forward delivery.
pub fn fill_forward(bars: &[QuoteBar], period_days: i64) -> Vec<QuoteBar> {
    let period_days = period_days.max(1);
    let mut out: Vec<QuoteBar> = Vec::with_capacity(bars.len());

    for bar in bars {
        if let Some(prev) = out.last().cloned() {
            let mut date = prev.date + Duration::days(period_days);
            while date < bar.date {
                let close = prev.close;
                out.push(QuoteBar {
                    date,
                    open: close,
                    high: close,
                    low: close,
                    close,
                });
                date += Duration::days(period_days);
            }
        }
        out.push(bar.clone());
    }

    out
}
