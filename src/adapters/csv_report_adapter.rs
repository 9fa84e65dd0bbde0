//! CSV report adapter: writes the run's order log.

use std::path::Path;

use crate::domain::backtest::{BacktestResult, EngineConfig};
use crate::domain::error::FractraderError;
use crate::domain::execution::OrderOutcome;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        _config: &EngineConfig,
        output_path: &Path,
    ) -> Result<(), FractraderError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| FractraderError::Data {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        wtr.write_record(["date", "symbol", "quantity", "status", "fill_price", "reason"])
            .map_err(write_error)?;

        for order in &result.orders {
            let (status, fill_price, reason) = match &order.outcome {
                OrderOutcome::Filled { fill_price } => {
                    ("filled".to_string(), fill_price.to_string(), String::new())
                }
                OrderOutcome::Rejected(reason) => {
                    ("rejected".to_string(), String::new(), reason.to_string())
                }
            };
            wtr.write_record([
                order.date.format("%Y-%m-%d").to_string(),
                order.symbol.clone(),
                order.quantity.to_string(),
                status,
                fill_price,
                reason,
            ])
            .map_err(write_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn write_error(e: csv::Error) -> FractraderError {
    FractraderError::Data {
        reason: format!("CSV write error: {}", e),
    }
}
