//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::{BacktestResult, EngineConfig};
use crate::domain::error::FractraderError;

/// Port for writing run reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        config: &EngineConfig,
        output_path: &Path,
    ) -> Result<(), FractraderError>;
}
