//! Domain error types.

use chrono::NaiveDateTime;

/// Top-level error type for fractrader.
#[derive(Debug, thiserror::Error)]
pub enum FractraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no quote data for {symbol} on {market}")]
    NoData { symbol: String, market: String },

    #[error("unordered quote data for {symbol}: tick at {time} precedes an earlier tick")]
    UnorderedData { symbol: String, time: NaiveDateTime },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FractraderError> for std::process::ExitCode {
    fn from(err: &FractraderError) -> Self {
        let code: u8 = match err {
            FractraderError::Io(_) => 1,
            FractraderError::ConfigParse { .. }
            | FractraderError::ConfigMissing { .. }
            | FractraderError::ConfigInvalid { .. } => 2,
            FractraderError::Data { .. } | FractraderError::UnorderedData { .. } => 3,
            FractraderError::NoData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_config_missing() {
        let err = FractraderError::ConfigMissing {
            section: "engine".into(),
            key: "symbol".into(),
        };
        assert_eq!(err.to_string(), "missing config key [engine] symbol");
    }

    #[test]
    fn display_no_data() {
        let err = FractraderError::NoData {
            symbol: "BTCUSD".into(),
            market: "GDAX".into(),
        };
        assert_eq!(err.to_string(), "no quote data for BTCUSD on GDAX");
    }

    #[test]
    fn display_unordered_data() {
        let time = NaiveDate::from_ymd_opt(2015, 11, 13)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let err = FractraderError::UnorderedData {
            symbol: "BTCUSD".into(),
            time,
        };
        assert!(err.to_string().contains("unordered quote data for BTCUSD"));
        assert!(err.to_string().contains("2015-11-13 12:00:00"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FractraderError = io.into();
        assert!(matches!(err, FractraderError::Io(_)));
    }
}
