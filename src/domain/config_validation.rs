//! Configuration validation.
//!
//! Validates every engine config field before a run starts.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::FractraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    validate_initial_cash(config)?;
    validate_dates(config)?;
    validate_security_type(config)?;
    validate_symbol(config)?;
    validate_market(config)?;
    validate_resolution(config)?;
    validate_consolidator_days(config)?;
    validate_leverage(config)?;
    validate_time_zone(config)?;
    validate_benchmark(config)?;
    Ok(())
}

fn invalid(key: &str, reason: impl Into<String>) -> FractraderError {
    FractraderError::ConfigInvalid {
        section: "engine".to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn missing(key: &str) -> FractraderError {
    FractraderError::ConfigMissing {
        section: "engine".to_string(),
        key: key.to_string(),
    }
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_decimal("engine", "initial_cash") {
        None => Err(missing("initial_cash")),
        Some(value) if value <= Decimal::ZERO => {
            Err(invalid("initial_cash", "initial_cash must be positive"))
        }
        Some(_) => Ok(()),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;
    if start >= end {
        return Err(invalid("start_date", "start_date must be before end_date"));
    }
    Ok(())
}

pub fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, FractraderError> {
    match config.get_string("engine", key) {
        None => Err(missing(key)),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| invalid(key, format!("invalid {} format, expected YYYY-MM-DD", key))),
    }
}

fn validate_security_type(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_string("engine", "security_type").as_deref() {
        None | Some("crypto") => Ok(()),
        Some(other) => Err(invalid(
            "security_type",
            format!("unsupported security_type '{}', expected crypto", other),
        )),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_string("engine", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(missing("symbol")),
    }
}

fn validate_market(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_string("engine", "market") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(missing("market")),
    }
}

fn validate_resolution(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_string("engine", "resolution").as_deref() {
        None | Some("daily") => Ok(()),
        Some(other) => Err(invalid(
            "resolution",
            format!("unsupported resolution '{}', expected daily", other),
        )),
    }
}

fn validate_consolidator_days(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    let value = config.get_int("engine", "consolidator_days", 1);
    if value < 1 {
        return Err(invalid(
            "consolidator_days",
            "consolidator_days must be at least 1",
        ));
    }
    Ok(())
}

fn validate_leverage(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    let value = config
        .get_decimal("engine", "leverage")
        .unwrap_or(Decimal::ONE);
    if value < Decimal::ONE {
        return Err(invalid("leverage", "leverage must be at least 1"));
    }
    Ok(())
}

fn validate_time_zone(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    match config.get_string("engine", "time_zone").as_deref() {
        None | Some("UTC") => Ok(()),
        Some(other) => Err(invalid(
            "time_zone",
            format!("unsupported time_zone '{}', expected UTC", other),
        )),
    }
}

fn validate_benchmark(config: &dyn ConfigPort) -> Result<(), FractraderError> {
    let benchmark = config.get_string("engine", "benchmark");
    let symbol = config.get_string("engine", "symbol");
    match (benchmark, symbol) {
        (Some(b), Some(s)) if b != s => Err(invalid(
            "benchmark",
            "benchmark must match the traded symbol",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID: &str = r#"
[engine]
start_date = 2015-11-12
end_date = 2016-04-01
initial_cash = 100000
security_type = crypto
symbol = BTCUSD
market = GDAX
resolution = daily
consolidator_days = 1
leverage = 3.3
allow_shorting = false
fill_forward = true
extended_hours = true
time_zone = UTC
benchmark = BTCUSD
"#;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn with_line(key: &str, value: &str) -> FileConfigAdapter {
        let replaced: String = VALID
            .lines()
            .map(|line| {
                if line.starts_with(key) {
                    format!("{} = {}", key, value)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        adapter(&replaced)
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_engine_config(&adapter(VALID)).is_ok());
    }

    #[test]
    fn missing_initial_cash() {
        let cfg = adapter("[engine]\nstart_date = 2015-11-12\nend_date = 2016-04-01\n");
        let err = validate_engine_config(&cfg).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigMissing { ref key, .. } if key == "initial_cash"));
    }

    #[test]
    fn non_positive_cash_rejected() {
        let err = validate_engine_config(&with_line("initial_cash", "0")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "initial_cash"));
    }

    #[test]
    fn reversed_dates_rejected() {
        let err = validate_engine_config(&with_line("end_date", "2015-01-01")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "start_date"));
    }

    #[test]
    fn bad_date_format_rejected() {
        let err = validate_engine_config(&with_line("start_date", "12/11/2015")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "start_date"));
    }

    #[test]
    fn unsupported_security_type_rejected() {
        let err = validate_engine_config(&with_line("security_type", "equity")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "security_type"));
    }

    #[test]
    fn unsupported_resolution_rejected() {
        let err = validate_engine_config(&with_line("resolution", "minute")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "resolution"));
    }

    #[test]
    fn zero_consolidator_days_rejected() {
        let err = validate_engine_config(&with_line("consolidator_days", "0")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "consolidator_days"));
    }

    #[test]
    fn sub_unit_leverage_rejected() {
        let err = validate_engine_config(&with_line("leverage", "0.5")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "leverage"));
    }

    #[test]
    fn non_utc_time_zone_rejected() {
        let err = validate_engine_config(&with_line("time_zone", "America/New_York")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "time_zone"));
    }

    #[test]
    fn mismatched_benchmark_rejected() {
        let err = validate_engine_config(&with_line("benchmark", "ETHUSD")).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigInvalid { ref key, .. } if key == "benchmark"));
    }

    #[test]
    fn missing_symbol_rejected() {
        let cfg = adapter(
            "[engine]\nstart_date = 2015-11-12\nend_date = 2016-04-01\ninitial_cash = 1000\nmarket = GDAX\n",
        );
        let err = validate_engine_config(&cfg).unwrap_err();
        assert!(matches!(err, FractraderError::ConfigMissing { ref key, .. } if key == "symbol"));
    }
}
