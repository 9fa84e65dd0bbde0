//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvQuoteAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_engine, BacktestResult, EngineConfig, Resolution, SecurityType};
use crate::domain::config_validation::{parse_date, validate_engine_config};
use crate::domain::error::FractraderError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::QuoteDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "fractrader", about = "Fractional-quantity order-sizing regression harness")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the regression scenario
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Quote data directory (overrides [data] path)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Write the order log to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate an engine configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for configured or named symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        market: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            data,
            output,
        } => run_scenario(&config, data.as_deref(), output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            config,
            symbol,
            market,
        } => run_info(&config, symbol.as_deref(), market.as_deref()),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FractraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the engine configuration from a validated config source.
pub fn build_engine_config(adapter: &dyn ConfigPort) -> Result<EngineConfig, FractraderError> {
    let start_date = parse_date(adapter, "start_date")?;
    let end_date = parse_date(adapter, "end_date")?;

    let initial_cash = adapter.get_decimal("engine", "initial_cash").ok_or(
        FractraderError::ConfigMissing {
            section: "engine".to_string(),
            key: "initial_cash".to_string(),
        },
    )?;

    let symbol =
        adapter
            .get_string("engine", "symbol")
            .ok_or(FractraderError::ConfigMissing {
                section: "engine".to_string(),
                key: "symbol".to_string(),
            })?;
    let market =
        adapter
            .get_string("engine", "market")
            .ok_or(FractraderError::ConfigMissing {
                section: "engine".to_string(),
                key: "market".to_string(),
            })?;

    let benchmark = adapter
        .get_string("engine", "benchmark")
        .unwrap_or_else(|| symbol.clone());

    Ok(EngineConfig {
        start_date,
        end_date,
        initial_cash,
        security_type: SecurityType::Crypto,
        symbol,
        market,
        resolution: Resolution::Daily,
        consolidator_days: adapter.get_int("engine", "consolidator_days", 1),
        leverage: adapter
            .get_decimal("engine", "leverage")
            .unwrap_or(Decimal::ONE),
        allow_shorting: adapter.get_bool("engine", "allow_shorting", false),
        fill_forward: adapter.get_bool("engine", "fill_forward", true),
        extended_hours: adapter.get_bool("engine", "extended_hours", true),
        benchmark,
    })
}

fn resolve_data_path(
    adapter: &dyn ConfigPort,
    data_override: Option<&std::path::Path>,
) -> Result<PathBuf, FractraderError> {
    if let Some(path) = data_override {
        return Ok(path.to_path_buf());
    }
    adapter
        .get_string("data", "path")
        .map(PathBuf::from)
        .ok_or(FractraderError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        })
}

fn run_scenario(
    config_path: &std::path::Path,
    data_override: Option<&std::path::Path>,
    output_path: Option<&std::path::Path>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_engine_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let engine_config = match build_engine_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_path = match resolve_data_path(&adapter, data_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Fetching quotes for {} on {} from {}",
        engine_config.symbol,
        engine_config.market,
        data_path.display()
    );
    let data_port = CsvQuoteAdapter::new(data_path);
    let ticks = match data_port.fetch_quotes(
        &engine_config.symbol,
        &engine_config.market,
        engine_config.start_date,
        engine_config.end_date,
    ) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if ticks.is_empty() {
        let err = FractraderError::NoData {
            symbol: engine_config.symbol.clone(),
            market: engine_config.market.clone(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!("Running scenario over {} ticks", ticks.len());
    let result = match run_engine(&ticks, &engine_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&result, &engine_config);

    if let Some(path) = output_path {
        eprintln!("Writing order log to {}", path.display());
        if let Err(e) = CsvReportAdapter.write(&result, &engine_config, path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(result: &BacktestResult, config: &EngineConfig) {
    println!("benchmark:        {}", config.benchmark);
    println!("bars delivered:   {}", result.bars);
    println!("orders filled:    {}", result.filled_orders());
    println!("orders rejected:  {}", result.rejected_orders());
    println!("final cash:       {}", result.portfolio.cash);
    println!(
        "final holding:    {} {}",
        result.portfolio.quantity(&config.symbol),
        config.symbol
    );
    println!(
        "run halted early: {}",
        if result.halted { "yes" } else { "no" }
    );
}

fn run_validate(config_path: &std::path::Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_engine_config(&adapter) {
        Ok(()) => {
            println!("config ok");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(
    config_path: &std::path::Path,
    symbol_override: Option<&str>,
    market_override: Option<&str>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbol = symbol_override
        .map(str::to_string)
        .or_else(|| adapter.get_string("engine", "symbol"));
    let market = market_override
        .map(str::to_string)
        .or_else(|| adapter.get_string("engine", "market"));
    let (symbol, market) = match (symbol, market) {
        (Some(s), Some(m)) => (s, m),
        _ => {
            eprintln!("error: symbol and market are required");
            return ExitCode::from(2);
        }
    };

    let data_path = match resolve_data_path(&adapter, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvQuoteAdapter::new(data_path);
    match data_port.data_range(&symbol, &market) {
        Ok(Some((first, last, count))) => {
            println!("{} on {}: {} ticks from {} to {}", symbol, market, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{} on {}: no data", symbol, market);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
