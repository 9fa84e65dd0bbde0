//! Core domain types and logic.

pub mod quote;
pub mod consolidator;
pub mod portfolio;
pub mod execution;
pub mod sizing;
pub mod backtest;
pub mod config_validation;
pub mod error;
