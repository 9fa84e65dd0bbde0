use clap::Parser;
use fractrader::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
