use clap::Parser;
use oas_gherkin::cli::{error_report, run_cli, Cli};
use oas_gherkin::logging::{init_logging_with_config, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err:#}");
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = error_report(&err);
            match serde_json::to_string(&report) {
                Ok(line) => eprintln!("{line}"),
                Err(_) => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
