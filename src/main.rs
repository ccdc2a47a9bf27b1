use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use humansize::{format_size, DECIMAL};
use tracing_subscriber::EnvFilter;

use cast2gif::cli::Cli;
use cast2gif::{Config, ConvertError, Converter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    // RUST_LOG=cast2gif=debug overrides -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let options = config.options().context("Invalid settings")?;
    let report = Converter::new(options).convert_file(&cli.input, &cli.output)?;

    println!("GIF created at {}", report.output.display());
    println!(
        "{} frames from {} snapshots, {:.1}s, {}",
        report.entry_count,
        report.frame_count,
        report.duration_ms as f64 / 1000.0,
        format_size(report.bytes_written, DECIMAL)
    );

    Ok(())
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");

    if let Some(ConvertError::InputNotFound { .. }) = err.downcast_ref::<ConvertError>() {
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
    }
}
