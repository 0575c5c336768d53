use std::{convert::Infallible, process::ExitCode};

use anyhow::Context;
use base_hat::BaseHat;
use config::TELEMETRY_ENDPOINT;
use error::StartupError;
use grove::GroveBoard;
use log::LevelFilter;
use monitor::Monitor;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use telemetry::UdpTelemetry;

mod base_hat;
mod board;
mod config;
mod error;
mod grove;
mod lcd;
mod measurement;
mod monitor;
mod platform;
mod telemetry;

fn main() -> ExitCode {
    if let Err(e) = init_logger() {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(never) => match never {},
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logger() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")
}

pub fn run() -> Result<Infallible, StartupError> {
    let mut hat = BaseHat::new()
        .context("Failed to initialize Grove Base HAT")
        .map_err(StartupError::UnsupportedPlatform)?;
    let model = platform::check(&mut hat).map_err(StartupError::UnsupportedPlatform)?;
    log::info!("Running on {model:?}");

    let mut board = GroveBoard::new(hat).map_err(StartupError::Device)?;
    board.init().map_err(StartupError::Device)?;

    let telemetry =
        UdpTelemetry::connect(TELEMETRY_ENDPOINT).map_err(|source| StartupError::Network {
            endpoint: TELEMETRY_ENDPOINT.to_string(),
            source,
        })?;

    let monitor = Monitor::new(board, telemetry).map_err(StartupError::Device)?;
    log::info!(
        "Baseline noise {:.0}, sending to {}",
        monitor.state().baseline_noise,
        TELEMETRY_ENDPOINT
    );

    monitor.run()
}
