//! Brightness Kernel Bench
//!
//! Brightens an image with a scalar, a wide-vector and a narrow-vector kernel, times each of them
//! and reports how much faster the vectorised ones are.

use clap::Parser as _;
use color_eyre::eyre::Result;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer as _};

mod bench;
mod config;
mod input;
/// Various ways to output data.
mod output {
    pub mod comparison;
}

fn main() -> Result<()> {
    color_eyre::install()?;
    setup_logging()?;

    let config = crate::config::Config::parse();
    tracing::info!("Initialising with config: {config:?}");

    let frame = crate::input::load(&config.input, config.convert)?;

    tracing::info!("Starting benchmark");
    let bench = crate::bench::Bench::new(
        &frame,
        config.brightness,
        config.iterations,
        config.warmup,
    )?;
    let outcome = bench.run()?;

    print!("{}", outcome.report);

    if let Some(path) = &config.comparison {
        crate::output::comparison::save(&frame, &outcome.outputs, path)?;
    }

    Ok(())
}

/// Setup logging. Logs go to stderr so that stdout only holds the report.
fn setup_logging() -> Result<()> {
    let filters = tracing_subscriber::EnvFilter::builder()
        .with_default_directive("info".parse()?)
        .from_env_lossy();
    let filter_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filters);
    let tracing_setup = tracing_subscriber::registry().with(filter_layer);
    tracing_setup.init();

    Ok(())
}
