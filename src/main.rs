use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod filters;
mod metrics;
mod noise;
mod pipeline;
mod report;
mod source;

use report::{BestFilterStrategy, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "denoise-compare")]
#[command(about = "Compare mean, median and Gaussian filters on noisy sample images")]
#[command(version)]
pub struct Args {
    /// Directory searched for image1.jpg, image2.jpg and image3.jpg
    #[arg(long, env = "DENOISE_INPUT_DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory the PNG figures are written to
    #[arg(long, env = "DENOISE_RESULTS_DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Seed for the noise generators (random if not set)
    #[arg(long, env = "DENOISE_SEED")]
    pub seed: Option<u64>,

    /// How the highlighted filter per noise type is chosen
    #[arg(long, env = "DENOISE_BEST_FILTER", value_enum, default_value_t = BestFilterStrategy::Static)]
    pub best_filter: BestFilterStrategy,

    /// Console output format
    #[arg(long, env = "DENOISE_FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// TrueType font for figure captions (system fonts are searched if not set)
    #[arg(long, env = "DENOISE_FONT")]
    pub font: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting denoise-compare v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Writing figures to {}", config.results_dir.display());

    pipeline::run(&config)?;

    Ok(())
}
