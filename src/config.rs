use crate::report::{BestFilterStrategy, OutputFormat};
use crate::Args;
use std::path::PathBuf;

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub results_dir: PathBuf,
    pub seed: Option<u64>,
    pub best_filter: BestFilterStrategy,
    pub format: OutputFormat,
    pub font: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            input_dir: args.input_dir,
            results_dir: args.results_dir,
            seed: args.seed,
            best_filter: args.best_filter,
            format: args.format,
            font: args.font,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            results_dir: PathBuf::from("results"),
            seed: None,
            best_filter: BestFilterStrategy::Static,
            format: OutputFormat::Table,
            font: None,
        }
    }
}
