//! Filter comparison reporting
//!
//! Runs the metric sweep, picks the filter to highlight per noise type,
//! renders comparison figures and writes the console transcript.

pub mod console;
pub mod figure;
pub mod font;
pub mod layouts;
pub mod sweep;

use clap::ValueEnum;
use serde::Serialize;

pub use console::Console;
pub use figure::Figure;
pub use sweep::{Selection, SweepRow};

/// How the highlighted filter per noise type is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BestFilterStrategy {
    /// Hand-curated choice per noise model
    #[default]
    Static,
    /// Highest SSIM in the sweep
    Ssim,
}

impl BestFilterStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Ssim => "ssim",
        }
    }
}

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table followed by the written analysis
    #[default]
    Table,
    /// A single JSON document
    Json,
}
