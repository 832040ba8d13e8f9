use super::sweep::{Selection, SweepRow};
use super::OutputFormat;
use crate::pipeline::RunSummary;

/// Written analysis printed after the comparison table
pub const CONCLUSIONS: &str = "\
Analysis and Conclusions:
--------------------------------------------------

1. Analysis by Noise Type:

   a. Compression (JPEG) Noise:
      - Impact: Adds blocky artifacts and can cause loss of fine details
      - Best Filter: Gaussian Filter
      - Reason: Gaussian smoothing helps reduce the blockiness while preserving edges better than mean filtering

   b. Impulse Noise:
      - Impact: Adds random extreme value pixels (black or white)
      - Best Filter: Median Filter
      - Reason: Median filtering is specifically designed to remove outliers without affecting the rest of the image

   c. Salt and Pepper Noise:
      - Impact: Adds scattered white and black pixels
      - Best Filter: Median Filter
      - Reason: Median filtering effectively removes isolated noise pixels without blurring edges

2. Parameter Impact:

   a. Window Size:
      - Larger windows (5x5) provide more smoothing but can blur details
      - Smaller windows (3x3) preserve more details but may not fully remove noise
      - For impulse and salt & pepper noise, 3x3 median filter is often sufficient
      - For compression noise, larger windows may be needed to smooth out larger artifacts

   b. Sigma (for Gaussian Filter):
      - Lower sigma values (0.5) preserve more details
      - Higher sigma values (1.0+) provide more smoothing but increase blurring
      - For compression noise, a moderate sigma value balances artifact removal and detail preservation

3. General Conclusions:

   a. Filter Selection Guidelines:
      - Salt and Pepper/Impulse noise: Median filter is almost always the best choice
      - JPEG Compression noise: Gaussian filter with carefully tuned parameters works best
      - Mean filter is rarely the optimal choice but is computationally efficient

   b. Real-world Applications:
      - Digital photography: Combine median and Gaussian filters for mixed noise
      - Medical imaging: Use median filters for impulse noise and adaptive filters for complex noise
      - Document scanning: Use specialized filters to enhance text while reducing compression artifacts";

/// Writes the run transcript to stdout in the configured format
#[derive(Debug, Clone, Copy)]
pub struct Console {
    format: OutputFormat,
}

impl Console {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Announce a task; in JSON mode this only goes to the log
    pub fn task(&self, number: usize, message: &str) {
        match self.format {
            OutputFormat::Table => println!("\nTask {}: {}", number, message),
            OutputFormat::Json => tracing::info!("Task {}: {}", number, message),
        }
    }

    pub fn table(&self, rows: &[SweepRow]) {
        if self.format == OutputFormat::Table {
            print!("{}", format_table(rows));
        }
    }

    pub fn selections(&self, selections: &[Selection]) {
        if self.format == OutputFormat::Table {
            print!("{}", format_selections(selections));
        }
    }

    pub fn conclusions(&self) {
        if self.format == OutputFormat::Table {
            println!("\n\n{}", CONCLUSIONS);
        }
    }

    pub fn finish(&self, summary: &RunSummary) -> Result<(), serde_json::Error> {
        match self.format {
            OutputFormat::Table => println!(
                "\nAll tasks completed. Results saved in '{}' folder.",
                summary.results_dir.display()
            ),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        }
        Ok(())
    }
}

/// Fixed-width comparison table, one line per sweep row
pub fn format_table(rows: &[SweepRow]) -> String {
    let mut out = String::from("\nFilter Comparison Results:\n\n");
    out.push_str(&format!(
        "{:<20} {:<20} {:<20} {:<10} {:<10}\n",
        "Noise Type", "Filter", "Parameters", "PSNR", "SSIM"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for row in rows {
        out.push_str(&format!(
            "{:<20} {:<20} {:<20} {:<10.2} {:<10.4}\n",
            row.noise.label(),
            row.filter.kind().label(),
            row.filter.params_label(),
            row.psnr,
            row.ssim
        ));
    }
    out
}

pub fn format_selections(selections: &[Selection]) -> String {
    let mut out = String::from("\nSelected filters:\n");
    for s in selections {
        out.push_str(&format!(
            "  {:<20} {} [{}]\n",
            s.noise.label(),
            s.filter.title(),
            s.strategy.as_str()
        ));
    }
    out
}
