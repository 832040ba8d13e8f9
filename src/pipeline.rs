//! End-to-end comparison run
//!
//! Stages run strictly in order: load, noise, display, one sweep figure
//! set per filter family, metric comparison, conclusions. Any stage error
//! aborts the run.

use crate::config::Config;
use crate::error::DenoiseError;
use crate::filters::FilterKind;
use crate::noise::{self, NoiseAssignment};
use crate::report::{font, layouts, sweep, Console, Figure, Selection, SweepRow};
use crate::source::{self, Origin};
use ab_glyph::FontVec;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Timing information for a single stage
#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub results_dir: PathBuf,
    pub rows: Vec<SweepRow>,
    pub selections: Vec<Selection>,
    pub figures: Vec<PathBuf>,
    pub stages: Vec<StageTiming>,
    pub total_time_ms: u64,
}

/// Run the full comparison and print the transcript
pub fn run(config: &Config) -> Result<RunSummary, DenoiseError> {
    let start = Instant::now();
    let console = Console::new(config.format);
    let mut stages = Vec::new();
    let mut figures = Vec::new();

    fs::create_dir_all(&config.results_dir).map_err(|source| DenoiseError::Io {
        path: config.results_dir.clone(),
        source,
    })?;

    let font = font::load_font(config.font.as_deref())?;
    let writer = FigureWriter {
        dir: &config.results_dir,
        font: &font,
    };
    let mut rng = noise::make_rng(config.seed);
    let assignment = NoiseAssignment::default();

    console.task(1, "Loading images and adding noise...");
    let samples = run_stage("load", &mut stages, || {
        Ok(source::load_samples(&config.input_dir))
    })?;
    let synthesized = samples
        .iter()
        .filter(|s| s.origin == Origin::Synthesized)
        .count();
    tracing::info!("Loaded {} samples ({} synthesized)", samples.len(), synthesized);
    let noisy = run_stage("noise", &mut stages, || {
        noise::apply_assigned(&samples, &assignment, &mut rng)
    })?;
    run_stage("display", &mut stages, || {
        let figure = layouts::original_vs_noisy(&samples, &noisy)?;
        figures.push(writer.write(&figure, "task1_original_vs_noisy.png")?);
        Ok(())
    })?;

    let families = [
        (2, FilterKind::Mean, "Applying mean filter..."),
        (3, FilterKind::Median, "Applying median filter..."),
        (4, FilterKind::Gaussian, "Applying Gaussian filter..."),
    ];
    for (task, kind, message) in families {
        console.task(task, message);
        let stage = format!("{}_sweep", kind.as_str());
        run_stage(&stage, &mut stages, || {
            for sample in &noisy {
                let figure = layouts::family_sweep(kind, sample)?;
                let name = format!("{}_filter_image{}.png", kind.as_str(), sample.id.0);
                figures.push(writer.write(&figure, &name)?);
            }
            Ok(())
        })?;
    }

    console.task(5, "Comparing filters and concluding...");
    let rows = run_stage("metrics", &mut stages, || sweep::run_sweep(&samples, &noisy))?;
    console.table(&rows);

    let selections = run_stage("compare", &mut stages, || {
        let selections = sweep::select_best(&rows, &noisy, config.best_filter)?;
        for (selection, sample) in selections.iter().zip(&noisy) {
            let original = sweep::find_original(&samples, sample.id)?;
            let figure = layouts::comparison(original, sample, &selection.filter)?;
            let name = format!("comparison_{}.png", sample.model.slug());
            figures.push(writer.write(&figure, &name)?);
        }
        Ok(selections)
    })?;
    console.selections(&selections);
    console.conclusions();

    let summary = RunSummary {
        results_dir: config.results_dir.clone(),
        rows,
        selections,
        figures,
        stages,
        total_time_ms: start.elapsed().as_millis() as u64,
    };

    console
        .finish(&summary)
        .map_err(|e| DenoiseError::Render(format!("failed to serialize summary: {}", e)))?;
    tracing::info!(
        "Finished in {}ms, {} figures written",
        summary.total_time_ms,
        summary.figures.len()
    );

    Ok(summary)
}

/// Saves figures into the results directory
struct FigureWriter<'a> {
    dir: &'a Path,
    font: &'a FontVec,
}

impl FigureWriter<'_> {
    fn write(&self, figure: &Figure, name: &str) -> Result<PathBuf, DenoiseError> {
        let path = self.dir.join(name);
        tracing::debug!("Rendering {} ({} panels)", name, figure.panel_count());
        figure.save(&path, Some(self.font))?;
        Ok(path)
    }
}

fn run_stage<T, F>(
    name: &str,
    timings: &mut Vec<StageTiming>,
    stage: F,
) -> Result<T, DenoiseError>
where
    F: FnOnce() -> Result<T, DenoiseError>,
{
    let stage_start = Instant::now();
    let result = stage()?;
    let time_ms = stage_start.elapsed().as_millis() as u64;
    tracing::debug!("Stage {} took {}ms", name, time_ms);
    timings.push(StageTiming {
        name: name.to_string(),
        time_ms,
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSpec;
    use crate::report::{BestFilterStrategy, OutputFormat};

    #[test]
    fn test_run_without_inputs_produces_all_outputs() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let config = Config {
            input_dir: input.path().to_path_buf(),
            results_dir: output.path().join("results"),
            seed: Some(17),
            best_filter: BestFilterStrategy::Ssim,
            format: OutputFormat::Json,
            font: None,
        };

        let summary = run(&config).unwrap();

        assert_eq!(summary.rows.len(), 24);
        assert_eq!(summary.selections.len(), 3);
        assert_eq!(summary.figures.len(), 13);
        for figure in &summary.figures {
            assert!(figure.exists(), "{} missing", figure.display());
        }
        for name in [
            "task1_original_vs_noisy.png",
            "mean_filter_image1.png",
            "median_filter_image2.png",
            "gaussian_filter_image3.png",
            "comparison_Compression_JPEG.png",
            "comparison_Salt_and_pepper.png",
            "comparison_Impulse.png",
        ] {
            assert!(config.results_dir.join(name).exists(), "{} missing", name);
        }

        let stage_names: Vec<_> = summary.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            stage_names,
            vec![
                "load",
                "noise",
                "display",
                "mean_sweep",
                "median_sweep",
                "gaussian_sweep",
                "metrics",
                "compare"
            ]
        );

        // SSIM selection must agree with the best measured row per sample
        for selection in &summary.selections {
            let best = summary
                .rows
                .iter()
                .filter(|r| r.sample == selection.sample)
                .map(|r| r.ssim)
                .fold(f64::MIN, f64::max);
            let chosen = summary
                .rows
                .iter()
                .find(|r| r.sample == selection.sample && r.filter == selection.filter)
                .unwrap();
            assert_eq!(chosen.ssim, best);
        }
    }

    #[test]
    fn test_static_selection_uses_curated_table() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let config = Config {
            input_dir: input.path().to_path_buf(),
            results_dir: output.path().to_path_buf(),
            seed: Some(3),
            format: OutputFormat::Json,
            ..Config::default()
        };

        let summary = run(&config).unwrap();
        let picks: Vec<_> = summary.selections.iter().map(|s| s.filter).collect();
        assert_eq!(
            picks,
            vec![
                FilterSpec::gaussian(5, 0.5).unwrap(),
                FilterSpec::median(3).unwrap(),
                FilterSpec::median(3).unwrap(),
            ]
        );
    }

    #[test]
    fn test_unwritable_results_dir_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        let config = Config {
            input_dir: dir.path().to_path_buf(),
            results_dir: blocker.join("results"),
            format: OutputFormat::Json,
            ..Config::default()
        };
        assert!(matches!(run(&config), Err(DenoiseError::Io { .. })));
    }
}
