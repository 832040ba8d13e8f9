use super::BestFilterStrategy;
use crate::error::DenoiseError;
use crate::filters::{FilterKind, FilterSpec};
use crate::metrics;
use crate::noise::{NoiseModel, NoisySample};
use crate::source::{Sample, SampleId};
use serde::Serialize;

/// Window sizes swept for the mean filter
pub const MEAN_WINDOWS: [u32; 2] = [3, 5];
/// Window sizes swept for the median filter
pub const MEDIAN_WINDOWS: [u32; 2] = [3, 5];
/// Window sizes swept for the Gaussian filter
pub const GAUSSIAN_WINDOWS: [u32; 2] = [3, 5];
/// Standard deviations swept for the Gaussian filter
pub const GAUSSIAN_SIGMAS: [f32; 2] = [0.5, 1.0];

/// Parameter grid of one filter family, windows outermost
pub fn family_grid(kind: FilterKind) -> Result<Vec<FilterSpec>, DenoiseError> {
    match kind {
        FilterKind::Mean => MEAN_WINDOWS.iter().map(|&w| FilterSpec::mean(w)).collect(),
        FilterKind::Median => MEDIAN_WINDOWS.iter().map(|&w| FilterSpec::median(w)).collect(),
        FilterKind::Gaussian => GAUSSIAN_WINDOWS
            .iter()
            .flat_map(|&w| GAUSSIAN_SIGMAS.iter().map(move |&s| FilterSpec::gaussian(w, s)))
            .collect(),
    }
}

/// Mean, median and Gaussian grids in table order
pub fn full_grid() -> Result<Vec<FilterSpec>, DenoiseError> {
    let mut grid = family_grid(FilterKind::Mean)?;
    grid.extend(family_grid(FilterKind::Median)?);
    grid.extend(family_grid(FilterKind::Gaussian)?);
    Ok(grid)
}

/// Metrics of one filtered image against its noise-free original
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub sample: SampleId,
    pub noise: NoiseModel,
    pub filter: FilterSpec,
    /// `null` in JSON when the filtered image equals the original
    pub psnr: f64,
    pub ssim: f64,
}

/// Filter every noisy sample with every grid entry and score it
pub fn run_sweep(
    originals: &[Sample],
    noisy: &[NoisySample],
) -> Result<Vec<SweepRow>, DenoiseError> {
    let grid = full_grid()?;
    let mut rows = Vec::with_capacity(noisy.len() * grid.len());

    for sample in noisy {
        let original = find_original(originals, sample.id)?;
        for spec in &grid {
            let filtered = spec.apply(&sample.image);
            rows.push(SweepRow {
                sample: sample.id,
                noise: sample.model,
                filter: *spec,
                psnr: metrics::psnr(&original.image, &filtered)?,
                ssim: metrics::ssim(&original.image, &filtered)?,
            });
        }
        tracing::debug!("Swept {} filters for {}", grid.len(), sample.id);
    }

    Ok(rows)
}

pub fn find_original(originals: &[Sample], id: SampleId) -> Result<&Sample, DenoiseError> {
    originals.iter().find(|s| s.id == id).ok_or_else(|| {
        DenoiseError::InvalidAssignment(format!("no original image for {}", id))
    })
}

/// Filter highlighted for one noisy sample
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub sample: SampleId,
    pub noise: NoiseModel,
    pub filter: FilterSpec,
    pub strategy: BestFilterStrategy,
}

/// Hand-curated recommendation per noise model
pub fn static_choice(model: NoiseModel) -> Result<FilterSpec, DenoiseError> {
    match model {
        NoiseModel::Compression => FilterSpec::gaussian(5, 0.5),
        NoiseModel::SaltAndPepper => FilterSpec::median(3),
        NoiseModel::Impulse => FilterSpec::median(3),
    }
}

/// Pick one filter per noisy sample
///
/// With [`BestFilterStrategy::Ssim`] the row with the highest SSIM wins;
/// a sample without sweep rows falls back to the static table.
pub fn select_best(
    rows: &[SweepRow],
    noisy: &[NoisySample],
    strategy: BestFilterStrategy,
) -> Result<Vec<Selection>, DenoiseError> {
    noisy
        .iter()
        .map(|sample| {
            let measured = match strategy {
                BestFilterStrategy::Static => None,
                BestFilterStrategy::Ssim => rows
                    .iter()
                    .filter(|r| r.sample == sample.id)
                    .max_by(|a, b| a.ssim.total_cmp(&b.ssim))
                    .map(|r| r.filter),
            };

            let (filter, strategy) = match measured {
                Some(filter) => (filter, strategy),
                None => (static_choice(sample.model)?, BestFilterStrategy::Static),
            };

            Ok(Selection {
                sample: sample.id,
                noise: sample.model,
                filter,
                strategy,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn noisy(id: usize, model: NoiseModel) -> NoisySample {
        NoisySample {
            id: SampleId(id),
            model,
            image: RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])),
        }
    }

    fn row(id: usize, filter: FilterSpec, ssim: f64) -> SweepRow {
        SweepRow {
            sample: SampleId(id),
            noise: NoiseModel::Impulse,
            filter,
            psnr: 30.0,
            ssim,
        }
    }

    #[test]
    fn test_grid_has_eight_entries() {
        let grid = full_grid().unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!(family_grid(FilterKind::Mean).unwrap().len(), 2);
        assert_eq!(family_grid(FilterKind::Median).unwrap().len(), 2);

        let gaussian = family_grid(FilterKind::Gaussian).unwrap();
        let params: Vec<_> = gaussian.iter().map(|s| s.params_label()).collect();
        assert_eq!(
            params,
            vec![
                "Size=3x3, σ=0.5",
                "Size=3x3, σ=1.0",
                "Size=5x5, σ=0.5",
                "Size=5x5, σ=1.0"
            ]
        );
    }

    #[test]
    fn test_static_selection_ignores_metrics() {
        let samples = vec![
            noisy(1, NoiseModel::Compression),
            noisy(2, NoiseModel::SaltAndPepper),
            noisy(3, NoiseModel::Impulse),
        ];
        let rows = vec![row(2, FilterSpec::mean(5).unwrap(), 0.99)];

        let picks = select_best(&rows, &samples, BestFilterStrategy::Static).unwrap();
        assert_eq!(picks[0].filter, FilterSpec::gaussian(5, 0.5).unwrap());
        assert_eq!(picks[1].filter, FilterSpec::median(3).unwrap());
        assert_eq!(picks[2].filter, FilterSpec::median(3).unwrap());
    }

    #[test]
    fn test_ssim_selection_takes_highest_score() {
        let samples = vec![noisy(1, NoiseModel::Impulse)];
        let rows = vec![
            row(1, FilterSpec::mean(3).unwrap(), 0.61),
            row(1, FilterSpec::median(5).unwrap(), 0.93),
            row(1, FilterSpec::gaussian(3, 0.5).unwrap(), 0.70),
        ];

        let picks = select_best(&rows, &samples, BestFilterStrategy::Ssim).unwrap();
        assert_eq!(picks[0].filter, FilterSpec::median(5).unwrap());
        assert_eq!(picks[0].strategy, BestFilterStrategy::Ssim);
    }

    #[test]
    fn test_ssim_selection_without_rows_falls_back() {
        let samples = vec![noisy(1, NoiseModel::Compression)];
        let picks = select_best(&[], &samples, BestFilterStrategy::Ssim).unwrap();
        assert_eq!(picks[0].filter, FilterSpec::gaussian(5, 0.5).unwrap());
        assert_eq!(picks[0].strategy, BestFilterStrategy::Static);
    }

    #[test]
    fn test_sweep_scores_every_combination() {
        let original = Sample {
            id: SampleId(1),
            origin: crate::source::Origin::Synthesized,
            image: RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 0])),
        };
        let mut noisy_image = original.image.clone();
        noisy_image.put_pixel(10, 10, Rgb([255, 255, 255]));
        let sample = NoisySample {
            id: SampleId(1),
            model: NoiseModel::Impulse,
            image: noisy_image,
        };

        let rows = run_sweep(&[original], &[sample]).unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.psnr > 0.0 && r.ssim <= 1.0));
    }

    #[test]
    fn test_sweep_requires_matching_original() {
        let sample = noisy(2, NoiseModel::Impulse);
        assert!(run_sweep(&[], &[sample]).is_err());
    }
}
