//! Figure layouts for each stage of the comparison

use super::figure::{Figure, Panel};
use super::sweep::{self, GAUSSIAN_SIGMAS, GAUSSIAN_WINDOWS};
use crate::error::DenoiseError;
use crate::filters::{FilterKind, FilterSpec};
use crate::metrics;
use crate::noise::NoisySample;
use crate::source::Sample;

/// One row per sample: original next to its noisy version
pub fn original_vs_noisy(
    originals: &[Sample],
    noisy: &[NoisySample],
) -> Result<Figure, DenoiseError> {
    let mut figure = Figure::new();
    for sample in noisy {
        let original = sweep::find_original(originals, sample.id)?;
        figure = figure.row(vec![
            Panel::new(
                format!("Original Image {}", sample.id.0),
                original.image.clone(),
            ),
            Panel::new(
                format!("Noisy Image {} ({})", sample.id.0, sample.model.label()),
                sample.image.clone(),
            ),
        ]);
    }
    Ok(figure)
}

/// A noisy sample next to each window size of one filter family.
/// Gaussian filters get one row per sigma.
pub fn family_sweep(kind: FilterKind, sample: &NoisySample) -> Result<Figure, DenoiseError> {
    let noisy_panel = || {
        Panel::new(
            format!("Noisy Image ({})", sample.model.label()),
            sample.image.clone(),
        )
    };

    if kind == FilterKind::Gaussian {
        let mut figure = Figure::new();
        for &sigma in &GAUSSIAN_SIGMAS {
            let mut panels = vec![noisy_panel()];
            for &window in &GAUSSIAN_WINDOWS {
                let spec = FilterSpec::gaussian(window, sigma)?;
                panels.push(Panel::new(spec.title(), spec.apply(&sample.image)));
            }
            figure = figure.row(panels);
        }
        return Ok(figure);
    }

    let mut panels = vec![noisy_panel()];
    for spec in sweep::family_grid(kind)? {
        panels.push(Panel::new(spec.title(), spec.apply(&sample.image)));
    }
    Ok(Figure::new().row(panels))
}

/// Original, noisy, 3x3 mean baseline and the highlighted filter, with PSNR
pub fn comparison(
    original: &Sample,
    sample: &NoisySample,
    best: &FilterSpec,
) -> Result<Figure, DenoiseError> {
    let baseline = FilterSpec::mean(3)?;
    let baseline_image = baseline.apply(&sample.image);
    let best_image = best.apply(&sample.image);

    let baseline_psnr = metrics::psnr(&original.image, &baseline_image)?;
    let best_psnr = metrics::psnr(&original.image, &best_image)?;

    Ok(Figure::new().row(vec![
        Panel::new("Original Image", original.image.clone()),
        Panel::new(
            format!("Noisy Image\n({})", sample.model.label()),
            sample.image.clone(),
        ),
        Panel::new(
            format!("{}\nPSNR: {:.2}", baseline.title(), baseline_psnr),
            baseline_image,
        ),
        Panel::new(format!("{}\nPSNR: {:.2}", best.title(), best_psnr), best_image),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseModel;
    use crate::report::font;
    use crate::source::{Origin, SampleId};
    use image::{Rgb, RgbImage};

    fn pair(id: usize) -> (Sample, NoisySample) {
        let image = RgbImage::from_fn(24, 24, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 50]));
        let mut noisy = image.clone();
        noisy.put_pixel(5, 5, Rgb([255, 255, 255]));
        (
            Sample {
                id: SampleId(id),
                origin: Origin::Synthesized,
                image,
            },
            NoisySample {
                id: SampleId(id),
                model: NoiseModel::Impulse,
                image: noisy,
            },
        )
    }

    #[test]
    fn test_original_vs_noisy_has_two_panels_per_sample() {
        let (a, na) = pair(1);
        let (b, nb) = pair(2);
        let figure = original_vs_noisy(&[a, b], &[na, nb]).unwrap();
        assert_eq!(figure.panel_count(), 4);
    }

    #[test]
    fn test_family_sweep_panel_counts() {
        let (_, sample) = pair(1);
        assert_eq!(family_sweep(FilterKind::Mean, &sample).unwrap().panel_count(), 3);
        assert_eq!(family_sweep(FilterKind::Median, &sample).unwrap().panel_count(), 3);
        // two sigma rows of noisy + two windows
        assert_eq!(family_sweep(FilterKind::Gaussian, &sample).unwrap().panel_count(), 6);
    }

    #[test]
    fn test_comparison_has_four_panels() {
        let (original, sample) = pair(1);
        let best = FilterSpec::median(3).unwrap();
        let figure = comparison(&original, &sample, &best).unwrap();
        assert_eq!(figure.panel_count(), 4);
        assert!(figure.render(None).is_ok());
    }

    #[test]
    fn test_comparison_captions_are_drawn() {
        let (original, sample) = pair(1);
        let best = FilterSpec::median(3).unwrap();
        let figure = comparison(&original, &sample, &best).unwrap();

        // Caption band sits above the panel borders at row 63
        let caption_ink = |canvas: &RgbImage| {
            canvas
                .enumerate_pixels()
                .filter(|(_, y, p)| *y < 63 && p.0 != [255, 255, 255])
                .count()
        };

        let font = font::load_font(None).unwrap();
        assert_eq!(caption_ink(&figure.render(None).unwrap()), 0);
        assert!(caption_ink(&figure.render(Some(&font)).unwrap()) > 200);
    }
}
