use image::RgbImage;
use imageproc::filter::separable_filter_equal;

/// Separable Gaussian blur with an explicit odd `window` and `sigma`
pub fn apply(image: &RgbImage, window: u32, sigma: f32) -> RgbImage {
    separable_filter_equal(image, &weights(window, sigma))
}

/// Normalized 1-D Gaussian weights of length `window`
///
/// A non-positive `sigma` is derived from the window size as
/// `0.3 * ((window - 1) * 0.5 - 1) + 0.8`.
pub fn weights(window: u32, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        derived_sigma(window)
    };
    let center = (window as f32 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;

    let raw: Vec<f32> = (0..window)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

fn derived_sigma(window: u32) -> f32 {
    0.3 * ((window as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
