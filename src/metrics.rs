//! Image quality metrics: PSNR and SSIM against a reference image

use crate::error::DenoiseError;
use image::{GrayImage, ImageBuffer, Pixel, RgbImage};

/// SSIM window side length
const SSIM_WINDOW: u32 = 7;
const K1: f64 = 0.01;
const K2: f64 = 0.03;
/// Dynamic range of 8-bit samples
const DATA_RANGE: f64 = 255.0;

/// Peak signal-to-noise ratio in dB over all channels
///
/// Returns `f64::INFINITY` for bit-identical images.
pub fn psnr<P>(
    original: &ImageBuffer<P, Vec<u8>>,
    filtered: &ImageBuffer<P, Vec<u8>>,
) -> Result<f64, DenoiseError>
where
    P: Pixel<Subpixel = u8>,
{
    check_dimensions(original.dimensions(), filtered.dimensions())?;

    let a = original.as_raw();
    let b = filtered.as_raw();
    if a.is_empty() {
        return Ok(f64::INFINITY);
    }

    let mse = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
        .sum::<f64>()
        / a.len() as f64;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(20.0 * (DATA_RANGE / mse.sqrt()).log10())
}

/// Structural similarity of two color images, computed on luminance
pub fn ssim(original: &RgbImage, filtered: &RgbImage) -> Result<f64, DenoiseError> {
    check_dimensions(original.dimensions(), filtered.dimensions())?;
    let a = image::imageops::grayscale(original);
    let b = image::imageops::grayscale(filtered);
    ssim_gray(&a, &b)
}

/// Mean SSIM of two grayscale images
///
/// Uses a 7x7 uniform window with sample covariance and averages over all
/// window positions that lie fully inside the image.
pub fn ssim_gray(original: &GrayImage, filtered: &GrayImage) -> Result<f64, DenoiseError> {
    check_dimensions(original.dimensions(), filtered.dimensions())?;

    let (width, height) = original.dimensions();
    if width < SSIM_WINDOW || height < SSIM_WINDOW {
        return Err(DenoiseError::InvalidParameter(format!(
            "SSIM needs at least {0}x{0} pixels, got {1}x{2}",
            SSIM_WINDOW, width, height
        )));
    }

    let x = original.as_raw();
    let y = filtered.as_raw();
    let (w, h) = (width as usize, height as usize);

    let sum_x = Integral::new(w, h, |i| x[i] as f64);
    let sum_y = Integral::new(w, h, |i| y[i] as f64);
    let sum_xx = Integral::new(w, h, |i| (x[i] as f64).powi(2));
    let sum_yy = Integral::new(w, h, |i| (y[i] as f64).powi(2));
    let sum_xy = Integral::new(w, h, |i| x[i] as f64 * y[i] as f64);

    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);
    let win = SSIM_WINDOW as usize;
    let n = (win * win) as f64;
    let cov_norm = n / (n - 1.0);

    let mut total = 0.0;
    let mut count = 0usize;
    for y0 in 0..=(h - win) {
        for x0 in 0..=(w - win) {
            let (x1, y1) = (x0 + win, y0 + win);

            let ux = sum_x.window(x0, y0, x1, y1) / n;
            let uy = sum_y.window(x0, y0, x1, y1) / n;
            let vx = cov_norm * (sum_xx.window(x0, y0, x1, y1) / n - ux * ux);
            let vy = cov_norm * (sum_yy.window(x0, y0, x1, y1) / n - uy * uy);
            let vxy = cov_norm * (sum_xy.window(x0, y0, x1, y1) / n - ux * uy);

            let numerator = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
            let denominator = (ux * ux + uy * uy + c1) * (vx + vy + c2);
            total += numerator / denominator;
            count += 1;
        }
    }

    Ok(total / count as f64)
}

fn check_dimensions(left: (u32, u32), right: (u32, u32)) -> Result<(), DenoiseError> {
    if left != right {
        return Err(DenoiseError::DimensionMismatch { left, right });
    }
    Ok(())
}

/// Summed-area table over a `width x height` grid
struct Integral {
    stride: usize,
    sums: Vec<f64>,
}

impl Integral {
    fn new(width: usize, height: usize, value: impl Fn(usize) -> f64) -> Self {
        let stride = width + 1;
        let mut sums = vec![0.0f64; stride * (height + 1)];
        for y in 0..height {
            for x in 0..width {
                sums[(y + 1) * stride + x + 1] = value(y * width + x)
                    + sums[y * stride + x + 1]
                    + sums[(y + 1) * stride + x]
                    - sums[y * stride + x];
            }
        }
        Self { stride, sums }
    }

    /// Sum over `[x0, x1) x [y0, y1)`
    fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let s = self.stride;
        self.sums[y1 * s + x1] - self.sums[y0 * s + x1] - self.sums[y1 * s + x0]
            + self.sums[y0 * s + x0]
    }
}
