use image::{Rgb, RgbImage};
use rand::Rng;

/// Nominal fraction of pixel positions hit
pub const FRACTION: f64 = 0.05;

/// Impulse noise: `FRACTION * width * height` draws of a random position
/// (with replacement), each set to black or white on every channel.
pub fn apply<R: Rng>(image: &RgbImage, rng: &mut R) -> RgbImage {
    let mut noisy = image.clone();
    let (width, height) = noisy.dimensions();
    let draws = (width as f64 * height as f64 * FRACTION) as usize;

    for _ in 0..draws {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let v = if rng.random_bool(0.5) { 255 } else { 0 };
        noisy.put_pixel(x, y, Rgb([v, v, v]));
    }

    noisy
}
