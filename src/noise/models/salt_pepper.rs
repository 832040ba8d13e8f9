use image::RgbImage;
use imageproc::noise::salt_and_pepper_noise;
use rand::Rng;

/// Fraction of pixels forced to black or white
pub const DENSITY: f64 = 0.05;

/// Salt-and-pepper noise via imageproc, seeded from `rng`.
/// A hit turns the whole pixel black or white; channels are not corrupted independently.
pub fn apply<R: Rng>(image: &RgbImage, rng: &mut R) -> RgbImage {
    salt_and_pepper_noise(image, DENSITY, rng.random())
}
