//! Sample image source
//!
//! Loads the three sample images from disk, synthesizing a deterministic
//! placeholder for every file that is missing or cannot be decoded.

use image::{imageops::FilterType, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Side length every sample is resized to
pub const SAMPLE_SIZE: u32 = 512;
/// Number of samples the comparison works on
pub const SAMPLE_COUNT: usize = 3;

/// 1-based identifier of a sample image (`image1`, `image2`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SampleId(pub usize);

impl SampleId {
    /// File name looked up in the input directory
    pub fn file_name(&self) -> String {
        format!("image{}.jpg", self.0)
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image{}", self.0)
    }
}

/// Where a sample's pixels came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Loaded,
    Synthesized,
}

#[derive(Debug, Clone)]
pub struct Sample {
    pub id: SampleId,
    pub origin: Origin,
    pub image: RgbImage,
}

/// Load the sample images from `dir`, falling back to synthetic ones.
///
/// Always returns exactly [`SAMPLE_COUNT`] images of
/// [`SAMPLE_SIZE`]x[`SAMPLE_SIZE`] pixels. Load failures are never surfaced.
pub fn load_samples(dir: &Path) -> Vec<Sample> {
    (1..=SAMPLE_COUNT)
        .map(|n| {
            let id = SampleId(n);
            let path = dir.join(id.file_name());

            let (origin, image) = match image::open(&path) {
                Ok(img) => (Origin::Loaded, img.into_rgb8()),
                Err(e) => {
                    tracing::warn!(
                        "Image {} not found ({}), creating sample image",
                        path.display(),
                        e
                    );
                    (Origin::Synthesized, synthesize(id))
                }
            };

            Sample {
                id,
                origin,
                image: fit(image),
            }
        })
        .collect()
}

/// Resize to the common sample size
fn fit(image: RgbImage) -> RgbImage {
    if image.dimensions() == (SAMPLE_SIZE, SAMPLE_SIZE) {
        return image;
    }
    image::imageops::resize(&image, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle)
}

/// Deterministic placeholder for a sample id
pub fn synthesize(id: SampleId) -> RgbImage {
    match id.0 {
        1 => gradient(),
        2 => checkerboard(),
        _ => circles(),
    }
}

/// Red increases left to right, green top to bottom
fn gradient() -> RgbImage {
    let last = SAMPLE_SIZE - 1;
    RgbImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, y| {
        Rgb([(x * 255 / last) as u8, (y * 255 / last) as u8, 0])
    })
}

/// 8x8 grayscale checkerboard
fn checkerboard() -> RgbImage {
    let last = SAMPLE_SIZE - 1;
    RgbImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, y| {
        let cell = x * 7 / last + y * 7 / last;
        let v = if cell % 2 == 1 { 255 } else { 0 };
        Rgb([v, v, v])
    })
}

/// Red, green and blue filled discs on black
fn circles() -> RgbImage {
    let mut img = RgbImage::new(SAMPLE_SIZE, SAMPLE_SIZE);
    let center = (SAMPLE_SIZE as i32 / 2, SAMPLE_SIZE as i32 / 2);
    draw_filled_circle_mut(&mut img, center, 200, Rgb([255, 0, 0]));
    draw_filled_circle_mut(&mut img, center, 150, Rgb([0, 255, 0]));
    draw_filled_circle_mut(&mut img, center, 100, Rgb([0, 0, 255]));
    img
}
