use image::RgbImage;
use imageproc::filter::median_filter;

/// Per-channel median over a `window x window` neighbourhood
/// `window` must be odd; callers go through `FilterSpec::median`
pub fn apply(image: &RgbImage, window: u32) -> RgbImage {
    let radius = window / 2;
    median_filter(image, radius, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_median_preserves_shape() {
        let img = RgbImage::from_fn(512, 512, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));
        for window in [3, 5, 7] {
            assert_eq!(apply(&img, window).dimensions(), (512, 512));
        }
    }

    #[test]
    fn test_median_removes_isolated_impulses() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([128, 128, 128]));
        img.put_pixel(5, 5, Rgb([0, 0, 0]));
        img.put_pixel(2, 7, Rgb([255, 255, 255]));

        let result = apply(&img, 3);
        assert!(result.pixels().all(|p| p.0 == [128, 128, 128]));
    }
}
