//! Applying a threshold boundary to samples and grayscale images.

use image::{GrayImage, Luma};

use crate::error::Result;
use crate::geometry::{Corners, Point};
use crate::otsu::{self, Threshold, ThresholdParams};

/// Foreground mask of `samples`: `true` for values strictly below `boundary`.
pub fn binarize_samples(samples: &[f64], boundary: f64) -> Vec<bool> {
    samples.iter().map(|&v| v < boundary).collect()
}

/// Black (0) for pixels below `boundary`, white (255) for the rest.
pub fn binarize_image(gray_img: &GrayImage, boundary: f64) -> GrayImage {
    let mut binary = GrayImage::new(gray_img.width(), gray_img.height());
    for (x, y, pixel) in gray_img.enumerate_pixels() {
        let value = if (pixel[0] as f64) < boundary { 0 } else { 255 };
        binary.put_pixel(x, y, Luma([value]));
    }
    binary
}

/// Intensities of the pixels whose coordinates fall inside `region`, row by
/// row. The region is clipped to the image.
pub fn region_samples(gray_img: &GrayImage, region: &Corners) -> Vec<f64> {
    let (width, height) = gray_img.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let x0 = region.top_left.x.ceil().max(0.0);
    let y0 = region.top_left.y.ceil().max(0.0);
    let x1 = region.top_right.x.floor().min((width - 1) as f64);
    let y1 = region.bottom_right.y.floor().min((height - 1) as f64);
    if x1 < x0 || y1 < y0 {
        return Vec::new();
    }

    let mut samples = Vec::with_capacity(((x1 - x0 + 1.0) * (y1 - y0 + 1.0)) as usize);
    for y in y0 as u32..=y1 as u32 {
        for x in x0 as u32..=x1 as u32 {
            samples.push(gray_img.get_pixel(x, y)[0] as f64);
        }
    }
    samples
}

/// Threshold a whole image and return the split with its binarized copy.
pub fn threshold_image(
    gray_img: &GrayImage,
    params: &ThresholdParams,
) -> Result<(Threshold, GrayImage)> {
    let (width, height) = gray_img.dimensions();
    let full = Corners {
        top_left: Point::new(0.0, 0.0),
        top_right: Point::new(width as f64, 0.0),
        bottom_right: Point::new(width as f64, height as f64),
        bottom_left: Point::new(0.0, height as f64),
    };
    let samples = region_samples(gray_img, &full);
    let threshold = otsu::find_threshold_with(&samples, params)?;
    Ok((threshold, binarize_image(gray_img, threshold.boundary)))
}
