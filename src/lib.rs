//! Histogram-based binary thresholding and box geometry for OCR
//! preprocessing.
//!
//! [`find_threshold`] bins a set of intensity samples and picks the split
//! that minimizes the weighted within-class variance of the two groups.
//! The [`binarize`] helpers apply the resulting boundary to samples or to an
//! 8-bit grayscale image, and [`geometry`] covers the bounding boxes used to
//! select image regions.

pub mod binarize;
pub mod error;
pub mod geometry;
pub mod histogram;
pub mod otsu;
mod stats;

pub use binarize::{binarize_image, binarize_samples, region_samples, threshold_image};
pub use error::{Result, ThresholdError};
pub use geometry::{Corners, Point};
pub use histogram::Histogram;
pub use otsu::{
    find_threshold, find_threshold_with, split_costs, threshold_histogram, Threshold,
    ThresholdParams, Weighting, DEFAULT_BINS,
};
