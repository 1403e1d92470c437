//! Equal-width histogram over a set of real-valued samples.
//!
//! The bins span `[min, max]` of the samples. A sample equal to the upper
//! edge is counted in the last bin. When every sample has the same value the
//! range is widened to `[v - 0.5, v + 0.5]` so that all bins keep a positive
//! width.

use crate::error::{Result, ThresholdError};

/// Binned counts of a sample set together with its normalized densities and
/// cumulative density function.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<u64>,
    edges: Vec<f64>,
    density: Vec<f64>,
    cdf: Vec<f64>,
    total: usize,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins.
    ///
    /// Fails on an empty sample set, on a NaN or infinite sample, and when
    /// fewer than two bins are requested.
    pub fn from_samples(samples: &[f64], bins: usize) -> Result<Self> {
        if bins < 2 {
            return Err(ThresholdError::InvalidParameter(format!(
                "at least 2 bins are required, got {bins}"
            )));
        }
        if samples.is_empty() {
            return Err(ThresholdError::EmptySamples);
        }

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (index, &value) in samples.iter().enumerate() {
            if !value.is_finite() {
                return Err(ThresholdError::NonFiniteSample { index, value });
            }
            lo = lo.min(value);
            hi = hi.max(value);
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let mut edges: Vec<f64> = (0..bins).map(|i| edge(lo, hi, i, bins)).collect();
        edges.push(hi);

        let mut counts = vec![0u64; bins];
        for &value in samples {
            counts[locate(&edges, value)] += 1;
        }

        let total = samples.len();
        let density: Vec<f64> = counts
            .iter()
            .map(|&count| count as f64 / total as f64)
            .collect();
        let cdf: Vec<f64> = density
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p;
                Some(*acc)
            })
            .collect();

        Ok(Self {
            counts,
            edges,
            density,
            cdf,
            total,
        })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples the histogram was built from.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Per-bin sample counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bin edges, `bins() + 1` values from the lowest to the highest sample.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin count divided by the total sample count.
    pub fn densities(&self) -> &[f64] {
        &self.density
    }

    /// Running sum of the densities.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Midpoint of bin `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.bins()`.
    pub fn bin_center(&self, i: usize) -> f64 {
        0.5 * self.edges[i] + 0.5 * self.edges[i + 1]
    }

    /// Bin that `value` falls into, or `None` when it lies outside the
    /// histogram range.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let lo = self.edges[0];
        let hi = self.edges[self.bins()];
        if !(lo..=hi).contains(&value) {
            return None;
        }
        Some(locate(&self.edges, value))
    }
}

// Left edge of bin `i`. Finite samples can still span more than `f64::MAX`,
// in which case the edges are interpolated without forming `hi - lo`.
fn edge(lo: f64, hi: f64, i: usize, bins: usize) -> f64 {
    let span = hi - lo;
    if span.is_finite() {
        lo + span * i as f64 / bins as f64
    } else {
        let f = i as f64 / bins as f64;
        lo * (1.0 - f) + hi * f
    }
}

/// Index of the bin holding `value`, which must lie within the edge range.
fn locate(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let lo = edges[0];
    let hi = edges[bins];
    let span = hi - lo;
    let fraction = if span.is_finite() {
        (value - lo) / span
    } else {
        (0.5 * value - 0.5 * lo) / (0.5 * hi - 0.5 * lo)
    };
    let mut bin = (fraction * bins as f64) as usize;
    if bin >= bins {
        bin = bins - 1;
    }
    // Rounding in the scale factor can land one bin off the edge table.
    if bin > 0 && value < edges[bin] {
        bin -= 1;
    } else if bin + 1 < bins && value >= edges[bin + 1] {
        bin += 1;
    }
    bin
}
