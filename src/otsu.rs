//! Otsu-style binary threshold selection.
//!
//! The samples are binned into an equal-width histogram and every split
//! between two adjacent bins is scored by the weighted within-class variance
//! of the two groups it produces. The split with the lowest score wins.

use log::{debug, warn};

use crate::error::Result;
use crate::histogram::Histogram;
use crate::stats;

/// Bin count used by [`find_threshold`].
pub const DEFAULT_BINS: usize = 50;

// Relative slack under which two split costs count as equal.
const TIE_TOLERANCE: f64 = 1e-12;

/// Position assigned to each bin when computing group means and variances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Bins are positioned at their centre; the left group holds bins
    /// `0..=t` and the boundary is the right edge of bin `t`. Equal-cost
    /// runs are resolved to their middle split.
    #[default]
    BinCenter,
    /// Legacy positional scheme: left bins `0..t` are weighted `1..=t`,
    /// right bins `t+1..` are weighted by their own index, bin `t` only
    /// counts towards the left mass, and the boundary is the left edge of
    /// bin `t`. The first strict minimum wins.
    BinIndex,
}

/// Threshold search configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdParams {
    /// Number of histogram bins, at least 2.
    pub bins: usize,
    pub weighting: Weighting,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            weighting: Weighting::default(),
        }
    }
}

/// Result of a threshold search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    /// Chosen split, always below the last bin.
    pub index: usize,
    /// Bin-edge value separating the two groups.
    pub boundary: f64,
    /// Weighted within-class variance of the chosen split, measured in
    /// squared bin widths, or `f64::INFINITY` when no split had two
    /// non-empty groups.
    pub cost: f64,
}

impl Threshold {
    /// True when every candidate split left one group empty, which happens
    /// when all samples share one value.
    pub fn is_degenerate(&self) -> bool {
        !self.cost.is_finite()
    }
}

/// Find the threshold of `samples` with the default configuration.
pub fn find_threshold(samples: &[f64]) -> Result<Threshold> {
    find_threshold_with(samples, &ThresholdParams::default())
}

/// Find the threshold of `samples` using `params`.
pub fn find_threshold_with(samples: &[f64], params: &ThresholdParams) -> Result<Threshold> {
    let hist = Histogram::from_samples(samples, params.bins)?;
    Ok(threshold_histogram(&hist, params.weighting))
}

/// Pick the split of a prebuilt histogram.
pub fn threshold_histogram(hist: &Histogram, weighting: Weighting) -> Threshold {
    let costs = split_costs(hist, weighting);
    let chosen = match weighting {
        Weighting::BinCenter => plateau_center(&costs),
        Weighting::BinIndex => first_minimum(&costs),
    };

    match chosen {
        Some(index) => {
            let threshold = Threshold {
                index,
                boundary: boundary(hist, weighting, index),
                cost: costs[index],
            };
            debug!(
                "split {} of {} at {:.6} (cost {:.6e})",
                threshold.index,
                costs.len(),
                threshold.boundary,
                threshold.cost
            );
            threshold
        }
        None => {
            let index = (hist.bins() - 1) / 2;
            warn!(
                "no split separates {} samples into two groups, using middle bin {}",
                hist.total(),
                index
            );
            Threshold {
                index,
                boundary: boundary(hist, weighting, index),
                cost: f64::INFINITY,
            }
        }
    }
}

/// Within-class variance of every candidate split `0..bins-1`.
///
/// Splits that leave a group without mass produce a non-finite value and
/// are reported as `f64::INFINITY`.
pub fn split_costs(hist: &Histogram, weighting: Weighting) -> Vec<f64> {
    (0..hist.bins() - 1)
        .map(|t| {
            let cost = match weighting {
                Weighting::BinCenter => center_cost(hist, t),
                Weighting::BinIndex => index_cost(hist, t),
            };
            if cost.is_finite() {
                cost
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

fn center_cost(hist: &Histogram, t: usize) -> f64 {
    let bins = hist.bins();
    let p = hist.densities();
    let cdf = hist.cdf();

    let q1 = cdf[t];
    let q2 = cdf[bins - 1] - q1;
    // Centres in bin widths from the lower edge, so the cost stays finite
    // for any finite sample range.
    let left = (0..=t).map(|i| (i as f64 + 0.5, p[i]));
    let right = (t + 1..bins).map(|i| (i as f64 + 0.5, p[i]));

    let (_, v1) = stats::group_moments(left, q1);
    let (_, v2) = stats::group_moments(right, q2);
    stats::within_class_variance(v1, q1, v2, q2)
}

fn index_cost(hist: &Histogram, t: usize) -> f64 {
    let bins = hist.bins();
    let p = hist.densities();
    let cdf = hist.cdf();

    let q1 = cdf[t];
    let q2 = cdf[bins - 1] - q1;
    let left = (0..t).map(|i| ((i + 1) as f64, p[i]));
    let right = (t + 1..bins).map(|i| (i as f64, p[i]));

    let (_, v1) = stats::group_moments(left, q1);
    let (_, v2) = stats::group_moments(right, q2);
    stats::within_class_variance(v1, q1, v2, q2)
}

fn boundary(hist: &Histogram, weighting: Weighting, index: usize) -> f64 {
    match weighting {
        Weighting::BinCenter => hist.edges()[index + 1],
        Weighting::BinIndex => hist.edges()[index],
    }
}

fn first_minimum(costs: &[f64]) -> Option<usize> {
    let mut best = f64::INFINITY;
    let mut chosen = None;
    for (t, &cost) in costs.iter().enumerate() {
        if cost < best {
            best = cost;
            chosen = Some(t);
        }
    }
    chosen
}

// Middle of the run of equal-cost splits that starts at the first minimum.
fn plateau_center(costs: &[f64]) -> Option<usize> {
    let best = costs.iter().copied().fold(f64::INFINITY, f64::min);
    if !best.is_finite() {
        return None;
    }
    let limit = best + TIE_TOLERANCE * best.abs();
    let first = costs.iter().position(|&cost| cost <= limit)?;
    let run = costs[first..]
        .iter()
        .take_while(|&&cost| cost <= limit)
        .count();
    Some(first + (run - 1) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_spikes_split_in_the_middle() {
        let mut samples = vec![0.0; 25];
        samples.extend(vec![100.0; 25]);

        let t = find_threshold(&samples).unwrap();
        assert_eq!(t.index, 24);
        assert_relative_eq!(t.boundary, 50.0);
        assert_relative_eq!(t.cost, 0.0);
    }

    #[test]
    fn test_unbalanced_clusters() {
        // Wide dark cluster, narrow bright one
        let mut samples: Vec<f64> = (0..200).map(|i| 20.0 + (i % 40) as f64).collect();
        samples.extend((0..50).map(|i| 200.0 + (i % 5) as f64));

        let t = find_threshold(&samples).unwrap();
        assert!(t.boundary > 59.0 && t.boundary < 200.0, "{t:?}");
        assert!(t.index < DEFAULT_BINS - 1);
    }

    #[test]
    fn test_degenerate_input() {
        let samples = vec![5.0; 50];
        let t = find_threshold(&samples).unwrap();

        assert!(t.is_degenerate());
        assert_eq!(t.index, 24);
        assert_relative_eq!(t.boundary, 5.0);
        assert!(!t.cost.is_nan());
    }

    #[test]
    fn test_single_sample() {
        let t = find_threshold(&[42.0]).unwrap();
        assert!(t.is_degenerate());
        assert!(t.index <= DEFAULT_BINS - 2);
    }

    #[test]
    fn test_split_costs_mark_empty_groups() {
        let samples = vec![1.0; 10];
        let hist = Histogram::from_samples(&samples, 10).unwrap();
        let costs = split_costs(&hist, Weighting::BinCenter);

        assert_eq!(costs.len(), 9);
        assert!(costs.iter().all(|&c| c == f64::INFINITY));
    }

    #[test]
    fn test_bin_index_weighting() {
        // Four bins of width 1 over [0, 4]: densities 0.5, 0, 0, 0.5
        let samples = [0.0, 0.5, 3.5, 4.0];
        let params = ThresholdParams {
            bins: 4,
            weighting: Weighting::BinIndex,
        };
        let hist = Histogram::from_samples(&samples, params.bins).unwrap();
        let costs = split_costs(&hist, params.weighting);

        // t = 0: left slice empty with mass 0.5, right bins weighted 1..=3
        // hold a single spike at position 3, so both variances vanish.
        assert_relative_eq!(costs[0], 0.0);
        // t = 1: left {pos 1: 0.5}, right {pos 2: 0, pos 3: 0.5}
        assert_relative_eq!(costs[1], 0.0);
        // t = 2: left {pos 1: 0.5, pos 2: 0}, right {pos 3: 0.5}
        assert_relative_eq!(costs[2], 0.0);

        let t = find_threshold_with(&samples, &params).unwrap();
        assert_eq!(t.index, 0);
        assert_relative_eq!(t.boundary, 0.0);
    }

    #[test]
    fn test_bin_index_costs_by_hand() {
        // One sample per bin over [0, 4]: densities 0.25 each
        let samples = [0.0, 1.5, 2.5, 4.0];
        let params = ThresholdParams {
            bins: 4,
            weighting: Weighting::BinIndex,
        };
        let hist = Histogram::from_samples(&samples, params.bins).unwrap();
        let costs = split_costs(&hist, params.weighting);

        // t = 0: q1 = 0.25, empty left slice; right {1, 2, 3} with q2 = 0.75,
        // mean 2, variance 2/3.
        assert_relative_eq!(costs[0], 0.5, epsilon = 1e-12);
        // t = 1: left {1} with q1 = 0.5, mean 0.5, variance 0.125;
        // right {2, 3} with q2 = 0.5, mean 2.5, variance 0.25.
        assert_relative_eq!(costs[1], 0.1875, epsilon = 1e-12);
        // t = 2: left {1, 2} with q1 = 0.75, mean 1, variance 1/3;
        // right {3} with q2 = 0.25.
        assert_relative_eq!(costs[2], 0.25, epsilon = 1e-12);

        let t = find_threshold_with(&samples, &params).unwrap();
        assert_eq!(t.index, 1);
        assert_relative_eq!(t.cost, 0.1875, epsilon = 1e-12);
        assert_relative_eq!(t.boundary, 1.0);
    }

    #[test]
    fn test_bin_center_costs_by_hand() {
        let samples = [0.0, 1.5, 2.5, 4.0];
        let hist = Histogram::from_samples(&samples, 4).unwrap();
        let costs = split_costs(&hist, Weighting::BinCenter);

        // t = 1: {0.5, 1.5} and {2.5, 3.5}, each variance 0.25 at mass 0.5
        assert_relative_eq!(costs[1], 0.25, epsilon = 1e-12);
        // t = 0: {0.5} and {1.5, 2.5, 3.5} with variance 2/3 at mass 0.75
        assert_relative_eq!(costs[0], 0.5, epsilon = 1e-12);
        // t = 2 mirrors t = 0
        assert_relative_eq!(costs[2], 0.5, epsilon = 1e-12);

        let t = threshold_histogram(&hist, Weighting::BinCenter);
        assert_eq!(t.index, 1);
        assert_relative_eq!(t.boundary, 2.0);
    }

    #[test]
    fn test_bin_index_prefers_lower_cost() {
        // Two loose groups over eight bins
        let samples = [0.2, 1.2, 1.4, 6.5, 7.5, 8.0];
        let params = ThresholdParams {
            bins: 8,
            weighting: Weighting::BinIndex,
        };
        let hist = Histogram::from_samples(&samples, params.bins).unwrap();
        let costs = split_costs(&hist, params.weighting);
        let best = costs.iter().copied().fold(f64::INFINITY, f64::min);

        let t = find_threshold_with(&samples, &params).unwrap();
        assert_eq!(t.cost, best);
        assert_eq!(costs.iter().position(|&c| c == best), Some(t.index));
        assert_relative_eq!(t.boundary, hist.edges()[t.index]);
    }

    #[test]
    fn test_plateau_center() {
        let inf = f64::INFINITY;
        assert_eq!(plateau_center(&[3.0, 1.0, 1.0, 1.0, 2.0]), Some(2));
        assert_eq!(plateau_center(&[3.0, 1.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(plateau_center(&[inf, 0.5, inf]), Some(1));
        assert_eq!(plateau_center(&[inf, inf]), None);
    }

    #[test]
    fn test_first_minimum() {
        assert_eq!(first_minimum(&[2.0, 1.0, 1.0]), Some(1));
        assert_eq!(first_minimum(&[f64::INFINITY]), None);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert!(find_threshold(&[]).is_err());
    }
}
