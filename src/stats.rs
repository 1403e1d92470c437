// Moments of one side of a histogram split.
//
// `bins` yields `(position, density)` pairs and `mass` is the total density
// of the group. An empty group with positive mass has zero mean and variance;
// a zero mass yields NaN, which callers treat as an invalid split.
pub fn group_moments<I>(bins: I, mass: f64) -> (f64, f64)
where
    I: Iterator<Item = (f64, f64)> + Clone,
{
    let mean = bins.clone().map(|(x, p)| x * p).sum::<f64>() / mass;
    let variance = bins.map(|(x, p)| (x - mean).powi(2) * p).sum::<f64>() / mass;
    (mean, variance)
}

// Within-class variance of a two-group split, each group's variance weighted
// by its mass.
pub fn within_class_variance(v1: f64, q1: f64, v2: f64, q2: f64) -> f64 {
    v1 * q1 + v2 * q2
}
