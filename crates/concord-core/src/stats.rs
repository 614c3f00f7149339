//! Descriptive statistics primitives over grade score arrays
//!
//! Population variance (divisor N, not N-1) is used throughout: the grades
//! on a note are the whole population of interest, not a sample.

/// Arithmetic mean of the scores.
///
/// Callers guarantee a non-empty slice; the reliability analyzer never
/// reaches this with fewer than two scores.
pub fn mean(scores: &[f64]) -> f64 {
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Population variance of the scores (divisor = N)
pub fn population_variance(scores: &[f64]) -> f64 {
    let avg = mean(scores);
    scores.iter().map(|s| (s - avg) * (s - avg)).sum::<f64>() / scores.len() as f64
}

/// Population standard deviation of the scores
pub fn std_deviation(scores: &[f64]) -> f64 {
    population_variance(scores).sqrt()
}
