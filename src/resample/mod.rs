//! Resampling schemes and the bootstrap entry points.
//!
//! [`resample_mean`] and [`resample_difference`] build the empirical sampling
//! distribution of a mean, or of a difference of two means, from a single
//! explicitly seeded generator owned by the call. Nothing here touches
//! process-wide random state, so independent calls can run on separate
//! threads without disturbing each other's streams.

mod bootstrap;
mod distribution;

pub use bootstrap::{Bootstrap, BootstrapIter, PairedBootstrapIter};
pub use distribution::BootstrapDistribution;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{Error, Result};
use crate::{DEFAULT_ITERATIONS, Mean, MeanDifference, Sample, Statistic};

/// A resampling scheme: produces a stream of resampled versions of `T`.
pub trait Re<T> {
    /// One resampled value.
    type Item;
    /// Resamples of `t`, as many as the caller takes.
    fn re(&self, t: &T) -> impl Iterator<Item = Self::Item>;
}

/// How many bootstrap rounds to run and how to seed the generator.
///
/// With `seed: Some(_)` every call is fully reproducible; with `None` each call
/// draws fresh entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Bootstrap rounds; must be positive.
    pub iterations: usize,
    /// Generator seed, or `None` for system entropy.
    pub seed: Option<u64>,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl ResampleConfig {
    /// `iterations` rounds seeded from entropy.
    pub fn new(iterations: usize) -> Self {
        Self { iterations, seed: None }
    }

    /// Replaces the round count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Makes every call reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A fresh generator for one call.
    pub fn rng(&self) -> Xoshiro256PlusPlus {
        match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Bootstrap distribution of the mean of `sample`.
    pub fn resample_mean(&self, sample: &Sample<f64>) -> Result<BootstrapDistribution> {
        resample_mean(sample, self.iterations, self.seed)
    }

    /// Bootstrap distribution of `mean(a) − mean(b)`.
    pub fn resample_difference(&self, a: &Sample<f64>, b: &Sample<f64>) -> Result<BootstrapDistribution> {
        resample_difference(a, b, self.iterations, self.seed)
    }
}

pub(crate) fn check_iterations(iterations: usize) -> Result<()> {
    if iterations == 0 {
        return Err(Error::invalid("iterations must be a positive integer"));
    }
    Ok(())
}

/// Bootstrap distribution of the sample mean.
///
/// Runs `iterations` rounds; each draws `sample.len()` values with replacement
/// and records their mean. All draws come from one generator seeded from
/// `seed`, or from system entropy when `seed` is `None`.
///
/// # Errors
/// [`Error::InvalidArgument`] if `sample` is empty or `iterations == 0`.
pub fn resample_mean(sample: &Sample<f64>, iterations: usize, seed: Option<u64>) -> Result<BootstrapDistribution> {
    if sample.is_empty() {
        return Err(Error::invalid("sample must not be empty"));
    }
    check_iterations(iterations)?;

    let config = ResampleConfig { iterations, seed };
    let distribution: BootstrapDistribution = Bootstrap::new(config.rng())
        .re(sample)
        .take(iterations)
        .map(|resample| -> f64 { Mean.compute(&resample) })
        .collect();

    Ok(distribution)
}

/// Bootstrap distribution of the difference of means `mean(a) − mean(b)`.
///
/// Each round resamples `a` (size `a.len()`) and then `b` (size `b.len()`)
/// independently, consuming one shared generator stream.
///
/// # Errors
/// [`Error::InvalidArgument`] naming the empty side, or if `iterations == 0`.
pub fn resample_difference(
    sample_a: &Sample<f64>,
    sample_b: &Sample<f64>,
    iterations: usize,
    seed: Option<u64>,
) -> Result<BootstrapDistribution> {
    if sample_a.is_empty() {
        return Err(Error::invalid("sample_a must not be empty"));
    }
    if sample_b.is_empty() {
        return Err(Error::invalid("sample_b must not be empty"));
    }
    check_iterations(iterations)?;

    let config = ResampleConfig { iterations, seed };
    let distribution: BootstrapDistribution = Bootstrap::new(config.rng())
        .pairs(sample_a, sample_b)
        .take(iterations)
        .map(|resampled| -> f64 { MeanDifference.compute(&resampled) })
        .collect();

    Ok(distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Variance, is_significant, percentile_interval};
    use approx::assert_abs_diff_eq;

    fn log_sales() -> Sample {
        Sample::new(vec![
            0.039, 0.182, 0.571, 0.113, 0.693, 0.262, 1.411, 0.095, 0.405, 0.833, 0.01, 0.336,
        ])
    }

    #[test]
    fn mean_distribution_has_requested_length() {
        for iterations in [1, 7, 1000] {
            let dist = resample_mean(&log_sales(), iterations, Some(0)).unwrap();
            assert_eq!(dist.len(), iterations);
            assert!(dist.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn mean_distribution_is_centered_on_sample_mean() {
        let sample = log_sales();
        let observed: f64 = Mean.compute(&sample);
        let dist = resample_mean(&sample, 1000, Some(123)).unwrap();
        assert_abs_diff_eq!(dist.mean(), observed, epsilon = 0.05);
    }

    #[test]
    fn same_seed_reproduces_mean_distribution() {
        let a = resample_mean(&log_sales(), 500, Some(42)).unwrap();
        let b = resample_mean(&log_sales(), 500, Some(42)).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn different_seeds_differ() {
        let a = resample_mean(&log_sales(), 100, Some(1)).unwrap();
        let b = resample_mean(&log_sales(), 100, Some(2)).unwrap();
        assert_ne!(a.values(), b.values());
    }

    #[test]
    fn unseeded_calls_draw_fresh_entropy() {
        let a = resample_mean(&log_sales(), 100, None).unwrap();
        let b = resample_mean(&log_sales(), 100, None).unwrap();
        assert_ne!(a.values(), b.values());
    }

    #[test]
    fn single_observation_has_zero_spread() {
        let dist = resample_mean(&Sample::new(vec![3.5]), 100, Some(9)).unwrap();
        assert_eq!(dist.len(), 100);
        assert!(dist.iter().all(|x| x.to_bits() == 3.5_f64.to_bits()));
    }

    #[test]
    fn small_sample_stays_within_its_range() {
        let dist = resample_mean(&Sample::new(vec![1.0, 2.0, 3.0]), 100, Some(4)).unwrap();
        assert!(dist.iter().all(|x| (1.0..=3.0).contains(x)));
        assert!(dist.mean() > 1.5 && dist.mean() < 2.5);
    }

    #[test]
    fn mean_rejects_invalid_arguments() {
        let empty = resample_mean(&Sample::default(), 100, None).unwrap_err();
        assert!(matches!(empty, Error::InvalidArgument(_)));

        let zero = resample_mean(&log_sales(), 0, None).unwrap_err();
        assert!(matches!(zero, Error::InvalidArgument(_)));
    }

    #[test]
    fn difference_has_requested_length_and_sign() {
        let a = Sample::new(vec![3.0, 3.2, 2.9, 3.1, 3.3, 2.8]);
        let b = Sample::new(vec![1.0, 1.2, 0.9, 1.1]);
        let dist = resample_difference(&a, &b, 1000, Some(8)).unwrap();
        assert_eq!(dist.len(), 1000);
        assert!(dist.iter().all(|x| x.is_finite()));
        assert!(dist.mean() > 0.0);
    }

    #[test]
    fn same_seed_reproduces_difference_distribution() {
        let a = log_sales();
        let b = Sample::new(vec![0.2, 0.4, 0.1, 0.9, 0.3]);
        let first = resample_difference(&a, &b, 300, Some(42)).unwrap();
        let second = resample_difference(&a, &b, 300, Some(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn self_difference_is_centered_on_zero() {
        let s = log_sales();
        let dist = resample_difference(&s, &s, 1000, Some(42)).unwrap();
        assert!(dist.mean().abs() < 0.1, "mean {}", dist.mean());
        let variance: f64 = Variance::default().compute(&dist);
        assert!(variance > 0.0);
    }

    #[test]
    fn difference_names_the_empty_side() {
        let s = log_sales();
        let err = resample_difference(&Sample::default(), &s, 10, None).unwrap_err();
        assert!(err.to_string().contains("sample_a"), "{err}");

        let err = resample_difference(&s, &Sample::default(), 10, None).unwrap_err();
        assert!(err.to_string().contains("sample_b"), "{err}");

        let err = resample_difference(&s, &s, 0, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn config_methods_match_free_functions() {
        let config = ResampleConfig::default().with_iterations(250).with_seed(5);
        let s = log_sales();
        assert_eq!(config.resample_mean(&s).unwrap(), resample_mean(&s, 250, Some(5)).unwrap());
        assert_eq!(ResampleConfig::default().iterations, 10_000);
        assert_eq!(ResampleConfig::default().seed, None);
    }

    #[test]
    fn two_genre_end_to_end() {
        let a = Sample::new(vec![3.1, 2.9, 3.0, 3.2, 2.8]);
        let b = Sample::new(vec![2.0, 2.1, 1.9]);

        let observed: f64 = MeanDifference.compute(&(a.clone(), b.clone()));
        assert_abs_diff_eq!(observed, 1.0, epsilon = 1e-12);

        let dist = resample_difference(&a, &b, 5000, Some(1)).unwrap();
        assert_eq!(dist.len(), 5000);

        let ci = percentile_interval(dist.values(), 0.95).unwrap();
        assert!(ci.excludes(&0.0));
        assert!(is_significant(ci.lower, ci.upper, 0.0));
    }
}
