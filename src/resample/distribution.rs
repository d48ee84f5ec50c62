use crate::error::Result;
use crate::{Interval, Mean, Statistic, Variance, percentile_interval};

/// One bootstrap statistic per iteration, in generation order.
///
/// Immutable once built; consumed by interval estimation and by whatever
/// renders the resampling histogram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapDistribution {
    values: Vec<f64>,
}

impl BootstrapDistribution {
    /// Replicates in generation order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Takes the replicates out.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of replicates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a distribution with no replicates.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates the replicates.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Mean of the bootstrap replicates.
    pub fn mean(&self) -> f64 {
        Mean.compute(self)
    }

    /// Bootstrap standard error: standard deviation of the replicates (ddof = 1).
    pub fn standard_error(&self) -> f64 {
        let variance: f64 = Variance::default().compute(self);
        variance.sqrt()
    }

    /// Percentile confidence interval at `confidence_level`.
    pub fn percentile_interval(&self, confidence_level: f64) -> Result<Interval<f64>> {
        percentile_interval(&self.values, confidence_level)
    }
}

impl FromIterator<f64> for BootstrapDistribution {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<f64>> for BootstrapDistribution {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl AsRef<[f64]> for BootstrapDistribution {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl<'a> IntoIterator for &'a BootstrapDistribution {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn summary_statistics() {
        let dist = BootstrapDistribution::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_abs_diff_eq!(dist.mean(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dist.standard_error(), 2.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn interval_matches_free_function() {
        let dist: BootstrapDistribution = (0..100).map(f64::from).collect();
        let a = dist.percentile_interval(0.9).unwrap();
        let b = percentile_interval(dist.values(), 0.9).unwrap();
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.lower, 4.95, epsilon = 1e-9);
        assert_abs_diff_eq!(a.upper, 94.05, epsilon = 1e-9);
    }

    #[test]
    fn empty_distribution_has_no_interval() {
        assert!(BootstrapDistribution::default().percentile_interval(0.95).is_err());
    }
}
