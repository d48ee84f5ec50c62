use super::Statistic;
use crate::error::{Error, Result};
use num_traits::Float;
use std::cmp::Ordering;

/// Empirical Cumulative Distribution Function (ECDF).
///
/// Represents the step function: Fₙ(x) = (1/n) * Σᵢ I(Xᵢ ≤ x)
///
/// Holds the observations in ascending order; order statistics used by
/// [`Quantile`](super::Quantile) are read straight off [`points`](Self::points).
#[derive(Debug, Clone)]
pub struct EmpiricalCDF<T> {
    sorted: Vec<T>,
}

impl<T> EmpiricalCDF<T> {
    /// Number of observations.
    #[inline]
    pub fn n(&self) -> usize {
        self.sorted.len()
    }

    /// Observations, ascending.
    #[inline]
    pub fn points(&self) -> &[T] {
        &self.sorted
    }

    /// Same as [`n`](Self::n).
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// True for an ECDF of no observations.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

impl<T> EmpiricalCDF<T>
where
    T: Float + Copy,
{
    /// Creates an ECDF from a float slice.
    ///
    /// NaN has no position in the order statistics, so a slice containing one
    /// is rejected with [`Error::InvalidArgument`] rather than filtered.
    /// Infinite values sort as `-∞ < finite < +∞`.
    pub fn from_float_slice(data: &[T]) -> Result<Self> {
        if data.iter().any(|x| x.is_nan()) {
            return Err(Error::invalid("distribution contains NaN values"));
        }

        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Ok(Self { sorted })
    }

    /// Evaluates the ECDF at `x`.
    ///
    /// # Returns
    /// - `f64::NAN` if `x` is NaN or the ECDF is empty
    /// - Otherwise: proportion of values ≤ `x`
    #[inline]
    pub fn eval_float(&self, x: &T) -> f64 {
        if x.is_nan() || self.sorted.is_empty() {
            return f64::NAN;
        }
        self.count_leq(x) as f64 / self.sorted.len() as f64
    }

    /// Proportion of values inside the closed range `[lower, upper]`.
    pub fn mass_between(&self, lower: &T, upper: &T) -> f64 {
        if self.sorted.is_empty() {
            return f64::NAN;
        }
        let below = self.sorted.partition_point(|v| v < lower);
        let inside = self.count_leq(upper).saturating_sub(below);
        inside as f64 / self.sorted.len() as f64
    }

    #[inline]
    fn count_leq(&self, x: &T) -> usize {
        self.sorted.partition_point(|v| v <= x)
    }
}

/// ECDF statistic constructor.
///
/// Unlike [`EmpiricalCDF::from_float_slice`] this cannot report an error, so
/// NaN entries are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CDF;

impl<D, T> Statistic<D, EmpiricalCDF<T>> for CDF
where
    D: AsRef<[T]>,
    T: Float + Copy,
{
    #[inline]
    fn compute(&self, data: &D) -> EmpiricalCDF<T> {
        let mut sorted: Vec<T> = data.as_ref().iter().copied().filter(|x| !x.is_nan()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        EmpiricalCDF { sorted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sorts_points_ascending() {
        let ecdf = EmpiricalCDF::from_float_slice(&[3.0, -1.0, 2.0, 2.0]).unwrap();
        assert_eq!(ecdf.points(), &[-1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_nan() {
        assert!(EmpiricalCDF::from_float_slice(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn eval_counts_ties() {
        let ecdf = EmpiricalCDF::from_float_slice(&[1.0, 2.0, 2.0, 4.0]).unwrap();
        assert_abs_diff_eq!(ecdf.eval_float(&0.5), 0.0);
        assert_abs_diff_eq!(ecdf.eval_float(&2.0), 0.75);
        assert_abs_diff_eq!(ecdf.eval_float(&10.0), 1.0);
        assert!(ecdf.eval_float(&f64::NAN).is_nan());
    }

    #[test]
    fn mass_between_is_closed_on_both_ends() {
        let ecdf = EmpiricalCDF::from_float_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_abs_diff_eq!(ecdf.mass_between(&2.0, &4.0), 0.6);
        assert_abs_diff_eq!(ecdf.mass_between(&6.0, &7.0), 0.0);
    }

    #[test]
    fn cdf_statistic_drops_nan() {
        let ecdf: EmpiricalCDF<f64> = CDF.compute(&vec![2.0, f64::NAN, 1.0]);
        assert_eq!(ecdf.n(), 2);
    }
}
