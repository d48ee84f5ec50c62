use num_traits::{Float, FromPrimitive};

use super::Statistic;
use crate::EmpiricalCDF;

/// Quantile estimator with linear interpolation between order statistics.
///
/// For sorted values `x₀ ≤ … ≤ xₙ₋₁` the quantile at probability `p` is
/// ```text
/// h = p · (n − 1)
/// Q(p) = x⌊h⌋ + (h − ⌊h⌋) · (x⌈h⌉ − x⌊h⌋)
/// ```
/// This is R's type=7 definition, the default percentile in most numeric
/// libraries. An empty ECDF yields NaN.
#[derive(Debug, Clone, Copy)]
pub struct Quantile {
    p: f64,
}

impl Quantile {
    /// Creates a quantile estimator for probability `p ∈ [0, 1]`.
    #[inline]
    pub fn new(p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "Quantile p must be in [0,1]");
        Self { p }
    }

    /// Creates an estimator from a percentile in `[0, 100]`.
    #[inline]
    pub fn percentile(q: f64) -> Self {
        Self::new(q / 100.0)
    }

    /// Convenience constructor for median (p = 0.5).
    #[inline]
    pub fn median() -> Self {
        Self { p: 0.5 }
    }

    pub(crate) fn interpolate<T: Float + FromPrimitive>(&self, sorted: &[T]) -> T {
        let Some(last) = sorted.len().checked_sub(1) else {
            return T::nan();
        };

        let rank = self.p.clamp(0.0, 1.0) * last as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let (Some(&x_lo), Some(&x_hi)) = (sorted.get(lo), sorted.get(hi)) else {
            return T::nan();
        };

        let frac = T::from_f64(rank - lo as f64).unwrap_or_else(T::zero);
        x_lo + frac * (x_hi - x_lo)
    }
}

impl<T: Float + FromPrimitive> Statistic<EmpiricalCDF<T>, T> for Quantile {
    #[inline]
    fn compute(&self, ecdf: &EmpiricalCDF<T>) -> T {
        self.interpolate(ecdf.points())
    }
}

/// Two-sided quantile interval, returning `(Q(lower), Q(upper))`.
#[derive(Debug, Clone, Copy)]
pub struct QuantileInterval {
    lower: Quantile,
    upper: Quantile,
}

impl QuantileInterval {
    /// Creates interval estimator for `[lower, upper]` probabilities.
    #[inline]
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper);
        Self {
            lower: Quantile::new(lower),
            upper: Quantile::new(upper),
        }
    }

    /// Symmetric-tail interval: `α/2` and `1 − α/2` with `α = 1 − confidence`.
    #[inline]
    pub fn percentile(confidence: f64) -> Self {
        let alpha = 1.0 - confidence;
        Self::new(alpha / 2.0, 1.0 - alpha / 2.0)
    }
}

impl<T: Float + FromPrimitive> Statistic<EmpiricalCDF<T>, (T, T)> for QuantileInterval {
    #[inline]
    fn compute(&self, ecdf: &EmpiricalCDF<T>) -> (T, T) {
        let points = ecdf.points();
        (self.lower.interpolate(points), self.upper.interpolate(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ecdf(data: &[f64]) -> EmpiricalCDF<f64> {
        EmpiricalCDF::from_float_slice(data).unwrap()
    }

    #[test]
    fn interpolates_between_order_statistics() {
        let e = ecdf(&[4.0, 1.0, 3.0, 2.0]);
        // rank = 0.5 * 3 = 1.5 -> halfway between 2 and 3
        assert_abs_diff_eq!(Quantile::median().compute(&e), 2.5, epsilon = 1e-12);
        // rank = 0.25 * 3 = 0.75
        assert_abs_diff_eq!(Quantile::new(0.25).compute(&e), 1.75, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantile::percentile(100.0).compute(&e), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantile::new(0.0).compute(&e), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn matches_reference_percentiles() {
        // 2.5th / 97.5th type-7 percentiles of 1..=10
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let (lo, hi) = QuantileInterval::percentile(0.95).compute(&ecdf(&data));
        assert_abs_diff_eq!(lo, 1.225, epsilon = 1e-9);
        assert_abs_diff_eq!(hi, 9.775, epsilon = 1e-9);
    }

    #[test]
    fn single_point_is_every_quantile() {
        let e = ecdf(&[7.25]);
        assert_abs_diff_eq!(Quantile::new(0.01).compute(&e), 7.25);
        assert_abs_diff_eq!(Quantile::new(0.99).compute(&e), 7.25);
    }

    #[test]
    fn empty_ecdf_is_nan() {
        let e = ecdf(&[]);
        assert!(Quantile::median().compute(&e).is_nan());
    }
}
