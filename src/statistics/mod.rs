/// A scalar (or compound) summary computed from some data `D`.
pub trait Statistic<D, T> {
    /// Evaluates the statistic on `data`.
    fn compute(&self, data: &D) -> T;
}

mod mean;
mod basic;
mod cdf;
mod quantile;
mod ci;

pub use mean::{Mean, MeanDifference};
pub use basic::*;
pub use cdf::{CDF, EmpiricalCDF};
pub use quantile::{Quantile, QuantileInterval};
pub use ci::{Interval, is_significant, percentile_interval};
pub(crate) use ci::check_confidence;

// ===== 2-tuple: evaluate two statistics on the same data =====
impl<D, T1, T2, S1, S2> Statistic<D, (T1, T2)> for (S1, S2)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
{
    #[inline]
    fn compute(&self, data: &D) -> (T1, T2) {
        (self.0.compute(data), self.1.compute(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tuple_computes_both_components() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0];
        let (mean, var): (f64, f64) = (Mean, Variance::default()).compute(&data);
        assert_abs_diff_eq!(mean, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(var, 5.0 / 3.0, epsilon = 1e-12);
    }
}
