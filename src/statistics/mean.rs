use num_traits::{Float, FromPrimitive};

use super::Statistic;
use crate::Sample;

/// Arithmetic mean with Kahan-compensated summation.
///
/// Bootstrap replicates are averaged tens of thousands of times over, so the
/// running sum carries a compensation term. An empty slice yields NaN.
#[derive(Clone, Copy, Default, Debug)]
pub struct Mean;

/// Compensated running sum of `values`.
pub(crate) fn kahan_sum<T: Float>(values: impl IntoIterator<Item = T>) -> T {
    let (sum, _) = values.into_iter().fold((T::zero(), T::zero()), |(sum, carry), x| {
        let y = x - carry;
        let t = sum + y;
        (t, (t - sum) - y)
    });
    sum
}

impl Mean {
    pub(crate) fn of<T: Float + FromPrimitive>(slice: &[T]) -> T {
        match T::from_usize(slice.len()) {
            Some(n) if !slice.is_empty() => kahan_sum(slice.iter().copied()) / n,
            _ => T::nan(),
        }
    }
}

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        Mean::of(data.as_ref())
    }
}

/// Difference of means between two groups: `mean(a) − mean(b)`.
#[derive(Clone, Copy, Default, Debug)]
pub struct MeanDifference;

impl<T> Statistic<(Sample<T>, Sample<T>), T> for MeanDifference
where
    T: Float + FromPrimitive,
{
    fn compute(&self, (a, b): &(Sample<T>, Sample<T>)) -> T {
        Mean::of(a.as_ref()) - Mean::of(b.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn empty_slice_returns_nan() {
        let mean_f32: f32 = Mean.compute(&Vec::<f32>::new());
        assert!(mean_f32.is_nan(), "Empty slice must return NaN (got: {mean_f32})");

        let mean_f64: f64 = Mean.compute(&Vec::<f64>::new());
        assert!(mean_f64.is_nan(), "Empty slice must return NaN (got: {mean_f64})");
    }

    #[test]
    fn single_element_is_returned_exactly() {
        let mean: f64 = Mean.compute(&[3.5_f64]);
        assert_eq!(mean.to_bits(), 3.5_f64.to_bits());
        let pi: f64 = Mean.compute(&[std::f64::consts::PI]);
        assert_abs_diff_eq!(pi, std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn exact_integer_means() {
        let m32: f32 = Mean.compute(&[1.0_f32, 2.0, 3.0, 4.0, 5.0]);
        let m64: f64 = Mean.compute(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]);
        assert_abs_diff_eq!(m32, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m64, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn kahan_reduces_accumulation_error() {
        // Summing 0.1 × 10,000 exposes naive summation drift
        let n = 10_000;
        let data: Vec<f32> = vec![0.1_f32; n];
        let expected = 0.1_f32;

        let kahan_mean: f32 = Mean.compute(&data);
        let naive_mean: f32 = data.iter().sum::<f32>() / (n as f32);

        let kahan_error = (kahan_mean - expected).abs();
        let naive_error = (naive_mean - expected).abs();
        assert!(
            kahan_error < naive_error * 0.5,
            "Kahan error ({kahan_error:.2e}) should be <50% of naive error ({naive_error:.2e})"
        );
        assert_abs_diff_eq!(kahan_mean, expected, epsilon = 5e-5);
    }

    #[test]
    fn maintains_precision_at_log_sales_scale() {
        let data: Vec<f64> = vec![0.0392_f64; 100_000];
        let mean: f64 = Mean.compute(&data);
        assert_relative_eq!(mean, 0.0392, max_relative = 1e-13);
    }

    #[test]
    fn difference_of_group_means() {
        let a = Sample::new(vec![3.1, 2.9, 3.0, 3.2, 2.8]);
        let b = Sample::new(vec![2.0, 2.1, 1.9]);
        let diff: f64 = MeanDifference.compute(&(a, b));
        assert_abs_diff_eq!(diff, 1.0, epsilon = 1e-12);
    }
}
