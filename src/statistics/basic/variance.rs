use num_traits::{Float, FromPrimitive};

use crate::statistics::Statistic;
use crate::statistics::mean::{Mean, kahan_sum};

/// Variance about the mean, dividing by `n - ddof`.
#[derive(Debug, Clone, Copy)]
pub struct Variance {
    /// Delta degrees of freedom subtracted from `n`.
    pub ddof: usize,
}

impl Variance {
    /// `ddof = 0` gives the population variance, `ddof = 1` (the default) the
    /// unbiased sample variance.
    pub fn new(ddof: usize) -> Self {
        Variance { ddof }
    }
}

impl Default for Variance {
    fn default() -> Self {
        Variance { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for Variance
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    /// NaN unless there are more than `ddof` values.
    fn compute(&self, data: &D) -> T {
        let slice = data.as_ref();
        let dof = slice.len().checked_sub(self.ddof).filter(|&d| d > 0);

        match dof.and_then(T::from_usize) {
            Some(dof) => {
                let mean = Mean::of(slice);
                kahan_sum(slice.iter().map(|&x| (x - mean) * (x - mean))) / dof
            }
            None => T::nan(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sample_and_population_variance() {
        let data = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let population: f64 = Variance::new(0).compute(&data);
        let sample: f64 = Variance::default().compute(&data);
        assert_abs_diff_eq!(population, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sample, 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn undefined_without_enough_points() {
        let v: f64 = Variance::default().compute(&[1.0_f64]);
        assert!(v.is_nan());
    }
}
