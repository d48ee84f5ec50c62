use std::fmt;
use std::ops::Sub;

use num_traits::{Float, FromPrimitive, NumOps, One};

use super::{EmpiricalCDF, QuantileInterval, Statistic};
use crate::error::{Error, Result};

/// Statistical interval with optional estimate and confidence level.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Interval<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
    /// Point estimate the interval was built around.
    pub estimate: Option<T>,
    /// Nominal coverage, e.g. `0.95`.
    pub confidence: Option<f64>,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Create asymmetric interval.
    #[inline]
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper, estimate: None, confidence: None }
    }

    /// Fluent builder: attach point estimate.
    #[must_use]
    pub fn estimate(mut self, estimate: T) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Fluent builder: attach confidence level (0.0 < level < 1.0).
    #[must_use]
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// `(lower, upper)`
    #[inline]
    pub const fn bounds(&self) -> (T, T) {
        (self.lower, self.upper)
    }

    /// Check if value lies within `[lower, upper]` (inclusive).
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.lower <= *value && *value <= self.upper
    }

    /// True iff `value` lies strictly outside `[lower, upper]`.
    #[inline]
    pub fn excludes(&self, value: &T) -> bool {
        !self.contains(value)
    }

    /// Interval width: `upper - lower`.
    #[inline]
    pub fn width(&self) -> T
    where
        T: Sub<Output = T>,
    {
        self.upper - self.lower
    }

    /// Midpoint: `(lower + upper) / 2`.
    #[inline]
    pub fn midpoint(&self) -> T
    where
        T: NumOps + One,
    {
        (self.lower + self.upper) / (T::one() + T::one())
    }

    /// Basic validity check.
    #[inline]
    pub fn is_valid(&self) -> bool {
        if self.lower > self.upper {
            return false;
        }
        if let Some(est) = self.estimate {
            if est < self.lower || est > self.upper {
                return false;
            }
        }
        self.confidence.is_none_or(|c| c > 0.0 && c < 1.0)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(est) = &self.estimate {
            write!(f, "{est} ∈ ")?;
        }
        write!(f, "[{}, {}]", self.lower, self.upper)?;
        if let Some(conf) = self.confidence {
            write!(f, " with {conf:.2}")?;
        }
        Ok(())
    }
}

pub(crate) fn check_confidence(confidence_level: f64) -> Result<()> {
    if confidence_level > 0.0 && confidence_level < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "confidence level must lie strictly between 0 and 1, got {confidence_level}"
        )))
    }
}

/// Two-sided percentile confidence interval of a bootstrap distribution.
///
/// With `α = 1 − confidence_level` the bounds are the `α/2` and `1 − α/2`
/// quantiles of `distribution`, interpolated linearly between order
/// statistics (see [`Quantile`](super::Quantile)).
///
/// # Errors
/// [`Error::InvalidArgument`] when `distribution` is empty or contains NaN,
/// or when `confidence_level ∉ (0, 1)`.
pub fn percentile_interval<T>(distribution: &[T], confidence_level: f64) -> Result<Interval<T>>
where
    T: Float + FromPrimitive,
{
    check_confidence(confidence_level)?;
    if distribution.is_empty() {
        return Err(Error::invalid("bootstrap distribution must not be empty"));
    }

    let ecdf = EmpiricalCDF::from_float_slice(distribution)?;
    let (lower, upper) = QuantileInterval::percentile(confidence_level).compute(&ecdf);

    Ok(Interval::new(lower, upper).confidence(confidence_level))
}

/// Decides significance against `null_value`.
///
/// Returns `true` iff `null_value` lies strictly outside the closed interval
/// `[lower, upper]`; touching an endpoint is not significant.
#[inline]
pub fn is_significant(lower: f64, upper: f64, null_value: f64) -> bool {
    Interval::new(lower, upper).excludes(&null_value)
}
