use crate::error::{Error, Result};
use crate::statistics::Statistic;

/// An ordered batch of observations, e.g. the log-sales of one genre in one region.
///
/// Order carries no meaning for any statistic computed here. Construction does
/// not reject an empty batch: the resampling entry points do, so the error is
/// reported where the sample is consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample<T = f64> {
    /// Observations in input order.
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a sample, failing with [`Error::InvalidArgument`] when `data` is empty.
    pub fn non_empty(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::invalid("sample must contain at least one observation"));
        }
        Ok(Self { data })
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Estimate a statistic from the sample data
    pub fn estimate<Output>(&self, statistic: impl Statistic<Self, Output>) -> Output {
        statistic.compute(self)
    }
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T> From<Vec<T>> for Sample<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
