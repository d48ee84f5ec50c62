//! Typed analysis records handed to the reporting layer, and the study
//! pipeline that produces them for every genre and genre pair in every region.

mod study;

pub use study::{Study, StudyConfig, StudyResults};

use std::fmt;

use crate::data::{Observations, Region};
use crate::error::Result;
use crate::statistics::check_confidence;
use crate::{BootstrapDistribution, Interval, Mean, ResampleConfig, Sample, Statistic, is_significant};

/// Bootstrap estimate of one genre's mean log-sales in one region.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanAnalysis {
    /// Genre label as it appears in the data.
    pub genre: String,
    /// Region the sample was drawn from.
    pub region: Region,
    /// Mean of the original sample.
    pub observed_mean: f64,
    /// Number of observations in the original sample.
    pub sample_size: usize,
    /// Bootstrapped means, one per round.
    pub distribution: BootstrapDistribution,
    /// Percentile interval carrying `observed_mean` as its estimate.
    pub interval: Interval<f64>,
}

impl MeanAnalysis {
    /// Bootstraps the mean of `sample`, labelled with `genre` and `region`.
    pub fn from_sample(
        genre: &str,
        region: Region,
        sample: &Sample<f64>,
        config: &ResampleConfig,
        confidence: f64,
    ) -> Result<Self> {
        check_confidence(confidence)?;
        let distribution = config.resample_mean(sample)?;
        let observed_mean: f64 = Mean.compute(sample);
        let interval = distribution.percentile_interval(confidence)?.estimate(observed_mean);

        Ok(Self {
            genre: genre.to_string(),
            region,
            observed_mean,
            sample_size: sample.len(),
            distribution,
            interval,
        })
    }

    /// Extracts `genre` from `observations` and bootstraps its mean.
    ///
    /// # Errors
    /// [`MissingData`](crate::Error::MissingData) when the genre has no rows,
    /// or any error of [`resample_mean`](crate::resample_mean) /
    /// [`percentile_interval`](crate::percentile_interval).
    pub fn run(observations: &Observations, genre: &str, config: &ResampleConfig, confidence: f64) -> Result<Self> {
        let sample = observations.sample_for(genre)?;
        Self::from_sample(genre, observations.region, &sample, config, confidence)
    }
}

/// An unordered comparison `a` vs `b`; differences are always `a − b`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenrePair {
    /// Minuend genre.
    pub a: String,
    /// Subtrahend genre.
    pub b: String,
}

impl GenrePair {
    /// The comparison `a − b`.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self { a: a.into(), b: b.into() }
    }
}

impl fmt::Display for GenrePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.a, self.b)
    }
}

/// Bootstrap estimate of the mean log-sales difference between two genres.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceAnalysis {
    /// Genres compared.
    pub pair: GenrePair,
    /// Region both samples were drawn from.
    pub region: Region,
    /// Observed mean of genre `a`.
    pub mean_a: f64,
    /// Observed mean of genre `b`.
    pub mean_b: f64,
    /// `mean_a − mean_b`
    pub observed_difference: f64,
    /// Observations of genre `a`.
    pub sample_size_a: usize,
    /// Observations of genre `b`.
    pub sample_size_b: usize,
    /// Bootstrapped differences, one per round.
    pub distribution: BootstrapDistribution,
    /// Percentile interval carrying `observed_difference` as its estimate.
    pub interval: Interval<f64>,
    /// Whether `interval` excludes the null value the analysis was run against.
    pub significant: bool,
}

impl DifferenceAnalysis {
    /// Bootstraps `mean(a) − mean(b)` of two already extracted samples.
    ///
    /// # Errors
    /// [`InvalidArgument`](crate::Error::InvalidArgument) for a confidence level
    /// outside `(0, 1)`, an empty sample or zero iterations.
    pub fn from_samples(
        pair: GenrePair,
        region: Region,
        (sample_a, sample_b): (&Sample<f64>, &Sample<f64>),
        config: &ResampleConfig,
        confidence: f64,
        null_value: f64,
    ) -> Result<Self> {
        check_confidence(confidence)?;
        let distribution = config.resample_difference(sample_a, sample_b)?;
        let mean_a: f64 = Mean.compute(sample_a);
        let mean_b: f64 = Mean.compute(sample_b);
        let observed_difference = mean_a - mean_b;
        let interval = distribution.percentile_interval(confidence)?.estimate(observed_difference);
        let significant = is_significant(interval.lower, interval.upper, null_value);

        Ok(Self {
            pair,
            region,
            mean_a,
            mean_b,
            observed_difference,
            sample_size_a: sample_a.len(),
            sample_size_b: sample_b.len(),
            distribution,
            interval,
            significant,
        })
    }

    /// Extracts both genres from `observations` and bootstraps `mean(a) − mean(b)`.
    pub fn run(
        observations: &Observations,
        pair: GenrePair,
        config: &ResampleConfig,
        confidence: f64,
        null_value: f64,
    ) -> Result<Self> {
        let sample_a = observations.sample_for(&pair.a)?;
        let sample_b = observations.sample_for(&pair.b)?;
        Self::from_samples(pair, observations.region, (&sample_a, &sample_b), config, confidence, null_value)
    }
}

/// Either kind of analysis, as consumed by tables and plots.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// A single genre mean.
    Mean(MeanAnalysis),
    /// A genre pair difference.
    Difference(DifferenceAnalysis),
}

impl AnalysisResult {
    /// Region of the analysed data.
    pub fn region(&self) -> Region {
        match self {
            AnalysisResult::Mean(m) => m.region,
            AnalysisResult::Difference(d) => d.region,
        }
    }

    /// Percentile interval of the analysis.
    pub fn interval(&self) -> &Interval<f64> {
        match self {
            AnalysisResult::Mean(m) => &m.interval,
            AnalysisResult::Difference(d) => &d.interval,
        }
    }

    /// Bootstrap replicates behind the interval.
    pub fn distribution(&self) -> &BootstrapDistribution {
        match self {
            AnalysisResult::Mean(m) => &m.distribution,
            AnalysisResult::Difference(d) => &d.distribution,
        }
    }
}

impl From<MeanAnalysis> for AnalysisResult {
    fn from(m: MeanAnalysis) -> Self {
        AnalysisResult::Mean(m)
    }
}

impl From<DifferenceAnalysis> for AnalysisResult {
    fn from(d: DifferenceAnalysis) -> Self {
        AnalysisResult::Difference(d)
    }
}
