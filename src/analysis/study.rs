use itertools::Itertools;
use log::{debug, info, warn};

use super::{DifferenceAnalysis, GenrePair, MeanAnalysis};
use crate::data::{Observations, Region};
use crate::error::{Error, Result};
use crate::resample::check_iterations;
use crate::statistics::check_confidence;
use crate::{DEFAULT_CONFIDENCE, ResampleConfig};

/// What to compare and how.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    /// Genres to analyse; pairs are formed in this order.
    pub genres: Vec<String>,
    /// Regions to analyse, in output order.
    pub regions: Vec<Region>,
    /// Iterations and seed shared by every analysis.
    pub resample: ResampleConfig,
    /// Confidence level of every interval.
    pub confidence: f64,
    /// Null value for the significance decision on differences.
    pub null_value: f64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            genres: ["Action", "Role-Playing", "Simulation"].map(String::from).to_vec(),
            regions: Region::ALL.to_vec(),
            resample: ResampleConfig::default(),
            confidence: DEFAULT_CONFIDENCE,
            null_value: 0.0,
        }
    }
}

impl StudyConfig {
    /// Checks the settings shared by every analysis of the study.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for zero iterations, a confidence level
    /// outside `(0, 1)` or an empty genre or region list.
    pub fn validate(&self) -> Result<()> {
        check_iterations(self.resample.iterations)?;
        check_confidence(self.confidence)?;
        if self.genres.is_empty() {
            return Err(Error::invalid("at least one genre is required"));
        }
        if self.regions.is_empty() {
            return Err(Error::invalid("at least one region is required"));
        }
        Ok(())
    }

    /// Every unordered genre pair, in configuration order.
    pub fn genre_pairs(&self) -> Vec<GenrePair> {
        self.genres
            .iter()
            .tuple_combinations()
            .map(|(a, b)| GenrePair::new(a.as_str(), b.as_str()))
            .collect()
    }
}

/// Everything a study produced; combinations that failed are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyResults {
    /// Per-genre means, region by region.
    pub means: Vec<MeanAnalysis>,
    /// Per-pair differences, region by region.
    pub differences: Vec<DifferenceAnalysis>,
}

impl StudyResults {
    /// True when no analysis succeeded.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty() && self.differences.is_empty()
    }
}

/// Runs mean and pairwise-difference analyses over every configured region.
///
/// A genre or pair that fails (e.g. no observations in a region) is logged
/// and skipped; the remaining combinations still run. Each analysis owns its
/// generator, so with the `rayon` feature the analyses of one region run in
/// parallel without changing their results.
#[derive(Debug, Clone, Default)]
pub struct Study {
    /// What the study runs.
    pub config: StudyConfig,
}

impl Study {
    /// A study over `config`; nothing runs until [`Study::run`].
    pub fn new(config: StudyConfig) -> Self {
        Self { config }
    }

    /// Runs the study, obtaining each region's observations from `load`.
    ///
    /// Regions whose data cannot be loaded are logged and skipped.
    ///
    /// # Errors
    /// Whatever [`StudyConfig::validate`] reports; nothing is loaded then.
    pub fn run<F>(&self, mut load: F) -> Result<StudyResults>
    where
        F: FnMut(Region) -> Result<Observations>,
    {
        self.config.validate()?;
        let mut results = StudyResults::default();

        for &region in &self.config.regions {
            let observations = match load(region) {
                Ok(obs) => obs,
                Err(err) => {
                    warn!("{region}: skipping region: {err}");
                    continue;
                }
            };
            info!("{region}: {} observations", observations.len());

            let (means, differences) = self.run_region(&observations);
            results.means.extend(means);
            results.differences.extend(differences);
        }

        info!(
            "Study finished: {} means, {} differences",
            results.means.len(),
            results.differences.len()
        );
        Ok(results)
    }

    /// Analyses of one region's observations.
    pub fn run_region(&self, observations: &Observations) -> (Vec<MeanAnalysis>, Vec<DifferenceAnalysis>) {
        let config = &self.config;
        let region = observations.region;

        let means = map_tasks(&config.genres, |genre| {
            MeanAnalysis::run(observations, genre, &config.resample, config.confidence)
        });
        let means = keep_successes(means, |idx| {
            config.genres.get(idx).map_or_else(String::new, Clone::clone)
        }, region);

        let pairs = config.genre_pairs();
        let differences = map_tasks(&pairs, |pair| {
            DifferenceAnalysis::run(observations, pair.clone(), &config.resample, config.confidence, config.null_value)
        });
        let differences = keep_successes(differences, |idx| {
            pairs.get(idx).map_or_else(String::new, ToString::to_string)
        }, region);

        for d in &differences {
            debug!(
                "{region}: {} diff={:.3} significant={}",
                d.pair, d.observed_difference, d.significant
            );
        }
        (means, differences)
    }
}

fn keep_successes<T>(results: Vec<Result<T>>, label: impl Fn(usize) -> String, region: Region) -> Vec<T> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(idx, result)| match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{region}: skipping {}: {err}", label(idx));
                None
            }
        })
        .collect()
}

#[cfg(feature = "rayon")]
fn map_tasks<T, U, F>(tasks: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    tasks.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn map_tasks<T, U, F>(tasks: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    tasks.iter().map(f).collect()
}
