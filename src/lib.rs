//! Bootstrap resampling and percentile confidence intervals for comparing
//! video game sales across genres and regions.
//!
//! The core is small: [`resample_mean`] and [`resample_difference`] build a
//! [`BootstrapDistribution`] from an explicitly seeded generator,
//! [`percentile_interval`] turns it into an [`Interval`], and
//! [`is_significant`] checks the interval against a null value. Around it,
//! [`data`] prepares per-region observations from the raw sales table,
//! [`analysis`] runs the genre study and [`report`] renders the results.
//!
//! ```no_run
//! use genreboot::{Sample, percentile_interval, resample_mean};
//!
//! let sample = Sample::new(vec![0.8, 1.1, 0.9, 1.3, 1.0]);
//! let distribution = resample_mean(&sample, 10_000, Some(42))?;
//! let interval = percentile_interval(distribution.values(), 0.95)?;
//! println!("{interval}");
//! # Ok::<(), genreboot::Error>(())
//! ```

#![deny(missing_docs)]

mod error;
mod resample;
mod sample;
mod statistics;

pub mod analysis;
pub mod data;
pub mod report;

pub use crate::error::{Error, Result};
pub use crate::resample::*;
pub use crate::sample::Sample;
pub use crate::statistics::*;
pub use rand;

// Used by the `genreboot` binary only.
use clap as _;
use env_logger as _;
// Used by the benchmarks only.
#[cfg(test)]
use criterion as _;

/// Bootstrap rounds used when none are given.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Confidence level used when none is given.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;
