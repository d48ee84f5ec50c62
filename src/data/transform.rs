use std::collections::BTreeSet;
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, WriterBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::SalesRecord;
use crate::Sample;
use crate::error::{Error, Result};

/// Sales region of the raw data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Worldwide totals (`Global_Sales`).
    Global,
    /// North America (`NA_Sales`).
    NA,
    /// Europe (`EU_Sales`).
    EU,
    /// Japan (`JP_Sales`).
    JP,
    /// Rest of the world (`Other_Sales`).
    Other,
}

impl Region {
    /// Every region, in reporting order.
    pub const ALL: [Region; 5] = [Region::Global, Region::NA, Region::EU, Region::JP, Region::Other];

    /// Display name, as used in the raw column names.
    pub fn name(self) -> &'static str {
        match self {
            Region::Global => "Global",
            Region::NA => "NA",
            Region::EU => "EU",
            Region::JP => "JP",
            Region::Other => "Other",
        }
    }

    /// Lowercase tag used in file names.
    pub fn tag(self) -> &'static str {
        match self {
            Region::Global => "global",
            Region::NA => "na",
            Region::EU => "eu",
            Region::JP => "jp",
            Region::Other => "other",
        }
    }

    /// Raw sales figure of `record` for this region.
    pub fn sales(self, record: &SalesRecord) -> f64 {
        match self {
            Region::Global => record.global_sales,
            Region::NA => record.na_sales,
            Region::EU => record.eu_sales,
            Region::JP => record.jp_sales,
            Region::Other => record.other_sales,
        }
    }

    /// `ln(1 + sales)` for this region.
    pub fn log_sales(self, record: &SalesRecord) -> f64 {
        self.sales(record).ln_1p()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownRegion(s.to_string()))
    }
}

/// One cleaned observation: a genre label and its log-transformed sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Genre label.
    #[serde(rename = "Genre")]
    pub genre: String,
    /// `ln(1 + sales)` for the file's region.
    pub log_sales: f64,
    /// Release year as stored in the source table (`2004.0` and `2004` both load).
    #[serde(rename = "Year", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<f64>,
    /// Platform code, if recorded.
    #[serde(rename = "Platform", default)]
    pub platform: Option<String>,
}

/// Cleaned observations of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    /// Region every row belongs to.
    pub region: Region,
    /// Rows in file order.
    pub rows: Vec<Observation>,
}

impl Observations {
    /// Wraps `rows` of `region`.
    pub fn new(region: Region, rows: Vec<Observation>) -> Self {
        Self { region, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct genre labels, sorted.
    pub fn genres(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|o| o.genre.as_str()).collect();
        set.into_iter().collect()
    }

    /// Log-sales of every row labelled `genre`.
    ///
    /// # Errors
    /// [`Error::MissingData`] when no row matches.
    pub fn sample_for(&self, genre: &str) -> Result<Sample<f64>> {
        let sample: Sample<f64> = self
            .rows
            .iter()
            .filter(|o| o.genre == genre)
            .map(|o| o.log_sales)
            .collect();

        if sample.is_empty() {
            return Err(Error::MissingData {
                genre: genre.to_string(),
                region: self.region,
            });
        }
        Ok(sample)
    }
}

/// Projects raw records onto `(Genre, log_sales, Year, Platform)` for `region`.
///
/// Rows without a genre or whose transformed value is not finite are dropped.
pub fn reshape_for_analysis(records: &[SalesRecord], region: Region) -> Observations {
    let mut dropped = 0_usize;
    let rows: Vec<Observation> = records
        .iter()
        .filter_map(|r| {
            let log_sales = region.log_sales(r);
            match r.genre() {
                Some(genre) if log_sales.is_finite() => Some(Observation {
                    genre: genre.to_string(),
                    log_sales,
                    year: r.year,
                    platform: Some(r.platform.clone()),
                }),
                _ => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        warn!("{region}: dropped {dropped} rows without genre or finite log-sales");
    }
    Observations::new(region, rows)
}

/// `<dir>/cleaned_data_<region>_<window>.csv`
pub fn cleaned_data_path<P: AsRef<Path>>(dir: P, region: Region, window: &str) -> PathBuf {
    dir.as_ref().join(format!("cleaned_data_{}_{window}.csv", region.tag()))
}

/// Writes `observations` under `dir` and returns the file path.
pub fn save_cleaned_data<P: AsRef<Path>>(observations: &Observations, window: &str, dir: P) -> Result<PathBuf> {
    fs::create_dir_all(dir.as_ref())?;
    let path = cleaned_data_path(dir, observations.region, window);

    let mut wtr = WriterBuilder::new().has_headers(true).from_path(&path)?;
    for row in &observations.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!("Saved {} cleaned rows to {}", observations.len(), path.display());
    Ok(path)
}

/// Reads a cleaned data file written by [`save_cleaned_data`].
pub fn load_cleaned_data<P: AsRef<Path>>(path: P, region: Region) -> Result<Observations> {
    let file = File::open(path.as_ref())?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    if rows.is_empty() {
        return Err(Error::EmptyFile);
    }

    Ok(Observations::new(region, rows))
}
