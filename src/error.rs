use thiserror::Error;

use crate::data::Region;

/// Errors raised by resampling, interval estimation and the data/report layers.
///
/// Every variant is a caller-contract violation or an I/O failure; nothing is
/// retried and nothing is replaced by a default value.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty sample, zero iterations, confidence level outside `(0, 1)`, ...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested genre has no observations in the region's data.
    #[error("no data found for genre `{genre}` in region {region}")]
    MissingData {
        /// Genre that was looked up.
        genre: String,
        /// Region whose data was searched.
        region: Region,
    },

    /// Required columns absent from a raw sales file header.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A region name that is none of the five known regions.
    #[error("unknown region `{0}` (expected one of Global, NA, EU, JP, Other)")]
    UnknownRegion(String),

    /// A CSV file with a header but no records.
    #[error("CSV file contains no data records")]
    EmptyFile,

    /// Filesystem failure while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV or a cell that does not deserialize.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
