//! Loading and cleaning of the raw sales table, and its projection onto
//! per-region `(genre, log-sales)` observations.
//!
//! The typical flow is
//! [`load_raw_data`] → [`remove_invalid_entries`] → [`filter_time_window`] →
//! [`select_genres`] → [`reshape_for_analysis`] → [`save_cleaned_data`].

mod clean;
mod load;
mod transform;

pub use clean::{filter_time_window, remove_invalid_entries, select_genres};
pub use load::{REQUIRED_COLUMNS, SalesRecord, ValidationReport, load_raw_data, validate_headers, validate_records};
pub use transform::{
    Observation, Observations, Region, cleaned_data_path, load_cleaned_data, reshape_for_analysis, save_cleaned_data,
};

#[cfg(test)]
pub(crate) use load::tests as fixtures;
