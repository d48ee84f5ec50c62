use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Columns the raw sales file must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
];

const SALES_COLUMNS: [&str; 5] = ["NA_Sales", "EU_Sales", "JP_Sales", "Other_Sales", "Global_Sales"];

/// One row of the raw video game sales file (sales in millions of units).
///
/// `Year` values such as `N/A` and empty `Genre`/`Publisher` cells become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Sales rank; unparsable values become `None`.
    #[serde(rename = "Rank", default, deserialize_with = "csv::invalid_option")]
    pub rank: Option<u64>,
    /// Game title.
    #[serde(rename = "Name")]
    pub name: String,
    /// Platform code such as `PS2` or `Wii`.
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Release year; `N/A` becomes `None`.
    #[serde(rename = "Year", deserialize_with = "csv::invalid_option")]
    pub year: Option<f64>,
    /// Genre label.
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    /// Publisher name.
    #[serde(rename = "Publisher")]
    pub publisher: Option<String>,
    /// North American sales.
    #[serde(rename = "NA_Sales")]
    pub na_sales: f64,
    /// European sales.
    #[serde(rename = "EU_Sales")]
    pub eu_sales: f64,
    /// Japanese sales.
    #[serde(rename = "JP_Sales")]
    pub jp_sales: f64,
    /// Sales in all other regions.
    #[serde(rename = "Other_Sales")]
    pub other_sales: f64,
    /// Worldwide sales.
    #[serde(rename = "Global_Sales")]
    pub global_sales: f64,
}

impl SalesRecord {
    /// Genre label, treating blank cells as missing.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }

    fn sales_figures(&self) -> [f64; 5] {
        [self.na_sales, self.eu_sales, self.jp_sales, self.other_sales, self.global_sales]
    }
}

/// Required columns absent from `headers`, in canonical order.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .map(|c| (*c).to_string())
        .collect()
}

/// Outcome of [`validate_records`]: an empty issue list means the data is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One human-readable line per problem found.
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// No issues found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks rows for missing genres and negative sales figures.
pub fn validate_records(records: &[SalesRecord]) -> ValidationReport {
    let mut issues = Vec::new();

    let missing_genre = records.iter().filter(|r| r.genre().is_none()).count();
    if missing_genre > 0 {
        issues.push(format!("Found {missing_genre} rows with missing Genre"));
    }

    for (i, column) in SALES_COLUMNS.iter().enumerate() {
        let negative = records
            .iter()
            .filter(|r| r.sales_figures().get(i).is_some_and(|v| *v < 0.0))
            .count();
        if negative > 0 {
            issues.push(format!("Found {negative} rows with negative {column}"));
        }
    }

    ValidationReport { issues }
}

/// Read the raw sales CSV.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be opened
/// - [`Error::MissingColumns`] if any of [`REQUIRED_COLUMNS`] is absent
/// - [`Error::Csv`] on malformed rows
/// - [`Error::EmptyFile`] when the file holds a header but no records
pub fn load_raw_data<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let missing = validate_headers(&headers);
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }

    if records.is_empty() {
        return Err(Error::EmptyFile);
    }

    info!("Loaded {} raw records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const RAW_CSV: &str = "\
Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
1,Blade Quest,PS2,2004,Action,Acme,1.20,0.80,0.10,0.20,2.30
2,Dragon Saga,DS,2007,Role-Playing,Kobo,0.30,0.20,1.50,0.05,2.05
3,Farm Life,PC,2010,Simulation,Acme,0.40,0.60,0.00,0.10,1.10
4,Old Timer,NES,1990,Action,Retro,0.90,0.10,0.50,0.01,1.51
5,Mystery Box,Wii,N/A,Action,Acme,0.10,0.10,0.00,0.00,0.20
6,No Genre,PS3,2012,,Acme,0.10,0.10,0.00,0.00,0.20
7,Ghost Sales,X360,2011,Simulation,Acme,0.00,0.00,0.00,0.00,0.00
8,Sky Pilot,PS4,2016,Simulation,Kobo,0.05,0.25,0.02,0.03,0.35
9,Sword Art,PSP,2009,Role-Playing,Kobo,0.02,0.03,0.40,0.01,0.46
10,Run Gun,GBA,2001,Action,Retro,0.50,0.20,0.05,0.02,0.77
";

    pub(crate) fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_all_rows() {
        let file = write_temp(RAW_CSV);
        let records = load_raw_data(file.path()).unwrap();
        assert_eq!(records.len(), 10);
        let first = records.first().unwrap();
        assert_eq!(first.name, "Blade Quest");
        assert_eq!(first.genre(), Some("Action"));
        assert_eq!(records.get(4).and_then(|r| r.year), None);
        assert_eq!(records.get(5).map(SalesRecord::genre), Some(None));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_raw_data("/definitely/not/here/vgsales.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn missing_columns_are_listed() {
        let file = write_temp("Name,Genre,Global_Sales\nA,Action,1.0\n");
        match load_raw_data(file.path()).unwrap_err() {
            Error::MissingColumns(cols) => {
                assert!(cols.contains(&"Platform".to_string()));
                assert!(cols.contains(&"NA_Sales".to_string()));
                assert!(!cols.contains(&"Genre".to_string()));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn header_only_file_is_empty() {
        let header = RAW_CSV.lines().next().unwrap();
        let file = write_temp(&format!("{header}\n"));
        assert!(matches!(load_raw_data(file.path()).unwrap_err(), Error::EmptyFile));
    }

    #[test]
    fn validation_flags_missing_genre_and_negative_sales() {
        let file = write_temp(RAW_CSV);
        let mut records = load_raw_data(file.path()).unwrap();
        let report = validate_records(&records);
        assert!(!report.is_valid());
        assert_eq!(report.issues, vec!["Found 1 rows with missing Genre".to_string()]);

        if let Some(first) = records.first_mut() {
            first.eu_sales = -0.5;
        }
        let report = validate_records(&records);
        assert!(report.issues.iter().any(|i| i.contains("negative EU_Sales")));
    }

    #[test]
    fn clean_records_pass_validation() {
        let file = write_temp(RAW_CSV);
        let records: Vec<SalesRecord> = load_raw_data(file.path())
            .unwrap()
            .into_iter()
            .filter(|r| r.genre().is_some())
            .collect();
        assert!(validate_records(&records).is_valid());
    }
}
