use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use csv::WriterBuilder;
use log::info;

use super::{ComparisonMatrix, TableStyle};
use crate::analysis::{AnalysisResult, DifferenceAnalysis, MeanAnalysis};
use crate::data::Region;
use crate::error::{Error, Result};

/// One line of a summary table.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryRow {
    /// Summary of a [`MeanAnalysis`].
    Mean {
        /// Genre label.
        genre: String,
        /// Region of the data.
        region: Region,
        /// Observed mean.
        mean: f64,
        /// Lower interval bound.
        ci_lower: f64,
        /// Upper interval bound.
        ci_upper: f64,
        /// Observations behind the mean.
        sample_size: usize,
    },
    /// Summary of a [`DifferenceAnalysis`].
    Difference {
        /// First genre of the pair.
        genre_a: String,
        /// Second genre of the pair.
        genre_b: String,
        /// Region of the data.
        region: Region,
        /// Observed `mean(a) − mean(b)`.
        mean_difference: f64,
        /// Lower interval bound.
        ci_lower: f64,
        /// Upper interval bound.
        ci_upper: f64,
        /// Interval excludes the null value.
        significant: bool,
        /// Observations of genre A.
        sample_size_a: usize,
        /// Observations of genre B.
        sample_size_b: usize,
    },
}

impl SummaryRow {
    /// Region of the row.
    pub fn region(&self) -> Region {
        match self {
            SummaryRow::Mean { region, .. } | SummaryRow::Difference { region, .. } => *region,
        }
    }

    /// True for [`SummaryRow::Mean`].
    pub fn is_mean(&self) -> bool {
        matches!(self, SummaryRow::Mean { .. })
    }

    /// Lower interval bound.
    pub fn ci_lower(&self) -> f64 {
        match self {
            SummaryRow::Mean { ci_lower, .. } | SummaryRow::Difference { ci_lower, .. } => *ci_lower,
        }
    }

    /// Upper interval bound.
    pub fn ci_upper(&self) -> f64 {
        match self {
            SummaryRow::Mean { ci_upper, .. } | SummaryRow::Difference { ci_upper, .. } => *ci_upper,
        }
    }

    /// `|upper − lower|`
    pub fn ci_width(&self) -> f64 {
        (self.ci_upper() - self.ci_lower()).abs()
    }

    /// Means sort before differences within a region.
    fn sort_key(&self) -> (Region, u8, &str, &str) {
        match self {
            SummaryRow::Mean { genre, region, .. } => (*region, 0, genre.as_str(), ""),
            SummaryRow::Difference {
                genre_a, genre_b, region, ..
            } => (*region, 1, genre_a.as_str(), genre_b.as_str()),
        }
    }
}

impl From<&MeanAnalysis> for SummaryRow {
    fn from(m: &MeanAnalysis) -> Self {
        SummaryRow::Mean {
            genre: m.genre.clone(),
            region: m.region,
            mean: m.observed_mean,
            ci_lower: m.interval.lower,
            ci_upper: m.interval.upper,
            sample_size: m.sample_size,
        }
    }
}

impl From<&DifferenceAnalysis> for SummaryRow {
    fn from(d: &DifferenceAnalysis) -> Self {
        SummaryRow::Difference {
            genre_a: d.pair.a.clone(),
            genre_b: d.pair.b.clone(),
            region: d.region,
            mean_difference: d.observed_difference,
            ci_lower: d.interval.lower,
            ci_upper: d.interval.upper,
            significant: d.significant,
            sample_size_a: d.sample_size_a,
            sample_size_b: d.sample_size_b,
        }
    }
}

impl From<&AnalysisResult> for SummaryRow {
    fn from(r: &AnalysisResult) -> Self {
        match r {
            AnalysisResult::Mean(m) => m.into(),
            AnalysisResult::Difference(d) => d.into(),
        }
    }
}

/// A column of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// `Mean` or `Difference`.
    Type,
    /// `Genre`
    Genre,
    /// `Genre_A`
    GenreA,
    /// `Genre_B`
    GenreB,
    /// `Region`
    Region,
    /// `Mean`
    Mean,
    /// `Mean_Difference`
    MeanDifference,
    /// `CI_Lower`
    CiLower,
    /// `CI_Upper`
    CiUpper,
    /// `|CI_Upper − CI_Lower|`
    CiWidth,
    /// `true` or `false`; differences only.
    Significant,
    /// `Sample_Size`
    SampleSize,
    /// `Sample_Size_A`
    SampleSizeA,
    /// `Sample_Size_B`
    SampleSizeB,
}

impl Column {
    const MEANS: [Column; 8] = [
        Column::Type,
        Column::Genre,
        Column::Region,
        Column::Mean,
        Column::CiLower,
        Column::CiUpper,
        Column::CiWidth,
        Column::SampleSize,
    ];

    const DIFFERENCES: [Column; 11] = [
        Column::Type,
        Column::GenreA,
        Column::GenreB,
        Column::Region,
        Column::MeanDifference,
        Column::CiLower,
        Column::CiUpper,
        Column::CiWidth,
        Column::Significant,
        Column::SampleSizeA,
        Column::SampleSizeB,
    ];

    const MIXED: [Column; 14] = [
        Column::Type,
        Column::Genre,
        Column::GenreA,
        Column::GenreB,
        Column::Region,
        Column::Mean,
        Column::MeanDifference,
        Column::CiLower,
        Column::CiUpper,
        Column::CiWidth,
        Column::Significant,
        Column::SampleSize,
        Column::SampleSizeA,
        Column::SampleSizeB,
    ];

    /// CSV and console header of the column.
    pub fn header(self) -> &'static str {
        match self {
            Column::Type => "Type",
            Column::Genre => "Genre",
            Column::GenreA => "Genre_A",
            Column::GenreB => "Genre_B",
            Column::Region => "Region",
            Column::Mean => "Mean",
            Column::MeanDifference => "Mean_Difference",
            Column::CiLower => "CI_Lower",
            Column::CiUpper => "CI_Upper",
            Column::CiWidth => "CI_Width",
            Column::Significant => "Significant",
            Column::SampleSize => "Sample_Size",
            Column::SampleSizeA => "Sample_Size_A",
            Column::SampleSizeB => "Sample_Size_B",
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(
            self,
            Column::Type | Column::Genre | Column::GenreA | Column::GenreB | Column::Region | Column::Significant
        )
    }

    /// Text of this column for `row`; empty when the column does not apply.
    fn cell(self, row: &SummaryRow, style: &TableStyle) -> String {
        match (self, row) {
            (Column::Type, SummaryRow::Mean { .. }) => "Mean".to_string(),
            (Column::Type, SummaryRow::Difference { .. }) => "Difference".to_string(),
            (Column::Region, r) => r.region().to_string(),
            (Column::CiLower, r) => style.format(r.ci_lower()),
            (Column::CiUpper, r) => style.format(r.ci_upper()),
            (Column::CiWidth, r) => style.format(r.ci_width()),

            (Column::Genre, SummaryRow::Mean { genre, .. }) => genre.clone(),
            (Column::Mean, SummaryRow::Mean { mean, .. }) => style.format(*mean),
            (Column::SampleSize, SummaryRow::Mean { sample_size, .. }) => sample_size.to_string(),

            (Column::GenreA, SummaryRow::Difference { genre_a, .. }) => genre_a.clone(),
            (Column::GenreB, SummaryRow::Difference { genre_b, .. }) => genre_b.clone(),
            (Column::MeanDifference, SummaryRow::Difference { mean_difference, .. }) => {
                style.format(*mean_difference)
            }
            (Column::Significant, SummaryRow::Difference { significant, .. }) => significant.to_string(),
            (Column::SampleSizeA, SummaryRow::Difference { sample_size_a, .. }) => sample_size_a.to_string(),
            (Column::SampleSizeB, SummaryRow::Difference { sample_size_b, .. }) => sample_size_b.to_string(),

            _ => String::new(),
        }
    }
}

/// Tabular view over analysis results.
///
/// The column set follows the contents: a table of means uses the
/// `Genre/Mean/Sample_Size` layout, a table of differences the
/// `Genre_A/Genre_B/Mean_Difference/Significant` layout, and a mixed table
/// carries both with blanks where a column does not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
    style: TableStyle,
}

impl SummaryTable {
    /// Builds a table with one row per result.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `results` is empty.
    pub fn from_results<R: Into<SummaryRow>>(results: impl IntoIterator<Item = R>, style: TableStyle) -> Result<Self> {
        let rows: Vec<SummaryRow> = results.into_iter().map(Into::into).collect();
        if rows.is_empty() {
            return Err(Error::invalid("results must be a non-empty collection"));
        }
        Ok(Self::from_rows(rows, style))
    }

    fn from_rows(mut rows: Vec<SummaryRow>, style: TableStyle) -> Self {
        if style.sort {
            rows.sort_by(|x, y| x.sort_key().cmp(&y.sort_key()));
        }
        Self { rows, style }
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Formatting applied to numeric cells.
    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns of the layout chosen for the current rows.
    pub fn columns(&self) -> &'static [Column] {
        let means = self.rows.iter().any(SummaryRow::is_mean);
        let differences = self.rows.iter().any(|r| !r.is_mean());
        match (means, differences) {
            (true, true) => &Column::MIXED,
            (false, true) => &Column::DIFFERENCES,
            _ => &Column::MEANS,
        }
    }

    fn headers(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.header()).collect()
    }

    fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        let columns = self.columns();
        self.rows
            .iter()
            .map(move |row| columns.iter().map(|c| c.cell(row, &self.style)).collect())
    }

    /// `(means, differences)`; either may be empty.
    pub fn split(&self) -> (SummaryTable, SummaryTable) {
        let (means, differences): (Vec<SummaryRow>, Vec<SummaryRow>) =
            self.rows.iter().cloned().partition(SummaryRow::is_mean);
        (
            Self { rows: means, style: self.style },
            Self {
                rows: differences,
                style: self.style,
            },
        )
    }

    /// One table per region present, keyed and ordered by region.
    pub fn by_region(&self) -> BTreeMap<Region, SummaryTable> {
        let mut tables: BTreeMap<Region, SummaryTable> = BTreeMap::new();
        for row in &self.rows {
            tables
                .entry(row.region())
                .or_insert_with(|| Self {
                    rows: Vec::new(),
                    style: self.style,
                })
                .rows
                .push(row.clone());
        }
        tables
    }

    /// Genre-A × genre-B matrix of mean differences.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the table holds no difference rows.
    pub fn comparison_matrix(&self) -> Result<ComparisonMatrix> {
        let entries = self.rows.iter().filter_map(|row| match row {
            SummaryRow::Difference {
                genre_a,
                genre_b,
                mean_difference,
                ..
            } => Some((genre_a.as_str(), genre_b.as_str(), *mean_difference)),
            SummaryRow::Mean { .. } => None,
        });
        let matrix = ComparisonMatrix::from_entries(entries, self.style);
        if matrix.is_empty() {
            return Err(Error::invalid("comparison matrix requires difference results"));
        }
        Ok(matrix)
    }

    /// Writes the table as CSV, creating parent directories as needed.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;

        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(self.headers())?;
        for record in self.records() {
            wtr.write_record(&record)?;
        }
        wtr.flush()?;

        info!("Results table exported to {} ({} rows)", path.display(), self.len());
        Ok(())
    }

    /// `tabular` rendering with booktabs rules; cells are not escaped.
    pub fn to_latex(&self) -> String {
        let columns = self.columns();
        let alignment: String = columns.iter().map(|c| if c.is_numeric() { 'r' } else { 'l' }).collect();

        let mut out = format!("\\begin{{tabular}}{{{alignment}}}\n\\toprule\n");
        out.push_str(&self.headers().join(" & "));
        out.push_str(" \\\\\n\\midrule\n");
        for record in self.records() {
            out.push_str(&record.join(" & "));
            out.push_str(" \\\\\n");
        }
        out.push_str("\\bottomrule\n\\end{tabular}\n");
        out
    }

    /// Writes [`to_latex`](Self::to_latex) to `path`, creating parent directories.
    pub fn write_latex<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;
        fs::write(path, self.to_latex())?;
        info!("LaTeX table saved to {}", path.display());
        Ok(())
    }

    fn title(&self) -> &'static str {
        match self.columns().len() {
            8 => "Bootstrap Genre Means",
            11 => "Bootstrap Genre Differences",
            _ => "Bootstrap Results",
        }
    }

    /// Titled console rendering.
    pub fn display(&self) -> String {
        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![Cell::new(self.title()).set_alignment(CellAlignment::Center)]);

        let columns = self.columns();
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                columns
                    .iter()
                    .map(|c| Cell::new(c.header()).set_alignment(CellAlignment::Center)),
            );

        for record in self.records() {
            table.add_row(columns.iter().zip(record).map(|(column, text)| {
                let alignment = if column.is_numeric() {
                    CellAlignment::Right
                } else {
                    CellAlignment::Left
                };
                Cell::new(text).set_alignment(alignment)
            }));
        }

        format!("{title_table}\n{table}")
    }
}

impl Display for SummaryTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
