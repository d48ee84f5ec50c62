use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use super::{SummaryTable, TableStyle};
use crate::analysis::StudyResults;
use crate::error::{Error, Result};

/// The summary tables of a whole study, as written by the `analyze` command.
///
/// Output layout under the target directory:
///
/// - `bootstrap_means_all_regions.csv`, plus `bootstrap_means_<tag>.csv` per region
/// - `bootstrap_differences_all_regions.csv`, plus `bootstrap_differences_<tag>.csv` per region
/// - with LaTeX enabled, a `.tex` twin of each `*_all_regions.csv`
#[derive(Debug, Clone, PartialEq)]
pub struct StudyTables {
    /// Present when the study produced at least one mean.
    pub means: Option<SummaryTable>,
    /// Present when the study produced at least one difference.
    pub differences: Option<SummaryTable>,
}

impl StudyTables {
    /// # Errors
    /// [`Error::InvalidArgument`] when `results` holds no analysis at all.
    pub fn from_results(results: &StudyResults, style: TableStyle) -> Result<Self> {
        if results.is_empty() {
            return Err(Error::invalid("no analysis succeeded; nothing to tabulate"));
        }
        let means = (!results.means.is_empty())
            .then(|| SummaryTable::from_results(&results.means, style))
            .transpose()?;
        let differences = (!results.differences.is_empty())
            .then(|| SummaryTable::from_results(&results.differences, style))
            .transpose()?;
        Ok(Self { means, differences })
    }

    /// Writes every table below `out_dir` and returns the paths written, in order.
    pub fn write<P: AsRef<Path>>(&self, out_dir: P, latex: bool) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        let mut written = Vec::new();
        for (stem, table) in [("bootstrap_means", &self.means), ("bootstrap_differences", &self.differences)] {
            if let Some(table) = table {
                write_family(table, out_dir, stem, latex, &mut written)?;
            }
        }
        Ok(written)
    }
}

fn write_family(table: &SummaryTable, out_dir: &Path, stem: &str, latex: bool, written: &mut Vec<PathBuf>) -> Result<()> {
    let combined = out_dir.join(format!("{stem}_all_regions.csv"));
    table.write_csv(&combined)?;
    written.push(combined);

    if latex {
        let tex = out_dir.join(format!("{stem}_all_regions.tex"));
        table.write_latex(&tex)?;
        written.push(tex);
    }

    for (region, part) in table.by_region() {
        let path = out_dir.join(format!("{stem}_{}.csv", region.tag()));
        part.write_csv(&path)?;
        written.push(path);
    }
    Ok(())
}

impl Display for StudyTables {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(means) = &self.means {
            writeln!(f, "{means}")?;
        }
        if let Some(differences) = &self.differences {
            writeln!(f, "{differences}")?;
            if let Ok(matrix) = differences.comparison_matrix() {
                writeln!(f, "{matrix}")?;
            }
        }
        Ok(())
    }
}

/// Tabulates `results` with the default style and writes them below `out_dir`.
///
/// Shorthand for [`StudyTables::from_results`] followed by [`StudyTables::write`].
pub fn write_study_tables<P: AsRef<Path>>(results: &StudyResults, out_dir: P, latex: bool) -> Result<Vec<PathBuf>> {
    StudyTables::from_results(results, TableStyle::default())?.write(out_dir, latex)
}
