use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use super::TableStyle;

/// Mean differences pivoted to genre A (rows) × genre B (columns).
///
/// A cell seen more than once (e.g. the same pair in several regions) holds
/// the average of its values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    rows: BTreeSet<String>,
    columns: BTreeSet<String>,
    cells: BTreeMap<(String, String), f64>,
    style: TableStyle,
}

impl ComparisonMatrix {
    pub(crate) fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, f64)>, style: TableStyle) -> Self {
        let mut sums: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
        for (a, b, value) in entries {
            let slot = sums.entry((a.to_string(), b.to_string())).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }

        let rows = sums.keys().map(|(a, _)| a.clone()).collect();
        let columns = sums.keys().map(|(_, b)| b.clone()).collect();
        let cells = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();

        Self {
            rows,
            columns,
            cells,
            style,
        }
    }

    /// True when no cell was filled.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Genre A labels, sorted.
    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(String::as_str).collect()
    }

    /// Genre B labels, sorted.
    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Mean difference `a − b`, if that pair was compared.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.cells.get(&(a.to_string(), b.to_string())).copied()
    }

    /// Console rendering; empty cells stay blank.
    pub fn display(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                std::iter::once(Cell::new("Genre_A \\ Genre_B"))
                    .chain(self.columns.iter().map(|b| Cell::new(b).set_alignment(CellAlignment::Center))),
            );

        for a in &self.rows {
            let values = self.columns.iter().map(|b| {
                let text = self.get(a, b).map(|v| self.style.format(v)).unwrap_or_default();
                Cell::new(text).set_alignment(CellAlignment::Right)
            });
            table.add_row(std::iter::once(Cell::new(a)).chain(values));
        }

        table.to_string()
    }
}

impl Display for ComparisonMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
