//! Summary tables of analysis results: console rendering, CSV and LaTeX export,
//! per-region splits and the genre comparison matrix.

mod matrix;
mod study;
mod table;

pub use matrix::ComparisonMatrix;
pub use study::{StudyTables, write_study_tables};
pub use table::{Column, SummaryRow, SummaryTable};

/// Formats `x` rounded to `decimals` places, in scientific notation if asked.
///
/// Plain notation rounds half away from zero and prints the shortest text that
/// reads back as the rounded value, keeping one decimal for whole numbers:
/// `0.9`, `0.123`, `1.0`. Scientific notation always shows `decimals` digits.
/// NaN renders as `NaN` in either mode.
pub fn format_number(x: f64, decimals: usize, scientific: bool) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if scientific {
        return format!("{x:.decimals$e}");
    }
    let scale = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = (x * scale).round() / scale;
    if rounded.is_finite() {
        format!("{rounded:?}")
    } else {
        format!("{x:?}")
    }
}

/// Number formatting and ordering of a [`SummaryTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    /// Decimal places numbers are rounded to.
    pub decimals: usize,
    /// Use `1.23e3` notation.
    pub scientific: bool,
    /// Sort rows by region, then genre (or genre pair).
    pub sort: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            decimals: 3,
            scientific: false,
            sort: true,
        }
    }
}

impl TableStyle {
    /// [`format_number`] with this style's settings.
    pub fn format(&self, x: f64) -> String {
        format_number(x, self.decimals, self.scientific)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_decimals() {
        assert_eq!(format_number(0.123_456, 3, false), "0.123");
        assert_eq!(format_number(0.000_4, 3, false), "0.0");
        assert_eq!(format_number(2.4, 0, false), "2.0");
    }

    #[test]
    fn plain_notation_drops_trailing_zeros() {
        assert_eq!(format_number(0.9, 3, false), "0.9");
        assert_eq!(format_number(0.25, 3, false), "0.25");
        assert_eq!(format_number(-1.0, 2, false), "-1.0");
        assert_eq!(format_number(0.7999999999999999, 3, false), "0.8");
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(format_number(2.5, 0, false), "3.0");
        assert_eq!(format_number(-2.5, 0, false), "-3.0");
    }

    #[test]
    fn out_of_range_values_pass_through() {
        assert_eq!(format_number(f64::INFINITY, 3, false), "inf");
        assert_eq!(format_number(1.5, 400, false), "1.5");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(format_number(1234.5, 2, true), "1.23e3");
        assert_eq!(format_number(0.000_15, 1, true), "1.5e-4");
    }

    #[test]
    fn nan_passes_through() {
        assert_eq!(format_number(f64::NAN, 3, false), "NaN");
        assert_eq!(format_number(f64::NAN, 3, true), "NaN");
    }

    #[test]
    fn style_defaults() {
        let style = TableStyle::default();
        assert_eq!(style.format(1.0 / 3.0), "0.333");
        assert!(style.sort);
    }
}
