use chrono::NaiveDate;
use colored::Colorize;

use crate::error::{LookupError, Result};

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| LookupError::InvalidInput(format!("invalid date '{}': {}", raw, e)))
}

/// Format an inclusive date window for display
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} .. {}", start, end).yellow().to_string()
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    println!("{}", format_table_row(columns, widths));
}

pub fn format_table_row(columns: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (col, width) in columns.iter().zip(widths) {
        row.push_str(&format!("{:<width$}  ", col, width = width));
    }
    row.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso() {
        assert_eq!(
            parse_date(" 2024-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(matches!(parse_date("06/01/2024"), Err(LookupError::InvalidInput(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(LookupError::InvalidInput(_))));
    }

    #[test]
    fn test_table_row_pads_columns() {
        assert_eq!(format_table_row(&["a", "bb"], &[3, 4]), "a    bb");
    }
}
