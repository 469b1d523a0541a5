use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use crate::error::{ProjectionError, Result};

/// Format a percentage with two decimals, "82.35%"
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a number as an integer when whole, one decimal otherwise
pub fn format_number(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Create a simple ASCII progress bar for a 0..=100 percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Right-pad `s` to `width` terminal columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ProjectionError::InvalidDate(s.trim().to_string()))
}

/// Parse "YYYY-MM-DD,YYYY-MM-DD,..." keeping only well-formed dates.
pub fn parse_holiday_list(input: &str) -> Vec<NaiveDate> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| s.len() == 10)
        .filter_map(|s| parse_date(s).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zeroes() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(37.5), "37.5");
        assert_eq!(format_percent(80.0), "80.00%");
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(150.0, 3), "███");
        assert_eq!(progress_bar(-5.0, 2), "░░");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_display("Math", 6), "Math  ");
        assert_eq!(pad_display("数学", 6), "数学  ");
        assert_eq!(pad_display("Chemistry", 4), "Chemistry");
    }

    #[test]
    fn holiday_list_skips_garbage() {
        let dates = parse_holiday_list("2025-08-15, nope,2025-8-1,2025-10-20,2025-02-30");
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            ]
        );
    }

    #[test]
    fn bad_date_reports_input() {
        assert_eq!(
            parse_date(" 2025-13-01 "),
            Err(ProjectionError::InvalidDate("2025-13-01".to_string()))
        );
    }
}
