use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// GITAM University academic calendar 2025-26, public holidays.
const GITAM_2025_26: &[(i32, u32, u32, &str)] = &[
    (2025, 8, 15, "Independence Day"),
    (2025, 8, 16, "Sri Krishna Janmastami"),
    (2025, 8, 27, "Vinayaka Chaturdhi"),
    (2025, 10, 2, "Mahatma Gandhi Jayanthi/Vijayadasami"),
    (2025, 10, 20, "Deepavali"),
    (2025, 12, 25, "Christmas"),
    (2026, 1, 26, "Republic Day"),
    (2026, 3, 3, "Holi"),
    (2026, 4, 3, "Good Friday"),
    (2026, 4, 14, "Ambedkar Jayanthi"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::gitam_2025_26()
    }
}

impl HolidayCalendar {
    pub fn new(name: &str, holidays: Vec<Holiday>) -> Self {
        Self {
            name: name.to_string(),
            holidays,
        }
    }

    pub fn gitam_2025_26() -> Self {
        let holidays = GITAM_2025_26
            .iter()
            .filter_map(|&(y, m, d, name)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| Holiday {
                    date,
                    name: name.to_string(),
                })
            })
            .collect();
        Self::new("GITAM 2025-26", holidays)
    }

    /// Holidays in `start..=end`, in date order.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Holiday> {
        let mut found: Vec<&Holiday> = self
            .holidays
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .collect();
        found.sort_by_key(|h| h.date);
        found
    }

    /// Dates to exclude for a semester running `start..=end`.
    pub fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
        self.in_range(start, end).into_iter().map(|h| h.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn builtin_table_is_complete() {
        assert_eq!(HolidayCalendar::default().holidays.len(), 10);
    }

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let cal = HolidayCalendar::default();
        let found = cal.holidays_in_range(d(2025, 8, 15), d(2025, 10, 2));
        let expected: BTreeSet<_> = [d(2025, 8, 15), d(2025, 8, 16), d(2025, 8, 27), d(2025, 10, 2)]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn even_semester_window() {
        let cal = HolidayCalendar::default();
        let names: Vec<_> = cal
            .in_range(d(2025, 12, 1), d(2026, 4, 30))
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Christmas", "Republic Day", "Holi", "Good Friday", "Ambedkar Jayanthi"]
        );
    }

    #[test]
    fn out_of_range_is_empty() {
        let cal = HolidayCalendar::default();
        assert!(cal.holidays_in_range(d(2024, 1, 1), d(2024, 12, 31)).is_empty());
    }
}
