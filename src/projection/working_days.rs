use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::models::Day;

pub fn is_working_day(date: NaiveDate, excluded: &BTreeSet<NaiveDate>) -> bool {
    Day::from_weekday(date.weekday()).is_some() && !excluded.contains(&date)
}

/// Count Monday-Friday dates in `start..=end` that are not excluded.
/// An empty range (start after end) counts zero.
pub fn count_working_days(start: NaiveDate, end: NaiveDate, excluded: &BTreeSet<NaiveDate>) -> u32 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_working_day(*d, excluded))
        .count() as u32
}
