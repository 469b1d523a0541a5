use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ProjectionError, Result};

/// Dates, reported attendance and excluded days for one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterParameters {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Subject name to the attendance percentage shown on the student portal
    #[serde(default, deserialize_with = "trimmed_attendance")]
    pub attendance: BTreeMap<String, f64>,
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
}

impl SemesterParameters {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            attendance: BTreeMap::new(),
            holidays: BTreeSet::new(),
        }
    }

    pub fn with_attendance(mut self, subject: &str, percentage: f64) -> Self {
        self.attendance.insert(subject.trim().to_string(), percentage);
        self
    }

    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Reported percentage, or `None` when the subject was never entered.
    pub fn reported(&self, subject: &str) -> Option<f64> {
        self.attendance.get(subject.trim()).copied()
    }

    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(ProjectionError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        for (subject, &value) in &self.attendance {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ProjectionError::InvalidPercentage {
                    subject: subject.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Subject keys are matched against trimmed timetable labels, so trim them on
/// load. `" Math "` and `"Math"` in one file is an error.
fn trimmed_attendance<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut attendance = BTreeMap::new();
    for (subject, value) in raw {
        let subject = subject.trim().to_string();
        if attendance.insert(subject.clone(), value).is_some() {
            return Err(de::Error::custom(ProjectionError::DuplicateSubject(subject)));
        }
    }
    Ok(attendance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn end_must_follow_start() {
        let same = SemesterParameters::new(d(2025, 7, 1), d(2025, 7, 1));
        assert!(matches!(
            same.validate(),
            Err(ProjectionError::InvalidRange { .. })
        ));
        assert!(SemesterParameters::new(d(2025, 7, 1), d(2025, 7, 2))
            .validate()
            .is_ok());
    }

    #[test]
    fn percentage_out_of_range_is_rejected() {
        let params = SemesterParameters::new(d(2025, 7, 1), d(2025, 11, 30))
            .with_attendance("Math", 101.0);
        assert!(matches!(
            params.validate(),
            Err(ProjectionError::InvalidPercentage { value, .. }) if value == 101.0
        ));

        let nan = SemesterParameters::new(d(2025, 7, 1), d(2025, 11, 30))
            .with_attendance("Math", f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn loads_from_toml() {
        let params: SemesterParameters = toml::from_str(
            r#"
            start = "2025-07-07"
            end = "2025-11-28"
            holidays = ["2025-08-15"]

            [attendance]
            Math = 82.5
            Physics = 70
            "#,
        )
        .unwrap();
        assert_eq!(params.start, d(2025, 7, 7));
        assert_eq!(params.reported("Math"), Some(82.5));
        assert_eq!(params.reported("Physics"), Some(70.0));
        assert!(params.holidays.contains(&d(2025, 8, 15)));
    }

    #[test]
    fn attendance_keys_are_trimmed_on_load() {
        let params: SemesterParameters = toml::from_str(
            r#"
            start = "2025-07-07"
            end = "2025-07-18"

            [attendance]
            " Math " = 100
            "#,
        )
        .unwrap();
        assert_eq!(params.attendance.keys().collect::<Vec<_>>(), vec!["Math"]);
        assert_eq!(params.reported("Math"), Some(100.0));
        assert_eq!(params.reported(" Math "), Some(100.0));
    }

    #[test]
    fn keys_equal_after_trimming_are_rejected() {
        let err = toml::from_str::<SemesterParameters>(
            r#"
            start = "2025-07-07"
            end = "2025-07-18"

            [attendance]
            Math = 80
            "Math " = 90
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Attendance for 'Math' is given more than once"));
    }
}
