use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ProjectionError;
use crate::models::Day;

/// Weekly grid of subject labels, one entry per time slot.
///
/// Every day is expected to carry the same number of slots; blank labels
/// mark free periods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct Timetable {
    days: BTreeMap<Day, Vec<String>>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slots for `day`.
    pub fn set_day(&mut self, day: Day, slots: Vec<String>) {
        self.days.insert(day, slots);
    }

    pub fn with_day(mut self, day: Day, slots: &[&str]) -> Self {
        self.set_day(day, slots.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn slots(&self, day: Day) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Trimmed, non-blank labels across every slot, in day order.
    fn labels(&self) -> impl Iterator<Item = &str> {
        self.days
            .values()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Distinct subject names, sorted lexicographically.
    pub fn subjects(&self) -> Vec<String> {
        self.labels()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of weekly slots labelled `subject`. Repeats within one day count.
    pub fn weekly_frequency(&self, subject: &str) -> u32 {
        let subject = subject.trim();
        self.labels().filter(|label| *label == subject).count() as u32
    }

    pub fn has_subjects(&self) -> bool {
        self.labels().next().is_some()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for Timetable {
    type Error = ProjectionError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut timetable = Timetable::new();
        for (name, slots) in raw {
            let day: Day = name.parse()?;
            if timetable.days.contains_key(&day) {
                return Err(ProjectionError::DuplicateDay(day.display_name().to_string()));
            }
            timetable.set_day(day, slots);
        }
        Ok(timetable)
    }
}

impl From<Timetable> for BTreeMap<String, Vec<String>> {
    fn from(timetable: Timetable) -> Self {
        timetable
            .days
            .into_iter()
            .map(|(day, slots)| (day.display_name().to_string(), slots))
            .collect()
    }
}
