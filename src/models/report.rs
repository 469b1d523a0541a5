use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::utils::format::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    OnTrack,
    Caution,
    Critical,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::OnTrack => "on-track",
            Recommendation::Caution => "caution",
            Recommendation::Critical => "critical",
        }
    }

    /// Advice shown next to a subject. `needed` is the share of remaining
    /// classes that must be attended, in percent.
    pub fn message(&self, needed: f64) -> String {
        match self {
            Recommendation::OnTrack => {
                "You're on track! Maintain your current attendance.".to_string()
            }
            Recommendation::Caution => format!(
                "Attend at least {}% of remaining classes to meet 65% requirement.",
                format_number(needed)
            ),
            Recommendation::Critical => {
                "Critical! Attend all remaining classes to meet 65% requirement.".to_string()
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-track" => Ok(Recommendation::OnTrack),
            "caution" => Ok(Recommendation::Caution),
            "critical" => Ok(Recommendation::Critical),
            _ => Err(anyhow::anyhow!("Unknown recommendation status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProjection {
    pub weekly_frequency: u32,
    pub total_classes_till_end: u32,
    pub classes_held_so_far: u32,
    pub attended_so_far: u32,
    /// attended / total classes in the whole semester, in percent
    pub current_percentage: f64,
    pub best_case_attendance: f64,
    pub eligible_now: bool,
    pub best_case_eligible: bool,
    pub future_attendance_needed: f64,
    pub recommendation: Recommendation,
}

impl SubjectProjection {
    pub fn message(&self) -> String {
        self.recommendation.message(self.future_attendance_needed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub subjects: Vec<String>,
    pub total_working_days: u32,
    pub elapsed_working_days: u32,
    pub days_remaining: u32,
    pub total_weeks: u32,
    pub overall_attendance_now: f64,
    pub best_case_overall_attendance: f64,
    pub is_eligible_overall: bool,
    pub is_best_case_eligible_overall: bool,
    pub per_subject: BTreeMap<String, SubjectProjection>,
}

impl AttendanceReport {
    pub fn subject(&self, name: &str) -> Option<&SubjectProjection> {
        self.per_subject.get(name)
    }

    /// Subjects in name order, paired with their projection.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectProjection)> {
        self.subjects
            .iter()
            .filter_map(|name| self.per_subject.get(name).map(|p| (name.as_str(), p)))
    }

    pub fn total_attended(&self) -> u32 {
        self.per_subject.values().map(|p| p.attended_so_far).sum()
    }

    pub fn total_held(&self) -> u32 {
        self.per_subject.values().map(|p| p.classes_held_so_far).sum()
    }
}
