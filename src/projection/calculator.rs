use chrono::{Local, NaiveDate};
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{AttendanceReport, Recommendation, SemesterParameters, SubjectProjection, Timetable};
use crate::projection::working_days::count_working_days;

/// Minimum share of a subject's classes, in percent.
pub const SUBJECT_THRESHOLD: u32 = 65;
/// Minimum aggregate attendance, in percent.
pub const OVERALL_THRESHOLD: f64 = 75.0;
/// Current percentage at or above which a subject needs no attention.
pub const ON_TRACK_THRESHOLD: f64 = 75.0;
/// Largest share of remaining classes that still counts as on track.
pub const CAUTION_FUTURE_LIMIT: f64 = 50.0;

const DAYS_PER_WEEK: f64 = 5.0;

/// Project attendance as of the local calendar date.
pub fn compute_report(timetable: &Timetable, params: &SemesterParameters) -> Result<AttendanceReport> {
    compute_report_on(timetable, params, Local::now().date_naive())
}

/// Project attendance as of `today`.
///
/// Classes are spread evenly over working days at the weekly rate, so a
/// subject with three weekly slots gets 3/5 of a class per working day.
pub fn compute_report_on(
    timetable: &Timetable,
    params: &SemesterParameters,
    today: NaiveDate,
) -> Result<AttendanceReport> {
    params.validate()?;

    let total_days = count_working_days(params.start, params.end, &params.holidays);
    let elapsed_days = if today < params.start {
        0
    } else {
        count_working_days(params.start, today.min(params.end), &params.holidays)
    };
    let days_remaining = total_days.saturating_sub(elapsed_days);
    debug!(
        "working days: total={} elapsed={} remaining={}",
        total_days, elapsed_days, days_remaining
    );

    let subjects = timetable.subjects();
    let mut per_subject = BTreeMap::new();
    let mut total_attended = 0u32;
    let mut total_held = 0u32;

    for subject in &subjects {
        let frequency = timetable.weekly_frequency(subject);
        let daily_rate = frequency as f64 / DAYS_PER_WEEK;

        let total = (daily_rate * total_days as f64).round() as u32;
        let held = (daily_rate * elapsed_days as f64).round() as u32;
        let reported = params.reported(subject).unwrap_or_else(|| {
            warn!("No attendance reported for '{}', assuming 0%", subject);
            0.0
        });
        let attended = (reported / 100.0 * held as f64).round() as u32;

        total_attended += attended;
        total_held += held;

        let current_percentage = percentage(attended as f64, total);
        let projected = attended as f64 + days_remaining as f64 * daily_rate;
        let best_case_attendance = percentage(projected, total).min(100.0);
        let future_attendance_needed = future_needed(attended, total);

        let projection = SubjectProjection {
            weekly_frequency: frequency,
            total_classes_till_end: total,
            classes_held_so_far: held,
            attended_so_far: attended,
            current_percentage,
            best_case_attendance,
            eligible_now: meets_subject_threshold(attended, total),
            best_case_eligible: best_case_attendance >= SUBJECT_THRESHOLD as f64,
            future_attendance_needed,
            recommendation: classify(current_percentage, future_attendance_needed),
        };
        debug!("{}: {:?}", subject, projection);
        per_subject.insert(subject.clone(), projection);
    }

    let overall_attendance_now = percentage(total_attended as f64, total_held);
    let best_case_overall_attendance = if subjects.is_empty() {
        0.0
    } else {
        let sum: f64 = per_subject.values().map(|p| p.best_case_attendance).sum();
        (sum / subjects.len() as f64).min(100.0)
    };

    let is_eligible_overall = overall_attendance_now >= OVERALL_THRESHOLD
        && per_subject.values().all(|p| p.eligible_now);
    let is_best_case_eligible_overall = best_case_overall_attendance >= OVERALL_THRESHOLD
        && per_subject.values().all(|p| p.best_case_eligible);

    Ok(AttendanceReport {
        subjects,
        total_working_days: total_days,
        elapsed_working_days: elapsed_days,
        days_remaining,
        total_weeks: total_days.div_ceil(5),
        overall_attendance_now,
        best_case_overall_attendance,
        is_eligible_overall,
        is_best_case_eligible_overall,
        per_subject,
    })
}

/// `part / whole * 100`, or 0 when there is nothing to divide by.
fn percentage(part: f64, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part * 100.0 / whole as f64
    }
}

/// attended / total >= 65%, compared in integers so the boundary is exact.
fn meets_subject_threshold(attended: u32, total: u32) -> bool {
    total > 0 && attended as u64 * 100 >= total as u64 * SUBJECT_THRESHOLD as u64
}

/// Share of the still-unattended classes that must be attended to reach the
/// subject threshold, clamped to 0..=100.
fn future_needed(attended: u32, total: u32) -> f64 {
    let required = (total as u64 * SUBJECT_THRESHOLD as u64).div_ceil(100) as i64;
    let needed = required - attended as i64;
    let remaining = total as i64 - attended as i64;
    if remaining > 0 {
        (needed as f64 / remaining as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn classify(current_percentage: f64, future_needed: f64) -> Recommendation {
    if current_percentage >= ON_TRACK_THRESHOLD {
        Recommendation::OnTrack
    } else if current_percentage >= SUBJECT_THRESHOLD as f64 {
        if future_needed <= CAUTION_FUTURE_LIMIT {
            Recommendation::OnTrack
        } else {
            Recommendation::Caution
        }
    } else {
        Recommendation::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use crate::models::Day;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn exactly_sixty_five_percent_is_eligible() {
        assert!(meets_subject_threshold(13, 20));
        assert!(!meets_subject_threshold(12, 20));
        assert!(!meets_subject_threshold(0, 0));
    }

    #[test]
    fn future_needed_uses_ceiling() {
        // ceil(0.65 * 10) = 7, need 3 of the 6 outstanding
        assert_eq!(future_needed(4, 10), 50.0);
        // already past the threshold
        assert_eq!(future_needed(9, 10), 0.0);
        // nothing left to attend
        assert_eq!(future_needed(10, 10), 0.0);
        assert_eq!(future_needed(0, 0), 0.0);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify(80.0, 0.0), Recommendation::OnTrack);
        assert_eq!(classify(75.0, 90.0), Recommendation::OnTrack);
        assert_eq!(classify(70.0, 50.0), Recommendation::OnTrack);
        assert_eq!(classify(70.0, 50.1), Recommendation::Caution);
        assert_eq!(classify(65.0, 60.0), Recommendation::Caution);
        assert_eq!(classify(64.9, 0.0), Recommendation::Critical);
    }

    #[test]
    fn invalid_range_is_rejected_up_front() {
        let timetable = Timetable::new().with_day(Day::Monday, &["Math"]);
        let params = SemesterParameters::new(d(2025, 7, 10), d(2025, 7, 7));
        assert_eq!(
            compute_report_on(&timetable, &params, d(2025, 7, 8)),
            Err(ProjectionError::InvalidRange {
                start: d(2025, 7, 10),
                end: d(2025, 7, 7),
            })
        );
    }

    #[test]
    fn today_before_start_counts_nothing_elapsed() {
        let timetable = Timetable::new().with_day(Day::Monday, &["Math"]);
        let params = SemesterParameters::new(d(2025, 7, 7), d(2025, 7, 18)).with_attendance("Math", 90.0);
        let report = compute_report_on(&timetable, &params, d(2025, 7, 1)).unwrap();
        assert_eq!(report.elapsed_working_days, 0);
        assert_eq!(report.days_remaining, 10);
        assert_eq!(report.overall_attendance_now, 0.0);
        let math = report.subject("Math").unwrap();
        assert_eq!(math.classes_held_so_far, 0);
        // 1/5 * 10 days = 2 classes, both still ahead
        assert_eq!(math.total_classes_till_end, 2);
        assert_eq!(math.best_case_attendance, 100.0);
    }

    #[test]
    fn today_after_end_is_clamped() {
        let timetable = Timetable::new().with_day(Day::Monday, &["Math"]);
        let params = SemesterParameters::new(d(2025, 7, 7), d(2025, 7, 18)).with_attendance("Math", 100.0);
        let report = compute_report_on(&timetable, &params, d(2026, 1, 1)).unwrap();
        assert_eq!(report.elapsed_working_days, 10);
        assert_eq!(report.days_remaining, 0);
        assert_eq!(report.total_weeks, 2);
    }

    #[test]
    fn missing_attendance_counts_as_zero() {
        let timetable = Timetable::new().with_day(Day::Monday, &["Math", "Art"]);
        let params = SemesterParameters::new(d(2025, 7, 7), d(2025, 7, 18)).with_attendance("Math", 100.0);
        let report = compute_report_on(&timetable, &params, d(2025, 7, 18)).unwrap();
        let art = report.subject("Art").unwrap();
        assert_eq!(art.classes_held_so_far, 2);
        assert_eq!(art.attended_so_far, 0);
        assert_eq!(art.recommendation, Recommendation::Critical);
        assert_eq!(report.overall_attendance_now, 50.0);
        assert!(!report.is_eligible_overall);
    }
}
