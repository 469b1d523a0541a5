use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

use attendance_projector::config::AppConfig;
use attendance_projector::models::{
    AttendanceReport, Day, Recommendation, SemesterParameters, Timetable,
};
use attendance_projector::projection::{compute_report_on, OVERALL_THRESHOLD, SUBJECT_THRESHOLD};
use attendance_projector::utils::format::{
    format_number, format_percent, pad_display, parse_date, progress_bar,
};

use crate::cli::args::ReportArgs;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[38;2;59;130;246m";

// ─── Report ──────────────────────────────────────────────────────────────────

pub fn handle_report(config: &AppConfig, args: &ReportArgs) -> Result<()> {
    let timetable = load_timetable(&args.timetable)?;
    if !timetable.has_subjects() {
        bail!("Timetable {:?} has no subjects", args.timetable);
    }

    let params = build_semester(config, args)?;
    let today = match &args.today {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };

    let report = compute_report_on(&timetable, &params, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report, params.end, config.display.bar_width);
    }
    Ok(())
}

fn build_semester(config: &AppConfig, args: &ReportArgs) -> Result<SemesterParameters> {
    let mut params = match &args.semester {
        Some(path) => load_semester(path)?,
        None => {
            let start = args
                .start
                .as_deref()
                .ok_or_else(|| anyhow!("--start is required without --semester"))?;
            let end = args
                .end
                .as_deref()
                .ok_or_else(|| anyhow!("--end is required without --semester"))?;
            SemesterParameters::new(parse_date(start)?, parse_date(end)?)
        }
    };

    if let Some(start) = &args.start {
        params.start = parse_date(start)?;
    }
    if let Some(end) = &args.end {
        params.end = parse_date(end)?;
    }

    for entry in &args.attendance {
        let (subject, pct) = parse_attendance_arg(entry)?;
        params.attendance.insert(subject, pct);
    }

    if !args.no_calendar {
        params
            .holidays
            .extend(config.calendar.holidays_in_range(params.start, params.end));
    }
    for holiday in &args.holidays {
        params.holidays.insert(parse_date(holiday)?);
    }
    Ok(params)
}

/// Split "Data Structures=72.5" into its subject and percentage.
fn parse_attendance_arg(entry: &str) -> Result<(String, f64)> {
    let (subject, pct) = entry
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("Expected SUBJECT=PERCENT, got '{}'", entry))?;
    let subject = subject.trim();
    if subject.is_empty() {
        bail!("Missing subject name in '{}'", entry);
    }
    let pct: f64 = pct
        .trim()
        .parse()
        .with_context(|| format!("Bad percentage in '{}'", entry))?;
    Ok((subject.to_string(), pct))
}

pub fn load_timetable(path: &Path) -> Result<Timetable> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Parsing timetable {:?}", path))
}

fn load_semester(path: &Path) -> Result<SemesterParameters> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Parsing semester {:?}", path))
}

// ─── Subjects ────────────────────────────────────────────────────────────────

pub fn handle_subjects(timetable_path: &Path) -> Result<()> {
    let timetable = load_timetable(timetable_path)?;
    let subjects = timetable.subjects();

    println!();
    if subjects.is_empty() {
        println_colored!(AMBER, "  No subjects in timetable");
    } else {
        println_colored!(BLUE, "  Subjects ({})", subjects.len());
        println!();
        let width = name_column_width(subjects.iter().map(String::as_str));
        for subject in &subjects {
            println!(
                "  {}  {} / week",
                pad_display(subject, width),
                timetable.weekly_frequency(subject)
            );
        }
        println!();
        println_colored!(BLUE, "  Week");
        println!();
        for day in Day::all() {
            println!("  {}", grid_row(&timetable, day));
        }
    }
    println!();
    Ok(())
}

/// One timetable row, free periods shown as `-`.
fn grid_row(timetable: &Timetable, day: Day) -> String {
    let cells: Vec<&str> = timetable
        .slots(day)
        .iter()
        .map(|s| match s.trim() {
            "" => "-",
            label => label,
        })
        .collect();
    format!("{:<10} {}", day.display_name(), cells.join(" | "))
}

// ─── Holidays ────────────────────────────────────────────────────────────────

pub fn handle_holidays(config: &AppConfig, start: &str, end: &str) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let found = config.calendar.in_range(start, end);

    println!();
    println_colored!(BLUE, "  {} holidays, {} to {}", config.calendar.name, start, end);
    println!();
    if found.is_empty() {
        println_colored!(DIM, "  None in range");
    }
    for holiday in &found {
        println!(
            "  {}  {:<3}  {}",
            holiday.date.format("%Y-%m-%d"),
            holiday.date.format("%a"),
            holiday.name
        );
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            println!("Config already exists at {:?}", path);
        } else {
            config.save_to(path)?;
            println_colored!(GREEN, "  ✓ Wrote default config to {:?}", path);
        }
        return Ok(());
    }
    println!("{}", path.display());
    Ok(())
}

// ─── Results rendering ───────────────────────────────────────────────────────

pub fn render_report(report: &AttendanceReport, end: NaiveDate, bar_width: usize) {
    println!();
    println_colored!(BLUE, "  Your Attendance Status");
    println!();
    println!(
        "  Overall attendance:  {}   (required: {}%)",
        format_percent(report.overall_attendance_now),
        OVERALL_THRESHOLD
    );
    println!(
        "  Classes attended:    {}/{} held so far",
        report.total_attended(),
        report.total_held()
    );
    println!(
        "  Semester duration:   {} weeks ({} days)",
        report.total_weeks, report.total_working_days
    );
    print_eligibility("  Eligibility:         ", report.is_eligible_overall, RED);

    println!();
    println_colored!(BLUE, "  Best-Case Scenario Projection");
    println_colored!(
        DIM,
        "  If you attend all remaining classes until {} ({} days remaining):",
        end.format("%Y-%m-%d"),
        report.days_remaining
    );
    println!();
    println!(
        "  Projected overall:   {}   (required: {}%)",
        format_percent(report.best_case_overall_attendance),
        OVERALL_THRESHOLD
    );
    print_eligibility(
        "  Best-case status:    ",
        report.is_best_case_eligible_overall,
        AMBER,
    );

    if report.subjects.is_empty() {
        println!();
        return;
    }

    println!();
    println_colored!(BLUE, "  Subject-wise Breakdown");
    println!();
    let width = name_column_width(report.subjects.iter().map(String::as_str));
    println_colored!(
        BOLD,
        "  {}  {:>8}  {:>8}  {:>9}  {:>9}",
        pad_display("Subject", width),
        "Attended",
        "Current",
        "Best case",
        "Needed"
    );
    for (name, p) in report.iter() {
        let color = match p.recommendation {
            Recommendation::OnTrack => GREEN,
            Recommendation::Caution => AMBER,
            Recommendation::Critical => RED,
        };
        println!(
            "  {}  {:>8}  {:>8}  {:>9}  {:>9}",
            pad_display(name, width),
            format!("{}/{}", p.attended_so_far, p.classes_held_so_far),
            format_percent(p.current_percentage),
            format_percent(p.best_case_attendance),
            format!("{}%", format_number(p.future_attendance_needed)),
        );
        println_colored!(
            color,
            "  {}  {} {}",
            pad_display("", width),
            progress_bar(p.current_percentage, bar_width),
            p.message()
        );
        println_colored!(
            DIM,
            "  {}  {} classes by semester end, {} per week, {}",
            pad_display("", width),
            p.total_classes_till_end,
            p.weekly_frequency,
            if p.eligible_now {
                format!("meets {}% now", SUBJECT_THRESHOLD)
            } else {
                format!("below {}% now", SUBJECT_THRESHOLD)
            }
        );
    }
    println!();
}

fn print_eligibility(label: &str, eligible: bool, fail_color: &str) {
    if eligible {
        println_colored!(GREEN, "{}✓ Eligible", label);
    } else {
        println_colored!(fail_color, "{}✗ Not Eligible", label);
    }
}

fn name_column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|name| name.width())
        .max()
        .unwrap_or(0)
        .max("Subject".len())
}
