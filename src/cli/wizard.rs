use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use attendance_projector::config::AppConfig;
use attendance_projector::models::{Day, SemesterParameters, Timetable};
use attendance_projector::projection::compute_report;
use attendance_projector::utils::format::{parse_date, parse_holiday_list};

use crate::cli::handlers::render_report;

// ─── Wizard steps ────────────────────────────────────────────────────────────

const TOTAL_STEPS: usize = 4;

/// Line-based wizard: timetable, semester dates, attendance, holidays.
pub struct Wizard<'a, R, W> {
    input: R,
    output: W,
    config: &'a AppConfig,
}

impl<'a, R: BufRead, W: Write> Wizard<'a, R, W> {
    pub fn new(input: R, output: W, config: &'a AppConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    pub fn run(&mut self) -> Result<(Timetable, SemesterParameters)> {
        let timetable = self.timetable_step()?;
        let (start, end) = self.dates_step()?;
        let mut params = SemesterParameters::new(start, end);
        self.attendance_step(&timetable, &mut params)?;
        params.holidays = self.holiday_step(start, end)?;
        Ok((timetable, params))
    }

    fn header(&mut self, step: usize, title: &str) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "  Step {}/{}: {}", step, TOTAL_STEPS, title)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            bail!("Input closed before the wizard finished");
        }
        Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    fn timetable_step(&mut self) -> Result<Timetable> {
        self.header(1, "Create Your Timetable")?;
        let slots = self.config.display.time_slots.clone();
        writeln!(
            self.output,
            "  Enter subjects for each day separated by commas, one per slot.\n  Slots: {}\n  Leave a position empty for a free period.",
            slots.join(" | ")
        )?;

        loop {
            let mut timetable = Timetable::new();
            for day in Day::all() {
                let entries = loop {
                    let line = self.prompt(&format!("  {:<10} ", format!("{}:", day)))?;
                    match split_slots(&line, slots.len()) {
                        Some(entries) => break entries,
                        None => writeln!(
                            self.output,
                            "  Too many entries, there are only {} slots per day",
                            slots.len()
                        )?,
                    }
                };
                timetable.set_day(day, entries);
            }
            if timetable.has_subjects() {
                return Ok(timetable);
            }
            writeln!(self.output, "  Please add at least one subject to your timetable")?;
        }
    }

    fn dates_step(&mut self) -> Result<(NaiveDate, NaiveDate)> {
        self.header(2, "Semester Details")?;
        let start = self.prompt_date("  Semester start date (YYYY-MM-DD): ")?;
        loop {
            let end = self.prompt_date("  Semester end date (YYYY-MM-DD):   ")?;
            if end > start {
                return Ok((start, end));
            }
            writeln!(self.output, "  End date must be after start date")?;
        }
    }

    fn prompt_date(&mut self, message: &str) -> Result<NaiveDate> {
        loop {
            let line = self.prompt(message)?;
            match parse_date(&line) {
                Ok(date) => return Ok(date),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    fn attendance_step(&mut self, timetable: &Timetable, params: &mut SemesterParameters) -> Result<()> {
        self.header(3, "Current Attendance (%)")?;
        for subject in timetable.subjects() {
            loop {
                let line = self.prompt(&format!("  {} (%): ", subject))?;
                match line.trim().parse::<f64>() {
                    Ok(pct) if (0.0..=100.0).contains(&pct) => {
                        params.attendance.insert(subject.clone(), pct);
                        break;
                    }
                    _ => writeln!(self.output, "  Required: a number from 0 to 100")?,
                }
            }
        }
        Ok(())
    }

    fn holiday_step(&mut self, start: NaiveDate, end: NaiveDate) -> Result<BTreeSet<NaiveDate>> {
        let title = format!("Public Holidays ({})", self.config.calendar.name);
        self.header(4, &title)?;
        let suggested = self.config.calendar.holidays_in_range(start, end);
        let listed: Vec<String> = suggested.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        writeln!(
            self.output,
            "  Populated from the academic calendar: {}",
            if listed.is_empty() { "none".to_string() } else { listed.join(",") }
        )?;

        let line = self.prompt("  Press Enter to keep, or type YYYY-MM-DD,YYYY-MM-DD,...: ")?;
        let holidays: BTreeSet<NaiveDate> = if line.trim().is_empty() {
            suggested
        } else {
            parse_holiday_list(&line).into_iter().collect()
        };
        if !holidays.is_empty() {
            writeln!(
                self.output,
                "  {} public holiday(s) will be excluded from class calculations",
                holidays.len()
            )?;
        }
        Ok(holidays)
    }
}

/// Comma-separated labels padded to `count` slots, or `None` when the line
/// holds more than `count` entries.
fn split_slots(line: &str, count: usize) -> Option<Vec<String>> {
    let mut slots: Vec<String> = if line.trim().is_empty() {
        Vec::new()
    } else {
        line.split(',').map(|s| s.trim().to_string()).collect()
    };
    if slots.len() > count {
        return None;
    }
    slots.resize(count, String::new());
    Some(slots)
}

pub fn handle_wizard(config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let (timetable, params) = Wizard::new(stdin.lock(), io::stdout(), config).run()?;
    log::debug!(
        "wizard finished: {} subjects, {} holidays",
        timetable.subjects().len(),
        params.holidays.len()
    );
    let report = compute_report(&timetable, &params)?;
    render_report(&report, params.end, config.display.bar_width);
    Ok(())
}
