use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attendance", version, author, about = "Project semester attendance and exam eligibility")]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Step-by-step wizard: timetable, semester dates, attendance, holidays
    Wizard,
    /// Compute an eligibility report from files and flags
    Report(ReportArgs),
    /// List the subjects in a timetable with their weekly class count
    Subjects {
        /// Timetable TOML file (Monday = ["Math", "", ...])
        #[arg(long, short)]
        timetable: PathBuf,
    },
    /// List configured holidays between two dates
    Holidays {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: String,
    },
    /// Show the config file location
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Timetable TOML file (Monday = ["Math", "", ...])
    #[arg(long, short)]
    pub timetable: PathBuf,

    /// Semester TOML file with start, end, [attendance] and holidays
    #[arg(long, short)]
    pub semester: Option<PathBuf>,

    /// Semester start, YYYY-MM-DD (overrides the semester file)
    #[arg(long)]
    pub start: Option<String>,

    /// Semester end, YYYY-MM-DD (overrides the semester file)
    #[arg(long)]
    pub end: Option<String>,

    /// Reported attendance as SUBJECT=PERCENT, repeatable
    #[arg(long = "attendance", short = 'a', value_name = "SUBJECT=PERCENT")]
    pub attendance: Vec<String>,

    /// Extra holiday, YYYY-MM-DD, repeatable
    #[arg(long = "holiday", value_name = "DATE")]
    pub holidays: Vec<String>,

    /// Do not add the configured calendar's holidays
    #[arg(long)]
    pub no_calendar: bool,

    /// Pretend today is this date, YYYY-MM-DD
    #[arg(long)]
    pub today: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
