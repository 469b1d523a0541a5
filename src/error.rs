use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// The semester must end strictly after it starts
    #[error("End date {end} must be after start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Attendance for '{subject}' must be between 0 and 100, got {value}")]
    InvalidPercentage { subject: String, value: f64 },

    #[error("Unknown timetable day '{0}'. Use: monday, tuesday, wednesday, thursday, friday")]
    UnknownDay(String),

    #[error("Timetable lists {0} more than once")]
    DuplicateDay(String),

    #[error("Attendance for '{0}' is given more than once")]
    DuplicateSubject(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
