//! Semester attendance projection.
//!
//! Turns a weekly timetable, the attendance percentages a student currently
//! sees on their portal and a holiday calendar into an eligibility report:
//! classes held and attended so far, the best case if every remaining class
//! is attended, and per-subject advice.

pub mod config;
pub mod error;
pub mod holidays;
pub mod models;
pub mod projection;
pub mod utils;

pub use error::{ProjectionError, Result};
pub use holidays::{Holiday, HolidayCalendar};
pub use models::{AttendanceReport, Day, Recommendation, SemesterParameters, SubjectProjection, Timetable};
pub use projection::{compute_report, compute_report_on, count_working_days, format_recommendation};
