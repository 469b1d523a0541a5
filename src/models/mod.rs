pub mod day;
pub mod report;
pub mod semester;
pub mod timetable;

pub use day::Day;
pub use report::{AttendanceReport, Recommendation, SubjectProjection};
pub use semester::SemesterParameters;
pub use timetable::Timetable;
