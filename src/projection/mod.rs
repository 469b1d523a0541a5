pub mod calculator;
pub mod recommendation;
pub mod working_days;

pub use calculator::{
    compute_report, compute_report_on, OVERALL_THRESHOLD, SUBJECT_THRESHOLD,
};
pub use recommendation::format_recommendation;
pub use working_days::count_working_days;
