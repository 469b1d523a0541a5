pub mod calendar;

pub use calendar::{Holiday, HolidayCalendar};
