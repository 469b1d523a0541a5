use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ProjectionError;

/// A teaching day. Weekends never carry timetable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub fn all() -> Vec<Day> {
        vec![
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Option<Day> {
        match weekday {
            Weekday::Mon => Some(Day::Monday),
            Weekday::Tue => Some(Day::Tuesday),
            Weekday::Wed => Some(Day::Wednesday),
            Weekday::Thu => Some(Day::Thursday),
            Weekday::Fri => Some(Day::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Day {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Day::Monday),
            "tuesday" | "tue" | "tues" => Ok(Day::Tuesday),
            "wednesday" | "wed" => Ok(Day::Wednesday),
            "thursday" | "thu" | "thurs" => Ok(Day::Thursday),
            "friday" | "fri" => Ok(Day::Friday),
            _ => Err(ProjectionError::UnknownDay(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_names() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("thu".parse::<Day>().unwrap(), Day::Thursday);
        assert_eq!(" FRIDAY ".parse::<Day>().unwrap(), Day::Friday);
    }

    #[test]
    fn rejects_weekend() {
        assert_eq!(
            "Saturday".parse::<Day>(),
            Err(ProjectionError::UnknownDay("Saturday".to_string()))
        );
        assert_eq!(Day::from_weekday(Weekday::Sun), None);
    }
}
