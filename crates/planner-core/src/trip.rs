//! Trip parameters entered on the request form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format accepted for trip start and end dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interest tags offered on the request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interest {
    Food,
    Museums,
    Nature,
    Nightlife,
}

impl Interest {
    /// Every tag, in the order the form lists them.
    pub const ALL: [Interest; 4] = [
        Interest::Food,
        Interest::Museums,
        Interest::Nature,
        Interest::Nightlife,
    ];

    /// Display label of the tag.
    pub fn label(&self) -> &'static str {
        match self {
            Interest::Food => "Food",
            Interest::Museums => "Museums",
            Interest::Nature => "Nature",
            Interest::Nightlife => "Nightlife",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interest: {0}")]
pub struct UnknownInterest(pub String);

impl FromStr for Interest {
    type Err = UnknownInterest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::ALL
            .into_iter()
            .find(|interest| interest.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInterest(s.to_string()))
    }
}

/// How packed each day should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Normal,
    Tight,
}

impl Pace {
    /// Every pace, in the order the form lists them.
    pub const ALL: [Pace; 3] = [Pace::Relaxed, Pace::Normal, Pace::Tight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Normal => "normal",
            Pace::Tight => "tight",
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pace: {0} (expected relaxed, normal or tight)")]
pub struct UnknownPace(pub String);

impl FromStr for Pace {
    type Err = UnknownPace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Pace::Relaxed),
            "normal" => Ok(Pace::Normal),
            "tight" => Ok(Pace::Tight),
            _ => Err(UnknownPace(s.to_string())),
        }
    }
}

/// Number of days covered by a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripLength {
    /// Inclusive day count between start and end.
    Days(i64),
    /// One of the dates could not be parsed.
    Unavailable,
}

impl fmt::Display for TripLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripLength::Days(days) => write!(f, "{}", days),
            TripLength::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Parameters of one itinerary request.
///
/// Dates are kept as the ISO strings the user entered so they can be echoed
/// back into the prompt unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub interests: Vec<Interest>,
    #[serde(default)]
    pub pace: Pace,
}

impl TripRequest {
    /// Inclusive number of days between start and end.
    ///
    /// Unparsable dates give [`TripLength::Unavailable`] rather than an error.
    pub fn length(&self) -> TripLength {
        match (parse_date(&self.start_date), parse_date(&self.end_date)) {
            (Some(start), Some(end)) => TripLength::Days((end - start).num_days() + 1),
            _ => TripLength::Unavailable,
        }
    }

    /// Interests joined with ", " for prompt text.
    pub fn interests_joined(&self) -> String {
        self.interests
            .iter()
            .map(Interest::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the end date falls before the start date.
    ///
    /// Returns false when either date is unparsable.
    pub fn ends_before_start(&self) -> bool {
        match (parse_date(&self.start_date), parse_date(&self.end_date)) {
            (Some(start), Some(end)) => end < start,
            _ => false,
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
