//! Todos model - the todo data model and its mapping onto the ordered key
//! space, shared by the server and its clients.
//!
//! Each todo is stored under `"{day number}/{created}"`. Monday is day 1 and
//! Sunday day 7, and `created` is a fixed-width RFC 3339 UTC timestamp, so
//! bytewise key order is week order first and creation order second. Every
//! query the service answers is then a single prefix or range scan.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day of the week, written as its three-letter abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// Every day in week order, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Position in the week, 1 (Monday) through 7 (Sunday).
    pub fn number(self) -> u8 {
        match self {
            Day::Mon => 1,
            Day::Tue => 2,
            Day::Wed => 3,
            Day::Thu => 4,
            Day::Fri => 5,
            Day::Sat => 6,
            Day::Sun => 7,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Sat | Day::Sun)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Returned when a string is not one of `mon`..`sun`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day: {0:?}")]
pub struct UnknownDay(pub String);

impl FromStr for Day {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.abbrev() == s)
            .ok_or_else(|| UnknownDay(s.to_string()))
    }
}

/// A daily task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    /// Task to be done
    pub task: String,

    /// Day to do the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Day>,

    /// When the todo was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(day: Day, task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            day: Some(day),
            created: None,
        }
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Storage key: day number, then creation time.
    pub fn key(day: Day, created: DateTime<Utc>) -> String {
        format!(
            "{}/{}",
            day.number(),
            created.to_rfc3339_opts(SecondsFormat::Nanos, true)
        )
    }
}

/// A todo as posted by a client.
///
/// Field names are accepted capitalized or lowercase, and any `Day` in the
/// payload is ignored: the route names the day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTodo {
    #[serde(rename = "Task", alias = "task", alias = "TASK")]
    pub task: String,

    #[serde(rename = "Created", alias = "created", alias = "CREATED", default)]
    pub created: Option<DateTime<Utc>>,
}

impl NewTodo {
    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Normalize into a stored todo for `day`, stamping `now` when the
    /// payload carried no creation time.
    pub fn into_todo(self, day: Day, now: DateTime<Utc>) -> Todo {
        Todo {
            task: self.task,
            day: Some(day),
            created: Some(self.created.unwrap_or(now)),
        }
    }
}

/// Tasks for a single day (`"mon"`) or a set of days (`"weekdays"`, `"weekend"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskList {
    pub when: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl TaskList {
    pub fn new(when: impl Into<String>) -> Self {
        Self {
            when: when.into(),
            tasks: Vec::new(),
        }
    }
}

/// A stretch of the week that can be listed in one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Day(Day),
    /// Monday through Friday
    Weekdays,
    /// Saturday and Sunday
    Weekend,
}

/// How a [`Span`] is read from the ordered key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    Prefix(String),
    /// Half-open: `min <= key < max`
    Range { min: String, max: String },
}

impl Span {
    /// Label used as the task list's `When`.
    pub fn when(self) -> &'static str {
        match self {
            Span::Day(day) => day.abbrev(),
            Span::Weekdays => "weekdays",
            Span::Weekend => "weekend",
        }
    }

    pub fn scan(self) -> Scan {
        match self {
            Span::Day(day) => Scan::Prefix(format!("{}/", day.number())),
            Span::Weekdays => Scan::Range {
                min: Day::Mon.number().to_string(),
                max: Day::Sat.number().to_string(),
            },
            Span::Weekend => Scan::Range {
                min: Day::Sat.number().to_string(),
                max: (Day::Sun.number() + 1).to_string(),
            },
        }
    }

    #[cfg(test)]
    fn contains(self, day: Day) -> bool {
        match self {
            Span::Day(d) => d == day,
            Span::Weekdays => !day.is_weekend(),
            Span::Weekend => day.is_weekend(),
        }
    }
}
