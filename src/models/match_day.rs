//! Match days and rivalries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A day on which matches were played. The date is the unique key; every
/// performance entry references a match day by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDay {
    /// Calendar date of the match day (unique)
    pub date: NaiveDate,

    /// Human-readable title (e.g., "Eid Cup Day 1")
    pub title: String,

    /// Rivalry this day belongs to, if any. A day belongs to at most one.
    pub rivalry: Option<String>,
}

impl MatchDay {
    /// Create a new MatchDay.
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            rivalry: None,
        }
    }

    /// Builder method to attach this day to a rivalry.
    pub fn with_rivalry(mut self, rivalry: impl Into<String>) -> Self {
        self.rivalry = Some(rivalry.into());
        self
    }
}

/// A named series of match days (e.g., a recurring team-vs-team series).
/// Its date set is the set of match days whose `rivalry` field names it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rivalry {
    /// Rivalry name (unique)
    pub name: String,

    /// Date of the first series day, used for ordering
    pub start: NaiveDate,
}

impl Rivalry {
    /// Create a new Rivalry.
    pub fn new(name: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }

    /// Collect the dates belonging to this rivalry, in match-day order.
    pub fn dates<'a>(&self, days: impl IntoIterator<Item = &'a MatchDay>) -> Vec<NaiveDate> {
        days.into_iter()
            .filter(|d| d.rivalry.as_deref() == Some(self.name.as_str()))
            .map(|d| d.date)
            .collect()
    }
}
