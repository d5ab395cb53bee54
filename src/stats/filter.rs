//! Filter state resolution.
//!
//! Raw query parameters (`date`, `rivalry`) normalize into a [`StatsFilter`]
//! with exactly one of three shapes: all time, an explicit date set, or a
//! rivalry. The resolver never errors; anything unparseable falls back to
//! all time. Resolution is by-value stable, so a filter doubles as a
//! cache/query key.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::MatchDay;

/// A normalized statistics filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatsFilter {
    /// Every match day in the ledger.
    AllTime,
    /// An explicit, non-empty set of match dates, in input order.
    Dates(Vec<NaiveDate>),
    /// All match days belonging to the named rivalry.
    Rivalry(String),
}

impl StatsFilter {
    /// Build a filter from raw query parameters.
    ///
    /// `date` holds zero or more comma-separated `YYYY-MM-DD` tokens;
    /// `rivalry` holds a single rivalry name. Rivalry wins when both are
    /// present (it is the coarser, higher-intent selector). Malformed
    /// tokens are dropped; if nothing usable remains the filter is
    /// [`StatsFilter::AllTime`].
    pub fn from_params(date: Option<&str>, rivalry: Option<&str>) -> Self {
        if let Some(name) = rivalry {
            let name = name.trim();
            if !name.is_empty() {
                return StatsFilter::Rivalry(name.to_string());
            }
        }

        let Some(raw) = date else {
            return StatsFilter::AllTime;
        };

        let mut dates: Vec<NaiveDate> = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<NaiveDate>() {
                Ok(parsed) => {
                    if !dates.contains(&parsed) {
                        dates.push(parsed);
                    }
                }
                Err(_) => {
                    tracing::debug!("Ignoring malformed date token: {}", token);
                }
            }
        }

        if dates.is_empty() {
            StatsFilter::AllTime
        } else {
            StatsFilter::Dates(dates)
        }
    }

    /// Resolve this filter into a concrete date selection. A rivalry
    /// expands to the set of match days naming it; an unknown rivalry
    /// selects nothing.
    pub fn resolve(&self, days: &[MatchDay]) -> DateSelection {
        match self {
            StatsFilter::AllTime => DateSelection::all(),
            StatsFilter::Dates(dates) => DateSelection::of(dates.iter().copied()),
            StatsFilter::Rivalry(name) => DateSelection::of(
                days.iter()
                    .filter(|d| d.rivalry.as_deref() == Some(name.as_str()))
                    .map(|d| d.date),
            ),
        }
    }

    /// Human-readable label, used for table headings.
    pub fn label(&self) -> String {
        match self {
            StatsFilter::AllTime => "All Time".to_string(),
            StatsFilter::Dates(dates) => dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            StatsFilter::Rivalry(name) => name.clone(),
        }
    }
}

/// The set of match dates a filter selects. `All` matches every date.
#[derive(Debug, Clone)]
pub enum DateSelection {
    All,
    Dates(HashSet<NaiveDate>),
}

impl DateSelection {
    pub fn all() -> Self {
        DateSelection::All
    }

    pub fn of(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        DateSelection::Dates(dates.into_iter().collect())
    }

    /// Whether entries on the given date are selected.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            DateSelection::All => true,
            DateSelection::Dates(set) => set.contains(&date),
        }
    }
}
