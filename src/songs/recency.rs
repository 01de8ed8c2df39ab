//! How recently a song was performed.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::recency::{LONG_AGO_DAYS, MODERATE_DAYS, RECENT_DAYS};

/// Recency bucket for a song's last performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecencyStatus {
    /// Never performed.
    FirstTime,
    /// Under 30 days ago.
    Recent,
    /// 30 to 89 days ago.
    Moderate,
    /// 90 to 179 days ago.
    LongAgo,
    /// 180 days ago or more.
    VeryLongAgo,
}

impl RecencyStatus {
    /// Classify a last-performed date against `today`.
    ///
    /// Both are plain calendar dates. Dates after `today` count as `Recent`.
    pub fn classify(last_performed: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(last) = last_performed else {
            return Self::FirstTime;
        };
        match (today - last).num_days() {
            d if d < RECENT_DAYS => Self::Recent,
            d if d < MODERATE_DAYS => Self::Moderate,
            d if d < LONG_AGO_DAYS => Self::LongAgo,
            _ => Self::VeryLongAgo,
        }
    }

    /// Classify against the local calendar date.
    pub fn classify_today(last_performed: Option<NaiveDate>) -> Self {
        Self::classify(last_performed, Local::now().date_naive())
    }

    /// Human-readable label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstTime => "First time",
            Self::Recent => "Recent",
            Self::Moderate => "A while ago",
            Self::LongAgo => "Long ago",
            Self::VeryLongAgo => "Very long ago",
        }
    }
}
