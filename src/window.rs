use crate::models::{WeekBucket, WeightSample};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Relative range of recent history shown on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Month,
    Quarter,
    #[default]
    Year,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time window '{0}', expected month, quarter, year or all")]
pub struct ParseWindowError(pub String);

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    /// Earliest date still inside the window, or `None` for [`TimeWindow::All`].
    ///
    /// Month arithmetic clamps to the end of shorter months, so one month
    /// before March 31 is the last day of February.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
            Self::All => return None,
        };
        Some(
            today
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            _ => Err(ParseWindowError(value.to_string())),
        }
    }
}

/// A record positioned on the calendar.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for WeightSample {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for WeekBucket {
    fn date(&self) -> NaiveDate {
        self.week_start
    }
}

/// Keeps the records dated on or after the window's cutoff, in their original order.
pub fn filter_by_window<T: Dated + Clone>(
    records: &[T],
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<T> {
    match window.cutoff(today) {
        None => records.to_vec(),
        Some(cutoff) => records
            .iter()
            .filter(|record| record.date() >= cutoff)
            .cloned()
            .collect(),
    }
}
