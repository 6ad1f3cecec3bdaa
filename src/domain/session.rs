//! Recorded surveillance sessions.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

/// Start and end of a field session on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionTimes {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl SessionTimes {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { date, start, end })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whole minutes spent in the field (truncated).
    pub fn actual_minutes(&self) -> i64 {
        (self.date.and_time(self.end) - self.date.and_time(self.start)).num_minutes()
    }
}
