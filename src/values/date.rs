//! Exam date

use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Date formats accepted from the CRM, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Date-time formats accepted from the CRM; the time part is dropped
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// The date the exam was passed, rendered as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExamDate(NaiveDate);

impl ExamDate {
    /// Parse an exam date from a raw CRM field
    ///
    /// A missing value and a malformed value fail with distinct messages.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = raw.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            return Err(ValidationError::new("exam date is not specified").with_field("Date"));
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(Self(date));
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self(datetime.date()));
            }
        }

        Err(ValidationError::new("exam date has an invalid format")
            .with_field("Date")
            .with_value(raw))
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ExamDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ExamDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
