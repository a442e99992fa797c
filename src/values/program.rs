//! Training-program identifier and title

use crate::error::ValidationError;
use std::fmt;

/// Mintrud training-program code
///
/// Admitted values according to the XML schema (`learnProgram` simple type):
/// 1 through 29, excluding 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LearnProgramId(u8);

impl LearnProgramId {
    /// Create a program id from an integer code
    pub fn new(code: i64) -> Result<Self, ValidationError> {
        if !(1..=29).contains(&code) || code == 5 {
            return Err(ValidationError::new(format!(
                "Mintrud program id must be between 1 and 29 (excluding 5), got {}",
                code
            ))
            .with_field("learnProgramId")
            .with_value(code.to_string()));
        }
        Ok(Self(code as u8))
    }

    /// Parse a program id from a raw string code
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code: i64 = raw.trim().parse().map_err(|_| {
            ValidationError::new("Mintrud program id is not a number")
                .with_field("learnProgramId")
                .with_value(raw)
        })?;
        Self::new(code)
    }

    /// The numeric code
    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for LearnProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical title of a training program, non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnProgramTitle(String);

impl LearnProgramTitle {
    /// Create a program title
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let value = raw.unwrap_or("").trim();
        if value.is_empty() {
            return Err(ValidationError::new("training-program title is not specified")
                .with_field("LearnProgramTitle"));
        }
        Ok(Self(value.to_string()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnProgramTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
