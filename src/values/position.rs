//! Worker position

use crate::error::ValidationError;
use std::fmt;

/// The worker's position (job title), non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(String);

impl Position {
    /// Create a position from a raw CRM field
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let value = raw.unwrap_or("").trim();
        if value.is_empty() {
            return Err(ValidationError::new("worker position is not specified")
                .with_field("Position"));
        }
        Ok(Self(value.to_string()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
