//! Worker citizenship

use std::fmt;

/// Citizenship of the worker, trimmed, never fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citizenship(String);

impl Citizenship {
    /// Create a citizenship value from a raw CRM field
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
