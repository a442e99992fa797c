//! Outer correlation identifier

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Admitted characters according to the XML schema (`outerId` attribute):
/// `[A-Za-z0-9-]+`
static OUTER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9-]+$").expect("outer id pattern is valid"));

/// Caller-supplied external identifier for a registry record
///
/// A missing or empty value renders as the empty string; the serializer
/// omits the attribute in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterId(String);

impl OuterId {
    /// Create an outer id from a raw CRM field
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None => Ok(Self(String::new())),
            Some("") => Ok(Self(String::new())),
            Some(value) if OUTER_ID_PATTERN.is_match(value) => Ok(Self(value.to_string())),
            Some(value) => Err(ValidationError::new(
                "outer id contains characters outside [A-Za-z0-9-]",
            )
            .with_field("outerId")
            .with_value(value)),
        }
    }

    /// Canonical string form, empty when absent
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a value was supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OuterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
