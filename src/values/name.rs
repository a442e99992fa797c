//! Worker name parts

use std::fmt;

/// A last or first name of the worker
///
/// Leading and trailing whitespace is trimmed. An empty value is allowed;
/// the XSD stage rejects it if the schema requires content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    /// Create a name from a raw CRM field
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The middle name (patronymic) of the worker, empty allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddleName(String);

impl MiddleName {
    /// Create a middle name from a raw CRM field
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiddleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
