//! INN taxpayer identification numbers

use crate::error::ValidationError;
use crate::values::strip_non_digits;
use std::fmt;

/// A plain INN, the Russian taxpayer identification number
///
/// Non-digit characters are stripped; an empty result is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inn(String);

impl Inn {
    /// Create an INN from a raw CRM field
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(strip_non_digits(raw.as_ref()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Inn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The employer's INN, mandatory in the `Worker` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerInn(String);

impl EmployerInn {
    /// Create an employer INN from a raw CRM field
    ///
    /// Fails when no digits remain after stripping.
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let digits = strip_non_digits(raw.unwrap_or(""));
        if digits.is_empty() {
            return Err(ValidationError::new("employer INN is not specified")
                .with_field("EmployerInn")
                .with_value(raw.unwrap_or("")));
        }
        Ok(Self(digits))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployerInn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The teaching organization's INN, mandatory in the `Organization` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationInn(String);

impl OrganizationInn {
    /// Create a teaching-organization INN from configured common data
    ///
    /// Fails when no digits remain after stripping.
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let digits = strip_non_digits(raw.unwrap_or(""));
        if digits.is_empty() {
            return Err(ValidationError::new("organization INN is not specified")
                .with_field("Inn")
                .with_value(raw.unwrap_or("")));
        }
        Ok(Self(digits))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationInn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
