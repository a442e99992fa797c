//! Organization titles

use crate::error::ValidationError;
use std::fmt;

/// The employer's title, non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerTitle(String);

impl EmployerTitle {
    /// Create an employer title from a raw CRM field
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let value = raw.unwrap_or("").trim();
        if value.is_empty() {
            return Err(ValidationError::new("employer title is not specified")
                .with_field("EmployerTitle"));
        }
        Ok(Self(value.to_string()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployerTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The teaching organization's title, non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationTitle(String);

impl OrganizationTitle {
    /// Create a teaching-organization title from configured common data
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let value = raw.unwrap_or("").trim();
        if value.is_empty() {
            return Err(ValidationError::new("teaching-organization title is not specified")
                .with_field("Title"));
        }
        Ok(Self(value.to_string()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employer_title_trims() {
        assert_eq!(
            EmployerTitle::new(Some(" ООО \"Ромашка\" ")).unwrap().to_string(),
            "ООО \"Ромашка\""
        );
    }

    #[test]
    fn test_employer_title_rejects_blank() {
        assert!(EmployerTitle::new(None).is_err());
        assert!(EmployerTitle::new(Some("  ")).is_err());
    }

    #[test]
    fn test_organization_title_rejects_blank() {
        assert!(OrganizationTitle::new(Some("")).is_err());
        assert!(OrganizationTitle::new(Some("Учебный центр")).is_ok());
    }
}
