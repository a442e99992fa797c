//! Exam protocol number

use crate::error::ValidationError;
use std::fmt;

/// The number of the examination protocol, non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolNumber(String);

impl ProtocolNumber {
    /// Create a protocol number from a raw CRM field
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let value = raw.unwrap_or("").trim();
        if value.is_empty() {
            return Err(ValidationError::new("protocol number is not specified")
                .with_field("ProtocolNumber"));
        }
        Ok(Self(value.to_string()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProtocolNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_value() {
        assert_eq!(ProtocolNumber::new(Some("  P-1/2024 ")).unwrap().to_string(), "P-1/2024");
    }

    #[test]
    fn test_rejects_missing_or_blank() {
        assert!(ProtocolNumber::new(None).is_err());
        assert!(ProtocolNumber::new(Some("")).is_err());
        assert!(ProtocolNumber::new(Some("   ")).is_err());
    }
}
