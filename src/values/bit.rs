//! Boolean "bit" fields

use crate::error::ValidationError;
use std::fmt;

/// Boolean flag rendered as `"1"` or `"0"`
///
/// Admitted raw values according to the XML schema (`bit` simple type):
/// `0`, `1`, `true`, `false` in any letter case. A missing value is a
/// distinct failure from an unparseable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit(bool);

impl Bit {
    /// Parse a bit from a raw CRM field
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = match raw {
            Some(value) => value.trim(),
            None => {
                return Err(ValidationError::new("bit value is not specified").with_field("bit"))
            }
        };

        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Self(true)),
            "0" | "false" => Ok(Self(false)),
            _ => Err(ValidationError::new("bit value is not valid")
                .with_field("bit")
                .with_value(raw)),
        }
    }

    /// The boolean value
    pub fn value(&self) -> bool {
        self.0
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "1" } else { "0" })
    }
}
