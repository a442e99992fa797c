//! SNILS insurance number

use crate::values::strip_non_digits;
use std::fmt;

/// SNILS, the Russian individual insurance account number
///
/// All non-digit characters are stripped and the remainder is mechanically
/// reformatted as `XXX-XXX-XXX XX`: three groups of three digits, a space,
/// then everything from the tenth digit on. The digit count itself is not
/// checked here; a wrong-length SNILS is left for the XSD stage to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snils(String);

impl Snils {
    /// Create a SNILS from a raw CRM field
    pub fn new(raw: impl AsRef<str>) -> Self {
        let digits = strip_non_digits(raw.as_ref());

        let take = |from: usize, len: usize| -> &str {
            let end = (from + len).min(digits.len());
            if from >= digits.len() {
                ""
            } else {
                &digits[from..end]
            }
        };

        let rest = if digits.len() > 9 { &digits[9..] } else { "" };
        Self(format!(
            "{}-{}-{} {}",
            take(0, 3),
            take(3, 3),
            take(6, 3),
            rest
        ))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Snils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
