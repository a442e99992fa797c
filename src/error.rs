//! Error types for mintrud-registry
//!
//! This module defines all error types used throughout the library,
//! from single-field validation failures up to document-level export errors.

use std::fmt;
use thiserror::Error;

/// Result type alias using the mintrud-registry Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for registry export operations
#[derive(Error, Debug)]
pub enum Error {
    /// A scalar field failed its normalization/range rule
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The assembled document does not conform to the XSD schema
    #[error("schema validation error: {0}")]
    Schema(#[from] SchemaValidationError),

    /// Malformed XML input (distinct from a schema mismatch)
    #[error("XML error: {0}")]
    Xml(String),

    /// Schema file could not be loaded or parsed
    #[error("schema error: {0}")]
    SchemaParse(String),

    /// Fatal document-level error, no partial output is produced
    #[error("document error: {0}")]
    Document(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation error for a single scalar field
///
/// Always scoped to one value-type construction. The message describes
/// which field failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    message: String,
    /// Name of the schema field that failed
    pub field: Option<String>,
    /// The offending raw value, if printable
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            value: None,
        }
    }

    /// Set the field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the offending value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref field) = self.field {
            write!(f, " (field: {})", field)?;
        }

        if let Some(ref value) = self.value {
            write!(f, " (value: '{}')", value)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// One schema violation reported by the XSD validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Line in the validated document (1-based)
    pub line: u32,
    /// Column in the validated document (1-based)
    pub column: u32,
    /// Path to the element that failed validation
    pub path: String,
    /// Violation message
    pub message: String,
}

impl SchemaViolation {
    /// Create a new schema violation
    pub fn new(line: u32, column: u32, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {} (path: {})",
            self.line, self.column, self.message, self.path
        )
    }
}

/// Aggregated XSD validation failure
///
/// Collects every violation found in one validation pass rather than
/// surfacing only the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    /// All violations found, in document order
    pub violations: Vec<SchemaViolation>,
}

impl SchemaValidationError {
    /// Create a new schema validation error from collected violations
    pub fn new(violations: Vec<SchemaViolation>) -> Self {
        Self { violations }
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the violation list is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document does not conform to the XSD schema:")?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}
