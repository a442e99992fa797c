//! XSD validation of registry documents
//!
//! [`RegistrySchema`] wraps the government registry XSD (version 1.0.9) and
//! validates serialized documents against it before submission. The bundled
//! schema ships with the crate; a newer revision can be loaded from disk
//! with [`RegistrySchema::from_file`].
//!
//! Malformed XML is reported as [`Error::Xml`]; a well-formed document that
//! does not conform yields an [`Error::Schema`] carrying every violation
//! found, each with its line, column and location path.

mod model;
mod validation;

pub use model::{AttributeDecl, BaseType, ComplexType, Content, ElementDecl, SimpleType};

use crate::error::{Error, Result, SchemaValidationError};
use std::fs;
use std::path::Path;

/// The registry XSD shipped with the crate
pub const BUNDLED_SCHEMA: &str = include_str!("../../resources/educated_person_import_v1.0.9.xsd");

/// A compiled registry schema
#[derive(Debug, Clone)]
pub struct RegistrySchema {
    root: ElementDecl,
}

impl RegistrySchema {
    /// Compile the bundled registry XSD
    pub fn bundled() -> Result<Self> {
        Self::from_str(BUNDLED_SCHEMA)
    }

    /// Compile a schema from XSD text
    pub fn from_str(xsd: &str) -> Result<Self> {
        Ok(Self {
            root: model::parse_schema(xsd)?,
        })
    }

    /// Compile a schema from an XSD file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let xsd = fs::read_to_string(path)?;
        Self::from_str(&xsd)
    }

    /// The root element declaration
    pub fn root(&self) -> &ElementDecl {
        &self.root
    }

    /// Validate an XML document given as a string
    ///
    /// Returns `Ok(())` when the document conforms. All violations are
    /// collected into a single [`SchemaValidationError`].
    pub fn validate_str(&self, xml: &str) -> Result<()> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| Error::Xml(format!("malformed XML: {}", e)))?;
        let violations = validation::validate_document(&self.root, &doc);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::new(violations).into())
        }
    }

    /// Validate an XML document read from a file
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = fs::read_to_string(path)?;
        self.validate_str(&xml)
    }
}
