//! Registry document aggregation
//!
//! A [`RegistryDocument`] owns the ordered list of successfully assembled
//! records plus a parallel list of per-record construction errors. A failure
//! while assembling one source tuple never unwinds the batch: the fault and
//! the full tuple are captured and the document keeps accepting records.

use crate::catalog::ProgramCatalog;
use crate::entities::SourceTuple;
use crate::error::{Result, ValidationError};
use crate::record::{xml_err, RegistryRecord};
use crate::schema::RegistrySchema;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Read-only common data for one export run
///
/// Carries the teaching organization's requisites. Raw strings here; the
/// values pass through their value types during record assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonData {
    /// INN of the teaching organization
    pub organization_inn: String,
    /// Title of the teaching organization
    pub organization_title: String,
}

impl CommonData {
    /// Create common data for an export run
    pub fn new(organization_inn: impl Into<String>, organization_title: impl Into<String>) -> Self {
        Self {
            organization_inn: organization_inn.into(),
            organization_title: organization_title.into(),
        }
    }
}

/// A captured failure to build records from one source tuple
///
/// Holds the triggering fault together with the full source tuple that
/// produced it, for later diagnosis. Never retried automatically.
#[derive(Debug, Clone)]
pub struct RecordError {
    error: ValidationError,
    tuple: SourceTuple,
}

impl RecordError {
    /// The validation fault that aborted assembly
    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    /// The source tuple that failed to assemble
    pub fn tuple(&self) -> &SourceTuple {
        &self.tuple
    }

    /// Identifier of the enrollment the failed tuple belongs to
    pub fn enrollment_id(&self) -> &str {
        &self.tuple.enrollment.id
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record for enrollment '{}' skipped: {}",
            self.tuple.enrollment.id, self.error
        )
    }
}

/// The registry document: ordered records plus captured construction errors
///
/// Records keep their insertion order through serialization, so the output
/// is deterministic and repeated serialization of an unchanged document is
/// byte-identical.
#[derive(Debug)]
pub struct RegistryDocument {
    common: CommonData,
    records: Vec<RegistryRecord>,
    errors: Vec<RecordError>,
}

impl RegistryDocument {
    /// Create an empty document with common data
    pub fn new(common: CommonData) -> Self {
        Self {
            common,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Assemble one source tuple and append its records
    ///
    /// Fan-out applies: one tuple can yield several records, one per Mintrud
    /// code. On failure the fault is captured as a [`RecordError`] and the
    /// method returns normally; the caller keeps adding further tuples.
    /// Returns the number of records appended (0 on a captured failure).
    pub fn push(&mut self, tuple: &SourceTuple, catalog: &ProgramCatalog) -> usize {
        match RegistryRecord::assemble(tuple, &self.common, catalog) {
            Ok(records) => {
                let added = records.len();
                self.records.extend(records);
                added
            }
            Err(error) => {
                self.errors.push(RecordError {
                    error,
                    tuple: tuple.clone(),
                });
                0
            }
        }
    }

    /// The common data this document was created with
    pub fn common(&self) -> &CommonData {
        &self.common
    }

    /// Successfully assembled records, in insertion order
    pub fn records(&self) -> &[RegistryRecord] {
        &self.records
    }

    /// Captured construction errors, in capture order
    pub fn errors(&self) -> &[RecordError] {
        &self.errors
    }

    /// Number of records in the document
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of captured construction errors
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Serialize the document to an XML string
    ///
    /// Root element `RegistrySet`, one `RegistryRecord` child per record.
    /// Repeatable: the same document state always yields identical output.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("RegistrySet")))
            .map_err(xml_err)?;
        for record in &self.records {
            record.write_xml(&mut writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("RegistrySet")))
            .map_err(xml_err)?;

        let bytes = writer.into_inner();
        String::from_utf8(bytes)
            .map_err(|e| crate::error::Error::Xml(format!("produced non-UTF-8 output: {}", e)))
    }

    /// Serialize and write the document to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(path, xml)?;
        Ok(())
    }

    /// Serialize the document and validate it against the schema
    pub fn validate(&self, schema: &RegistrySchema) -> Result<()> {
        schema.validate_str(&self.to_xml_string()?)
    }
}
