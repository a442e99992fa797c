//! Export service
//!
//! Pulls source tuples out of a [`RegistryDataSource`], assembles them into a
//! [`RegistryDocument`], validates the result against the registry schema and
//! returns the XML. An unresolvable enrollment is skipped with a reason, not
//! fatal; producing no records at all is fatal unless explicitly allowed.

use crate::catalog::ProgramCatalog;
use crate::document::{CommonData, RegistryDocument};
use crate::entities::{
    Employer, Enrollment, ProgramExtension, SourceTuple, Student, StudentPosition, StudyGroup,
    TrainingProgram,
};
use crate::error::{Error, Result};
use crate::schema::RegistrySchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to the CRM records the exporter consumes
///
/// Lookups return `None` (or an empty list) for missing records; the
/// exporter decides which absences are fatal and which skip one enrollment.
pub trait RegistryDataSource {
    /// All study groups available for export
    fn groups(&self) -> Vec<StudyGroup>;

    /// One study group by id
    fn group(&self, id: &str) -> Option<StudyGroup>;

    /// Enrollments belonging to a study group
    fn enrollments_for_group(&self, group_id: &str) -> Vec<Enrollment>;

    /// Enrollments belonging to a student
    fn enrollments_for_student(&self, student_id: &str) -> Vec<Enrollment>;

    /// One student by id
    fn student(&self, id: &str) -> Option<Student>;

    /// The student's position record, if any
    fn position(&self, student_id: &str) -> Option<StudentPosition>;

    /// Per-program extensions of an enrollment
    fn extensions_for_enrollment(&self, enrollment_id: &str) -> Vec<ProgramExtension>;

    /// One training program by id
    fn program(&self, id: &str) -> Option<TrainingProgram>;

    /// One employer by id
    fn employer(&self, id: &str) -> Option<Employer>;
}

/// Configuration of one export run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Path to an XSD overriding the bundled registry schema
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Permit an export that yields zero records
    #[serde(default)]
    pub allow_empty: bool,
}

/// One enrollment the export run could not turn into records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// The enrollment that was skipped
    pub enrollment_id: String,
    /// Why it was skipped
    pub reason: String,
}

impl SkippedRecord {
    fn new(enrollment_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            enrollment_id: enrollment_id.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enrollment '{}': {}", self.enrollment_id, self.reason)
    }
}

/// The result of a successful export run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The serialized, schema-valid registry document
    pub xml: String,
    /// Number of records in the document
    pub record_count: usize,
    /// Enrollments that produced no record, with reasons
    pub skipped: Vec<SkippedRecord>,
}

/// Assembles and validates registry documents from a data source
pub struct Exporter<'a, S: RegistryDataSource> {
    source: &'a S,
    common: CommonData,
    catalog: ProgramCatalog,
    options: ExportOptions,
}

impl<'a, S: RegistryDataSource> Exporter<'a, S> {
    /// Create an exporter with the standard program catalog and defaults
    pub fn new(source: &'a S, common: CommonData) -> Self {
        Self {
            source,
            common,
            catalog: ProgramCatalog::standard(),
            options: ExportOptions::default(),
        }
    }

    /// Replace the program catalog
    pub fn with_catalog(mut self, catalog: ProgramCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the export options
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Export every enrollment of every study group
    pub fn export_all(&self) -> Result<ExportOutcome> {
        let groups = self.source.groups();
        if groups.is_empty() {
            return Err(Error::Document("no study groups to export".to_string()));
        }

        let enrollments: Vec<Enrollment> = groups
            .iter()
            .flat_map(|group| self.source.enrollments_for_group(&group.id))
            .collect();
        self.export_enrollments(enrollments)
    }

    /// Export every enrollment of one study group
    pub fn export_group(&self, group_id: &str) -> Result<ExportOutcome> {
        if self.source.group(group_id).is_none() {
            return Err(Error::Document(format!(
                "study group '{}' not found",
                group_id
            )));
        }
        self.export_enrollments(self.source.enrollments_for_group(group_id))
    }

    /// Export every enrollment of one student
    pub fn export_student(&self, student_id: &str) -> Result<ExportOutcome> {
        if self.source.student(student_id).is_none() {
            return Err(Error::Document(format!(
                "student '{}' not found",
                student_id
            )));
        }
        self.export_enrollments(self.source.enrollments_for_student(student_id))
    }

    fn export_enrollments(&self, enrollments: Vec<Enrollment>) -> Result<ExportOutcome> {
        let mut document = RegistryDocument::new(self.common.clone());
        let mut skipped = Vec::new();

        for enrollment in enrollments {
            match self.resolve_tuples(&enrollment) {
                Ok(tuples) => {
                    for tuple in tuples {
                        document.push(&tuple, &self.catalog);
                    }
                }
                Err(reason) => skipped.push(SkippedRecord::new(&enrollment.id, reason)),
            }
        }

        // Assembly failures captured by the document are skips too
        for error in document.errors() {
            skipped.push(SkippedRecord::new(
                error.enrollment_id(),
                error.error().to_string(),
            ));
        }

        if document.record_count() == 0 && !self.options.allow_empty {
            return Err(Error::Document(
                "export produced no registry records".to_string(),
            ));
        }

        let xml = document.to_xml_string()?;
        self.load_schema()?.validate_str(&xml)?;

        Ok(ExportOutcome {
            xml,
            record_count: document.record_count(),
            skipped,
        })
    }

    /// Resolve one enrollment into source tuples, one per program extension
    fn resolve_tuples(
        &self,
        enrollment: &Enrollment,
    ) -> std::result::Result<Vec<SourceTuple>, String> {
        let group = self
            .source
            .group(&enrollment.group_id)
            .ok_or_else(|| format!("study group '{}' not found", enrollment.group_id))?;
        let student = self
            .source
            .student(&enrollment.student_id)
            .ok_or_else(|| format!("student '{}' not found", enrollment.student_id))?;
        let employer = self
            .source
            .employer(&student.employer_id)
            .ok_or_else(|| format!("employer '{}' not found", student.employer_id))?;
        // A missing position record becomes an empty one; the assembler
        // reports the absent post as a validation error
        let position = self
            .source
            .position(&student.id)
            .unwrap_or_else(|| StudentPosition {
                student_id: student.id.clone(),
                post: None,
            });

        let extensions = self.source.extensions_for_enrollment(&enrollment.id);
        if extensions.is_empty() {
            return Err("enrollment has no program extensions".to_string());
        }

        let mut tuples = Vec::with_capacity(extensions.len());
        for extension in extensions {
            let program = self
                .source
                .program(&extension.program_id)
                .ok_or_else(|| format!("training program '{}' not found", extension.program_id))?;
            tuples.push(SourceTuple {
                student: student.clone(),
                enrollment: enrollment.clone(),
                extension,
                position: position.clone(),
                group: group.clone(),
                program,
                employer: employer.clone(),
            });
        }
        Ok(tuples)
    }

    fn load_schema(&self) -> Result<RegistrySchema> {
        match &self.options.schema_path {
            Some(path) => RegistrySchema::from_file(path),
            None => RegistrySchema::bundled(),
        }
    }
}

/// A self-contained export batch, loadable from JSON
///
/// Carries the common data plus fully resolved source tuples, for callers
/// (and the CLI) that have no live data source to pull from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBatch {
    /// Common data for the run
    pub common: CommonData,
    /// Resolved source tuples, in export order
    pub tuples: Vec<SourceTuple>,
}

impl ExportBatch {
    /// Load a batch from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Assemble, validate and serialize the batch
    pub fn export(&self, catalog: &ProgramCatalog, options: &ExportOptions) -> Result<ExportOutcome> {
        let mut document = RegistryDocument::new(self.common.clone());
        for tuple in &self.tuples {
            document.push(tuple, catalog);
        }

        let skipped = document
            .errors()
            .iter()
            .map(|error| SkippedRecord::new(error.enrollment_id(), error.error().to_string()))
            .collect();

        if document.record_count() == 0 && !options.allow_empty {
            return Err(Error::Document(
                "export produced no registry records".to_string(),
            ));
        }

        let xml = document.to_xml_string()?;
        let schema = match &options.schema_path {
            Some(path) => RegistrySchema::from_file(path)?,
            None => RegistrySchema::bundled()?,
        };
        schema.validate_str(&xml)?;

        Ok(ExportOutcome {
            xml,
            record_count: document.record_count(),
            skipped,
        })
    }
}
