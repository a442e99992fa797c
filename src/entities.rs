//! Source entities consumed from the CRM
//!
//! Read-only snapshots of the CRM records a registry record is assembled
//! from. The CRM owns identity and lifecycle; these structs only mirror the
//! fields the export pipeline reads. Optional fields stay optional here —
//! precedence rules and validation happen at assembly time, not on input.

use serde::{Deserialize, Serialize};

/// A student (the worker being recorded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// CRM identifier, also used as the record's outer id
    pub id: String,
    /// Фамилия
    pub last_name: String,
    /// Имя
    pub first_name: String,
    /// Отчество
    pub middle_name: String,
    /// Russian SNILS number, raw
    #[serde(default)]
    pub snils: Option<String>,
    /// Foreign SNILS, present only for foreign workers
    #[serde(default)]
    pub foreign_snils: Option<String>,
    /// Citizenship, raw
    #[serde(default)]
    pub citizenship: Option<String>,
    /// Identifier of the employing organization
    pub employer_id: String,
}

/// A student's enrollment in a study group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// CRM identifier
    pub id: String,
    /// The enrolled student
    pub student_id: String,
    /// The study group
    pub group_id: String,
    /// Exam date recorded on the enrollment, raw
    #[serde(default)]
    pub exam_date: Option<String>,
    /// Raw pass/fail flag ("examenated" in the CRM)
    #[serde(default)]
    pub examenated: Option<String>,
}

/// Per-program extension of an enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramExtension {
    /// The enrollment this extension belongs to
    pub enrollment_id: String,
    /// The training program
    pub program_id: String,
    /// Whether the extension carries its own exam date
    #[serde(default)]
    pub custom_exam_date: bool,
    /// The extension's own exam date, raw; used only when the flag is set
    #[serde(default)]
    pub exam_date: Option<String>,
    /// Examination protocol number
    #[serde(default)]
    pub protocol_number: Option<String>,
}

/// A student's position (job title) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPosition {
    /// The student this position belongs to
    pub student_id: String,
    /// Position title, raw
    #[serde(default)]
    pub post: Option<String>,
}

/// A study group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGroup {
    /// CRM identifier
    pub id: String,
    /// Group-level exam date, the last fallback in date resolution
    #[serde(default)]
    pub exam_date: Option<String>,
}

/// A training program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgram {
    /// CRM identifier
    pub id: String,
    /// Program name in the CRM (not the registry title)
    #[serde(default)]
    pub name: Option<String>,
    /// Comma-separated list of Mintrud program codes, e.g. `"3,9,17"`
    #[serde(default)]
    pub mintrud_id: Option<String>,
}

/// The employing organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// CRM identifier
    pub id: String,
    /// Organization INN, raw
    #[serde(default)]
    pub inn: Option<String>,
    /// Organization title
    #[serde(default)]
    pub title: Option<String>,
}

/// One complete source tuple for record assembly
///
/// Kept whole inside captured construction errors so a failed record can be
/// diagnosed with everything that went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTuple {
    /// The student
    pub student: Student,
    /// The enrollment
    pub enrollment: Enrollment,
    /// The per-program enrollment extension
    pub extension: ProgramExtension,
    /// The student's position record
    pub position: StudentPosition,
    /// The study group
    pub group: StudyGroup,
    /// The training program
    pub program: TrainingProgram,
    /// The employing organization
    pub employer: Employer,
}
