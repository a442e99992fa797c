//! End-to-end export tests over an in-memory data source.
//!
//! These tests drive the full pipeline: data source lookup, record assembly
//! with fan-out, document serialization and schema validation.

use mintrud_registry::entities::{
    Employer, Enrollment, ProgramExtension, Student, StudentPosition, StudyGroup, TrainingProgram,
};
use mintrud_registry::{
    CommonData, Error, ExportBatch, ExportOptions, Exporter, ProgramCatalog, RegistryDataSource,
};

/// An in-memory CRM snapshot
#[derive(Default)]
struct MemorySource {
    groups: Vec<StudyGroup>,
    enrollments: Vec<Enrollment>,
    students: Vec<Student>,
    positions: Vec<StudentPosition>,
    extensions: Vec<ProgramExtension>,
    programs: Vec<TrainingProgram>,
    employers: Vec<Employer>,
}

impl RegistryDataSource for MemorySource {
    fn groups(&self) -> Vec<StudyGroup> {
        self.groups.clone()
    }

    fn group(&self, id: &str) -> Option<StudyGroup> {
        self.groups.iter().find(|g| g.id == id).cloned()
    }

    fn enrollments_for_group(&self, group_id: &str) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect()
    }

    fn enrollments_for_student(&self, student_id: &str) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect()
    }

    fn student(&self, id: &str) -> Option<Student> {
        self.students.iter().find(|s| s.id == id).cloned()
    }

    fn position(&self, student_id: &str) -> Option<StudentPosition> {
        self.positions
            .iter()
            .find(|p| p.student_id == student_id)
            .cloned()
    }

    fn extensions_for_enrollment(&self, enrollment_id: &str) -> Vec<ProgramExtension> {
        self.extensions
            .iter()
            .filter(|x| x.enrollment_id == enrollment_id)
            .cloned()
            .collect()
    }

    fn program(&self, id: &str) -> Option<TrainingProgram> {
        self.programs.iter().find(|p| p.id == id).cloned()
    }

    fn employer(&self, id: &str) -> Option<Employer> {
        self.employers.iter().find(|e| e.id == id).cloned()
    }
}

fn common() -> CommonData {
    CommonData::new("7610056871", "ЧОУ ДПО \"Учебный центр \"РАКурс\"")
}

fn student(id: &str, last: &str, first: &str, middle: &str) -> Student {
    Student {
        id: id.into(),
        last_name: last.into(),
        first_name: first.into(),
        middle_name: middle.into(),
        snils: Some("12345678900".into()),
        foreign_snils: None,
        citizenship: None,
        employer_id: "org-1".into(),
    }
}

/// One group, one student, one enrollment on program 3
fn single_student_source() -> MemorySource {
    MemorySource {
        groups: vec![StudyGroup {
            id: "grp-1".into(),
            exam_date: Some("2024-04-01".into()),
        }],
        enrollments: vec![Enrollment {
            id: "enr-1".into(),
            student_id: "stud-1".into(),
            group_id: "grp-1".into(),
            exam_date: Some("2024-05-10".into()),
            examenated: Some("1".into()),
        }],
        students: vec![student("stud-1", "Иванов", "Иван", "Иванович")],
        positions: vec![StudentPosition {
            student_id: "stud-1".into(),
            post: Some("Инженер".into()),
        }],
        extensions: vec![ProgramExtension {
            enrollment_id: "enr-1".into(),
            program_id: "prog-1".into(),
            custom_exam_date: false,
            exam_date: None,
            protocol_number: Some("ПР-2024-17".into()),
        }],
        programs: vec![TrainingProgram {
            id: "prog-1".into(),
            name: Some("Охрана труда".into()),
            mintrud_id: Some("3".into()),
        }],
        employers: vec![Employer {
            id: "org-1".into(),
            inn: Some("7712345678".into()),
            title: Some("ООО Ромашка".into()),
        }],
    }
}

#[test]
fn test_export_all_single_record() {
    let source = single_student_source();
    let outcome = Exporter::new(&source, common()).export_all().unwrap();

    assert_eq!(outcome.record_count, 1);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.xml.contains("<LastName>Иванов</LastName>"));
    assert!(outcome.xml.contains("<FirstName>Иван</FirstName>"));
    assert!(outcome.xml.contains("<MiddleName>Иванович</MiddleName>"));
    assert!(outcome.xml.contains("<Snils>123-456-789 00</Snils>"));
    assert!(outcome.xml.contains("<Test isPassed=\"1\" learnProgramId=\"3\">"));
    assert!(outcome.xml.contains("<Date>2024-05-10</Date>"));
    assert!(outcome.xml.contains("outerId=\"stud-1\""));
}

#[test]
fn test_export_fans_out_over_mintrud_codes() {
    let mut source = single_student_source();
    source.programs[0].mintrud_id = Some("3,9".into());

    let outcome = Exporter::new(&source, common()).export_all().unwrap();
    assert_eq!(outcome.record_count, 2);
    assert!(outcome.xml.contains("learnProgramId=\"3\""));
    assert!(outcome.xml.contains("learnProgramId=\"9\""));
}

#[test]
fn test_no_groups_is_fatal() {
    let source = MemorySource::default();
    let err = Exporter::new(&source, common()).export_all().unwrap_err();
    assert!(matches!(err, Error::Document(_)));
}

#[test]
fn test_unknown_group_is_fatal() {
    let source = single_student_source();
    let err = Exporter::new(&source, common())
        .export_group("grp-missing")
        .unwrap_err();
    assert!(matches!(err, Error::Document(_)));
}

#[test]
fn test_bad_enrollment_is_skipped_not_fatal() {
    let mut source = single_student_source();
    // Second student whose enrollment has an unparseable date everywhere
    source.students.push(student("stud-2", "Петров", "Петр", "Петрович"));
    source.positions.push(StudentPosition {
        student_id: "stud-2".into(),
        post: Some("Слесарь".into()),
    });
    source.enrollments.push(Enrollment {
        id: "enr-2".into(),
        student_id: "stud-2".into(),
        group_id: "grp-1".into(),
        exam_date: Some("not a date".into()),
        examenated: Some("1".into()),
    });
    source.extensions.push(ProgramExtension {
        enrollment_id: "enr-2".into(),
        program_id: "prog-1".into(),
        custom_exam_date: false,
        exam_date: None,
        protocol_number: Some("ПР-2024-18".into()),
    });
    source.groups[0].exam_date = None;

    let outcome = Exporter::new(&source, common()).export_all().unwrap();
    assert_eq!(outcome.record_count, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].enrollment_id, "enr-2");
    assert!(outcome.skipped[0].reason.contains("invalid format"));
}

#[test]
fn test_missing_program_skips_enrollment() {
    let mut source = single_student_source();
    source.programs.clear();

    let exporter = Exporter::new(&source, common()).with_options(ExportOptions {
        allow_empty: true,
        ..ExportOptions::default()
    });
    let outcome = exporter.export_all().unwrap();
    assert_eq!(outcome.record_count, 0);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].reason.contains("prog-1"));
}

#[test]
fn test_missing_position_is_a_validation_skip() {
    let mut source = single_student_source();
    source.positions.clear();

    let exporter = Exporter::new(&source, common()).with_options(ExportOptions {
        allow_empty: true,
        ..ExportOptions::default()
    });
    let outcome = exporter.export_all().unwrap();
    assert_eq!(outcome.record_count, 0);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].enrollment_id, "enr-1");
}

#[test]
fn test_export_student_selects_only_their_enrollments() {
    let mut source = single_student_source();
    source.students.push(student("stud-2", "Петров", "Петр", "Петрович"));
    source.positions.push(StudentPosition {
        student_id: "stud-2".into(),
        post: Some("Слесарь".into()),
    });
    source.enrollments.push(Enrollment {
        id: "enr-2".into(),
        student_id: "stud-2".into(),
        group_id: "grp-1".into(),
        exam_date: Some("2024-05-11".into()),
        examenated: Some("0".into()),
    });
    source.extensions.push(ProgramExtension {
        enrollment_id: "enr-2".into(),
        program_id: "prog-1".into(),
        custom_exam_date: false,
        exam_date: None,
        protocol_number: Some("ПР-2024-19".into()),
    });

    let outcome = Exporter::new(&source, common())
        .export_student("stud-2")
        .unwrap();
    assert_eq!(outcome.record_count, 1);
    assert!(outcome.xml.contains("Петров"));
    assert!(!outcome.xml.contains("Иванов"));
    assert!(outcome.xml.contains("isPassed=\"0\""));
}

#[test]
fn test_exported_xml_revalidates_from_batch() {
    let source = single_student_source();
    let first = Exporter::new(&source, common()).export_all().unwrap();
    let second = Exporter::new(&source, common()).export_all().unwrap();
    assert_eq!(first.xml, second.xml);
}

#[test]
fn test_batch_json_round_trip() {
    let batch = ExportBatch {
        common: common(),
        tuples: Vec::new(),
    };
    let json = serde_json::to_string(&batch).unwrap();
    let back: ExportBatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back.common, batch.common);
    assert!(back.tuples.is_empty());
}
