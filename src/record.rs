//! Registry record assembly and serialization
//!
//! One [`RegistryRecord`] is a fully validated registry entry: the worker,
//! the employing organization, the teaching organization and the exam. Every
//! mandatory field has already passed its value type by the time a record
//! exists, so serialization cannot fail validation — only I/O.

use crate::catalog::ProgramCatalog;
use crate::document::CommonData;
use crate::entities::SourceTuple;
use crate::error::{Error, Result, ValidationError};
use crate::values::{
    Bit, Citizenship, EmployerInn, EmployerTitle, ExamDate, LearnProgramId, LearnProgramTitle,
    MiddleName, Name, OrganizationInn, OrganizationTitle, OuterId, Position, ProtocolNumber,
    Snils,
};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

pub(crate) fn xml_err(e: quick_xml::Error) -> Error {
    Error::Xml(format!("failed writing XML: {}", e))
}

/// Write one `<tag>text</tag>` element
pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    Ok(())
}

/// One validated `<RegistryRecord>` entry
///
/// Constructed only through [`RegistryRecord::assemble`]; immutable after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRecord {
    last_name: Name,
    first_name: Name,
    middle_name: MiddleName,
    snils: Option<Snils>,
    is_foreign_snils: Option<Bit>,
    foreign_snils: Option<String>,
    citizenship: Option<Citizenship>,
    position: Position,
    employer_inn: EmployerInn,
    employer_title: EmployerTitle,
    organization_inn: OrganizationInn,
    organization_title: OrganizationTitle,
    test_date: ExamDate,
    protocol_number: ProtocolNumber,
    learn_program_title: LearnProgramTitle,
    is_passed: Bit,
    learn_program_id: LearnProgramId,
    outer_id: OuterId,
}

impl RegistryRecord {
    /// Assemble registry records from one source tuple
    ///
    /// Returns one record per Mintrud code listed in the program's
    /// comma-separated `mintrud_id` field (fan-out). Field precedence:
    ///
    /// 1. exam date — extension's custom date (only when its flag is set),
    ///    then the enrollment's date, then the group's date; first non-empty
    ///    wins;
    /// 2. protocol number — from the extension, mandatory;
    /// 3. program title — from the catalog, per resolved code.
    ///
    /// Any value-type failure aborts assembly of this tuple only.
    pub fn assemble(
        tuple: &SourceTuple,
        common: &CommonData,
        catalog: &ProgramCatalog,
    ) -> std::result::Result<Vec<Self>, ValidationError> {
        let custom_date = if tuple.extension.custom_exam_date {
            tuple.extension.exam_date.as_deref()
        } else {
            None
        };
        // First non-empty date in priority order
        let date_raw = [
            custom_date,
            tuple.enrollment.exam_date.as_deref(),
            tuple.group.exam_date.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|raw| !raw.is_empty());
        let test_date = ExamDate::parse(date_raw)?;

        let protocol_number = ProtocolNumber::new(tuple.extension.protocol_number.as_deref())?;

        let codes: Vec<&str> = tuple
            .program
            .mintrud_id
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .collect();
        if codes.is_empty() {
            return Err(ValidationError::new("Mintrud program code is not specified")
                .with_field("learnProgramId"));
        }

        let snils = tuple
            .student
            .snils
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Snils::new);
        let foreign_snils = tuple
            .student
            .foreign_snils
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string);
        let is_foreign_snils = foreign_snils.as_ref().map(|_| Bit::from(true));
        let citizenship = tuple
            .student
            .citizenship
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Citizenship::new);

        let position = Position::new(tuple.position.post.as_deref())?;
        let employer_inn = EmployerInn::new(tuple.employer.inn.as_deref())?;
        let employer_title = EmployerTitle::new(tuple.employer.title.as_deref())?;
        let organization_inn = OrganizationInn::new(Some(&common.organization_inn))?;
        let organization_title = OrganizationTitle::new(Some(&common.organization_title))?;
        let is_passed = Bit::parse(tuple.enrollment.examenated.as_deref())?;
        let outer_id = OuterId::new(Some(&tuple.student.id))?;

        let mut records = Vec::with_capacity(codes.len());
        for code in codes {
            let learn_program_id = LearnProgramId::parse(code)?;
            let title = catalog.title(learn_program_id).ok_or_else(|| {
                ValidationError::new(format!(
                    "no title registered for Mintrud program code {}",
                    learn_program_id
                ))
                .with_field("LearnProgramTitle")
            })?;

            records.push(Self {
                last_name: Name::new(&tuple.student.last_name),
                first_name: Name::new(&tuple.student.first_name),
                middle_name: MiddleName::new(&tuple.student.middle_name),
                snils: snils.clone(),
                is_foreign_snils,
                foreign_snils: foreign_snils.clone(),
                citizenship: citizenship.clone(),
                position: position.clone(),
                employer_inn: employer_inn.clone(),
                employer_title: employer_title.clone(),
                organization_inn: organization_inn.clone(),
                organization_title: organization_title.clone(),
                test_date,
                protocol_number: protocol_number.clone(),
                learn_program_title: LearnProgramTitle::new(Some(title))?,
                is_passed,
                learn_program_id,
                outer_id: outer_id.clone(),
            });
        }

        Ok(records)
    }

    /// The resolved Mintrud program code
    pub fn learn_program_id(&self) -> LearnProgramId {
        self.learn_program_id
    }

    /// The resolved program title
    pub fn learn_program_title(&self) -> &LearnProgramTitle {
        &self.learn_program_title
    }

    /// The resolved exam date
    pub fn test_date(&self) -> ExamDate {
        self.test_date
    }

    /// The record's outer id
    pub fn outer_id(&self) -> &OuterId {
        &self.outer_id
    }

    /// Serialize the record as one `<RegistryRecord>` element
    pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut record = BytesStart::new("RegistryRecord");
        if !self.outer_id.is_empty() {
            record.push_attribute(("outerId", self.outer_id.as_str()));
        }
        writer.write_event(Event::Start(record)).map_err(xml_err)?;

        // Worker
        writer
            .write_event(Event::Start(BytesStart::new("Worker")))
            .map_err(xml_err)?;
        write_text_element(writer, "LastName", self.last_name.as_str())?;
        write_text_element(writer, "FirstName", self.first_name.as_str())?;
        write_text_element(writer, "MiddleName", self.middle_name.as_str())?;
        if let Some(ref snils) = self.snils {
            write_text_element(writer, "Snils", snils.as_str())?;
        }
        if let Some(ref bit) = self.is_foreign_snils {
            write_text_element(writer, "IsForeignSnils", &bit.to_string())?;
        }
        if let Some(ref foreign) = self.foreign_snils {
            write_text_element(writer, "ForeignSnils", foreign)?;
        }
        if let Some(ref citizenship) = self.citizenship {
            write_text_element(writer, "Citizenship", citizenship.as_str())?;
        }
        write_text_element(writer, "Position", self.position.as_str())?;
        write_text_element(writer, "EmployerInn", self.employer_inn.as_str())?;
        write_text_element(writer, "EmployerTitle", self.employer_title.as_str())?;
        writer
            .write_event(Event::End(BytesEnd::new("Worker")))
            .map_err(xml_err)?;

        // Organization (the teaching organization)
        writer
            .write_event(Event::Start(BytesStart::new("Organization")))
            .map_err(xml_err)?;
        write_text_element(writer, "Inn", self.organization_inn.as_str())?;
        write_text_element(writer, "Title", self.organization_title.as_str())?;
        writer
            .write_event(Event::End(BytesEnd::new("Organization")))
            .map_err(xml_err)?;

        // Test
        let mut test = BytesStart::new("Test");
        test.push_attribute(("isPassed", self.is_passed.to_string().as_str()));
        test.push_attribute(("learnProgramId", self.learn_program_id.to_string().as_str()));
        writer.write_event(Event::Start(test)).map_err(xml_err)?;
        write_text_element(writer, "Date", &self.test_date.to_string())?;
        write_text_element(writer, "ProtocolNumber", self.protocol_number.as_str())?;
        write_text_element(writer, "LearnProgramTitle", self.learn_program_title.as_str())?;
        writer
            .write_event(Event::End(BytesEnd::new("Test")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("RegistryRecord")))
            .map_err(xml_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Employer, Enrollment, ProgramExtension, Student, StudentPosition, StudyGroup,
        TrainingProgram,
    };

    fn common() -> CommonData {
        CommonData::new(
            "7610056871",
            "ЧОУ ДПО \"Учебный центр \"РАКурс\"",
        )
    }

    fn tuple() -> SourceTuple {
        SourceTuple {
            student: Student {
                id: "42".into(),
                last_name: " Иванов ".into(),
                first_name: "Иван".into(),
                middle_name: "Иванович".into(),
                snils: Some("12345678900".into()),
                foreign_snils: None,
                citizenship: None,
                employer_id: "org-1".into(),
            },
            enrollment: Enrollment {
                id: "enr-1".into(),
                student_id: "42".into(),
                group_id: "grp-1".into(),
                exam_date: Some("2024-05-10".into()),
                examenated: Some("true".into()),
            },
            extension: ProgramExtension {
                enrollment_id: "enr-1".into(),
                program_id: "prog-1".into(),
                custom_exam_date: false,
                exam_date: None,
                protocol_number: Some("P-1".into()),
            },
            position: StudentPosition {
                student_id: "42".into(),
                post: Some("Инженер".into()),
            },
            group: StudyGroup {
                id: "grp-1".into(),
                exam_date: Some("2024-04-01".into()),
            },
            program: TrainingProgram {
                id: "prog-1".into(),
                name: Some("Охрана труда".into()),
                mintrud_id: Some("3".into()),
            },
            employer: Employer {
                id: "org-1".into(),
                inn: Some("7712345678".into()),
                title: Some("ООО Ромашка".into()),
            },
        }
    }

    fn record_to_xml(record: &RegistryRecord) -> String {
        let mut writer = Writer::new(Vec::new());
        record.write_xml(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_assembles_single_record() {
        let records = RegistryRecord::assemble(&tuple(), &common(), &ProgramCatalog::standard())
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].learn_program_id().to_string(), "3");
        assert_eq!(records[0].test_date().to_string(), "2024-05-10");
    }

    #[test]
    fn test_fan_out_over_comma_separated_codes() {
        let mut tuple = tuple();
        tuple.program.mintrud_id = Some("3,9".into());

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].learn_program_id().to_string(), "3");
        assert_eq!(records[1].learn_program_id().to_string(), "9");
        assert_ne!(records[0].learn_program_title(), records[1].learn_program_title());

        // Everything but the program id/title is shared
        assert_eq!(records[0].test_date(), records[1].test_date());
        assert_eq!(records[0].outer_id(), records[1].outer_id());
    }

    #[test]
    fn test_empty_code_list_fails() {
        let mut tuple = tuple();
        tuple.program.mintrud_id = Some(" , ,".into());

        let err = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap_err();
        assert!(err.message().contains("program code is not specified"));
    }

    #[test]
    fn test_exam_date_priority_custom_wins() {
        let mut tuple = tuple();
        tuple.extension.custom_exam_date = true;
        tuple.extension.exam_date = Some("2024-06-15".into());

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        assert_eq!(records[0].test_date().to_string(), "2024-06-15");
    }

    #[test]
    fn test_exam_date_custom_ignored_without_flag() {
        let mut tuple = tuple();
        tuple.extension.custom_exam_date = false;
        tuple.extension.exam_date = Some("2024-06-15".into());

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        assert_eq!(records[0].test_date().to_string(), "2024-05-10");
    }

    #[test]
    fn test_exam_date_falls_back_to_group() {
        let mut tuple = tuple();
        tuple.enrollment.exam_date = None;

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        assert_eq!(records[0].test_date().to_string(), "2024-04-01");
    }

    #[test]
    fn test_no_resolvable_date_fails() {
        let mut tuple = tuple();
        tuple.enrollment.exam_date = Some("  ".into());
        tuple.group.exam_date = None;

        let err = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap_err();
        assert!(err.message().contains("not specified"));
    }

    #[test]
    fn test_record_xml_shape() {
        let records = RegistryRecord::assemble(&tuple(), &common(), &ProgramCatalog::standard())
            .unwrap();
        let xml = record_to_xml(&records[0]);

        assert!(xml.starts_with("<RegistryRecord outerId=\"42\">"));
        assert!(xml.contains("<LastName>Иванов</LastName>"));
        assert!(xml.contains("<Snils>123-456-789 00</Snils>"));
        assert!(xml.contains("<Test isPassed=\"1\" learnProgramId=\"3\">"));
        assert!(xml.contains("<Date>2024-05-10</Date>"));
        assert!(xml.contains("<ProtocolNumber>P-1</ProtocolNumber>"));
        // Optional fields absent from the source are omitted
        assert!(!xml.contains("IsForeignSnils"));
        assert!(!xml.contains("Citizenship"));
    }

    #[test]
    fn test_foreign_snils_carried_when_present() {
        let mut tuple = tuple();
        tuple.student.foreign_snils = Some("FR-998877".into());
        tuple.student.citizenship = Some("Франция".into());

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        let xml = record_to_xml(&records[0]);
        assert!(xml.contains("<IsForeignSnils>1</IsForeignSnils>"));
        assert!(xml.contains("<ForeignSnils>FR-998877</ForeignSnils>"));
        assert!(xml.contains("<Citizenship>Франция</Citizenship>"));
    }

    #[test]
    fn test_missing_snils_is_omitted() {
        let mut tuple = tuple();
        tuple.student.snils = None;

        let records = RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard())
            .unwrap();
        let xml = record_to_xml(&records[0]);
        assert!(!xml.contains("<Snils>"));
    }

    #[test]
    fn test_missing_protocol_fails_assembly() {
        let mut tuple = tuple();
        tuple.extension.protocol_number = None;

        assert!(RegistryRecord::assemble(&tuple, &common(), &ProgramCatalog::standard()).is_err());
    }
}
