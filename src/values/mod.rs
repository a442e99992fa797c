//! Scalar value types for the registry schema
//!
//! One normalizing/validating wrapper per schema-constrained field. Each type
//! wraps a raw optional string (or integer) and either normalizes it into the
//! canonical form expected by the XSD schema or fails construction with a
//! [`ValidationError`](crate::error::ValidationError). Once constructed, the
//! `Display` representation of a value is always schema-valid for its field.

mod bit;
mod citizenship;
mod date;
mod inn;
mod name;
mod outer_id;
mod position;
mod program;
mod protocol;
mod title;
mod snils;

pub use bit::Bit;
pub use citizenship::Citizenship;
pub use date::ExamDate;
pub use inn::{EmployerInn, Inn, OrganizationInn};
pub use name::{MiddleName, Name};
pub use outer_id::OuterId;
pub use position::Position;
pub use program::{LearnProgramId, LearnProgramTitle};
pub use protocol::ProtocolNumber;
pub use snils::Snils;
pub use title::{EmployerTitle, OrganizationTitle};

/// Strip every non-digit character from a raw value
pub(crate) fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
