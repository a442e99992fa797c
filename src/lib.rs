//! # mintrud-registry
//!
//! Builds and validates XML exports for the Russian Ministry of Labor
//! (Mintrud) registry of workers trained in occupational safety.
//!
//! The pipeline runs in three stages:
//!
//! 1. **Assembly** — CRM source records ([`entities`]) are normalized
//!    through per-field value types ([`values`]) into [`RegistryRecord`]s.
//!    One training program can map to several Mintrud codes, so one source
//!    tuple can fan out into several records. A failing tuple is captured
//!    with its full context and never aborts the batch.
//! 2. **Serialization** — a [`RegistryDocument`] renders its records as a
//!    deterministic `RegistrySet` document.
//! 3. **Validation** — [`RegistrySchema`] checks the serialized document
//!    against the government XSD (bundled, version 1.0.9) and reports every
//!    violation with line, column and location.
//!
//! ```no_run
//! use mintrud_registry::{CommonData, ProgramCatalog, RegistryDocument, RegistrySchema};
//! # use mintrud_registry::entities::SourceTuple;
//! # fn tuples() -> Vec<SourceTuple> { Vec::new() }
//!
//! # fn main() -> mintrud_registry::Result<()> {
//! let catalog = ProgramCatalog::standard();
//! let mut document = RegistryDocument::new(CommonData::new("7610056871", "Учебный центр"));
//! for tuple in tuples() {
//!     document.push(&tuple, &catalog);
//! }
//! document.validate(&RegistrySchema::bundled()?)?;
//! document.save_to_file("registry.xml")?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod document;
pub mod entities;
pub mod error;
pub mod export;
pub mod record;
pub mod schema;
pub mod values;

pub use catalog::ProgramCatalog;
pub use document::{CommonData, RecordError, RegistryDocument};
pub use error::{Error, Result, SchemaValidationError, SchemaViolation, ValidationError};
pub use export::{ExportBatch, ExportOptions, ExportOutcome, Exporter, RegistryDataSource};
pub use record::RegistryRecord;
pub use schema::RegistrySchema;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the bundled registry schema
pub const SCHEMA_VERSION: &str = "1.0.9";
