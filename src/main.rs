//! Command-line interface for mintrud-registry

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use mintrud_registry::{ExportBatch, ExportOptions, ProgramCatalog, RegistrySchema};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "mintrud-registry")]
#[command(author, version, about = "Mintrud registry export and validation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a JSON batch of source records to registry XML
    Export {
        /// Path to the JSON batch file
        #[arg(value_name = "BATCH")]
        batch: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to an XSD overriding the bundled registry schema
        #[arg(short, long, value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Permit an export that yields zero records
        #[arg(long)]
        allow_empty: bool,
    },

    /// Validate a registry XML document against the schema
    Validate {
        /// Path to the XML file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to an XSD overriding the bundled registry schema
        #[arg(short, long, value_name = "SCHEMA")]
        schema: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            batch,
            output,
            schema,
            allow_empty,
        } => cmd_export(batch, output, schema, allow_empty),
        Commands::Validate { file, schema } => cmd_validate(file, schema),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_export(
    batch_path: PathBuf,
    output: Option<PathBuf>,
    schema: Option<PathBuf>,
    allow_empty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = ExportBatch::from_json_file(&batch_path)?;
    let options = ExportOptions {
        schema_path: schema,
        allow_empty,
    };

    let outcome = batch.export(&ProgramCatalog::standard(), &options)?;

    for skipped in &outcome.skipped {
        eprintln!("skipped {}", skipped);
    }
    eprintln!(
        "{} record(s) exported, {} skipped",
        outcome.record_count,
        outcome.skipped.len()
    );

    match output {
        Some(path) => fs::write(path, outcome.xml)?,
        None => println!("{}", outcome.xml),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_validate(
    file: PathBuf,
    schema: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = match schema {
        Some(path) => RegistrySchema::from_file(path)?,
        None => RegistrySchema::bundled()?,
    };

    match schema.validate_file(&file) {
        Ok(()) => {
            println!("{} is valid", file.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
