use anyhow::{Context, Result};
use clap::Parser;
use cocktail_etl::error::EtlError;
use cocktail_etl::pipeline::processing::schema_gate::SchemaGate;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// Validate a raw drinks payload against the CocktailDB schema.
#[derive(Parser, Debug)]
#[command(name = "validate-drinks", version, about = "Validate a drinks JSON file against schema")]
struct Cli {
    /// Path to the drinks JSON file to validate
    path: PathBuf,

    /// Optional path to a schema file (defaults to the bundled cocktaildb.drinks.v1 schema)
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn load_json(path: &PathBuf) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(json)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let gate = match &args.schema {
        Some(path) => SchemaGate::from_schema(&load_json(path)?),
        None => SchemaGate::cocktail_db(),
    }
    .context("Failed to compile JSON Schema")?;

    let instance = load_json(&args.path)?;

    match gate.check(&instance) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(EtlError::SchemaViolation(violations)) => {
            eprintln!("invalid:");
            for violation in violations {
                eprintln!("- {violation}");
            }
            std::process::exit(1)
        }
        Err(e) => Err(e.into()),
    }
}
