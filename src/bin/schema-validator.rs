//! # Request Schema Validator
//!
//! A command-line utility for checking request schema documents and for trying
//! payloads against the embedded schemas.
//!
//! ## Usage
//!
//! ### Check a Schema Document or Directory
//!
//! ```bash
//! cargo run --bin schema-validator schemas/todo.create.json
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! ### List the Embedded Schemas
//!
//! ```bash
//! cargo run --bin schema-validator --list
//! ```
//!
//! ### Validate a Payload
//!
//! ```bash
//! cargo run --bin schema-validator --payload todo.list-query query.json query
//! ```
//!
//! The source argument is `body` (default), `query` or `path`. Query and path
//! payloads are JSON objects of strings, as a router would decode them.
//!
//! ## Output Examples
//!
//! ```text
//! Validating payload against todo.create (body)
//! ❌ Validation failed with 1 error(s):
//!   priority: must be one of: low, medium, high (got "extreme")
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Every schema or payload is valid
//! - `1`: Something is invalid or could not be read

use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use todo_gate::schema::{InputSource, Schema, SchemaRegistry, ValidationOutcome};

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--list") => list_embedded(),
        Some("--payload") if args.len() >= 4 => {
            let source = match args.get(4).map(String::as_str) {
                None | Some("body") => InputSource::Body,
                Some("query") => InputSource::Query,
                Some("path") => InputSource::Path,
                Some(other) => {
                    eprintln!("Error: unknown source '{}'", other);
                    process::exit(1);
                }
            };
            validate_payload(&args[2], Path::new(&args[3]), source);
        }
        Some(path) if !path.starts_with("--") => {
            let path = Path::new(path);
            if path.is_file() {
                validate_single_file(path);
            } else if path.is_dir() {
                validate_directory(path);
            } else {
                eprintln!(
                    "Error: '{}' is not a valid file or directory",
                    path.display()
                );
                process::exit(1);
            }
        }
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <schema-file-or-directory>", program);
    eprintln!("       {} --list", program);
    eprintln!(
        "       {} --payload <schema-name> <payload.json> [body|query|path]",
        program
    );
}

fn list_embedded() {
    let registry = load_registry();
    println!("Embedded schemas:");
    for name in registry.schema_names() {
        if let Ok(schema) = registry.get_schema(name) {
            println!("  - {} ({} fields): {}", name, schema.fields.len(), schema.description);
        }
    }
}

fn validate_payload(schema_name: &str, payload_path: &Path, source: InputSource) {
    let registry = load_registry();
    println!("Validating payload against {} ({})", schema_name, source);

    let payload: Value = match fs::read_to_string(payload_path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("❌ Could not read payload: {}", e);
            process::exit(1);
        }
    };

    match registry.validate(schema_name, &payload, source) {
        Ok(ValidationOutcome::Valid(normalized)) => {
            println!("✓ Payload is valid!");
            println!();
            println!("Normalized:");
            println!(
                "{}",
                serde_json::to_string_pretty(&normalized).unwrap_or_default()
            );
        }
        Ok(ValidationOutcome::Invalid(errors)) => {
            eprintln!("❌ Validation failed with {} error(s):", errors.len());
            for error in errors {
                let path = if error.path.is_empty() { "<root>" } else { &error.path };
                eprintln!("  {}: {} (got {})", path, error.message, error.value);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match load_schema(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut registry = SchemaRegistry::empty(Default::default());
    let mut valid_count = 0;
    let mut error_count = 0;

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        println!("\nValidating: {}", path.display());

        match load_schema(&path).map_err(|e| e.to_string()).and_then(|schema| {
            let name = schema.name.clone();
            registry.register(schema).map_err(|e| e.to_string())?;
            Ok(name)
        }) {
            Ok(name) => {
                println!("  ✓ Valid - {}", name);
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn load_registry() -> SchemaRegistry {
    match SchemaRegistry::new() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("❌ Failed to load schema registry: {}", e);
            process::exit(1);
        }
    }
}

fn load_schema(file_path: &Path) -> Result<Schema, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    Ok(Schema::from_json(&content)?)
}

fn print_schema_summary(schema: &Schema) {
    println!();
    println!("Schema Summary:");
    println!("  Name: {}", schema.name);
    println!("  Description: {}", schema.description);
    println!("  Fields: {}", schema.fields.len());
    if let Some(minimum) = schema.minimum_fields_required {
        println!("  Minimum fields present: {}", minimum);
    }
    println!(
        "  Unknown fields: {}",
        if schema.additional_fields_allowed { "kept" } else { "stripped" }
    );

    let mut type_counts = std::collections::BTreeMap::new();
    for field in &schema.fields {
        *type_counts.entry(field.field_type.as_str()).or_insert(0) += 1;
    }
    println!("  Field types:");
    for (field_type, count) in type_counts {
        println!("    - {}: {}", field_type, count);
    }

    let required: Vec<&str> = schema
        .fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name.as_str())
        .collect();
    if !required.is_empty() {
        println!("  Required field names: {}", required.join(", "));
    }

    let with_defaults: Vec<&str> = schema
        .fields
        .iter()
        .filter(|field| field.default.is_some())
        .map(|field| field.name.as_str())
        .collect();
    if !with_defaults.is_empty() {
        println!("  Defaulted field names: {}", with_defaults.join(", "));
    }
}
