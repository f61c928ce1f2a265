//! Offline OpenAPI generator.
//!
//! Writes the contract document for the full catalog to a file, without
//! starting the server.
//!
//! Usage:
//!   cargo run -p contactbook-api --bin openapi -- [OUTPUT]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use contactbook_api::catalog::Catalog;
use contactbook_api::config::AppConfig;
use contactbook_api::contract::export::write_document;
use contactbook_api::contract::{ContractGenerator, SecuritySchemeDef, ServiceInfo};
use contactbook_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "openapi", about = "Generate the OpenAPI document for the contact API")]
struct Args {
    /// Where to write the document; parent directories are created.
    #[arg(default_value = "api/openapi.json")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();
    contactbook_observability::init(LogFormat::Pretty);

    if let Err(e) = run(&args) {
        tracing::error!("failed to generate OpenAPI document: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let catalog = Catalog::standard().context("invalid operation catalog")?;

    let generator = ContractGenerator::new(ServiceInfo::from_config(&config), [SecuritySchemeDef::bearer_jwt()]);
    let doc = generator.generate(&catalog)?;
    let summary = write_document(&args.output, &doc)?;

    let tags: Vec<&str> = summary.tags.iter().map(String::as_str).collect();
    println!("OpenAPI spec generated successfully: {}", args.output.display());
    println!("Total operations: {}", summary.operation_count);
    println!("Tags: {}", tags.join(", "));
    Ok(())
}
