//! Graphmill CLI: run the extraction pipeline, validate written output.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use graphmill_runtime::{build_engine, EngineKind, ExtractionPipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod loader;
mod writer;

#[derive(Parser)]
#[command(name = "graphmill")]
#[command(about = "Schema-driven entity and relation extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities and relations from a document file
    Run {
        /// Document file, one text unit per line
        #[arg(long)]
        documents: PathBuf,
        /// Entity schema (JSON: type -> attribute names)
        #[arg(long)]
        entities: PathBuf,
        /// Relation schema (JSON: relation -> signature tokens)
        #[arg(long)]
        relations: PathBuf,
        /// Output directory for entities.json and relations.json
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Engine variant: rule, llm-stub, or ml
        #[arg(long, default_value = "rule")]
        engine: String,
        /// Reference date (YYYY-MM-DD) for project status; defaults to the
        /// current date
        #[arg(long)]
        today: Option<String>,
    },
    /// Validate a written output file against the expected shape
    Validate {
        /// Path to entities.json or relations.json
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Run {
            documents,
            entities,
            relations,
            out_dir,
            engine,
            today,
        } => run(documents, entities, relations, out_dir, &engine, today),
        Commands::Validate { file } => validate(&file),
    }
}

fn run(
    documents: PathBuf,
    entities: PathBuf,
    relations: PathBuf,
    out_dir: PathBuf,
    engine: &str,
    today: Option<String>,
) -> anyhow::Result<()> {
    let units = loader::load_documents(&documents)?;
    let entity_schema = loader::load_entity_schema(&entities)?;
    let relation_schema = loader::load_relation_schema(&relations)?;
    let kind: EngineKind = engine.parse()?;
    let today = resolve_today(today.as_deref())?;

    let pipeline = ExtractionPipeline::new(build_engine(
        kind,
        entity_schema,
        relation_schema,
        today,
    ));
    let output = pipeline.run(&units);

    let source = documents.display().to_string();
    let entity_out = out_dir.join("entities.json");
    let relation_out = out_dir.join("relations.json");
    writer::write_envelope(
        &entity_out,
        &writer::entity_envelope(pipeline.engine_name(), &source, units.len(), &output.entities)?,
    )?;
    writer::write_envelope(
        &relation_out,
        &writer::relation_envelope(
            pipeline.engine_name(),
            &source,
            units.len(),
            &output.relations,
        )?,
    )?;

    info!(
        "Wrote {} entities to {} and {} relations to {}",
        output.report.entities,
        entity_out.display(),
        output.report.relations,
        relation_out.display()
    );
    println!(
        "{} entities, {} relations ({} units, {}ms)",
        output.report.entities, output.report.relations, output.report.units, output.report.duration_ms
    );
    Ok(())
}

fn resolve_today(today: Option<&str>) -> anyhow::Result<NaiveDate> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value: {:?}", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

fn validate(file: &std::path::Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let envelope = writer::validate_envelope(&raw)?;
    println!(
        "{}: valid {} envelope with {} results",
        file.display(),
        envelope.component,
        envelope.results.len()
    );
    Ok(())
}
