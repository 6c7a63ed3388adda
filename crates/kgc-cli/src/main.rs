//! KGC CLI - Command-line interface
//!
//! Usage:
//!   kgc process              extract entities and relations from the corpus
//!   kgc build                assemble the graph from saved extraction results
//!   kgc run                  process then build
//!   kgc stats                print graph statistics as JSON

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kgc_core::config::{AppConfig, LoggingConfig};
use kgc_extractor::Processor;
use kgc_graph::GraphAssembler;
use kgc_store::{load_documents, ArtifactStore, GraphDb, DATABASE_FILE};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kgc")]
#[command(about = "Knowledge graph construction from Chinese text")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (env vars still take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus file or directory, overriding the configured input
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Artifact directory, overriding the configured output
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities and relations from the corpus
    Process,
    /// Assemble graph artifacts from saved extraction results
    Build,
    /// Run the full pipeline: process then build
    Run,
    /// Print graph statistics from saved extraction results
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    if let Some(input) = cli.input {
        config.data.input_dir = input;
    }
    if let Some(output) = cli.output {
        config.data.output_dir = output;
    }

    init_tracing(&config.logging);

    match cli.command {
        Commands::Process => {
            process(&config).await?;
        }
        Commands::Build => {
            build(&config).await?;
        }
        Commands::Run => {
            process(&config).await?;
            build(&config).await?;
        }
        Commands::Stats => {
            stats(&config)?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Extract entities and relations from every corpus document and save the
/// results under the output directory.
async fn process(config: &AppConfig) -> anyhow::Result<()> {
    let documents = load_documents(&config.data.input_dir)?;

    let llm = if config.llm_enabled() {
        info!("LLM relation supplier enabled (model {})", config.llm.model);
        Some(kgc_llm::create_client(&config.llm)?)
    } else {
        info!("LLM relation supplier disabled");
        None
    };

    let processor = Processor::from_config(config, llm);
    let extraction = processor.process_corpus(&documents).await;

    let store = ArtifactStore::new(&config.data.output_dir)?;
    store.save_entities(&extraction.entities)?;
    store.save_relations(&extraction.relations)?;

    info!(
        "processed {} documents ({} failed): {} entities, {} relations",
        extraction.documents_processed,
        extraction.documents_failed,
        extraction.entities.len(),
        extraction.relations.len()
    );
    Ok(())
}

/// Assemble the graph from saved extraction results, write every graph
/// artifact, and refresh the SQLite database.
async fn build(config: &AppConfig) -> anyhow::Result<()> {
    let store = ArtifactStore::new(&config.data.output_dir)?;
    let entities = store.load_entities()?;
    let relations = store.load_relations()?;

    let assembled = GraphAssembler::assemble(&entities, &relations);
    store.save_graph(&assembled)?;

    let db_path = config.data.output_dir.join(DATABASE_FILE);
    let db = GraphDb::open(&db_path.to_string_lossy()).await?;
    db.store_graph(&assembled.graph.to_node_link()).await?;

    info!("graph artifacts written to {}", config.data.output_dir.display());
    Ok(())
}

/// Print graph statistics for the saved extraction results.
fn stats(config: &AppConfig) -> anyhow::Result<()> {
    let store = ArtifactStore::new(&config.data.output_dir)?;
    let entities = store.load_entities()?;
    let relations = store.load_relations()?;

    let assembled = GraphAssembler::assemble(&entities, &relations);
    let statistics = assembled.statistics();
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}
