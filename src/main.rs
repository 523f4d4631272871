//! Command line front end of the transport catalogue
//!
//! `make-base` reads base requests and saves a catalogue snapshot,
//! `process-requests` loads the snapshot and answers stat requests.

mod config;
mod documents;
mod responses;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use catalogue_core::loading::{CatalogueSnapshot, build_catalogue};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use documents::{MakeBaseDocument, ProcessRequestsDocument, StatRequest};

/// Builds and queries a transport catalogue
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
    /// TOML file with logging and default routing settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Fill the catalogue from base requests and save a snapshot
    MakeBase {
        /// JSON document, stdin if omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Load a snapshot and answer stat requests
    ProcessRequests {
        /// JSON document, stdin if omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Response file, stdout if omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.mode {
        Mode::MakeBase { input } => make_base(input.as_deref(), &config),
        Mode::ProcessRequests { input, output } => {
            process_requests(input.as_deref(), output.as_deref(), &config)
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    // stdout is reserved for responses
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn make_base(input: Option<&Path>, config: &AppConfig) -> anyhow::Result<()> {
    let document: MakeBaseDocument = read_document(input)?;
    let routing_settings = document.routing_settings.or(config.routing_settings);

    let catalogue = build_catalogue(&document.base_requests, routing_settings)
        .context("Failed to build the catalogue")?;
    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "Catalogue loaded"
    );

    let path = &document.serialization_settings.file;
    CatalogueSnapshot::from_catalogue(&catalogue).save(path)?;
    Ok(())
}

fn process_requests(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let document: ProcessRequestsDocument = read_document(input)?;
    let catalogue = CatalogueSnapshot::load(&document.serialization_settings.file)?
        .into_catalogue()
        .context("Snapshot does not describe a valid catalogue")?;

    // Build the router before answering in parallel
    let needs_router = document
        .stat_requests
        .iter()
        .any(|request| matches!(request, StatRequest::Route { .. }));
    if needs_router && let Err(e) = catalogue.router() {
        warn!("Route requests will be answered with an error: {e}");
    }

    let responses = responses::answer_all(&catalogue, &document.stat_requests);
    info!(requests = responses.len(), "Answered stat requests");

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, &responses)?;
    } else {
        serde_json::to_writer(&mut writer, &responses)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn read_document<T: DeserializeOwned>(input: Option<&Path>) -> anyhow::Result<T> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    serde_json::from_reader(BufReader::new(reader)).context("Failed to parse the input document")
}
