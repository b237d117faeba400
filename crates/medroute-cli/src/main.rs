use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use medroute_lib::routing::HospitalQuery;
use medroute_lib::{
    fetch_archive, ingest_extracts, load_network, plan_hospital_route, resolve_database_path,
    NodeIndex,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Nearest-hospital routing utilities")]
struct Cli {
    /// Override the store directory or file path.
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download a ZIP archive of CSV extracts and unpack it.
    Fetch {
        /// Archive URL.
        #[arg(long)]
        url: String,
        /// Directory to unpack into (defaults to the current directory).
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Ingest CSV extracts into the SQLite store.
    Ingest {
        /// Path to the nodes CSV file.
        #[arg(long)]
        nodes: PathBuf,
        /// Path to the edges CSV file.
        #[arg(long)]
        edges: PathBuf,
        /// Path to the hospitals CSV file.
        #[arg(long)]
        hospitals: PathBuf,
    },
    /// Compute a GeoJSON route from a point to its nearest hospital.
    Route {
        /// Latitude of the query point in decimal degrees.
        #[arg(long)]
        latitude: f64,
        /// Longitude of the query point in decimal degrees.
        #[arg(long)]
        longitude: f64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { url, dir } => handle_fetch(&url, &dir),
        Command::Ingest {
            nodes,
            edges,
            hospitals,
        } => handle_ingest(cli.database.as_deref(), &nodes, &edges, &hospitals),
        Command::Route {
            latitude,
            longitude,
        } => handle_route(cli.database.as_deref(), latitude, longitude),
    }
}

fn handle_fetch(url: &str, dir: &Path) -> Result<()> {
    let extracted =
        fetch_archive(url, dir).context("failed to download or unpack the dataset archive")?;
    println!("Extracted {} file(s):", extracted.len());
    for path in extracted {
        println!("- {}", path.display());
    }
    Ok(())
}

fn handle_ingest(
    target: Option<&Path>,
    nodes: &Path,
    edges: &Path,
    hospitals: &Path,
) -> Result<()> {
    let db_path = resolve_database_path(target).context("failed to resolve the store path")?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let report = ingest_extracts(&db_path, nodes, edges, hospitals)
        .context("failed to ingest the CSV extracts")?;
    println!(
        "Ingested {} nodes, {} edges, {} hospitals into {}",
        report.nodes,
        report.edges,
        report.hospitals,
        db_path.display()
    );
    Ok(())
}

fn handle_route(target: Option<&Path>, latitude: f64, longitude: f64) -> Result<()> {
    let db_path = resolve_database_path(target).context("failed to resolve the store path")?;
    let network = load_network(&db_path)
        .with_context(|| format!("failed to load the network from {}", db_path.display()))?;
    let index = NodeIndex::build(&network);

    let query = HospitalQuery {
        latitude,
        longitude,
    };
    let collection = plan_hospital_route(&network, &index, &query)?;

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
