//! OpenGraph CLI — inspect OpenGraph JSON files
//!
//! Loads an ingestion document, prints node/edge counts with a
//! connected/isolated breakdown, and runs the graph validator.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use opengraph::codec;
use opengraph::graph::{validate, GraphStore};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "opengraph", version, about = "OpenGraph JSON file inspector")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print counts, metadata and validation findings for a graph file
    Info {
        /// OpenGraph JSON file to process
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Info { file } => run_info(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run_info(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("file {} does not exist", path.display());
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    println!("Loading graph from {} ({})", path.display(), human_size(size));

    let mut store = GraphStore::new();
    codec::import_file(&mut store, path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let node_count = store.node_count();
    let isolated_nodes = store.isolated_node_count();
    let edge_count = store.edge_count();
    let isolated_edges = store.isolated_edge_count();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Total", "Connected", "Isolated"]);
    table.add_row(vec![
        "Nodes".to_string(),
        node_count.to_string(),
        (node_count - isolated_nodes).to_string(),
        isolated_nodes.to_string(),
    ]);
    table.add_row(vec![
        "Edges".to_string(),
        edge_count.to_string(),
        (edge_count - isolated_edges).to_string(),
        isolated_edges.to_string(),
    ]);
    println!("{table}");

    println!(
        "Source kind: {}",
        store.source_kind().unwrap_or("(none)")
    );

    let problems = validate(&store);
    if problems.is_empty() {
        println!("Validation: no problems found");
    } else {
        println!("Validation: {} problem(s) found", problems.len());
        for problem in &problems {
            println!("  - {problem}");
        }
    }

    Ok(())
}

/// Render a byte count with the largest fitting unit, two decimals
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0.00 B");
        assert_eq!(human_size(512), "512.00 B");
        assert_eq!(human_size(2048), "2.00 kB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
