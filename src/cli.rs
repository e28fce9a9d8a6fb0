//! CLI commands for the transit-node-routing demo binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::loader::load_edge_list;
use crate::preprocess;
use crate::query::{self, Artifact};

#[derive(Parser)]
#[command(name = "tnr")]
#[command(about = "Transit Node Routing over Contraction Hierarchies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run preprocessing over an edge list and write a queryable artifact.
    Preprocess {
        /// Input edge list (`source,target,length` per line)
        #[arg(long)]
        input: PathBuf,

        /// Percentage of nodes (by importance) to select as transit nodes
        #[arg(long)]
        k_percent: u8,

        /// Keep each node's initial contraction priority fixed instead of
        /// recomputing it as its neighbors are contracted
        #[arg(long)]
        no_online: bool,

        /// Where to write the preprocessed artifact (JSON)
        #[arg(long)]
        output: PathBuf,
    },
    /// Answer a single point-to-point distance query against an artifact.
    Query {
        /// Artifact produced by `preprocess`
        #[arg(long)]
        artifact: PathBuf,

        /// Source node id
        #[arg(long)]
        source: String,

        /// Target node id
        #[arg(long)]
        target: String,
    },
}

/// On-disk shape of a preprocessed artifact. Flat vectors rather than the
/// internal dense-id structures, so the format doesn't leak implementation
/// details and survives across crate versions.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactFile {
    edges: Vec<(String, String, f64)>,
    order: Vec<(String, u32)>,
    transit_nodes: Vec<String>,
    distance_table: Vec<(String, String, f64)>,
    access_nodes: Vec<(String, Vec<(String, f64)>)>,
    locality: Vec<(String, Vec<String>)>,
    shortcuts: Vec<(String, String, f64)>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess { input, k_percent, no_online, output } => {
                let online = !no_online;
                info!(input = %input.display(), k_percent, online, "loading edge list");
                let graph = load_edge_list(&input)?;

                let artifact = preprocess::preprocess(graph, k_percent, online)
                    .context("preprocessing failed")?;

                let file = ArtifactFile {
                    edges: artifact.augmented_edges(),
                    order: artifact.ordering_pairs(),
                    transit_nodes: artifact.transit_nodes(),
                    distance_table: artifact.distance_table_triples(),
                    access_nodes: artifact.access_node_entries(),
                    locality: artifact.locality_entries(),
                    shortcuts: artifact.shortcuts.clone(),
                };

                let json = serde_json::to_string_pretty(&file)
                    .context("serializing artifact")?;
                std::fs::write(&output, json)
                    .with_context(|| format!("writing artifact to {}", output.display()))?;

                println!(
                    "preprocessed {} nodes, {} transit nodes, {} shortcuts -> {}",
                    artifact.node_count(),
                    artifact.transit_count(),
                    artifact.shortcut_count(),
                    output.display()
                );
            }
            Commands::Query { artifact, source, target } => {
                let contents = std::fs::read_to_string(&artifact)
                    .with_context(|| format!("reading artifact at {}", artifact.display()))?;
                let file: ArtifactFile =
                    serde_json::from_str(&contents).context("parsing artifact")?;

                let artifact: Artifact<String> = Artifact::from_parts(
                    file.edges,
                    file.order,
                    file.transit_nodes,
                    file.distance_table,
                    file.access_nodes,
                    file.locality,
                    file.shortcuts,
                )
                .context("reconstructing artifact")?;

                let distance = query::resolve(&artifact, &source, &target)
                    .context("query failed")?;

                if distance.is_finite() {
                    println!("{distance}");
                } else {
                    println!("unreachable");
                }
            }
        }

        Ok(())
    }
}
