use crate::bench::{self, BenchConfig, OutputFormat};
use crate::error::GraphError;
use crate::generator::{random_tournament, seeded_rng};
use crate::graph::{AdjacencyMatrix, ChainKind, ChainMatrix, SortableGraph};
use crate::loader::{load_edge_list, write_edge_list};
use crate::models::{Algorithm, EdgeList, Representation, SortOutcome, Vertex};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tracing::{info, warn};

/// Printed when a sort finds a cycle
pub const CYCLE_MESSAGE: &str = "Graph contains a cycle; topological sort is impossible";

/// One sort result, as printed by the sort command
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub representation: Representation,
    pub algorithm: Algorithm,
    #[serde(flatten)]
    pub outcome: SortOutcome,
}

/// A representation that could not be built from the input
#[derive(Debug, Clone, Serialize)]
pub struct RejectedReport {
    pub representation: Representation,
    pub error: String,
}

/// One line of the sort command's output
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SortEntry {
    Sorted(SortReport),
    Rejected(RejectedReport),
}

/// Handle the sort command.
///
/// A representation that rejects the graph is reported in place of its
/// results. The command only fails when no requested representation could be
/// built.
pub fn handle_sort(
    file: &Path,
    representations: &[Representation],
    algorithms: &[Algorithm],
    json: bool,
) -> Result<(), GraphError> {
    let list = load_edge_list(file)?;
    info!(
        vertices = list.vertices,
        edges = list.edge_count(),
        "sorting graph"
    );

    let mut entries = Vec::new();
    let mut first_error = None;
    for &representation in representations {
        let sorted = match representation {
            Representation::Dense => sort_with::<AdjacencyMatrix>(&list, algorithms),
            Representation::Packed => sort_with::<ChainMatrix>(&list, algorithms),
        };
        match sorted {
            Ok(reports) => entries.extend(reports.into_iter().map(SortEntry::Sorted)),
            Err(err) => {
                warn!(%representation, error = %err, "representation rejected the graph");
                entries.push(SortEntry::Rejected(RejectedReport {
                    representation,
                    error: err.to_string(),
                }));
                first_error.get_or_insert(err);
            }
        }
    }

    if !entries.iter().any(|entry| matches!(entry, SortEntry::Sorted(_))) {
        if let Some(err) = first_error {
            return Err(err);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        match entry {
            SortEntry::Sorted(report) => {
                let result = match report.outcome.order() {
                    Some(order) => format_order(order),
                    None => CYCLE_MESSAGE.to_string(),
                };
                println!("{}/{}: {}", report.representation, report.algorithm, result);
            }
            SortEntry::Rejected(rejected) => {
                println!("{}: rejected: {}", rejected.representation, rejected.error);
            }
        }
    }

    Ok(())
}

fn sort_with<G: SortableGraph>(
    list: &EdgeList,
    algorithms: &[Algorithm],
) -> Result<Vec<SortReport>, GraphError> {
    let graph = G::from_edge_list(list)?;
    Ok(algorithms
        .iter()
        .map(|&algorithm| SortReport {
            representation: G::REPRESENTATION,
            algorithm,
            outcome: graph.sort(algorithm),
        })
        .collect())
}

fn format_order(order: &[Vertex]) -> String {
    order
        .iter()
        .map(|vertex| vertex.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handle the generate command
pub fn handle_generate(
    vertices: usize,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<(), GraphError> {
    let tournament = random_tournament(vertices, &mut seeded_rng(seed));
    info!(
        vertices,
        edges = tournament.edges.edge_count(),
        "generated tournament"
    );

    match output {
        Some(path) => {
            write_edge_list(&tournament.edges, BufWriter::new(File::create(path)?))?;
            println!(
                "Wrote {} vertices and {} edges to {}",
                vertices,
                tournament.edges.edge_count(),
                path.display()
            );
            println!("  Order: {}", format_order(&tournament.permutation));
        }
        None => write_edge_list(&tournament.edges, io::stdout().lock())?,
    }

    Ok(())
}

/// Handle the inspect command
pub fn handle_inspect(file: &Path) -> Result<(), GraphError> {
    let list = load_edge_list(file)?;
    let matrix = ChainMatrix::from_edge_list(&list)?;

    println!(
        "Packed matrix: {} rows x {} columns",
        list.vertices,
        list.vertices + 3
    );
    print!("{matrix}");
    println!();

    for vertex in 1..=list.vertices {
        println!("Vertex {vertex}:");
        for kind in ChainKind::ALL {
            let members = matrix.chain(vertex, kind).collect::<Vec<_>>();
            let members = if members.is_empty() {
                "-".to_string()
            } else {
                format_order(&members)
            };
            println!("  {:<13} {}", format!("{kind}:"), members);
        }
    }

    Ok(())
}

/// Handle the bench command
pub fn handle_bench(config: &BenchConfig, format: OutputFormat) -> Result<(), GraphError> {
    if config.sizes.is_empty() {
        return Err(GraphError::InvalidArgument(
            "at least one size is required".to_string(),
        ));
    }

    let report = bench::run_benchmark(config)?;
    print!("{}", bench::render(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
