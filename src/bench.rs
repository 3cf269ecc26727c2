//! Timing harness comparing every representation/algorithm pair.

use crate::error::{GraphError, Result};
use crate::generator::{Tournament, random_tournament, seeded_rng};
use crate::graph::{AdjacencyMatrix, ChainMatrix, SortableGraph, is_topological_order};
use crate::models::{Algorithm, Representation};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Harness settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Vertex counts to generate tournaments for
    pub sizes: Vec<usize>,
    /// Sort calls per representation/algorithm pair; the mean is reported
    pub repetitions: u32,
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10, 50, 100, 200],
            repetitions: 5,
            seed: None,
        }
    }
}

/// Mean timings for one representation/algorithm pair on one graph
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub vertices: usize,
    pub edges: usize,
    pub representation: Representation,
    pub algorithm: Algorithm,
    pub build_micros: f64,
    pub sort_micros: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub repetitions: u32,
    pub rows: Vec<BenchRow>,
}

/// How a report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Run the benchmark. Every sort result is checked, so a wrong order fails
/// the run with `VerificationFailed` instead of producing timings.
pub fn run_benchmark(config: &BenchConfig) -> Result<BenchReport> {
    if config.repetitions == 0 {
        return Err(GraphError::InvalidArgument(
            "repetitions must be at least 1".to_string(),
        ));
    }

    let mut rng = seeded_rng(config.seed);
    let mut rows = Vec::with_capacity(config.sizes.len() * 4);

    for &vertices in &config.sizes {
        let tournament = random_tournament(vertices, &mut rng);
        info!(
            vertices,
            edges = tournament.edges.edge_count(),
            "benchmarking tournament"
        );

        rows.extend(bench_representation::<AdjacencyMatrix>(
            &tournament,
            config.repetitions,
        )?);
        rows.extend(bench_representation::<ChainMatrix>(
            &tournament,
            config.repetitions,
        )?);
    }

    Ok(BenchReport {
        generated_at: Utc::now(),
        seed: config.seed,
        repetitions: config.repetitions,
        rows,
    })
}

fn bench_representation<G: SortableGraph>(
    tournament: &Tournament,
    repetitions: u32,
) -> Result<Vec<BenchRow>> {
    let list = &tournament.edges;

    let started = Instant::now();
    let graph = G::from_edge_list(list)?;
    let build = started.elapsed();

    let mut rows = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let mut total = Duration::ZERO;

        for _ in 0..repetitions {
            let started = Instant::now();
            let outcome = graph.sort(algorithm);
            total += started.elapsed();

            let valid = outcome
                .order()
                .is_some_and(|order| is_topological_order(list.vertices, &list.edges, order));
            if !valid {
                return Err(GraphError::VerificationFailed {
                    representation: G::REPRESENTATION,
                    algorithm,
                    vertices: list.vertices,
                });
            }
        }

        let row = BenchRow {
            vertices: list.vertices,
            edges: list.edge_count(),
            representation: G::REPRESENTATION,
            algorithm,
            build_micros: micros(build),
            sort_micros: micros(total) / f64::from(repetitions),
        };
        debug!(?row, "measured");
        rows.push(row);
    }

    Ok(rows)
}

fn micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}

/// Render a report in the requested format
pub fn render(report: &BenchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Table => render_table(report),
    }
}

fn render_csv(report: &BenchReport) -> Result<String> {
    let mut out = String::from("vertices,edges,representation,algorithm,build_us,sort_us\n");
    for row in &report.rows {
        writeln!(
            out,
            "{},{},{},{},{:.3},{:.3}",
            row.vertices,
            row.edges,
            row.representation,
            row.algorithm,
            row.build_micros,
            row.sort_micros
        )?;
    }
    Ok(out)
}

fn render_table(report: &BenchReport) -> Result<String> {
    let mut out = String::new();
    let seed = report
        .seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "random".to_string());
    writeln!(
        out,
        "Benchmark at {} (seed: {}, repetitions: {})",
        report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        seed,
        report.repetitions
    )?;
    writeln!(
        out,
        "{:>8} {:>8}  {:<8} {:<6} {:>14} {:>14}",
        "vertices", "edges", "repr", "algo", "build (us)", "sort (us)"
    )?;
    for row in &report.rows {
        writeln!(
            out,
            "{:>8} {:>8}  {:<8} {:<6} {:>14.3} {:>14.3}",
            row.vertices,
            row.edges,
            row.representation.as_str(),
            row.algorithm.as_str(),
            row.build_micros,
            row.sort_micros
        )?;
    }
    Ok(out)
}
