use crate::bench::OutputFormat;
use crate::models::{Algorithm, Representation};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "toposort-bench")]
#[command(about = "Topological sorting over dense and packed chain graph representations")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Topologically sort a graph file
    Sort {
        /// Graph file: `<vertices> [<edges>]` header, then `<from> <to>` lines
        file: PathBuf,
        /// Representation(s) to build
        #[arg(long, value_enum, default_value_t = RepresentationArg::All)]
        representation: RepresentationArg,
        /// Algorithm(s) to run
        #[arg(long, value_enum, default_value_t = AlgorithmArg::All)]
        algorithm: AlgorithmArg,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random acyclic complete tournament
    Generate {
        /// Number of vertices
        vertices: usize,
        /// Seed for a reproducible graph
        #[arg(long)]
        seed: Option<u64>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the packed matrix and the decoded chains of a graph file
    Inspect {
        /// Graph file
        file: PathBuf,
    },

    /// Time every representation/algorithm pair on random tournaments
    Bench {
        /// Comma-separated vertex counts
        #[arg(long, value_delimiter = ',', default_values_t = [10, 50, 100, 200])]
        sizes: Vec<usize>,
        /// Sort calls per pair; the mean is reported
        #[arg(long, default_value_t = 5)]
        repetitions: u32,
        /// Seed for reproducible graphs
        #[arg(long)]
        seed: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepresentationArg {
    Dense,
    Packed,
    All,
}

impl RepresentationArg {
    pub fn representations(self) -> Vec<Representation> {
        match self {
            RepresentationArg::Dense => vec![Representation::Dense],
            RepresentationArg::Packed => vec![Representation::Packed],
            RepresentationArg::All => Representation::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Dfs,
    Kahn,
    All,
}

impl AlgorithmArg {
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::Dfs => vec![Algorithm::Dfs],
            AlgorithmArg::Kahn => vec![Algorithm::Kahn],
            AlgorithmArg::All => Algorithm::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sort_defaults() {
        let cli = Cli::try_parse_from(["toposort-bench", "sort", "graph.txt"]).unwrap();
        match cli.command {
            Commands::Sort {
                file,
                representation,
                algorithm,
                json,
            } => {
                assert_eq!(file, PathBuf::from("graph.txt"));
                assert_eq!(representation, RepresentationArg::All);
                assert_eq!(algorithm, AlgorithmArg::All);
                assert!(!json);
            }
            _ => panic!("expected sort command"),
        }
    }

    #[test]
    fn test_parse_bench_sizes() {
        let cli = Cli::try_parse_from([
            "toposort-bench",
            "bench",
            "--sizes",
            "5,15",
            "--format",
            "csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench {
                sizes,
                repetitions,
                seed,
                format,
            } => {
                assert_eq!(sizes, vec![5, 15]);
                assert_eq!(repetitions, 5);
                assert_eq!(seed, None);
                assert_eq!(format, FormatArg::Csv);
            }
            _ => panic!("expected bench command"),
        }
    }

    #[test]
    fn test_selector_expansion() {
        assert_eq!(
            RepresentationArg::All.representations(),
            vec![Representation::Dense, Representation::Packed]
        );
        assert_eq!(AlgorithmArg::Kahn.algorithms(), vec![Algorithm::Kahn]);
    }
}
