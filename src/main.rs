use clap::Parser;
use std::process;
use toposort_bench::bench::BenchConfig;
use toposort_bench::cli::{Cli, Commands};
use toposort_bench::cli_handlers;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort {
            file,
            representation,
            algorithm,
            json,
        } => cli_handlers::handle_sort(
            &file,
            &representation.representations(),
            &algorithm.algorithms(),
            json,
        ),
        Commands::Generate {
            vertices,
            seed,
            output,
        } => cli_handlers::handle_generate(vertices, seed, output.as_deref()),
        Commands::Inspect { file } => cli_handlers::handle_inspect(&file),
        Commands::Bench {
            sizes,
            repetitions,
            seed,
            format,
        } => {
            let config = BenchConfig {
                sizes,
                repetitions,
                seed,
            };
            cli_handlers::handle_bench(&config, format.into())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
