pub mod bench;
pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod generator;
pub mod graph;
pub mod loader;
pub mod models;

pub use error::{GraphError, Result};
pub use graph::{AdjacencyMatrix, ChainMatrix, SortableGraph};
pub use models::*;
