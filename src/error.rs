use thiserror::Error;

use crate::models::{Algorithm, Representation};

/// All possible errors when loading, building or benchmarking graphs
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Input is empty: expected a `<vertices> [<edges>]` header line")]
    EmptyInput,

    #[error("Line {line}: malformed header `{content}`, expected `<vertices> [<edges>]`")]
    MalformedHeader { line: usize, content: String },

    #[error("Line {line}: malformed edge `{content}`, expected `<from> <to>`")]
    MalformedEdge { line: usize, content: String },

    #[error("Header declares {expected} edges but only {found} were found")]
    EdgeCountMismatch { expected: usize, found: usize },

    #[error("Vertex {vertex} is out of range 1..={vertices}")]
    VertexOutOfRange { vertex: usize, vertices: usize },

    #[error("Edge {0} -> {0} is a self loop")]
    SelfLoop(usize),

    #[error("Edge {from} -> {to} appears more than once")]
    DuplicateEdge { from: usize, to: usize },

    #[error(
        "Edges {from} -> {to} and {to} -> {from} both exist; the packed chain graph cannot store a pair in both directions"
    )]
    BidirectionalEdge { from: usize, to: usize },

    #[error("Too many vertices to store as a matrix: {0}")]
    TooManyVertices(usize),

    #[error("{representation}/{algorithm} returned an invalid order for a {vertices}-vertex graph")]
    VerificationFailed {
        representation: Representation,
        algorithm: Algorithm,
        vertices: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
