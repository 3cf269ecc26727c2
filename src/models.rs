use serde::{Deserialize, Serialize};
use std::fmt;

/// A vertex id, 1-based in the range `1..=vertices`
pub type Vertex = usize;

/// A directed edge `(from, to)` between 1-based vertex ids
pub type Edge = (Vertex, Vertex);

/// A vertex count together with the directed edges between those vertices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeList {
    pub vertices: usize,
    pub edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new(vertices: usize, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Outcome of a topological sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SortOutcome {
    /// Every vertex, each placed after all of its predecessors
    Ordered { order: Vec<Vertex> },
    /// The graph contains a cycle, no order exists
    Cycle,
}

impl SortOutcome {
    pub fn has_cycle(&self) -> bool {
        matches!(self, SortOutcome::Cycle)
    }

    pub fn order(&self) -> Option<&[Vertex]> {
        match self {
            SortOutcome::Ordered { order } => Some(order),
            SortOutcome::Cycle => None,
        }
    }

    pub fn into_order(self) -> Option<Vec<Vertex>> {
        match self {
            SortOutcome::Ordered { order } => Some(order),
            SortOutcome::Cycle => None,
        }
    }
}

impl From<Option<Vec<Vertex>>> for SortOutcome {
    fn from(order: Option<Vec<Vertex>>) -> Self {
        match order {
            Some(order) => SortOutcome::Ordered { order },
            None => SortOutcome::Cycle,
        }
    }
}

/// Topological sort algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dfs,
    Kahn,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dfs, Algorithm::Kahn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Kahn => "kahn",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "dfs" => Ok(Algorithm::Dfs),
            "kahn" => Ok(Algorithm::Kahn),
            _ => Err(format!("Invalid algorithm: {s}")),
        }
    }
}

/// In-memory graph representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// V×V boolean adjacency matrix
    Dense,
    /// V×(V+3) matrix of embedded successor/predecessor/non-incident chains
    Packed,
}

impl Representation {
    pub const ALL: [Representation; 2] = [Representation::Dense, Representation::Packed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Dense => "dense",
            Representation::Packed => "packed",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Representation {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "dense" => Ok(Representation::Dense),
            "packed" => Ok(Representation::Packed),
            _ => Err(format!("Invalid representation: {s}")),
        }
    }
}
