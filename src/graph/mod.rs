//! Graph representations and the topological sorts shared between them.
//!
//! Both representations are built once from an edge list and are read-only
//! afterwards. Each sort call allocates its own bookkeeping, so a graph can be
//! sorted any number of times, from any number of threads.

pub mod adjacency;
pub mod chains;

pub use adjacency::AdjacencyMatrix;
pub use chains::{Chain, ChainKind, ChainMatrix, Link};

use crate::error::{GraphError, Result};
use crate::models::{Algorithm, Edge, EdgeList, Representation, SortOutcome, Vertex};
use std::collections::{HashSet, VecDeque};

/// A graph representation that can be built from an edge list and sorted
pub trait SortableGraph: Sized {
    const REPRESENTATION: Representation;

    /// Build the representation from 1-based edges
    fn build(vertices: usize, edges: &[Edge]) -> Result<Self>;

    fn vertex_count(&self) -> usize;

    /// Depth-first topological sort with cycle detection
    fn topological_sort_dfs(&self) -> SortOutcome;

    /// Kahn's in-degree driven topological sort
    fn topological_sort_kahn(&self) -> SortOutcome;

    fn from_edge_list(list: &EdgeList) -> Result<Self> {
        Self::build(list.vertices, &list.edges)
    }

    fn sort(&self, algorithm: Algorithm) -> SortOutcome {
        match algorithm {
            Algorithm::Dfs => self.topological_sort_dfs(),
            Algorithm::Kahn => self.topological_sort_kahn(),
        }
    }
}

/// Upper bound on the cells one matrix may allocate. The vertex count comes
/// straight from input headers, so builders check it before allocating.
pub const MAX_CELLS: usize = 1 << 30;

/// Cell count of a `rows`×`width` matrix, or `TooManyVertices` when the
/// product overflows or exceeds [`MAX_CELLS`]
pub(crate) fn matrix_cells(rows: usize, width: usize) -> Result<usize> {
    rows.checked_mul(width)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or(GraphError::TooManyVertices(rows))
}

/// Check that every edge joins two distinct in-range vertices and appears once
pub fn validate_edges(vertices: usize, edges: &[Edge]) -> Result<()> {
    let mut seen: HashSet<Edge> = HashSet::with_capacity(edges.len());

    for &(from, to) in edges {
        for vertex in [from, to] {
            if vertex == 0 || vertex > vertices {
                return Err(GraphError::VertexOutOfRange { vertex, vertices });
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        if !seen.insert((from, to)) {
            return Err(GraphError::DuplicateEdge { from, to });
        }
    }

    Ok(())
}

/// True if `order` lists every vertex exactly once and every edge points forward
pub fn is_topological_order(vertices: usize, edges: &[Edge], order: &[Vertex]) -> bool {
    if order.len() != vertices {
        return false;
    }

    let mut position = vec![usize::MAX; vertices];
    for (index, &vertex) in order.iter().enumerate() {
        if vertex == 0 || vertex > vertices || position[vertex - 1] != usize::MAX {
            return false;
        }
        position[vertex - 1] = index;
    }

    edges.iter().all(|&(from, to)| {
        from != 0
            && to != 0
            && from <= vertices
            && to <= vertices
            && position[from - 1] < position[to - 1]
    })
}

/// Iterative depth-first search over 0-based indices.
///
/// A vertex is put on the path when it is first reached and emitted once every
/// vertex yielded by `neighbors` has been emitted. Reaching a vertex that is
/// still on the path means a cycle, and the search stops with `None`.
pub(crate) fn depth_first_postorder<F, I>(vertices: usize, neighbors: F) -> Option<Vec<usize>>
where
    F: Fn(usize) -> I,
    I: Iterator<Item = usize>,
{
    let mut visited = vec![false; vertices];
    let mut on_path = vec![false; vertices];
    let mut postorder = Vec::with_capacity(vertices);
    let mut stack: Vec<(usize, I)> = Vec::new();

    for root in 0..vertices {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        on_path[root] = true;
        stack.push((root, neighbors(root)));

        while let Some((vertex, pending)) = stack.last_mut() {
            match pending.next() {
                Some(next) => {
                    if on_path[next] {
                        return None;
                    }
                    if !visited[next] {
                        visited[next] = true;
                        on_path[next] = true;
                        stack.push((next, neighbors(next)));
                    }
                }
                None => {
                    let done = *vertex;
                    on_path[done] = false;
                    postorder.push(done);
                    stack.pop();
                }
            }
        }
    }

    Some(postorder)
}

/// Kahn's algorithm over 0-based indices with a FIFO queue.
///
/// The queue is seeded with every zero in-degree vertex in ascending order.
/// Returns `None` when some vertex never reaches zero in-degree.
pub(crate) fn kahn_order<F, I>(mut in_degree: Vec<usize>, successors: F) -> Option<Vec<usize>>
where
    F: Fn(usize) -> I,
    I: Iterator<Item = usize>,
{
    let vertices = in_degree.len();
    let mut queue: VecDeque<usize> = (0..vertices).filter(|&v| in_degree[v] == 0).collect();
    let mut result = Vec::with_capacity(vertices);

    while let Some(vertex) = queue.pop_front() {
        result.push(vertex);

        for next in successors(vertex) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    (result.len() == vertices).then_some(result)
}
