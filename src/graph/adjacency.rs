use super::{SortableGraph, depth_first_postorder, kahn_order, matrix_cells, validate_edges};
use crate::error::Result;
use crate::models::{Edge, Representation, SortOutcome, Vertex};
use tracing::debug;

/// Dense V×V adjacency matrix, the baseline representation.
///
/// Cell `(u, v)` is set iff the edge `u+1 -> v+1` exists. Every traversal
/// scans a full row or column, so both sorts are O(V²).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    vertices: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    fn index(&self, row: usize, column: usize) -> usize {
        row * self.vertices + column
    }

    /// True if the edge `from -> to` exists (1-based ids)
    pub fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        if from == 0 || to == 0 || from > self.vertices || to > self.vertices {
            return false;
        }
        self.cells[self.index(from - 1, to - 1)]
    }

    /// Successors of `vertex` in ascending order, found by scanning its row.
    /// An out-of-range vertex yields nothing.
    pub fn successors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        let rows = if (1..=self.vertices).contains(&vertex) {
            vertex - 1..vertex
        } else {
            0..0
        };
        rows.flat_map(move |row| self.row_targets(row))
            .map(|column| column + 1)
    }

    fn row_targets(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        let start = row * self.vertices;
        self.cells[start..start + self.vertices]
            .iter()
            .enumerate()
            .filter_map(|(column, &edge)| edge.then_some(column))
    }

    fn column_in_degree(&self, column: usize) -> usize {
        (0..self.vertices)
            .filter(|&row| self.cells[self.index(row, column)])
            .count()
    }
}

impl SortableGraph for AdjacencyMatrix {
    const REPRESENTATION: Representation = Representation::Dense;

    fn build(vertices: usize, edges: &[Edge]) -> Result<Self> {
        let cells = matrix_cells(vertices, vertices)?;
        validate_edges(vertices, edges)?;

        let mut matrix = AdjacencyMatrix {
            vertices,
            cells: vec![false; cells],
        };
        for &(from, to) in edges {
            let index = matrix.index(from - 1, to - 1);
            matrix.cells[index] = true;
        }

        debug!(vertices, edges = edges.len(), "built adjacency matrix");
        Ok(matrix)
    }

    fn vertex_count(&self) -> usize {
        self.vertices
    }

    fn topological_sort_dfs(&self) -> SortOutcome {
        let order = depth_first_postorder(self.vertices, |row| self.row_targets(row)).map(
            |postorder| postorder.into_iter().rev().map(|index| index + 1).collect(),
        );
        SortOutcome::from(order)
    }

    fn topological_sort_kahn(&self) -> SortOutcome {
        let in_degree = (0..self.vertices)
            .map(|column| self.column_in_degree(column))
            .collect();
        let order = kahn_order(in_degree, |row| self.row_targets(row))
            .map(|order| order.into_iter().map(|index| index + 1).collect());
        SortOutcome::from(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::is_topological_order;
    use crate::loader::parse_edge_list;
    use std::io::Cursor;

    fn sample_dag() -> Vec<Edge> {
        vec![(1, 2), (2, 3), (2, 4), (3, 5), (4, 5)]
    }

    #[test]
    fn test_build_sets_cells() {
        let matrix = AdjacencyMatrix::build(5, &sample_dag()).unwrap();
        assert_eq!(matrix.vertex_count(), 5);
        assert!(matrix.has_edge(1, 2));
        assert!(matrix.has_edge(4, 5));
        assert!(!matrix.has_edge(2, 1));
        assert!(!matrix.has_edge(1, 6));
        assert_eq!(matrix.successors(2).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(matrix.successors(5).count(), 0);
    }

    #[test]
    fn test_build_rejects_out_of_range() {
        let err = AdjacencyMatrix::build(3, &[(1, 4)]).unwrap_err();
        assert!(matches!(err, GraphError::VertexOutOfRange { vertex: 4, .. }));
    }

    #[test]
    fn test_successors_of_unknown_vertex_is_empty() {
        let matrix = AdjacencyMatrix::build(3, &[(1, 2)]).unwrap();
        assert_eq!(matrix.successors(0).count(), 0);
        assert_eq!(matrix.successors(4).count(), 0);
        assert_eq!(matrix.successors(usize::MAX).count(), 0);
    }

    #[test]
    fn test_build_rejects_huge_vertex_count() {
        let list = parse_edge_list(Cursor::new("5000000000\n")).unwrap();
        assert!(matches!(
            AdjacencyMatrix::from_edge_list(&list),
            Err(GraphError::TooManyVertices(5_000_000_000))
        ));

        // No overflow, but far past the allocation cap
        assert!(matches!(
            AdjacencyMatrix::build(100_000, &[]),
            Err(GraphError::TooManyVertices(100_000))
        ));
    }

    #[test]
    fn test_dfs_sample_dag() {
        let matrix = AdjacencyMatrix::build(5, &sample_dag()).unwrap();
        let outcome = matrix.topological_sort_dfs();
        assert!(!outcome.has_cycle());
        assert!(is_topological_order(5, &sample_dag(), outcome.order().unwrap()));
    }

    #[test]
    fn test_kahn_sample_dag_is_ascending() {
        let matrix = AdjacencyMatrix::build(5, &sample_dag()).unwrap();
        assert_eq!(
            matrix.topological_sort_kahn(),
            SortOutcome::Ordered {
                order: vec![1, 2, 3, 4, 5]
            }
        );
    }

    #[test]
    fn test_three_cycle() {
        let matrix = AdjacencyMatrix::build(3, &[(1, 2), (2, 3), (3, 1)]).unwrap();
        assert_eq!(matrix.topological_sort_dfs(), SortOutcome::Cycle);
        assert_eq!(matrix.topological_sort_kahn(), SortOutcome::Cycle);
    }

    #[test]
    fn test_two_cycle_is_accepted_and_detected() {
        let matrix = AdjacencyMatrix::build(2, &[(1, 2), (2, 1)]).unwrap();
        assert!(matrix.topological_sort_dfs().has_cycle());
        assert!(matrix.topological_sort_kahn().has_cycle());
    }

    #[test]
    fn test_dfs_follows_ascending_rows() {
        // Two disconnected chains, DFS roots are tried in ascending order
        let edges = vec![(3, 1), (4, 2)];
        let matrix = AdjacencyMatrix::build(4, &edges).unwrap();
        assert_eq!(
            matrix.topological_sort_dfs(),
            SortOutcome::Ordered {
                order: vec![4, 3, 2, 1]
            }
        );
    }

    #[test]
    fn test_empty_graph() {
        let matrix = AdjacencyMatrix::build(0, &[]).unwrap();
        assert_eq!(
            matrix.topological_sort_dfs(),
            SortOutcome::Ordered { order: vec![] }
        );
        assert_eq!(
            matrix.topological_sort_kahn(),
            SortOutcome::Ordered { order: vec![] }
        );
    }
}
