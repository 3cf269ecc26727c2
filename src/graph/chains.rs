//! The packed "matrix of chains" representation.
//!
//! A graph on V vertices is stored as one row-major V×(V+3) array of `i32`.
//! Row `u` embeds three circular singly-linked lists in its first V columns,
//! one per relation to `u`:
//!
//! | list          | head column | cell value for vertex `v` |
//! |---------------|-------------|---------------------------|
//! | successors    | `V`         | `v`                       |
//! | predecessors  | `V + 1`     | `v + V`                   |
//! | non-incident  | `V + 2`     | `-v`                      |
//!
//! The cell in column `v - 1` of a list member holds the encoded id of the
//! next member, and the last member points back at the first. An empty list
//! has a zero head and the diagonal cell is always zero. Every other column
//! of a row belongs to exactly one list, which is why a pair of vertices with
//! edges in both directions cannot be stored.

use super::{SortableGraph, depth_first_postorder, kahn_order, matrix_cells, validate_edges};
use crate::error::{GraphError, Result};
use crate::models::{Edge, Representation, SortOutcome, Vertex};
use std::fmt;
use tracing::debug;

/// Raw value stored in a matrix cell
pub type Cell = i32;

/// A decoded matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Empty,
    Successor(Vertex),
    Predecessor(Vertex),
    NonIncident(Vertex),
}

impl Link {
    /// Decode a raw cell of a graph with `vertices` vertices.
    /// Values outside every list's range decode as `Empty`.
    pub fn decode(raw: Cell, vertices: usize) -> Link {
        let n = vertices as i64;
        let raw = i64::from(raw);
        if raw >= 1 && raw <= n {
            Link::Successor(raw as Vertex)
        } else if raw > n && raw <= 2 * n {
            Link::Predecessor((raw - n) as Vertex)
        } else if raw < 0 && raw >= -n {
            Link::NonIncident((-raw) as Vertex)
        } else {
            Link::Empty
        }
    }

    pub fn encode(self, vertices: usize) -> Cell {
        match self {
            Link::Empty => 0,
            Link::Successor(v) => v as Cell,
            Link::Predecessor(v) => (v + vertices) as Cell,
            Link::NonIncident(v) => -(v as Cell),
        }
    }

    pub fn vertex(self) -> Option<Vertex> {
        match self {
            Link::Empty => None,
            Link::Successor(v) | Link::Predecessor(v) | Link::NonIncident(v) => Some(v),
        }
    }
}

/// Which of the three per-row lists to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Successors,
    Predecessors,
    NonIncident,
}

impl ChainKind {
    pub const ALL: [ChainKind; 3] = [
        ChainKind::Successors,
        ChainKind::Predecessors,
        ChainKind::NonIncident,
    ];

    /// 0-based column holding this list's head pointer
    pub fn head_column(self, vertices: usize) -> usize {
        match self {
            ChainKind::Successors => vertices,
            ChainKind::Predecessors => vertices + 1,
            ChainKind::NonIncident => vertices + 2,
        }
    }

    fn link(self, vertex: Vertex) -> Link {
        match self {
            ChainKind::Successors => Link::Successor(vertex),
            ChainKind::Predecessors => Link::Predecessor(vertex),
            ChainKind::NonIncident => Link::NonIncident(vertex),
        }
    }

    /// The vertex carried by `link` if it belongs to this list
    fn member(self, link: Link) -> Option<Vertex> {
        match (self, link) {
            (ChainKind::Successors, Link::Successor(v))
            | (ChainKind::Predecessors, Link::Predecessor(v))
            | (ChainKind::NonIncident, Link::NonIncident(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Successors => "successors",
            ChainKind::Predecessors => "predecessors",
            ChainKind::NonIncident => "non-incident",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Walks one circular list of a row.
///
/// Starts at the decoded head and yields the current member before reading
/// its next link. The walk ends once the next link points back at the head or
/// at the current member, so a k-member list yields exactly k vertices.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    row: &'a [Cell],
    vertices: usize,
    kind: ChainKind,
    head: Option<Vertex>,
    current: Option<Vertex>,
}

impl<'a> Chain<'a> {
    fn new(row: &'a [Cell], vertices: usize, kind: ChainKind) -> Self {
        let raw_head = row[kind.head_column(vertices)];
        let head = match raw_head {
            0 => None,
            raw => kind.member(Link::decode(raw, vertices)),
        };
        Chain {
            row,
            vertices,
            kind,
            head,
            current: head,
        }
    }
}

impl Iterator for Chain<'_> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        let current = self.current?;
        let next = self
            .kind
            .member(Link::decode(self.row[current - 1], self.vertices));

        self.current = match next {
            Some(next) if next != current && Some(next) != self.head => Some(next),
            _ => None,
        };
        Some(current)
    }
}

/// V×(V+3) matrix of embedded successor, predecessor and non-incident chains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMatrix {
    vertices: usize,
    cells: Vec<Cell>,
}

impl ChainMatrix {
    fn width(&self) -> usize {
        self.vertices + 3
    }

    fn row(&self, index: usize) -> &[Cell] {
        let width = self.width();
        &self.cells[index * width..(index + 1) * width]
    }

    /// Raw value at 1-based row `vertex` and 1-based `column`.
    /// Values keep their sign/offset encoding; decode them with [`Link::decode`].
    pub fn get(&self, vertex: Vertex, column: usize) -> Option<Cell> {
        if vertex == 0 || vertex > self.vertices || column == 0 || column > self.width() {
            return None;
        }
        Some(self.row(vertex - 1)[column - 1])
    }

    /// Decoded value at 1-based row `vertex` and 1-based `column`
    pub fn link(&self, vertex: Vertex, column: usize) -> Option<Link> {
        self.get(vertex, column)
            .map(|raw| Link::decode(raw, self.vertices))
    }

    /// Walk one list of `vertex` (1-based). An out-of-range vertex yields nothing.
    pub fn chain(&self, vertex: Vertex, kind: ChainKind) -> Chain<'_> {
        if vertex == 0 || vertex > self.vertices {
            return Chain {
                row: &[],
                vertices: self.vertices,
                kind,
                head: None,
                current: None,
            };
        }
        Chain::new(self.row(vertex - 1), self.vertices, kind)
    }

    pub fn successors(&self, vertex: Vertex) -> Chain<'_> {
        self.chain(vertex, ChainKind::Successors)
    }

    pub fn predecessors(&self, vertex: Vertex) -> Chain<'_> {
        self.chain(vertex, ChainKind::Predecessors)
    }

    pub fn non_incident(&self, vertex: Vertex) -> Chain<'_> {
        self.chain(vertex, ChainKind::NonIncident)
    }

    /// Raw rows, including the three head columns
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width())
    }

    fn chain_at(&self, index: usize, kind: ChainKind) -> impl Iterator<Item = usize> + '_ {
        Chain::new(self.row(index), self.vertices, kind).map(|vertex| vertex - 1)
    }

    fn write_chain(&mut self, index: usize, kind: ChainKind, members: &[Vertex]) {
        let vertices = self.vertices;
        let base = index * self.width();
        let head = base + kind.head_column(vertices);

        let Some(&first) = members.first() else {
            self.cells[head] = 0;
            return;
        };

        self.cells[head] = kind.link(first).encode(vertices);
        for (position, &member) in members.iter().enumerate() {
            let next = members.get(position + 1).copied().unwrap_or(first);
            self.cells[base + member - 1] = kind.link(next).encode(vertices);
        }
    }
}

impl SortableGraph for ChainMatrix {
    const REPRESENTATION: Representation = Representation::Packed;

    fn build(vertices: usize, edges: &[Edge]) -> Result<Self> {
        if vertices > (Cell::MAX / 2) as usize {
            return Err(GraphError::TooManyVertices(vertices));
        }
        let cells = matrix_cells(vertices, vertices + 3)?;
        validate_edges(vertices, edges)?;

        let mut successors: Vec<Vec<Vertex>> = vec![Vec::new(); vertices];
        let mut predecessors: Vec<Vec<Vertex>> = vec![Vec::new(); vertices];
        for &(from, to) in edges {
            successors[from - 1].push(to);
            predecessors[to - 1].push(from);
        }

        let mut matrix = ChainMatrix {
            vertices,
            cells: vec![0; cells],
        };
        let mut incident = vec![false; vertices];

        for index in 0..vertices {
            let vertex = index + 1;
            successors[index].sort_unstable();
            predecessors[index].sort_unstable();

            incident.fill(false);
            incident[index] = true;
            for &successor in &successors[index] {
                incident[successor - 1] = true;
            }
            for &predecessor in &predecessors[index] {
                if incident[predecessor - 1] {
                    return Err(GraphError::BidirectionalEdge {
                        from: vertex,
                        to: predecessor,
                    });
                }
                incident[predecessor - 1] = true;
            }
            let non_incident: Vec<Vertex> = (1..=vertices).filter(|&v| !incident[v - 1]).collect();

            matrix.write_chain(index, ChainKind::Successors, &successors[index]);
            matrix.write_chain(index, ChainKind::Predecessors, &predecessors[index]);
            matrix.write_chain(index, ChainKind::NonIncident, &non_incident);
        }

        debug!(vertices, edges = edges.len(), "built chain matrix");
        Ok(matrix)
    }

    fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Walks predecessor chains, so every vertex is emitted after all of its
    /// predecessors and the postorder is already a topological order.
    fn topological_sort_dfs(&self) -> SortOutcome {
        let order = depth_first_postorder(self.vertices, |index| {
            self.chain_at(index, ChainKind::Predecessors)
        })
        .map(|postorder| postorder.into_iter().map(|index| index + 1).collect());
        SortOutcome::from(order)
    }

    fn topological_sort_kahn(&self) -> SortOutcome {
        let in_degree = (0..self.vertices)
            .map(|index| self.chain_at(index, ChainKind::Predecessors).count())
            .collect();
        let order = kahn_order(in_degree, |index| {
            self.chain_at(index, ChainKind::Successors)
        })
        .map(|order| order.into_iter().map(|index| index + 1).collect());
        SortOutcome::from(order)
    }
}

impl fmt::Display for ChainMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line = row
                .iter()
                .map(|cell| format!("{cell:>4}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::is_topological_order;
    use std::collections::BTreeSet;

    fn sample_dag() -> Vec<Edge> {
        vec![(1, 2), (2, 3), (2, 4), (3, 5), (4, 5)]
    }

    #[test]
    fn test_link_decode_ranges() {
        assert_eq!(Link::decode(0, 5), Link::Empty);
        assert_eq!(Link::decode(3, 5), Link::Successor(3));
        assert_eq!(Link::decode(5, 5), Link::Successor(5));
        assert_eq!(Link::decode(6, 5), Link::Predecessor(1));
        assert_eq!(Link::decode(10, 5), Link::Predecessor(5));
        assert_eq!(Link::decode(-2, 5), Link::NonIncident(2));
        assert_eq!(Link::decode(11, 5), Link::Empty);
        assert_eq!(Link::decode(-6, 5), Link::Empty);
    }

    #[test]
    fn test_link_encode_matches_decode() {
        for link in [
            Link::Successor(4),
            Link::Predecessor(4),
            Link::NonIncident(4),
            Link::Empty,
        ] {
            assert_eq!(Link::decode(link.encode(7), 7), link);
        }
    }

    #[test]
    fn test_packed_layout() {
        // 1 -> 2, 1 -> 3
        let matrix = ChainMatrix::build(3, &[(1, 2), (1, 3)]).unwrap();

        // Row 1: successors 2 -> 3 -> back to 2
        assert_eq!(matrix.get(1, 4), Some(2));
        assert_eq!(matrix.get(1, 2), Some(3));
        assert_eq!(matrix.get(1, 3), Some(2));
        assert_eq!(matrix.get(1, 5), Some(0));
        assert_eq!(matrix.get(1, 6), Some(0));
        assert_eq!(matrix.get(1, 1), Some(0));

        // Row 2: predecessor 1 (stored as 1 + 3), non-incident 3 (stored as -3)
        assert_eq!(matrix.get(2, 4), Some(0));
        assert_eq!(matrix.get(2, 5), Some(4));
        assert_eq!(matrix.get(2, 1), Some(4));
        assert_eq!(matrix.get(2, 6), Some(-3));
        assert_eq!(matrix.get(2, 3), Some(-3));

        assert_eq!(matrix.link(3, 6), Some(Link::NonIncident(2)));
        assert_eq!(matrix.get(4, 1), None);
        assert_eq!(matrix.get(1, 7), None);
        assert_eq!(matrix.get(0, 1), None);
    }

    #[test]
    fn test_single_successor_chain_yields_once() {
        let matrix = ChainMatrix::build(3, &[(1, 3)]).unwrap();
        assert_eq!(matrix.successors(1).collect::<Vec<_>>(), vec![3]);
        assert_eq!(matrix.predecessors(3).collect::<Vec<_>>(), vec![1]);
        assert_eq!(matrix.non_incident(2).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(matrix.successors(2).count(), 0);
    }

    #[test]
    fn test_chains_are_ascending_regardless_of_edge_order() {
        let matrix = ChainMatrix::build(5, &[(1, 5), (1, 2), (1, 4)]).unwrap();
        assert_eq!(matrix.successors(1).collect::<Vec<_>>(), vec![2, 4, 5]);
        assert_eq!(matrix.non_incident(1).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_chains_reproduce_edges_and_complement() {
        let edges = vec![(1, 2), (3, 1), (2, 4), (5, 4), (3, 5), (6, 2)];
        let vertices = 6;
        let matrix = ChainMatrix::build(vertices, &edges).unwrap();
        let edge_set: BTreeSet<Edge> = edges.iter().copied().collect();

        let mut from_successors = BTreeSet::new();
        let mut from_predecessors = BTreeSet::new();
        for u in 1..=vertices {
            from_successors.extend(matrix.successors(u).map(|v| (u, v)));
            from_predecessors.extend(matrix.predecessors(u).map(|v| (v, u)));

            let expected: BTreeSet<Vertex> = (1..=vertices)
                .filter(|&v| v != u && !edge_set.contains(&(u, v)) && !edge_set.contains(&(v, u)))
                .collect();
            let non_incident: BTreeSet<Vertex> = matrix.non_incident(u).collect();
            assert_eq!(non_incident, expected, "non-incident chain of {u}");
        }

        assert_eq!(from_successors, edge_set);
        assert_eq!(from_predecessors, edge_set);
    }

    #[test]
    fn test_rejects_bidirectional_pair() {
        let err = ChainMatrix::build(3, &[(2, 3), (1, 2), (3, 2)]).unwrap_err();
        assert!(matches!(
            err,
            GraphError::BidirectionalEdge { from: 2, to: 3 }
        ));
    }

    #[test]
    fn test_rejects_invalid_edges() {
        assert!(matches!(
            ChainMatrix::build(2, &[(1, 3)]),
            Err(GraphError::VertexOutOfRange { vertex: 3, .. })
        ));
        assert!(matches!(
            ChainMatrix::build(2, &[(1, 1)]),
            Err(GraphError::SelfLoop(1))
        ));
    }

    #[test]
    fn test_rejects_huge_vertex_count() {
        // Past what a cell can encode
        assert!(matches!(
            ChainMatrix::build(usize::MAX, &[]),
            Err(GraphError::TooManyVertices(usize::MAX))
        ));
        // Encodable, but the matrix would not fit the allocation cap
        assert!(matches!(
            ChainMatrix::build(1_000_000_000, &[(1, 2)]),
            Err(GraphError::TooManyVertices(1_000_000_000))
        ));
        assert!(matches!(
            ChainMatrix::build(40_000, &[]),
            Err(GraphError::TooManyVertices(40_000))
        ));
    }

    #[test]
    fn test_dfs_sample_dag() {
        let matrix = ChainMatrix::build(5, &sample_dag()).unwrap();
        let outcome = matrix.topological_sort_dfs();
        assert_eq!(
            outcome,
            SortOutcome::Ordered {
                order: vec![1, 2, 3, 4, 5]
            }
        );
        assert!(is_topological_order(5, &sample_dag(), outcome.order().unwrap()));
    }

    #[test]
    fn test_dfs_walks_predecessors() {
        // Roots are tried in ascending order, each emitted after its predecessors
        let matrix = ChainMatrix::build(4, &[(3, 1), (4, 2)]).unwrap();
        assert_eq!(
            matrix.topological_sort_dfs(),
            SortOutcome::Ordered {
                order: vec![3, 1, 4, 2]
            }
        );
    }

    #[test]
    fn test_kahn_sample_dag_is_ascending() {
        let matrix = ChainMatrix::build(5, &sample_dag()).unwrap();
        assert_eq!(
            matrix.topological_sort_kahn(),
            SortOutcome::Ordered {
                order: vec![1, 2, 3, 4, 5]
            }
        );
    }

    #[test]
    fn test_three_cycle() {
        let matrix = ChainMatrix::build(3, &[(1, 2), (2, 3), (3, 1)]).unwrap();
        assert_eq!(matrix.topological_sort_dfs(), SortOutcome::Cycle);
        assert_eq!(matrix.topological_sort_kahn(), SortOutcome::Cycle);
    }

    #[test]
    fn test_display_prints_rows() {
        let matrix = ChainMatrix::build(2, &[(1, 2)]).unwrap();
        let printed = matrix.to_string();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["0", "2", "2", "0", "0"]
        );
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            vec!["3", "0", "0", "3", "0"]
        );
    }
}
