//! Random acyclic test graphs.

use crate::models::{Edge, EdgeList, Vertex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A complete tournament and the vertex permutation it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    pub edges: EdgeList,
    /// The only topological order of `edges`
    pub permutation: Vec<Vertex>,
}

/// Generate a complete tournament on `vertices` vertices.
///
/// The vertices are shuffled, then every earlier vertex of the permutation
/// gets an edge to every later one. The result has V·(V−1)/2 distinct edges,
/// is always acyclic, and the permutation is its unique topological order.
pub fn random_tournament<R: Rng + ?Sized>(vertices: usize, rng: &mut R) -> Tournament {
    let mut permutation: Vec<Vertex> = (1..=vertices).collect();
    permutation.shuffle(rng);

    let mut edges: Vec<Edge> = Vec::with_capacity(vertices * vertices.saturating_sub(1) / 2);
    for (i, &from) in permutation.iter().enumerate() {
        for &to in &permutation[i + 1..] {
            edges.push((from, to));
        }
    }

    Tournament {
        edges: EdgeList::new(vertices, edges),
        permutation,
    }
}

/// A reproducible generator for `Some(seed)`, an entropy-seeded one otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
