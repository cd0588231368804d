//! Weighted lattices.
//!
//! A [`Lattice`] is an undirected graph over nodes `0..n` with complex edge
//! weights. Self-loops carry on-site terms. An edge `(a, b, w)` and its
//! reverse `(b, a, w̄)` describe the same coupling, so edges are stored with
//! `a <= b`, conjugating the weight when the endpoints are swapped.

use ndarray::Array2;
use num_complex::Complex64;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Boundary condition of a line lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Open ends.
    #[default]
    Open,
    /// The last node couples back to the first.
    Periodic,
}

/// An undirected weighted lattice.
#[derive(Debug, Clone)]
pub struct Lattice {
    graph: UnGraph<(), Complex64>,
}

impl Lattice {
    /// Build a lattice over `num_nodes` nodes from `(a, b, weight)` edges.
    ///
    /// Repeating an edge replaces its weight.
    pub fn from_weighted_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize, Complex64)>,
    ) -> ModelResult<Self> {
        let mut graph = UnGraph::with_capacity(num_nodes, 0);
        for _ in 0..num_nodes {
            graph.add_node(());
        }
        let mut lattice = Self { graph };
        for (a, b, w) in edges {
            lattice.set_edge(a, b, w)?;
        }
        Ok(lattice)
    }

    /// A chain of `num_nodes` sites with uniform coupling `weight`.
    ///
    /// A nonzero `onsite` adds a self-loop on every site. With
    /// [`Boundary::Periodic`] and more than two sites the last site couples
    /// to the first.
    pub fn line(
        num_nodes: usize,
        weight: Complex64,
        onsite: Complex64,
        boundary: Boundary,
    ) -> Self {
        let mut edges: Vec<(usize, usize, Complex64)> = (1..num_nodes)
            .map(|i| (i - 1, i, weight))
            .collect();
        if boundary == Boundary::Periodic && num_nodes > 2 {
            edges.push((num_nodes - 1, 0, weight));
        }
        if onsite != Complex64::new(0.0, 0.0) {
            edges.extend((0..num_nodes).map(|i| (i, i, onsite)));
        }

        let mut graph = UnGraph::with_capacity(num_nodes, edges.len());
        for _ in 0..num_nodes {
            graph.add_node(());
        }
        let mut lattice = Self { graph };
        for (a, b, w) in edges {
            lattice.insert_edge(a, b, w);
        }
        lattice
    }

    /// Number of sites.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, self-loops included.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add or replace the edge `(a, b)`.
    pub fn set_edge(&mut self, a: usize, b: usize, weight: Complex64) -> ModelResult<()> {
        let num_nodes = self.num_nodes();
        for node in [a, b] {
            if node >= num_nodes {
                return Err(ModelError::NodeOutOfRange { node, num_nodes });
            }
        }
        self.insert_edge(a, b, weight);
        Ok(())
    }

    fn insert_edge(&mut self, a: usize, b: usize, weight: Complex64) {
        let (lo, hi, w) = if a <= b {
            (a, b, weight)
        } else {
            (b, a, weight.conj())
        };
        match self.graph.find_edge(NodeIndex::new(lo), NodeIndex::new(hi)) {
            Some(edge) => self.graph[edge] = w,
            None => {
                self.graph.add_edge(NodeIndex::new(lo), NodeIndex::new(hi), w);
            }
        }
    }

    /// All edges as `(a, b, weight)` with `a <= b`, sorted by endpoints.
    pub fn weighted_edge_list(&self) -> Vec<(usize, usize, Complex64)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                if a <= b {
                    (a, b, *e.weight())
                } else {
                    (b, a, e.weight().conj())
                }
            })
            .collect();
        edges.sort_by_key(|&(a, b, _)| (a, b));
        edges
    }

    /// Hermitian adjacency matrix.
    ///
    /// `m[a][b] = w` and `m[b][a] = w̄` for every edge `(a, b, w)`; the
    /// diagonal holds the real part of the on-site weights.
    pub fn to_adjacency_matrix(&self) -> Array2<Complex64> {
        let n = self.num_nodes();
        let mut m = Array2::<Complex64>::zeros((n, n));
        for (a, b, w) in self.weighted_edge_list() {
            if a == b {
                m[[a, a]] = Complex64::new(w.re, 0.0);
            } else {
                m[[a, b]] = w;
                m[[b, a]] = w.conj();
            }
        }
        m
    }

    /// Same nodes, every coupling set to `interaction` and every site given
    /// a self-loop of `onsite`.
    pub fn with_uniform_weights(&self, interaction: Complex64, onsite: Complex64) -> Self {
        let mut lattice = Self {
            graph: self.graph.map(|_, _| (), |_, _| interaction),
        };
        for i in 0..self.num_nodes() {
            lattice.insert_edge(i, i, onsite);
        }
        lattice
    }
}

impl PartialEq for Lattice {
    fn eq(&self, other: &Self) -> bool {
        self.num_nodes() == other.num_nodes()
            && self.weighted_edge_list() == other.weighted_edge_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_open_line() {
        let lattice = Lattice::line(4, c(1.0), c(0.0), Boundary::Open);
        assert_eq!(lattice.num_nodes(), 4);
        assert_eq!(
            lattice.weighted_edge_list(),
            vec![(0, 1, c(1.0)), (1, 2, c(1.0)), (2, 3, c(1.0))]
        );
    }

    #[test]
    fn test_periodic_line_with_onsite() {
        let w = Complex64::new(1.0, 0.5);
        let lattice = Lattice::line(3, w, c(-2.0), Boundary::Periodic);
        let edges = lattice.weighted_edge_list();
        assert_eq!(edges.len(), 3 + 3);
        assert!(edges.contains(&(0, 2, w.conj())));
        assert!(edges.contains(&(1, 1, c(-2.0))));
    }

    #[test]
    fn test_two_site_periodic_is_open() {
        let open = Lattice::line(2, c(1.0), c(0.0), Boundary::Open);
        let periodic = Lattice::line(2, c(1.0), c(0.0), Boundary::Periodic);
        assert_eq!(open, periodic);
    }

    #[test]
    fn test_reverse_edge_is_normalized() {
        let w = Complex64::new(0.0, 1.0);
        let lattice = Lattice::from_weighted_edges(2, [(1, 0, w)]).unwrap();
        assert_eq!(lattice.weighted_edge_list(), vec![(0, 1, w.conj())]);
    }

    #[test]
    fn test_repeated_edge_replaces_weight() {
        let lattice = Lattice::from_weighted_edges(2, [(0, 1, c(1.0)), (0, 1, c(3.0))]).unwrap();
        assert_eq!(lattice.num_edges(), 1);
        assert_eq!(lattice.weighted_edge_list(), vec![(0, 1, c(3.0))]);
    }

    #[test]
    fn test_out_of_range_edge() {
        assert!(matches!(
            Lattice::from_weighted_edges(2, [(0, 2, c(1.0))]),
            Err(ModelError::NodeOutOfRange { node: 2, num_nodes: 2 })
        ));
    }

    #[test]
    fn test_adjacency_is_hermitian() {
        let w = Complex64::new(1.0, -0.25);
        let lattice =
            Lattice::from_weighted_edges(3, [(0, 1, w), (2, 2, Complex64::new(0.5, 0.1))]).unwrap();
        let m = lattice.to_adjacency_matrix();
        assert_eq!(m[[0, 1]], w);
        assert_eq!(m[[1, 0]], w.conj());
        assert_eq!(m[[2, 2]], c(0.5));
        assert_eq!(m[[0, 2]], c(0.0));
    }

    #[test]
    fn test_uniform_weights() {
        let lattice = Lattice::line(3, c(1.0), c(0.0), Boundary::Open);
        let uniform = lattice.with_uniform_weights(c(2.0), c(-1.0));
        assert_eq!(
            uniform.weighted_edge_list(),
            vec![
                (0, 0, c(-1.0)),
                (0, 1, c(2.0)),
                (1, 1, c(-1.0)),
                (1, 2, c(2.0)),
                (2, 2, c(-1.0)),
            ]
        );
    }
}
