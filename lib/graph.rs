//! Statically sized simple graphs describing graph states.
//!
//! A graph on *N* vertices describes the *N*-qubit graph state prepared by
//! applying a Hadamard to every qubit of ∣0...0⟩ and a CZ gate across every
//! edge. The canonical stabilizer generator for vertex *i* carries an X on
//! qubit *i* and a Z on every neighbor of *i*.
//!
//! See [`GraphD`][crate::graphd::GraphD] for the runtime-sized counterpart.

use crate::pauli::Pauli;

/// A simple graph on `N` vertices with adjacency stored inline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Graph<const N: usize> {
    pub(crate) adj: [[bool; N]; N],
}

impl<const N: usize> Default for Graph<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> Graph<N> {
    /// Create a new graph with no edges.
    pub fn new() -> Self {
        Self { adj: [[false; N]; N] }
    }

    /// Create the graph with an edge between every pair of distinct
    /// vertices.
    pub fn complete() -> Self {
        let mut graph = Self::new();
        for a in 0..N {
            for b in 0..N {
                graph.adj[a][b] = a != b;
            }
        }
        graph
    }

    /// Create the star graph with all edges incident on `center`.
    pub fn star(center: usize) -> Self {
        let mut graph = Self::new();
        for k in 0..N {
            graph.add_edge(center, k);
        }
        graph
    }

    /// Create the linear chain 0 – 1 – ... – (N − 1).
    pub fn linear() -> Self {
        let mut graph = Self::new();
        for k in 1..N {
            graph.add_edge(k - 1, k);
        }
        graph
    }

    /// Create the cycle graph, i.e. the linear chain with an extra edge
    /// between the first and last vertices.
    pub fn cycle() -> Self {
        let mut graph = Self::linear();
        if N > 0 { graph.add_edge(0, N - 1); }
        graph
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize { N }

    /// Return `true` if vertices `a` and `b` share an edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < N && b < N && self.adj[a][b]
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().flatten().filter(|edge| **edge).count() / 2
    }

    /// Add an edge between `a` and `b`.
    ///
    /// Does nothing if the edge exists already, or if the pair is out of
    /// range or degenerate.
    pub fn add_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= N || b >= N || a == b { return self; }
        self.adj[a][b] = true;
        self.adj[b][a] = true;
        self
    }

    /// Remove an edge between `a` and `b`.
    ///
    /// Does nothing if `a` and `b` are not connected.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= N || b >= N { return self; }
        self.adj[a][b] = false;
        self.adj[b][a] = false;
        self
    }

    /// Add an edge between `a` and `b` if it doesn't already exist, or
    /// remove it if it does.
    ///
    /// This is equivalent to applying a CZ gate to `a` and `b`.
    pub fn toggle_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= N || b >= N || a == b { return self; }
        self.adj[a][b] ^= true;
        self.adj[b][a] ^= true;
        self
    }

    /// Return an iterator over the indices of all vertices sharing an edge
    /// with `node`.
    pub fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..N).filter(move |k| node < N && self.adj[node][*k])
    }

    /// The raw adjacency matrix.
    pub fn adjacency(&self) -> &[[bool; N]; N] { &self.adj }

    /// Return the canonical generating set for the stabilizer group of the
    /// graph state: generator *i* has an X on qubit *i* and a Z on every
    /// neighbor of *i*.
    ///
    /// *Panics if `N` is greater than 64*; use
    /// [`GraphD`][crate::graphd::GraphD] beyond the packed Pauli limit.
    pub fn stabilizers(&self) -> Vec<Pauli> {
        (0..N)
            .map(|i| {
                let mut op = Pauli::single_x(N, i);
                for j in self.neighbors_of(i) {
                    op.set_z(j, 1);
                }
                op
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn families() {
        assert_eq!(Graph::<5>::new().edge_count(), 0);
        assert_eq!(Graph::<5>::complete().edge_count(), 10);
        assert_eq!(Graph::<5>::star(0).edge_count(), 4);
        assert_eq!(Graph::<5>::linear().edge_count(), 4);
        assert_eq!(Graph::<5>::cycle().edge_count(), 5);
        assert!(Graph::<5>::cycle().has_edge(0, 4));
        assert!(!Graph::<5>::linear().has_edge(0, 4));
    }

    #[test]
    fn edge_ops() {
        let mut graph: Graph<4> = Graph::new();
        graph.add_edge(0, 1).add_edge(1, 2);
        assert!(graph.has_edge(1, 0));
        assert_eq!(graph.edge_count(), 2);
        graph.toggle_edge(0, 1).toggle_edge(0, 3);
        assert!(!graph.has_edge(0, 1));
        assert!(graph.has_edge(0, 3));
        graph.remove_edge(0, 3);
        assert_eq!(graph.edge_count(), 1);
        // out-of-range and degenerate pairs are ignored
        graph.add_edge(0, 7).add_edge(2, 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn neighbors() {
        let graph = Graph::<4>::star(1);
        let neighbors: Vec<usize> = graph.neighbors_of(1).collect();
        assert_eq!(neighbors, vec![0, 2, 3]);
        let neighbors: Vec<usize> = graph.neighbors_of(0).collect();
        assert_eq!(neighbors, vec![1]);
        assert_eq!(graph.neighbors_of(9).count(), 0);
    }

    #[test]
    fn canonical_stabilizers() {
        let stabs = Graph::<3>::linear().stabilizers();
        let expected: Vec<Pauli>
            = ["XZI", "ZXZ", "IZX"].iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(stabs, expected);
    }
}
