//! Like [`graph`][crate::graph], but not statically sized.

use std::{
    fs,
    io::{ self, Write },
    path::Path,
};
use itertools::Itertools;
use nalgebra as na;
use crate::{
    graph::Graph,
    pauli::PauliD,
};

/// A simple graph on a runtime number of vertices.
///
/// Like [`Graph`], but for non-static system sizes; the adjacency matrix is
/// held in a [`na::DMatrix`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphD {
    n: usize,
    adj: na::DMatrix<bool>,
}

impl<const N: usize> From<Graph<N>> for GraphD {
    fn from(graph: Graph<N>) -> Self {
        let adj: na::DMatrix<bool>
            = na::DMatrix::from_fn(N, N, |i, j| graph.adjacency()[i][j]);
        Self { n: N, adj }
    }
}

impl GraphD {
    /// Create a new graph on `n` vertices with no edges.
    pub fn new(n: usize) -> Self {
        Self { n, adj: na::DMatrix::from_element(n, n, false) }
    }

    /// Create the graph with an edge between every pair of distinct
    /// vertices.
    pub fn complete(n: usize) -> Self {
        Self { n, adj: na::DMatrix::from_fn(n, n, |i, j| i != j) }
    }

    /// Create the star graph with all edges incident on `center`.
    pub fn star(n: usize, center: usize) -> Self {
        let mut graph = Self::new(n);
        for k in 0..n {
            graph.add_edge(center, k);
        }
        graph
    }

    /// Create the linear chain 0 – 1 – ... – (n − 1).
    pub fn linear(n: usize) -> Self {
        let mut graph = Self::new(n);
        for k in 1..n {
            graph.add_edge(k - 1, k);
        }
        graph
    }

    /// Create the cycle graph on `n` vertices.
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::linear(n);
        if n > 0 { graph.add_edge(0, n - 1); }
        graph
    }

    /// Create the pusteblume ("dandelion") graph: vertices 1, 2, 3 hang off
    /// vertex 0, and all remaining vertices hang off vertex 3.
    ///
    /// *Panics if `n` is less than 5.*
    pub fn pusteblume(n: usize) -> Self {
        assert!(n >= 5, "the pusteblume graph needs at least 5 vertices");
        let mut graph = Self::new(n);
        for k in 1..4 {
            graph.add_edge(0, k);
        }
        for k in 4..n {
            graph.add_edge(3, k);
        }
        graph
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize { self.n }

    /// Return `true` if vertices `a` and `b` share an edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.n && b < self.n && self.adj[(a, b)]
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().filter(|edge| **edge).count() / 2
    }

    /// Add an edge between `a` and `b`.
    ///
    /// Does nothing if the edge exists already, or if the pair is out of
    /// range or degenerate.
    pub fn add_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= self.n || b >= self.n || a == b { return self; }
        self.adj[(a, b)] = true;
        self.adj[(b, a)] = true;
        self
    }

    /// Remove an edge between `a` and `b`.
    ///
    /// Does nothing if `a` and `b` are not connected.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= self.n || b >= self.n { return self; }
        self.adj[(a, b)] = false;
        self.adj[(b, a)] = false;
        self
    }

    /// Add an edge between `a` and `b` if it doesn't already exist, or
    /// remove it if it does.
    ///
    /// This is equivalent to applying a CZ gate to `a` and `b`.
    pub fn toggle_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= self.n || b >= self.n || a == b { return self; }
        self.adj[(a, b)] ^= true;
        self.adj[(b, a)] ^= true;
        self
    }

    /// Return an iterator over the indices of all vertices sharing an edge
    /// with `node`.
    pub fn neighbors_of(&self, node: usize)
        -> impl Iterator<Item = usize> + '_
    {
        (0..self.n).filter(move |k| node < self.n && self.adj[(node, *k)])
    }

    /// Perform a local complementation on `node`.
    ///
    /// That is, toggle all edges in the subgraph induced by the
    /// neighborhood of `node`.
    pub fn local_complement(&mut self, node: usize) -> &mut Self {
        if node >= self.n { return self; }
        let neighbors: Vec<usize> = self.neighbors_of(node).collect();
        neighbors.iter().copied()
            .tuple_combinations::<(usize, usize)>()
            .for_each(|(a, b)| { self.toggle_edge(a, b); });
        self
    }

    /// The raw adjacency matrix.
    pub fn adjacency(&self) -> &na::DMatrix<bool> { &self.adj }

    /// Return the canonical generating set for the stabilizer group of the
    /// graph state: generator *i* has an X on qubit *i* and a Z on every
    /// neighbor of *i*.
    pub fn stabilizers(&self) -> Vec<PauliD> {
        (0..self.n)
            .map(|i| {
                let mut op = PauliD::single_x(self.n, i);
                for j in self.neighbors_of(i) {
                    op.set_z(j, 1);
                }
                op
            })
            .collect()
    }

    /// Return an object containing an encoding of `self` in the [dot
    /// language][dot-lang].
    ///
    /// Rendering this object using the default formatter will result in a
    /// full dot string representation of the graph.
    ///
    /// [dot-lang]: https://en.wikipedia.org/wiki/DOT_(graph_description_language)
    pub fn to_graphviz(&self, name: &str) -> tabbycat::Graph {
        use tabbycat::*;
        use tabbycat::attributes::*;

        let mut statements = StmtList::new();
        for k in 0..self.n {
            let attrs
                = AttrList::new()
                .add_pair(label(k.to_string()))
                .add_pair(shape(Shape::Circle));
            statements = statements.add_node(k.into(), None, Some(attrs));
        }
        for i in 0..self.n {
            for j in 0..i {
                if self.adj[(i, j)] {
                    statements
                        = statements.add_edge(
                            Edge::head_node(i.into(), None)
                                .line_to_node(j.into(), None)
                        );
                }
            }
        }
        GraphBuilder::default()
            .graph_type(GraphType::Graph)
            .strict(false)
            .id(Identity::quoted(name))
            .stmts(statements)
            .build()
            .expect("error building graphviz")
    }

    /// Like [`to_graphviz`][Self::to_graphviz], but render directly to a
    /// string and write it to `path`.
    pub fn save_graphviz<P>(&self, name: &str, path: P)
        -> Result<&Self, io::Error>
    where P: AsRef<Path>
    {
        let graphviz = self.to_graphviz(name);
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?
            .write_all(format!("{}", graphviz).as_bytes())?;
        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn families() {
        assert_eq!(GraphD::new(5).edge_count(), 0);
        assert_eq!(GraphD::complete(5).edge_count(), 10);
        assert_eq!(GraphD::star(5, 0).edge_count(), 4);
        assert_eq!(GraphD::linear(5).edge_count(), 4);
        assert_eq!(GraphD::cycle(5).edge_count(), 5);
        assert_eq!(GraphD::pusteblume(6).edge_count(), 5);
        assert!(GraphD::pusteblume(6).has_edge(3, 5));
    }

    #[test]
    fn from_static() {
        let graph: GraphD = Graph::<4>::cycle().into();
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.has_edge(0, 3));
    }

    #[test]
    fn local_complementation() {
        // complementing the center of a star yields the complete graph
        let mut graph = GraphD::star(4, 0);
        graph.local_complement(0);
        assert_eq!(graph, GraphD::complete(4));
        // and complementing a leaf of the complete graph undoes it up to
        // relabeling of the center
        graph.local_complement(1);
        assert_eq!(graph, GraphD::star(4, 1));
    }

    #[test]
    fn canonical_stabilizers() {
        let stabs = GraphD::star(3, 0).stabilizers();
        let expected: Vec<PauliD>
            = ["XZZ", "ZXI", "ZIX"].iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(stabs, expected);
    }

    #[test]
    fn graphviz_output() {
        let dot = GraphD::linear(3).to_graphviz("chain").to_string();
        assert!(dot.contains("\"chain\""));
        assert!(dot.contains("--"));
    }
}
