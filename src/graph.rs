//! Weighted graph storage and the adjacency view consumed by the solver.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{Edge, VertexId, Weight};

/// Vertex -> set of unique (neighbor, weight) pairs.
pub type AdjacencyView = BTreeMap<VertexId, BTreeSet<(VertexId, Weight)>>;

/// Common contract for directed and undirected graphs.
///
/// Object safe, so callers can hold a `&dyn WeightedGraph` without caring
/// which variant they were given.
pub trait WeightedGraph {
    /// Inserts `vertex` if it is not already present.
    fn add_vertex(&mut self, vertex: VertexId);

    /// Drops `vertex` and every edge touching it. No-op when absent.
    fn remove_vertex(&mut self, vertex: VertexId);

    /// Connects `source` to `dest`, creating either endpoint as needed.
    fn add_edge(&mut self, source: VertexId, dest: VertexId, weight: Weight);

    /// Drops every edge from `source` to `dest`, whatever its weight.
    fn remove_edge(&mut self, source: VertexId, dest: VertexId);

    fn edge_count(&self) -> usize;

    fn adjacency(&self) -> &AdjacencyView;

    /// Writes a Graphviz description of the graph.
    fn write_dot(&self, out: &mut dyn Write) -> io::Result<()>;

    fn edges(&self) -> Vec<Edge> {
        self.adjacency()
            .iter()
            .flat_map(|(&u, set)| set.iter().map(move |&(v, w)| Edge::new(u, v, w)))
            .collect()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency().len()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency().contains_key(&vertex)
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.adjacency().keys().copied().collect()
    }

    /// Owned snapshot; later mutations of the graph do not show up in it.
    fn adjacency_view(&self) -> AdjacencyView {
        self.adjacency().clone()
    }

    fn write_dot_file(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_dot(&mut out)?;
        out.flush()
    }
}

fn insert_vertex(adj: &mut AdjacencyView, vertex: VertexId) {
    adj.entry(vertex).or_default();
}

fn detach_vertex(adj: &mut AdjacencyView, vertex: VertexId) {
    if adj.remove(&vertex).is_none() {
        return;
    }
    for neighbors in adj.values_mut() {
        neighbors.retain(|&(v, _)| v != vertex);
    }
}

fn detach_arcs(adj: &mut AdjacencyView, source: VertexId, dest: VertexId) {
    if let Some(neighbors) = adj.get_mut(&source) {
        neighbors.retain(|&(v, _)| v != dest);
    }
}

fn fmt_adjacency(adj: &AdjacencyView, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (u, neighbors) in adj {
        write!(f, "{} :: ", u)?;
        for (v, w) in neighbors {
            write!(f, " => {} (weight = {})", v, w)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn isolated(n: usize) -> AdjacencyView {
    (0..n).map(|v| (v, BTreeSet::new())).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectedGraph {
    adj: AdjacencyView,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with isolated vertices `0..n`.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            adj: isolated(n),
        }
    }
}

impl WeightedGraph for DirectedGraph {
    fn add_vertex(&mut self, vertex: VertexId) {
        insert_vertex(&mut self.adj, vertex);
    }

    fn remove_vertex(&mut self, vertex: VertexId) {
        detach_vertex(&mut self.adj, vertex);
    }

    fn add_edge(&mut self, source: VertexId, dest: VertexId, weight: Weight) {
        insert_vertex(&mut self.adj, dest);
        self.adj.entry(source).or_default().insert((dest, weight));
    }

    fn remove_edge(&mut self, source: VertexId, dest: VertexId) {
        detach_arcs(&mut self.adj, source, dest);
    }

    fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum()
    }

    fn adjacency(&self) -> &AdjacencyView {
        &self.adj
    }

    fn write_dot(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        for (u, neighbors) in &self.adj {
            for (v, w) in neighbors {
                writeln!(out, "  {} -> {} [label={}];", u, v, w)?;
            }
        }
        writeln!(out, "}}")
    }
}

impl fmt::Display for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_adjacency(&self.adj, f)
    }
}

impl FromIterator<Edge> for DirectedGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut graph = Self::new();
        for edge in iter {
            graph.add_edge(edge.source, edge.target, edge.weight);
        }
        graph
    }
}

/// Every edge is stored under both endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndirectedGraph {
    adj: AdjacencyView,
}

impl UndirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(n: usize) -> Self {
        Self {
            adj: isolated(n),
        }
    }
}

impl WeightedGraph for UndirectedGraph {
    fn add_vertex(&mut self, vertex: VertexId) {
        insert_vertex(&mut self.adj, vertex);
    }

    fn remove_vertex(&mut self, vertex: VertexId) {
        detach_vertex(&mut self.adj, vertex);
    }

    fn add_edge(&mut self, source: VertexId, dest: VertexId, weight: Weight) {
        self.adj.entry(source).or_default().insert((dest, weight));
        self.adj.entry(dest).or_default().insert((source, weight));
    }

    fn remove_edge(&mut self, source: VertexId, dest: VertexId) {
        detach_arcs(&mut self.adj, source, dest);
        detach_arcs(&mut self.adj, dest, source);
    }

    fn edge_count(&self) -> usize {
        // Self-loops are stored once, every other edge twice.
        let (stored, loops) = self.adj.iter().fold((0, 0), |(stored, loops), (&u, set)| {
            let own = set.iter().filter(|&&(v, _)| v == u).count();
            (stored + set.len(), loops + own)
        });
        (stored + loops) / 2
    }

    fn adjacency(&self) -> &AdjacencyView {
        &self.adj
    }

    fn edges(&self) -> Vec<Edge> {
        self.adj
            .iter()
            .flat_map(|(&u, set)| {
                set.iter()
                    .filter(move |&&(v, _)| u <= v)
                    .map(move |&(v, w)| Edge::new(u, v, w))
            })
            .collect()
    }

    fn write_dot(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "strict graph {{")?;
        for edge in self.edges() {
            writeln!(out, "  {} -- {} [label={}];", edge.source, edge.target, edge.weight)?;
        }
        writeln!(out, "}}")
    }
}

impl fmt::Display for UndirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_adjacency(&self.adj, f)
    }
}

impl FromIterator<Edge> for UndirectedGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut graph = Self::new();
        for edge in iter {
            graph.add_edge(edge.source, edge.target, edge.weight);
        }
        graph
    }
}
