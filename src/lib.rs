pub mod dijkstra;
pub mod edge_list;
pub mod error;
pub mod graph;
pub mod heap;

pub use dijkstra::ShortestPath;
pub use error::{HeapError, LoadError, PathError};
pub use graph::{AdjacencyView, DirectedGraph, UndirectedGraph, WeightedGraph};
pub use heap::{Compare, MaxFirst, MinFirst, PriorityHeap};

pub type VertexId = usize;
pub type Weight = i64;

/// Distance reported for vertices the source cannot reach.
///
/// Path costs saturate at `Weight::MAX`, so a path whose true cost is
/// `Weight::MAX` or more is indistinguishable from no path at all.
pub const INFINITY: Weight = Weight::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}
