use tracing::{debug, trace};

use crate::error::PathError;
use crate::graph::{AdjacencyView, WeightedGraph};
use crate::heap::PriorityHeap;
use crate::{VertexId, Weight, INFINITY};

/// Single-source, distance-only Dijkstra over a snapshot of a graph.
///
/// The snapshot is taken at construction; edits made to the graph afterwards
/// are not observed. Weights are assumed non-negative.
#[derive(Clone, Debug)]
pub struct ShortestPath {
    adj: AdjacencyView,
    // Length of every distance vector: one past the largest id in the view.
    slots: usize,
}

impl ShortestPath {
    pub fn new<G: WeightedGraph + ?Sized>(graph: &G) -> Self {
        Self::from_view(graph.adjacency_view())
    }

    pub fn from_view(adj: AdjacencyView) -> Self {
        let slots = adj
            .iter()
            .flat_map(|(&u, neighbors)| std::iter::once(u).chain(neighbors.iter().map(|&(v, _)| v)))
            .max()
            .map_or(0, |id| id + 1);
        Self { adj, slots }
    }

    pub fn adjacency(&self) -> &AdjacencyView {
        &self.adj
    }

    /// Distances from `source`, indexed by vertex id. `INFINITY` when unreachable.
    ///
    /// With dense ids `0..n` the result has exactly `n` entries.
    pub fn compute(&self, source: VertexId) -> Result<Vec<Weight>, PathError> {
        if !self.adj.contains_key(&source) {
            return Err(PathError::InvalidVertex(source));
        }

        let mut dist = vec![INFINITY; self.slots];
        let mut heap = PriorityHeap::new();

        dist[source] = 0;
        heap.insert((0, source));

        let mut pops = 0_usize;
        let mut stale = 0_usize;
        // No decrease-key: a vertex may sit in the heap several times, and
        // only the entry matching its current best distance is expanded.
        while let Ok((cost, node_id)) = heap.pop() {
            pops += 1;
            if cost > dist[node_id] {
                stale += 1;
                continue;
            }
            let Some(neighbors) = self.adj.get(&node_id) else {
                continue;
            };
            for &(next, w) in neighbors {
                let next_cost = cost.saturating_add(w);
                if next_cost < dist[next] {
                    trace!(from = node_id, to = next, old = dist[next], new = next_cost, "relaxed");
                    dist[next] = next_cost;
                    heap.insert((next_cost, next));
                }
            }
        }

        debug!(
            source,
            pops,
            stale,
            reached = dist.iter().filter(|&&d| d != INFINITY).count(),
            "dijkstra finished"
        );
        Ok(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};
    use crate::Edge;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    const SAMPLE_EDGES: [(VertexId, VertexId, Weight); 10] = [
        (0, 1, 6),
        (0, 2, 2),
        (0, 3, 2),
        (1, 4, 3),
        (1, 5, 4),
        (2, 6, 3),
        (3, 7, 1),
        (4, 7, 3),
        (5, 7, 5),
        (6, 7, 4),
    ];

    fn build<G: WeightedGraph + Default>(edges: &[(VertexId, VertexId, Weight)]) -> G {
        let mut g = G::default();
        for &(u, v, w) in edges {
            g.add_edge(u, v, w);
        }
        g
    }

    // Plain std heap version, used as an oracle.
    fn reference(adj: &AdjacencyView, slots: usize, start: usize) -> Vec<Weight> {
        let mut dist = vec![INFINITY; slots];
        let mut heap = BinaryHeap::new();
        dist[start] = 0;
        heap.push(Reverse((0, start)));
        while let Some(Reverse((cost, node_id))) = heap.pop() {
            if cost > dist[node_id] {
                continue;
            }
            for &(next, w) in &adj[&node_id] {
                let next_cost = cost + w;
                if next_cost < dist[next] {
                    dist[next] = next_cost;
                    heap.push(Reverse((next_cost, next)));
                }
            }
        }
        dist
    }

    #[test]
    fn undirected_sample_graph() {
        let g: UndirectedGraph = build(&SAMPLE_EDGES);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        // 4 and 5 are cheaper backwards through 7: 0-3-7-4 and 0-3-7-5.
        assert_eq!(dist, vec![0, 6, 2, 2, 6, 8, 5, 3]);
    }

    #[test]
    fn directed_sample_graph() {
        let g: DirectedGraph = build(&SAMPLE_EDGES);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist, vec![0, 6, 2, 2, 9, 10, 5, 3]);

        // Edges only point away from 0, so 7 reaches nothing else.
        let from_seven = ShortestPath::new(&g).compute(7).unwrap();
        let mut expected = vec![INFINITY; 8];
        expected[7] = 0;
        assert_eq!(from_seven, expected);
    }

    #[test]
    fn second_undirected_graph() {
        let g: UndirectedGraph = build(&[
            (0, 1, 4),
            (0, 7, 8),
            (1, 2, 8),
            (1, 7, 11),
            (7, 8, 7),
            (7, 6, 1),
            (2, 8, 2),
            (2, 5, 4),
            (2, 3, 7),
            (8, 6, 6),
            (6, 5, 2),
            (3, 5, 14),
            (3, 4, 9),
            (5, 4, 10),
        ]);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist, vec![0, 4, 12, 19, 21, 11, 9, 8, 14]);
    }

    #[test]
    fn disconnected_vertex_stays_infinite() {
        let mut g: UndirectedGraph = build(&SAMPLE_EDGES);
        g.add_vertex(8);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist.len(), 9);
        assert_eq!(dist[8], INFINITY);
        assert_eq!(dist[7], 3);
    }

    #[test]
    fn absent_source_is_rejected() {
        let g: DirectedGraph = build(&SAMPLE_EDGES);
        let solver = ShortestPath::new(&g);
        assert_eq!(solver.compute(8), Err(PathError::InvalidVertex(8)));

        let empty = ShortestPath::from_view(AdjacencyView::new());
        assert_eq!(empty.compute(0), Err(PathError::InvalidVertex(0)));
    }

    #[test]
    fn repeated_compute_is_identical() {
        let g: UndirectedGraph = build(&SAMPLE_EDGES);
        let solver = ShortestPath::new(&g);
        let first = solver.compute(3).unwrap();
        let second = solver.compute(3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn solver_keeps_its_snapshot() {
        let mut g: DirectedGraph = build(&SAMPLE_EDGES);
        let solver = ShortestPath::new(&g);
        g.add_edge(0, 7, 1);
        g.remove_vertex(3);
        assert_eq!(solver.compute(0).unwrap()[7], 3);
        assert_eq!(ShortestPath::new(&g).compute(0).unwrap()[7], 1);
    }

    #[test]
    fn works_through_trait_objects() {
        let graphs: Vec<Box<dyn WeightedGraph>> = vec![
            Box::new(build::<DirectedGraph>(&SAMPLE_EDGES)),
            Box::new(build::<UndirectedGraph>(&SAMPLE_EDGES)),
        ];
        for g in &graphs {
            let dist = ShortestPath::new(&**g).compute(0).unwrap();
            assert_eq!(dist[7], 3);
        }
    }

    #[test]
    fn max_weight_path_reads_as_unreachable() {
        let g: DirectedGraph = build(&[(0, 1, Weight::MAX), (0, 2, Weight::MAX - 1), (2, 3, 5)]);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist[1], INFINITY);
        assert_eq!(dist[2], Weight::MAX - 1);
        // Saturates instead of wrapping.
        assert_eq!(dist[3], INFINITY);
    }

    #[test]
    fn improved_entries_leave_stale_copies_behind() {
        // 1 is first reached at 10, then improved to 2 through 2.
        let g: DirectedGraph = build(&[(0, 1, 10), (0, 2, 1), (2, 1, 1), (1, 3, 1)]);
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist, vec![0, 2, 1, 3]);
    }

    #[test]
    fn zero_weights_and_sparse_ids() {
        let g: DirectedGraph = [Edge::new(0, 5, 0), Edge::new(5, 9, 4)].into_iter().collect();
        let dist = ShortestPath::new(&g).compute(0).unwrap();
        assert_eq!(dist.len(), 10);
        assert_eq!(dist[5], 0);
        assert_eq!(dist[9], 4);
        assert!(dist[1..5].iter().all(|&d| d == INFINITY));
    }

    #[test]
    fn matches_reference_on_random_graphs() {
        for seed in 0..20_u64 {
            let mut rng = StdRng::seed_from_u64(0xD1A5_0000 + seed);
            let n = 60;
            let mut g = DirectedGraph::with_vertices(n);
            for _ in 0..400 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                g.add_edge(u, v, rng.random_range(0..1_000));
            }
            let src = (seed as usize) % n;
            let got = ShortestPath::new(&g).compute(src).unwrap();
            let expected = reference(g.adjacency(), n, src);
            assert_eq!(got, expected, "seed={seed}");
        }
    }
}
