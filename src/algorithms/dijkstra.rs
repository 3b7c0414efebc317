use bitvec::{bitvec, order::Lsb0, vec::BitVec};
use tracing::trace;

use crate::{
    graph::{GraphError, MatrixGraph, VertexIndex, VertexVec},
    weight::Weight,
};

use super::PathResult;

impl<W: Weight> MatrixGraph<W> {
    /// Shortest path from `from` to `to` over strictly positive edges.
    ///
    /// Dense-graph Dijkstra: each round scans every vertex for the unvisited
    /// one with the smallest tentative distance, O(V²) overall. Among equal
    /// distances the lowest index is settled first, so results are
    /// reproducible.
    pub fn dijkstra(&self, from: &str, to: &str) -> Result<PathResult<W>, GraphError> {
        let (source, target) = self.resolve_pair(from, to)?;
        let n = self.vertex_count();

        let mut dist: VertexVec<Option<W>> = VertexVec::filled(n, None);
        let mut predecessor: VertexVec<Option<VertexIndex>> = VertexVec::filled(n, None);
        let mut visited: BitVec = bitvec![usize, Lsb0; 0; n];
        dist[source] = Some(W::zero());

        loop {
            let Some((current, base)) = closest_unvisited(&dist, &visited) else {
                trace!(from, to, "frontier exhausted");
                return Ok(PathResult::NotReachable);
            };
            visited.set(current.0, true);
            trace!(vertex = %current, distance = %base, "settled");
            if current == target {
                break;
            }

            for (next, weight) in self.matrix().out_edges(current) {
                if visited[next.0] {
                    continue;
                }
                let candidate = base.accumulate(weight);
                if dist[next].map_or(true, |d| candidate < d) {
                    dist[next] = Some(candidate);
                    predecessor[next] = Some(current);
                }
            }
        }

        let mut chain = vec![target];
        let mut cursor = target;
        while let Some(prev) = predecessor[cursor] {
            chain.push(prev);
            cursor = prev;
        }
        chain.reverse();

        Ok(PathResult::Found {
            distance: dist[target].unwrap_or_else(W::zero),
            path: self.labels_of(chain),
        })
    }
}

/// First unvisited vertex, in index order, holding the minimum finite
/// tentative distance.
fn closest_unvisited<W: Weight>(
    dist: &VertexVec<Option<W>>,
    visited: &BitVec,
) -> Option<(VertexIndex, W)> {
    let mut best: Option<(VertexIndex, W)> = None;
    for (i, d) in dist {
        if visited[i.0] {
            continue;
        }
        let Some(d) = *d else {
            continue;
        };
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best
}
