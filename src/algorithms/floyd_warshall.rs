use tracing::debug;

use crate::{
    graph::{MatrixGraph, VertexIndex, VertexVec},
    weight::Weight,
};

use super::{AllPairs, PairResult};

type Table<T> = VertexVec<VertexVec<T>>;

impl<W: Weight> MatrixGraph<W> {
    /// All-pairs shortest paths, O(V³).
    ///
    /// Distances start from the traversable edges with a zero diagonal, and
    /// `next[i][j]` records the first hop on the best known `i -> j` route.
    ///
    /// Only strictly positive weights seed the table, the same rule
    /// [`dijkstra`](MatrixGraph::dijkstra) follows. An edge stored with a
    /// zero or negative weight is treated as absent: a pair joined only by
    /// such edges reports `distance: None` and an empty path. There are
    /// therefore no negative cycles to guard against.
    pub fn floyd_warshall(&self) -> AllPairs<W> {
        let n = self.vertex_count();
        let mut dist: Table<Option<W>> = VertexVec::filled(n, VertexVec::filled(n, None));
        let mut next: Table<Option<VertexIndex>> =
            VertexVec::filled(n, VertexVec::filled(n, None));

        let vertices = || (0..n).map(VertexIndex);

        for i in vertices() {
            for (j, w) in self.matrix().out_edges(i) {
                dist[i][j] = Some(w);
                next[i][j] = Some(j);
            }
            dist[i][i] = Some(W::zero());
            next[i][i] = Some(i);
        }

        for k in vertices() {
            for i in vertices() {
                let Some(ik) = dist[i][k] else {
                    continue;
                };
                for j in vertices() {
                    let Some(kj) = dist[k][j] else {
                        continue;
                    };
                    let through = ik.accumulate(kj);
                    if dist[i][j].map_or(true, |d| through < d) {
                        dist[i][j] = Some(through);
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        let pairs: Vec<_> = vertices()
            .flat_map(|i| vertices().map(move |j| (i, j)))
            .map(|(i, j)| PairResult {
                from: self.label_of(i).unwrap_or_default().to_owned(),
                to: self.label_of(j).unwrap_or_default().to_owned(),
                path: self.labels_of(walk(&next, i, j)),
                distance: dist[i][j],
            })
            .collect();
        debug!(
            vertices = n,
            pairs = pairs.len(),
            "computed all-pairs shortest paths"
        );
        AllPairs::new(pairs)
    }
}

/// Follows next-hop pointers from `from` to `to`, both inclusive. Empty for
/// a self pair or when no route exists.
fn walk(
    next: &Table<Option<VertexIndex>>,
    from: VertexIndex,
    to: VertexIndex,
) -> Vec<VertexIndex> {
    if from == to || next[from][to].is_none() {
        return Vec::new();
    }
    let mut path = vec![from];
    let mut cursor = from;
    // A simple path visits each vertex at most once.
    for _ in 0..next.len() {
        let Some(hop) = next[cursor][to] else {
            return Vec::new();
        };
        path.push(hop);
        if hop == to {
            return path;
        }
        cursor = hop;
    }
    Vec::new()
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use crate::{algorithms::PathResult, graph::MatrixGraph};

    fn diamond() -> MatrixGraph<u32> {
        let mut g = MatrixGraph::new();
        for v in ["a", "b", "c", "d"] {
            g.add_vertex(v).unwrap();
        }
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("b", "d", 1).unwrap();
        g.add_edge("a", "c", 1).unwrap();
        g.add_edge("c", "d", 5).unwrap();
        g.add_edge("a", "d", 7).unwrap();
        g
    }

    #[test]
    fn covers_every_ordered_pair() {
        let g = diamond();
        let all = g.floyd_warshall();
        assert_eq!(all.len(), 16);

        let ad = all.get("a", "d").unwrap();
        assert_eq!(ad.distance, Some(2));
        assert_eq!(ad.path, vec!["a", "b", "d"]);

        let aa = all.get("a", "a").unwrap();
        assert_eq!(aa.distance, Some(0));
        assert!(aa.path.is_empty());

        let da = all.get("d", "a").unwrap();
        assert_eq!(da.distance, None);
        assert!(da.path.is_empty());
    }

    #[test]
    fn non_positive_edges_leave_pairs_unreachable() {
        let mut g: MatrixGraph<i32> = MatrixGraph::new();
        for v in ["p", "q", "r"] {
            g.add_vertex(v).unwrap();
        }
        g.add_edge("p", "q", 0).unwrap();
        g.add_edge("q", "r", -2).unwrap();
        g.add_edge("p", "r", 4).unwrap();
        let all = g.floyd_warshall();

        let pq = all.get("p", "q").unwrap();
        assert_eq!(pq.distance, None);
        assert!(pq.path.is_empty());
        assert_eq!(all.get("q", "r").unwrap().distance, None);
        assert_eq!(all.get("p", "r").unwrap().distance, Some(4));
    }

    #[test]
    fn empty_graph_has_no_pairs() {
        let g: MatrixGraph = MatrixGraph::new();
        assert!(g.floyd_warshall().is_empty());
    }

    #[test]
    fn table_rendering() {
        let mut g: MatrixGraph<u32> = MatrixGraph::new();
        for v in ["x", "y", "z"] {
            g.add_vertex(v).unwrap();
        }
        g.add_edge("x", "y", 2).unwrap();
        g.add_edge("y", "z", 3).unwrap();
        insta::assert_snapshot!(g.floyd_warshall().to_string(), @r"
        x -> x: 0 []
        x -> y: 2 [x -> y]
        x -> z: 5 [x -> y -> z]
        y -> x: - []
        y -> y: 0 []
        y -> z: 3 [y -> z]
        z -> x: - []
        z -> y: - []
        z -> z: 0 []
        ");
    }

    fn arbitrary_graph() -> impl Strategy<Value = MatrixGraph<u32>> {
        (1usize..7).prop_flat_map(|n| {
            prop::collection::vec(prop::option::weighted(0.4, 0u32..20), n * n).prop_map(
                move |cells| {
                    let mut g = MatrixGraph::new();
                    for v in 0..n {
                        g.add_vertex(&format!("v{v}")).unwrap();
                    }
                    for (k, cell) in cells.into_iter().enumerate() {
                        if let Some(w) = cell {
                            g.add_edge(&format!("v{}", k / n), &format!("v{}", k % n), w)
                                .unwrap();
                        }
                    }
                    g
                },
            )
        })
    }

    proptest! {
        #[test]
        fn agrees_with_dijkstra(g in arbitrary_graph()) {
            for pair in g.floyd_warshall().iter() {
                let single = g.dijkstra(&pair.from, &pair.to).unwrap();
                prop_assert_eq!(single.distance(), pair.distance);
                if pair.from == pair.to {
                    continue;
                }
                match single {
                    PathResult::Found { distance, .. } => {
                        prop_assert_eq!(pair.path.first(), Some(&pair.from));
                        prop_assert_eq!(pair.path.last(), Some(&pair.to));
                        let mut walked = 0;
                        for hop in pair.path.windows(2) {
                            let w = g.get_weight(&hop[0], &hop[1]).unwrap();
                            prop_assert!(w.is_some_and(|w| w > 0));
                            walked += w.unwrap_or(0);
                        }
                        prop_assert_eq!(walked, distance);
                    }
                    PathResult::NotReachable => prop_assert!(pair.path.is_empty()),
                }
            }
        }
    }
}
