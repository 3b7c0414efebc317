use crate::weight::Weight;

use super::{VertexIndex, VertexVec};

/// Dense square table of optional edge weights.
///
/// Row `i`, column `j` holds the weight of the directed edge `i -> j`, or
/// `None` when there is no such edge. The table always has exactly as many
/// rows as columns.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix<W> {
    rows: VertexVec<VertexVec<Option<W>>>,
}

impl<W> Default for AdjacencyMatrix<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> AdjacencyMatrix<W> {
    pub fn new() -> Self {
        AdjacencyMatrix {
            rows: VertexVec::new(),
        }
    }

    /// Number of rows, which is also the number of columns.
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Grows the matrix by one row and one column of empty cells and returns
    /// the index of the new row.
    pub fn push_vertex(&mut self) -> VertexIndex {
        let index = VertexIndex(self.dim());
        for (_, row) in self.rows.iter_mut() {
            row.push(None);
        }
        self.rows.push((0..=index.0).map(|_| None).collect());
        index
    }

    /// Drops row and column `index`. Every later row moves up by one and
    /// every later column moves left by one.
    pub fn remove_vertex(&mut self, index: VertexIndex) {
        if index.0 >= self.dim() {
            return;
        }
        self.rows.remove(index);
        for (_, row) in self.rows.iter_mut() {
            row.remove(index);
        }
    }

    pub fn row(&self, from: VertexIndex) -> Option<&VertexVec<Option<W>>> {
        self.rows.get(from)
    }

    /// Iterates the occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex, &W)> {
        self.rows.iter().flat_map(|(from, row)| {
            row.iter()
                .filter_map(move |(to, w)| w.as_ref().map(|w| (from, to, w)))
        })
    }
}

impl<W: Weight> AdjacencyMatrix<W> {
    pub fn get(&self, from: VertexIndex, to: VertexIndex) -> Option<W> {
        self.rows.get(from).and_then(|row| row.get(to)).copied().flatten()
    }

    /// Overwrites a single cell, returning its previous value.
    pub fn set(&mut self, from: VertexIndex, to: VertexIndex, weight: Option<W>) -> Option<W> {
        let cell = self.rows.get_mut(from).and_then(|row| row.get_mut(to))?;
        std::mem::replace(cell, weight)
    }

    /// Outgoing edges of `from` that path-finding may traverse: present and
    /// strictly positive, in ascending column order.
    pub fn out_edges(&self, from: VertexIndex) -> impl Iterator<Item = (VertexIndex, W)> + '_ {
        self.rows.get(from).into_iter().flat_map(|row| {
            row.iter().filter_map(|(to, w)| match w {
                Some(w) if w.is_positive() => Some((to, *w)),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn growth_keeps_square() {
        let mut m: AdjacencyMatrix<f64> = AdjacencyMatrix::new();
        for expected in 0..4 {
            assert_eq!(m.push_vertex(), VertexIndex(expected));
            assert!(m.rows.iter().all(|(_, row)| row.len() == m.dim()));
        }
        assert_eq!(m.cells().count(), 0);
    }

    #[test]
    fn removal_shifts_rows_and_columns() {
        let mut m: AdjacencyMatrix<i32> = AdjacencyMatrix::new();
        for _ in 0..4 {
            m.push_vertex();
        }
        m.set(VertexIndex(0), VertexIndex(3), Some(3));
        m.set(VertexIndex(3), VertexIndex(2), Some(32));
        m.set(VertexIndex(2), VertexIndex(2), Some(22));
        m.set(VertexIndex(1), VertexIndex(1), Some(11));

        m.remove_vertex(VertexIndex(1));

        assert_eq!(m.dim(), 3);
        assert_eq!(m.get(VertexIndex(0), VertexIndex(2)), Some(3));
        assert_eq!(m.get(VertexIndex(2), VertexIndex(1)), Some(32));
        assert_eq!(m.get(VertexIndex(1), VertexIndex(1)), Some(22));
        assert_eq!(m.cells().count(), 3);
    }

    #[test]
    fn removing_last_vertex_empties() {
        let mut m: AdjacencyMatrix<f64> = AdjacencyMatrix::new();
        let only = m.push_vertex();
        m.set(only, only, Some(1.0));
        m.remove_vertex(only);
        assert_eq!(m.dim(), 0);
        assert_eq!(m.row(only), None);
    }

    #[test]
    fn out_edges_skip_non_positive() {
        let mut m: AdjacencyMatrix<i32> = AdjacencyMatrix::new();
        for _ in 0..4 {
            m.push_vertex();
        }
        m.set(VertexIndex(0), VertexIndex(1), Some(0));
        m.set(VertexIndex(0), VertexIndex(2), Some(-4));
        m.set(VertexIndex(0), VertexIndex(3), Some(7));
        let out: Vec<_> = m.out_edges(VertexIndex(0)).collect();
        assert_eq!(out, vec![(VertexIndex(3), 7)]);
        assert_eq!(m.out_edges(VertexIndex(9)).count(), 0);
    }
}
