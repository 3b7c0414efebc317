//! # Labeled Weighted Digraph
//!
//! [`MatrixGraph`] keeps a set of uniquely labeled vertices together with a
//! dense adjacency matrix of optional edge weights. Vertices are addressed by
//! label at the public surface; their matrix index is contiguous in
//! `[0, vertex_count)` and changes whenever an earlier vertex is removed, so
//! callers should never hold on to a [`VertexIndex`] across structural edits.
//!
//! Every mutation validates its arguments before writing anything: an `Err`
//! always means the graph is unchanged.

use std::fmt::{self, Display};

use thiserror::Error;
use tracing::{debug, warn};

use crate::define_indexed_vec;
use crate::weight::Weight;

pub mod matrix;
pub mod registry;

use matrix::AdjacencyMatrix;
use registry::VertexRegistry;

define_indexed_vec! {
    /// Row/column position of a vertex in the adjacency matrix.
    pub struct VertexIndex;

    /// A vector indexed by [`VertexIndex`].
    pub struct VertexVec;
}

/// A vertex as seen from outside the graph: its label and its current
/// matrix position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vertex<'a> {
    pub label: &'a str,
    pub index: VertexIndex,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Upper bound on the number of vertices. `None` means unbounded.
    pub max_vertices: Option<usize>,
}

impl GraphConfig {
    /// Vertex cap of the interactive editor.
    pub const UI_MAX_VERTICES: usize = 10;

    pub fn unbounded() -> Self {
        GraphConfig { max_vertices: None }
    }

    pub fn ui_default() -> Self {
        GraphConfig {
            max_vertices: Some(Self::UI_MAX_VERTICES),
        }
    }

    pub fn with_max_vertices(max_vertices: usize) -> Self {
        GraphConfig {
            max_vertices: Some(max_vertices),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatrixGraph<W = f64> {
    registry: VertexRegistry,
    matrix: AdjacencyMatrix<W>,
    config: GraphConfig,
}

impl<W> Default for MatrixGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> MatrixGraph<W> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::unbounded())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        MatrixGraph {
            registry: VertexRegistry::new(),
            matrix: AdjacencyMatrix::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains_vertex(&self, label: &str) -> bool {
        self.registry.index_of(label).is_some()
    }

    pub fn index_of(&self, label: &str) -> Option<VertexIndex> {
        self.registry.index_of(label)
    }

    pub fn label_of(&self, index: VertexIndex) -> Option<&str> {
        self.registry.label(index)
    }

    pub fn vertex(&self, label: &str) -> Option<Vertex<'_>> {
        let index = self.registry.index_of(label)?;
        self.registry
            .label(index)
            .map(|label| Vertex { label, index })
    }

    /// All vertices in ascending index order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> {
        self.registry
            .iter()
            .map(|(index, label)| Vertex { label, index })
    }

    pub fn matrix(&self) -> &AdjacencyMatrix<W> {
        &self.matrix
    }

    /// Every stored edge as `(from, to, weight)`, row-major.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &W)> {
        self.matrix.cells().filter_map(|(from, to, w)| {
            Some((self.registry.label(from)?, self.registry.label(to)?, w))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.matrix.cells().count()
    }

    pub(crate) fn resolve(&self, label: &str) -> Result<VertexIndex, GraphError> {
        self.registry
            .index_of(label)
            .ok_or_else(|| GraphError::VertexNotFound(label.to_owned()))
    }

    pub(crate) fn resolve_pair(
        &self,
        from: &str,
        to: &str,
    ) -> Result<(VertexIndex, VertexIndex), GraphError> {
        Ok((self.resolve(from)?, self.resolve(to)?))
    }

    pub(crate) fn labels_of(&self, indices: impl IntoIterator<Item = VertexIndex>) -> Vec<String> {
        indices
            .into_iter()
            .filter_map(|i| self.registry.label(i).map(str::to_owned))
            .collect()
    }

    /// Adds an isolated vertex at index `vertex_count()`.
    pub fn add_vertex(&mut self, label: &str) -> Result<VertexIndex, GraphError> {
        if self.contains_vertex(label) {
            return Err(GraphError::VertexExists(label.to_owned()));
        }
        if let Some(limit) = self.config.max_vertices {
            if self.vertex_count() >= limit {
                return Err(GraphError::CapacityExceeded { limit });
            }
        }
        let index = self.matrix.push_vertex();
        let registered = self.registry.insert(label);
        debug_assert_eq!(registered, Some(index));
        debug!(label, %index, "added vertex");
        Ok(index)
    }

    /// Removes a vertex together with all of its incoming and outgoing edges.
    /// Every vertex after it moves down one index.
    pub fn remove_vertex(&mut self, label: &str) -> Result<(), GraphError> {
        let index = self
            .registry
            .remove(label)
            .ok_or_else(|| GraphError::VertexNotFound(label.to_owned()))?;
        self.matrix.remove_vertex(index);
        debug!(label, %index, remaining = self.vertex_count(), "removed vertex");
        Ok(())
    }

    /// Renaming a vertex to its current label is a no-op.
    pub fn rename_vertex(&mut self, old: &str, new: &str) -> Result<(), GraphError> {
        let index = self.resolve(old)?;
        if old == new {
            return Ok(());
        }
        if self.contains_vertex(new) {
            return Err(GraphError::VertexExists(new.to_owned()));
        }
        self.registry.relabel(index, new);
        debug!(old, new, %index, "renamed vertex");
        Ok(())
    }
}

impl<W: Weight> MatrixGraph<W> {
    /// Writes one matrix cell. `None` clears the edge.
    pub fn set_edge(&mut self, from: &str, to: &str, weight: Option<W>) -> Result<(), GraphError> {
        let (i, j) = self.resolve_pair(from, to)?;
        if let Some(w) = weight {
            if !w.is_positive() {
                warn!(from, to, weight = %w, "non-positive weight stored, path-finding will not traverse it");
            }
        }
        let previous = self.matrix.set(i, j, weight);
        debug!(from, to, ?weight, ?previous, "set edge");
        Ok(())
    }

    /// Adds the edge `from -> to`, overwriting any previous weight.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: W) -> Result<(), GraphError> {
        self.set_edge(from, to, Some(weight))
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.set_edge(from, to, None)
    }

    pub fn get_weight(&self, from: &str, to: &str) -> Result<Option<W>, GraphError> {
        let (i, j) = self.resolve_pair(from, to)?;
        Ok(self.matrix.get(i, j))
    }

    /// Columns `j` with a strictly positive weight at `(index, j)`, ascending.
    /// An index outside the matrix has no neighbors.
    pub fn neighbor_indexes(&self, index: VertexIndex) -> Vec<VertexIndex> {
        self.matrix.out_edges(index).map(|(j, _)| j).collect()
    }
}

impl<W: Display> Display for MatrixGraph<W> {
    /// Adjacency matrix as a right-aligned text table, `-` for no edge.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.registry.iter().map(|(_, l)| l).collect();
        let cells: Vec<Vec<String>> = labels
            .iter()
            .enumerate()
            .map(|(i, _)| {
                self.matrix
                    .row(VertexIndex(i))
                    .map(|row| {
                        row.iter()
                            .map(|(_, w)| match w {
                                Some(w) => w.to_string(),
                                None => "-".to_owned(),
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();
        let width = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(cells.iter().flatten().map(|c| c.chars().count()))
            .max()
            .unwrap_or(0);

        write!(f, "{:width$}", "")?;
        for label in &labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;
        for (label, row) in labels.iter().zip(&cells) {
            write!(f, "{label:<width$}")?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex '{0}' does not exist")]
    VertexNotFound(String),
    #[error("vertex '{0}' already exists")]
    VertexExists(String),
    #[error("graph is limited to {limit} vertices")]
    CapacityExceeded { limit: usize },
}
