//! # DOT Import and Export
//!
//! Reads a Graphviz `digraph` into a [`MatrixGraph`] and writes one back out.
//! Every node id becomes a vertex, added in sorted id order so the
//! resulting indices do not depend on statement order. Every edge must carry
//! a `weight` attribute (or, failing that, a numeric `label`); a repeated
//! `a -> b` statement overwrites the earlier weight, just like
//! [`MatrixGraph::add_edge`].

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Display, Write},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::{
    graph::{GraphConfig, GraphError, MatrixGraph},
    weight::Weight,
};

#[derive(Debug, Error)]
pub enum DotImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("DOT parse error: {0}")]
    Parse(String),
    #[error("only directed graphs (digraph) can be imported")]
    Undirected,
    #[error("edge {from} -> {to} has no weight or label attribute")]
    MissingWeight { from: String, to: String },
    #[error("edge {from} -> {to} has invalid weight '{value}': {reason}")]
    InvalidWeight {
        from: String,
        to: String,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// DOT ids and attribute values may come quoted. `"a"` and `a` name the
/// same node, and inside quotes `\"` and `\\` stand for `"` and `\`.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return raw.to_owned();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&(next @ ('"' | '\\'))) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

impl<W: Weight + FromStr> MatrixGraph<W>
where
    W::Err: Display,
{
    pub fn from_dot_str(source: impl AsRef<str>) -> Result<Self, DotImportError> {
        Self::from_dot_str_with_config(source, GraphConfig::default())
    }

    pub fn from_dot_file(
        path: impl AsRef<Path>,
        config: GraphConfig,
    ) -> Result<Self, DotImportError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DotImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_dot_str_with_config(source, config)
    }

    pub fn from_dot_str_with_config(
        source: impl AsRef<str>,
        config: GraphConfig,
    ) -> Result<Self, DotImportError> {
        let ast_graph = dot_parser::ast::Graph::try_from(source.as_ref())
            .map_err(|e| DotImportError::Parse(e.to_string()))?;
        let can_graph = dot_parser::canonical::Graph::from(
            ast_graph.filter_map(&|a| Some((a.0.to_string(), a.1.to_string()))),
        );
        if !can_graph.is_digraph {
            return Err(DotImportError::Undirected);
        }

        let labels: BTreeSet<String> = can_graph
            .nodes
            .set
            .keys()
            .map(|id| unquote(id))
            .collect();
        let mut graph = MatrixGraph::with_config(config);
        for label in &labels {
            graph.add_vertex(label)?;
        }

        for (from, to, attr) in can_graph
            .edges
            .set
            .into_iter()
            .map(|edge| (unquote(&edge.from), unquote(&edge.to), edge.attr))
            .sorted_by(|a, b| Ord::cmp(&(&a.0, &a.1), &(&b.0, &b.1)))
        {
            let attrs: BTreeMap<String, String> = attr.into_iter().collect();
            let Some(raw) = attrs.get("weight").or_else(|| attrs.get("label")) else {
                return Err(DotImportError::MissingWeight { from, to });
            };
            let value = unquote(raw);
            let value = value.trim();
            let weight = value
                .parse::<W>()
                .map_err(|e| DotImportError::InvalidWeight {
                    from: from.clone(),
                    to: to.clone(),
                    value: value.to_owned(),
                    reason: e.to_string(),
                })?;
            graph.add_edge(&from, &to, weight)?;
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "imported DOT graph"
        );
        Ok(graph)
    }
}

impl<W: Display> MatrixGraph<W> {
    pub fn dot_serialize_fmt(&self, writer: &mut impl Write) -> Result<(), std::fmt::Error> {
        writeln!(writer, "digraph {{")?;
        for vertex in self.vertices() {
            writeln!(writer, "  \"{}\";", escape(vertex.label))?;
        }
        for (from, to, weight) in self.edges() {
            writeln!(
                writer,
                "  \"{}\" -> \"{}\" [label=\"{weight}\", weight={weight}];",
                escape(from),
                escape(to)
            )?;
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dot_serialize_fmt(&mut out);
        out
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[macro_export]
macro_rules! dot {
    ($($t:tt)*) => {
        $crate::graph::MatrixGraph::from_dot_str(stringify!($($t)*))
    };
}
