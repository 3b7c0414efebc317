//! # Saved Graph Documents
//!
//! The editor persists graphs as JSON of the shape
//!
//! ```json
//! { "nodes": [{ "name": "a", "pos_x": 10.0, "pos_y": 20.0 }],
//!   "edges": [{ "from": "a", "to": "b", "weight": 5 }] }
//! ```
//!
//! Positions belong to the editor and are carried through untouched. Loading
//! replays `add_vertex` for every node and then `add_edge` for every edge, in
//! document order, so a document reproduces exactly the graph those calls
//! would build. A `null` weight is a deleted edge and is skipped.

use std::{io, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    graph::{GraphConfig, GraphError, MatrixGraph},
    weight::Weight,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "W: Deserialize<'de>"))]
pub struct GraphDocument<W = f64> {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord<W>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<W = f64> {
    pub from: String,
    pub to: String,
    pub weight: Option<W>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("malformed graph document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl<W: Weight> GraphDocument<W> {
    /// Rebuilds the graph. Fails on the first rejected call, e.g. a duplicate
    /// node name or an edge naming an unknown node.
    pub fn to_graph(&self, config: GraphConfig) -> Result<MatrixGraph<W>, GraphError> {
        let mut graph = MatrixGraph::with_config(config);
        for node in &self.nodes {
            graph.add_vertex(&node.name)?;
        }
        for edge in &self.edges {
            if let Some(weight) = edge.weight {
                graph.add_edge(&edge.from, &edge.to, weight)?;
            }
        }
        debug!(
            nodes = self.nodes.len(),
            edges = graph.edge_count(),
            "loaded graph document"
        );
        Ok(graph)
    }

    /// Snapshot of `graph`, asking `position` for each vertex's editor
    /// coordinates.
    pub fn from_graph(graph: &MatrixGraph<W>, position: impl Fn(&str) -> (f64, f64)) -> Self {
        let nodes = graph
            .vertices()
            .map(|v| {
                let (pos_x, pos_y) = position(v.label);
                NodeRecord {
                    name: v.label.to_owned(),
                    pos_x,
                    pos_y,
                }
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(from, to, weight)| EdgeRecord {
                from: from.to_owned(),
                to: to.to_owned(),
                weight: Some(*weight),
            })
            .collect();
        GraphDocument { nodes, edges }
    }

    /// Snapshot of `graph` that keeps the positions recorded in `self`.
    /// Vertices this document does not know are placed at the origin.
    pub fn updated_from(&self, graph: &MatrixGraph<W>) -> Self {
        Self::from_graph(graph, |name| self.position_of(name).unwrap_or_default())
    }

    pub fn position_of(&self, name: &str) -> Option<(f64, f64)> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| (n.pos_x, n.pos_y))
    }
}

impl<W: Serialize> GraphDocument<W> {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<W: DeserializeOwned> GraphDocument<W> {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod test {
    use similar_asserts::assert_eq;

    use super::*;

    const SAVED: &str = r#"{
        "nodes": [
            {"name": "a", "pos_x": 0.0, "pos_y": 0.0},
            {"name": "b", "pos_x": 120.5, "pos_y": 40.0},
            {"name": "c", "pos_x": 60.0, "pos_y": 90.0}
        ],
        "edges": [
            {"from": "a", "to": "b", "weight": 4},
            {"from": "b", "to": "c", "weight": null},
            {"from": "a", "to": "c", "weight": 9},
            {"from": "a", "to": "b", "weight": 2}
        ]
    }"#;

    #[test]
    fn replays_calls() {
        let doc: GraphDocument<u32> = GraphDocument::from_json(SAVED).unwrap();
        let g = doc.to_graph(GraphConfig::default()).unwrap();

        let labels: Vec<_> = g.vertices().map(|v| v.label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(g.get_weight("a", "b"), Ok(Some(2)));
        assert_eq!(g.get_weight("b", "c"), Ok(None));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn export_keeps_positions() {
        let doc: GraphDocument<u32> = GraphDocument::from_json(SAVED).unwrap();
        let g = doc.to_graph(GraphConfig::default()).unwrap();
        let exported = GraphDocument::from_graph(&g, |name| {
            doc.position_of(name).unwrap_or_default()
        });

        assert_eq!(exported.nodes, doc.nodes);
        assert_eq!(
            exported.edges,
            vec![
                EdgeRecord {
                    from: "a".into(),
                    to: "b".into(),
                    weight: Some(2)
                },
                EdgeRecord {
                    from: "a".into(),
                    to: "c".into(),
                    weight: Some(9)
                },
            ]
        );

        assert_eq!(doc.updated_from(&g), exported);

        let json = exported.to_json().unwrap();
        let reread: GraphDocument<u32> = GraphDocument::from_json(&json).unwrap();
        assert_eq!(reread, exported);
    }

    #[test]
    fn update_places_new_vertices_at_origin() {
        let doc: GraphDocument<u32> = GraphDocument::from_json(SAVED).unwrap();
        let mut g = doc.to_graph(GraphConfig::default()).unwrap();
        g.remove_vertex("a").unwrap();
        g.add_vertex("d").unwrap();

        let positions: Vec<_> = doc
            .updated_from(&g)
            .nodes
            .into_iter()
            .map(|n| (n.name, n.pos_x, n.pos_y))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("b".to_owned(), 120.5, 40.0),
                ("c".to_owned(), 60.0, 90.0),
                ("d".to_owned(), 0.0, 0.0),
            ]
        );
    }

    fn edge_total<W: Weight + DeserializeOwned>(json: &str) -> usize {
        GraphDocument::<W>::from_json(json)
            .unwrap()
            .to_graph(GraphConfig::default())
            .unwrap()
            .edge_count()
    }

    #[test]
    fn loads_through_generic_weight_bound() {
        assert_eq!(edge_total::<u32>(SAVED), 2);
        assert_eq!(edge_total::<f32>(SAVED), 2);
        assert_eq!(edge_total::<i64>(r#"{"nodes": [{"name": "solo"}]}"#), 0);
    }

    #[test]
    fn rejected_documents() {
        let dup: GraphDocument = GraphDocument::from_json(
            r#"{"nodes": [{"name": "a"}, {"name": "a"}], "edges": []}"#,
        )
        .unwrap();
        assert_eq!(
            dup.to_graph(GraphConfig::default()).unwrap_err(),
            GraphError::VertexExists("a".into())
        );

        let dangling: GraphDocument = GraphDocument::from_json(
            r#"{"nodes": [{"name": "a"}], "edges": [{"from": "a", "to": "z", "weight": 1.0}]}"#,
        )
        .unwrap();
        assert_eq!(
            dangling.to_graph(GraphConfig::default()).unwrap_err(),
            GraphError::VertexNotFound("z".into())
        );

        let capped = GraphDocument::<f64>::from_json(SAVED)
            .unwrap()
            .to_graph(GraphConfig::with_max_vertices(2));
        assert_eq!(
            capped.unwrap_err(),
            GraphError::CapacityExceeded { limit: 2 }
        );

        assert!(matches!(
            GraphDocument::<f64>::from_json("{\"nodes\": 3}"),
            Err(DocumentError::Json(_))
        ));
    }
}
