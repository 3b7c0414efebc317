//! # Pathnet
//!
//! Pathnet is a small library for labeled, weighted directed graphs stored as
//! a dense adjacency matrix. It supports structural editing (adding,
//! removing and renaming vertices; setting and clearing edges) and two
//! shortest-path algorithms over the current matrix: single-pair Dijkstra and
//! all-pairs Floyd–Warshall with path reconstruction.
//!
//! ```
//! use pathnet::graph::MatrixGraph;
//!
//! let mut g: MatrixGraph<u32> = MatrixGraph::new();
//! for v in ["a", "b", "c"] {
//!     g.add_vertex(v).unwrap();
//! }
//! g.add_edge("a", "b", 2).unwrap();
//! g.add_edge("b", "c", 3).unwrap();
//! assert_eq!(g.dijkstra("a", "c").unwrap().distance(), Some(5));
//! ```
//!
//! A graph is a plain owned value with no interior synchronization; an
//! application that shares one between threads must serialize access itself.

pub mod algorithms;
#[cfg(feature = "serde")]
pub mod document;
pub mod dot_parser;
pub mod graph;
pub mod typed_vec;
pub mod weight;
