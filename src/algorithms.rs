//! # Shortest Paths
//!
//! Both algorithms read a snapshot of the adjacency matrix and keep no state
//! between calls. Only strictly positive weights are traversed; zero and
//! negative weights stay in the matrix but are treated as missing edges.
//!
//! ## Available Algorithms
//!
//! - [`dijkstra`]: single pair, label-setting with a linear minimum scan.
//! - [`floyd_warshall`]: all ordered pairs with next-hop path reconstruction.
//!
//! Unreachability is reported as a value ([`PathResult::NotReachable`], or a
//! `None` distance in [`PairResult`]), never as an infinite number.

use std::fmt::{self, Display};

use itertools::Itertools;

pub mod dijkstra;
pub mod floyd_warshall;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathResult<W> {
    /// `path` runs from source to target inclusive. A vertex reaches
    /// itself with distance zero and path `[source]`.
    Found { distance: W, path: Vec<String> },
    NotReachable,
}

impl<W: Copy> PathResult<W> {
    pub fn distance(&self) -> Option<W> {
        match self {
            PathResult::Found { distance, .. } => Some(*distance),
            PathResult::NotReachable => None,
        }
    }

    pub fn path(&self) -> Option<&[String]> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::NotReachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }
}

impl<W: Display> Display for PathResult<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathResult::Found { distance, path } => {
                write!(f, "{} (distance {distance})", path.iter().join(" -> "))
            }
            PathResult::NotReachable => write!(f, "no path"),
        }
    }
}

/// Shortest route between one ordered pair of vertices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PairResult<W> {
    pub from: String,
    pub to: String,
    /// Empty for unreachable pairs and for `from == to`.
    pub path: Vec<String>,
    /// `None` when `to` cannot be reached from `from`.
    pub distance: Option<W>,
}

/// Output of [`floyd_warshall`](crate::graph::MatrixGraph::floyd_warshall):
/// one [`PairResult`] per ordered vertex pair, self pairs included, in
/// row-major index order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AllPairs<W> {
    pairs: Vec<PairResult<W>>,
}

impl<W> AllPairs<W> {
    pub(crate) fn new(pairs: Vec<PairResult<W>>) -> Self {
        AllPairs { pairs }
    }

    pub fn get(&self, from: &str, to: &str) -> Option<&PairResult<W>> {
        self.pairs.iter().find(|p| p.from == from && p.to == to)
    }
}

impl<W> std::ops::Deref for AllPairs<W> {
    type Target = [PairResult<W>];

    fn deref(&self) -> &Self::Target {
        &self.pairs
    }
}

impl<W> IntoIterator for AllPairs<W> {
    type Item = PairResult<W>;
    type IntoIter = std::vec::IntoIter<PairResult<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a, W> IntoIterator for &'a AllPairs<W> {
    type Item = &'a PairResult<W>;
    type IntoIter = std::slice::Iter<'a, PairResult<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<W: Display> Display for AllPairs<W> {
    /// One line per pair: `from -> to: distance [path]`, `-` when unreachable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.pairs {
            let distance = pair
                .distance
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string);
            writeln!(
                f,
                "{} -> {}: {distance} [{}]",
                pair.from,
                pair.to,
                pair.path.iter().join(" -> ")
            )?;
        }
        Ok(())
    }
}
