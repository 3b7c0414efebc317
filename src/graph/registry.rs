use indexmap::IndexSet;

use super::VertexIndex;

/// Ordered set of vertex labels.
///
/// The position of a label in the set is its matrix index, so removing a
/// label shifts every later label down by one, which is exactly the
/// re-indexing the matrix undergoes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexRegistry {
    labels: IndexSet<String>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<VertexIndex> {
        self.labels.get_index_of(label).map(VertexIndex)
    }

    pub fn label(&self, index: VertexIndex) -> Option<&str> {
        self.labels.get_index(index.0).map(String::as_str)
    }

    /// Appends a new label. Returns `None` without touching the set if the
    /// label is already registered.
    pub fn insert(&mut self, label: &str) -> Option<VertexIndex> {
        if self.labels.contains(label) {
            return None;
        }
        let (index, _) = self.labels.insert_full(label.to_owned());
        Some(VertexIndex(index))
    }

    pub fn remove(&mut self, label: &str) -> Option<VertexIndex> {
        self.labels
            .shift_remove_full(label)
            .map(|(index, _)| VertexIndex(index))
    }

    /// Replaces the label at `index` in place.
    pub fn relabel(&mut self, index: VertexIndex, label: &str) {
        if self.labels.shift_remove_index(index.0).is_some() {
            self.labels.shift_insert(index.0, label.to_owned());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexIndex, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, l)| (VertexIndex(i), l.as_str()))
    }
}
