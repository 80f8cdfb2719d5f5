//! Edge-state assignment for search

/// Mapping from edge id to bridge count (0, 1 or 2).
///
/// Unset entries mean "undetermined", so the same type serves partial
/// search states and complete solutions. Search strategies mutate in place
/// and undo with [`Assignment::clear`], keeping speculative branches from
/// aliasing each other's state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    counts: Vec<Option<u8>>,
}

impl Assignment {
    /// An empty assignment over the given number of edges
    pub fn empty(edge_count: usize) -> Self {
        Self {
            counts: vec![None; edge_count],
        }
    }

    /// A complete assignment from per-edge bridge counts
    pub fn from_counts(counts: Vec<u8>) -> Self {
        Self {
            counts: counts.into_iter().map(Some).collect(),
        }
    }

    pub fn get(&self, edge: usize) -> Option<u8> {
        self.counts[edge]
    }

    /// Bridge count with unassigned edges reading as 0
    pub fn bridges(&self, edge: usize) -> u8 {
        self.counts[edge].unwrap_or(0)
    }

    pub fn set(&mut self, edge: usize, count: u8) {
        debug_assert!(count <= 2);
        self.counts[edge] = Some(count);
    }

    /// Undo a speculative assignment
    pub fn clear(&mut self, edge: usize) {
        self.counts[edge] = None;
    }

    pub fn edge_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_complete(&self) -> bool {
        self.counts.iter().all(|count| count.is_some())
    }

    /// Assigned (edge, count) pairs in edge-id order
    pub fn assigned(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(edge, count)| count.map(|c| (edge, c)))
    }
}
