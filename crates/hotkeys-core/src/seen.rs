use std::collections::HashSet;

/// Combinations already serviced by an inner scope for one physical event.
///
/// Create one per event, pass it by `&mut` to every scope on the bubble path
/// (innermost first), then drop it. An outer scope skips any binding whose
/// canonical combination is already in the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenRecord {
    seen: HashSet<String>,
}

impl SeenRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether a combination (in canonical string form) was serviced.
    pub fn has_seen(&self, canonical: &str) -> bool {
        self.seen.contains(canonical)
    }

    /// Mark a combination (in canonical string form) as serviced.
    pub fn mark(&mut self, canonical: impl Into<String>) {
        self.seen.insert(canonical.into());
    }

    /// Number of distinct combinations marked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if nothing has been marked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
