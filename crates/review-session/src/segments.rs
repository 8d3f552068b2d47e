//! Revision-guarded cache of highlight segments.

use clause_engine::Segment;

/// Holds the segments computed for one revision of the document.
///
/// A result for a revision older than the newest one offered is rejected, so a
/// superseded computation can never replace a newer one.
#[derive(Debug, Default)]
pub struct SegmentCache {
    newest: u64,
    entry: Option<(u64, Vec<Segment>)>,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached segments, if they were computed for exactly `revision`.
    pub fn get(&self, revision: u64) -> Option<&[Segment]> {
        match &self.entry {
            Some((cached, segments)) if *cached == revision => Some(segments.as_slice()),
            _ => None,
        }
    }

    /// Store `segments` for `revision`. Returns false if a newer revision is known.
    pub fn store(&mut self, revision: u64, segments: Vec<Segment>) -> bool {
        if revision < self.newest {
            tracing::debug!(revision, newest = self.newest, "discarding stale segments");
            return false;
        }
        self.newest = revision;
        self.entry = Some((revision, segments));
        true
    }

    /// Mark `revision` as current without a result, invalidating older entries.
    pub fn advance(&mut self, revision: u64) {
        if revision > self.newest {
            self.newest = revision;
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
