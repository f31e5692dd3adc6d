//! Step-by-step playback of a trace.
//!
//! A [`Playback`] owns one insert's trace and a cursor into it. It never
//! touches the tree that produced the trace; the live tree is already in
//! its final state by the time playback starts.

use rbstep_tree::{Snapshot, Trace, TreeView};

/// Message shown once the cursor has passed the last step.
pub const FINISHED_MESSAGE: &str = "Insertion complete";

/// Cursor over the snapshots of one trace.
#[derive(Debug, Clone)]
pub struct Playback<K> {
    trace: Trace<K>,
    position: usize,
}

impl<K> Playback<K> {
    /// Start at the first step.
    pub fn new(trace: Trace<K>) -> Self {
        Self { trace, position: 0 }
    }

    pub fn trace(&self) -> &Trace<K> {
        &self.trace
    }

    pub fn into_trace(self) -> Trace<K> {
        self.trace
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Index of the current step.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The snapshot under the cursor, if the trace has any steps.
    pub fn current(&self) -> Option<&Snapshot<K>> {
        self.trace.get(self.position)
    }

    /// Message of the current step, or [`FINISHED_MESSAGE`] for an empty
    /// trace.
    pub fn message(&self) -> &str {
        self.current()
            .map_or(FINISHED_MESSAGE, |snapshot| snapshot.message())
    }

    /// Whether the cursor sits on the last step (or there are no steps).
    pub fn is_finished(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    /// Move to the next step. Returns false, leaving the cursor in place,
    /// when already on the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Back to the first step.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// The tree to show right now: the current snapshot while stepping
    /// through a non-empty trace, otherwise `live`.
    pub fn view_or<'a>(&'a self, live: TreeView<'a, K>) -> TreeView<'a, K> {
        self.current().map_or(live, |snapshot| snapshot.tree())
    }
}
