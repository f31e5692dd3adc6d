//! The tree engine.
//!
//! [`RbTree`] owns the live tree, runs traced or untraced inserts, and
//! exposes manual rotations for demonstration tooling.

use std::fmt::Display;

use tracing::debug;

use crate::error::{Result, TreeError};
use crate::fixup::Placement;
use crate::node::{Link, NodeId, NodeStore, Side};
use crate::rotate::rotate;
use crate::trace::{RecorderConfig, StepKind, Trace, TraceRecorder};
use crate::validate::InvariantViolation;
use crate::view::{NodeRef, TreeView};

/// A red-black tree that can report every step of an insert.
///
/// Not meant for concurrent mutation; callers that share one tree must
/// serialize inserts themselves.
#[derive(Debug, Clone)]
pub struct RbTree<K> {
    pub(crate) store: NodeStore<K>,
    pub(crate) root: Link,
    recorder: RecorderConfig,
    /// Id of the node in arena slot 0.
    id_base: u64,
    next_id: u64,
    /// Set once a manual rotation may have broken the color invariants.
    reshaped: bool,
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RbTree<K> {
    /// Create an empty tree that records full traces.
    pub const fn new() -> Self {
        Self {
            store: NodeStore::new(),
            root: None,
            recorder: RecorderConfig {
                enabled: true,
                max_steps: None,
            },
            id_base: 0,
            next_id: 0,
            reshaped: false,
        }
    }

    /// Create an empty tree with the given recording policy.
    pub fn with_recorder(recorder: RecorderConfig) -> Self {
        Self {
            recorder,
            ..Self::new()
        }
    }

    pub fn recorder(&self) -> RecorderConfig {
        self.recorder
    }

    pub fn set_recorder(&mut self, recorder: RecorderConfig) {
        self.recorder = recorder;
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Read-only view of the live tree.
    pub fn view(&self) -> TreeView<'_, K> {
        TreeView::new(self.store.nodes(), self.root)
    }

    pub fn current_root(&self) -> Option<NodeRef<'_, K>> {
        self.view().root()
    }

    /// Remove every node. Ids keep counting up, so ids from earlier
    /// snapshots never name a node of the emptied tree.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = None;
        self.id_base = self.next_id;
        self.reshaped = false;
    }

    /// Left rotation at `id`, with no trace and no color repair.
    pub fn rotate_left(&mut self, id: NodeId) -> Result<()> {
        self.rotate_manual(id, Side::Left)
    }

    /// Right rotation at `id`, with no trace and no color repair.
    pub fn rotate_right(&mut self, id: NodeId) -> Result<()> {
        self.rotate_manual(id, Side::Right)
    }

    fn rotate_manual(&mut self, id: NodeId, toward: Side) -> Result<()> {
        let index = self.index_of(id)?;
        rotate(&mut self.store, &mut self.root, index, toward)?;
        self.reshaped = true;
        debug!(node = %id, toward = %toward, "manual rotation");
        Ok(())
    }

    fn index_of(&self, id: NodeId) -> Result<usize> {
        id.0.checked_sub(self.id_base)
            .and_then(|offset| usize::try_from(offset).ok())
            .filter(|&index| index < self.store.len() && self.store.id(index) == id)
            .ok_or(TreeError::UnknownNode(id))
    }

    /// Allocate a detached red node with the next id.
    pub(crate) fn allocate(&mut self, value: K) -> usize {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.store.create_node(id, value)
    }
}

impl<K: Ord> RbTree<K> {
    pub fn find(&self, value: &K) -> Option<NodeId> {
        self.view().find(value).map(|node| node.id())
    }

    pub fn contains(&self, value: &K) -> bool {
        self.view().find(value).is_some()
    }

    /// Check the live tree against the full red-black invariant set.
    pub fn validate(&self) -> std::result::Result<usize, InvariantViolation> {
        self.view().validate()
    }
}

impl<K: Ord + Clone + Display> RbTree<K> {
    /// Insert `value` and return the trace of every step taken.
    ///
    /// Inserting a value that is already present changes nothing; the trace
    /// then holds a single acknowledgment step.
    pub fn insert(&mut self, value: K) -> Trace<K> {
        let recorder = TraceRecorder::new(self.recorder);
        self.insert_with(value, recorder).0
    }

    /// Insert without recording, for bulk loads. Returns whether the value
    /// was new.
    pub fn insert_untraced(&mut self, value: K) -> bool {
        let recorder = TraceRecorder::new(RecorderConfig::disabled());
        self.insert_with(value, recorder).1
    }

    fn insert_with(&mut self, value: K, mut recorder: TraceRecorder<K>) -> (Trace<K>, bool) {
        let (trace, inserted) = match self.place(value) {
            Placement::Root(node) => {
                debug!(node = %self.store.id(node), "inserted root");
                let kind = StepKind::RootInserted {
                    value: self.store.value(node).clone(),
                };
                (recorder.finish(&self.store, self.root, kind), true)
            }
            Placement::Duplicate(existing) => {
                debug!(node = %self.store.id(existing), "duplicate insert ignored");
                let kind = StepKind::Duplicate {
                    value: self.store.value(existing).clone(),
                };
                (recorder.finish(&self.store, self.root, kind), false)
            }
            Placement::Child { node, parent } => {
                debug!(
                    node = %self.store.id(node),
                    parent = %self.store.id(parent),
                    "placed leaf"
                );
                let kind = StepKind::Placed {
                    value: self.store.value(node).clone(),
                    parent: self.store.value(parent).clone(),
                };
                recorder.record(&self.store, self.root, kind);
                self.fix_insert(node, &mut recorder);
                (recorder.finish(&self.store, self.root, StepKind::Complete), true)
            }
        };

        if cfg!(debug_assertions) {
            self.assert_consistent();
        }

        (trace, inserted)
    }

    /// Panic if the engine left the tree broken.
    fn assert_consistent(&self) {
        let checked = if self.reshaped {
            self.view().validate_structure()
        } else {
            self.view().validate().map(|_| ())
        };
        if let Err(violation) = checked {
            panic!("tree invariant broken after insert: {violation}");
        }
    }
}

impl<K: Ord + Clone + Display> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, values: I) {
        for value in values {
            self.insert_untraced(value);
        }
    }
}

impl<K: Ord + Clone + Display> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}
