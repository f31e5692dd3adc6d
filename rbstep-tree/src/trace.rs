//! Step traces.
//!
//! A [`Trace`] is the ordered list of [`Snapshot`]s produced by one insert.
//! Every snapshot owns a deep copy of the tree as it stood at that step, so
//! a consumer can replay or inspect any step while the live tree keeps
//! changing.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::node::{Link, Node, NodeStore, Side};
use crate::view::{NodeRef, TreeView};

/// What happened at a recorded step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind<K> {
    /// The value became the root of an empty tree.
    RootInserted { value: K },
    /// The value was attached as a red leaf, before any fixup.
    Placed { value: K, parent: K },
    /// Red uncle: parent and uncle turned black, grandparent red.
    Recolor { parent: K, uncle: K, grandparent: K },
    /// Inner grandchild: about to rotate the parent.
    Triangle { toward: Side, pivot: K },
    /// Outer grandchild: about to recolor and rotate the grandparent.
    Line { toward: Side, pivot: K },
    /// A rotation finished.
    Rotated { toward: Side },
    /// Fixup is done and the tree is settled.
    Complete,
    /// The value was already present; nothing changed.
    Duplicate { value: K },
}

impl<K: fmt::Display> fmt::Display for StepKind<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::RootInserted { value } => write!(f, "Inserted {value} as root (black)"),
            StepKind::Placed { value, parent } => write!(f, "Placed {value} as child of {parent}"),
            StepKind::Recolor {
                parent,
                uncle,
                grandparent,
            } => write!(
                f,
                "Recoloring: {parent} & {uncle} black, {grandparent} red"
            ),
            StepKind::Triangle { toward, pivot } => {
                write!(f, "Triangle case: rotate {toward} on {pivot}")
            }
            StepKind::Line { toward, pivot } => {
                write!(f, "Line case: rotate {toward} on {pivot} and recolor")
            }
            StepKind::Rotated { toward } => write!(f, "After {toward} rotation"),
            StepKind::Complete => f.write_str("Insertion complete"),
            StepKind::Duplicate { value } => {
                write!(f, "{value} is already present, nothing inserted")
            }
        }
    }
}

/// One recorded step: what happened, and an independent copy of the tree
/// right after it happened.
#[derive(Debug, Clone)]
pub struct Snapshot<K> {
    kind: StepKind<K>,
    message: String,
    nodes: Vec<Node<K>>,
    root: Link,
}

impl<K> Snapshot<K> {
    pub fn kind(&self) -> &StepKind<K> {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree(&self) -> TreeView<'_, K> {
        TreeView::new(&self.nodes, self.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.tree().root()
    }
}

impl<K: Clone + fmt::Display> Snapshot<K> {
    /// Deep-copy the tree under `root` into a fresh arena.
    ///
    /// Ids, values and colors are preserved; parent links point into the
    /// copy.
    fn capture(store: &NodeStore<K>, root: Link, kind: StepKind<K>) -> Self {
        let mut nodes: Vec<Node<K>> = Vec::with_capacity(store.len());
        let mut pending: Vec<(usize, Option<(usize, Side)>)> =
            root.map(|root| (root, None)).into_iter().collect();

        while let Some((source, attach)) = pending.pop() {
            let live = store.node(source);
            let copy = nodes.len();
            let mut node = Node::new(live.id, live.value.clone());
            node.color = live.color;
            if let Some((parent, side)) = attach {
                node.parent = Some(parent);
                *nodes[parent].child_mut(side) = Some(copy);
            }
            nodes.push(node);

            if let Some(right) = live.right {
                pending.push((right, Some((copy, Side::Right))));
            }
            if let Some(left) = live.left {
                pending.push((left, Some((copy, Side::Left))));
            }
        }

        let message = kind.to_string();
        Self {
            kind,
            message,
            root: root.map(|_| 0),
            nodes,
        }
    }
}

/// The ordered steps of one insert.
#[derive(Debug, Clone)]
pub struct Trace<K> {
    steps: Vec<Snapshot<K>>,
    dropped: usize,
}

impl<K> Default for Trace<K> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            dropped: 0,
        }
    }
}

impl<K> Trace<K> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot<K>> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Snapshot<K>> {
        self.steps.first()
    }

    /// The settled state after the insert.
    pub fn last(&self) -> Option<&Snapshot<K>> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<K>> {
        self.steps.iter()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(Snapshot::message)
    }

    /// Intermediate steps left out because of a step cap.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<K> Index<usize> for Trace<K> {
    type Output = Snapshot<K>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

impl<'a, K> IntoIterator for &'a Trace<K> {
    type Item = &'a Snapshot<K>;
    type IntoIter = std::slice::Iter<'a, Snapshot<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<K> IntoIterator for Trace<K> {
    type Item = Snapshot<K>;
    type IntoIter = std::vec::IntoIter<Snapshot<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// How much of each insert is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Record snapshots at all. Disabled inserts return empty traces.
    pub enabled: bool,
    /// Upper bound on snapshots per insert, final step included. Values
    /// below one are treated as one.
    pub max_steps: Option<usize>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_steps: None,
        }
    }
}

impl RecorderConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_steps: None,
        }
    }

    pub fn capped(max_steps: usize) -> Self {
        Self {
            enabled: true,
            max_steps: Some(max_steps),
        }
    }
}

/// Accumulates the trace of one insert.
pub(crate) struct TraceRecorder<K> {
    config: RecorderConfig,
    trace: Trace<K>,
}

impl<K: Clone + fmt::Display> TraceRecorder<K> {
    pub(crate) fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            trace: Trace::default(),
        }
    }

    /// Record an intermediate step.
    ///
    /// Under a step cap the last slot is kept free for [`finish`](Self::finish).
    pub(crate) fn record(&mut self, store: &NodeStore<K>, root: Link, kind: StepKind<K>) {
        if !self.config.enabled {
            return;
        }
        if let Some(max_steps) = self.config.max_steps {
            if self.trace.steps.len() + 1 >= max_steps.max(1) {
                self.trace.dropped += 1;
                return;
            }
        }
        self.push(store, root, kind);
    }

    /// Record the settled state and hand back the trace.
    pub(crate) fn finish(mut self, store: &NodeStore<K>, root: Link, kind: StepKind<K>) -> Trace<K> {
        if !self.config.enabled {
            return self.trace;
        }
        self.push(store, root, kind);
        if self.trace.dropped > 0 {
            warn!(
                dropped = self.trace.dropped,
                kept = self.trace.steps.len(),
                "step cap reached, intermediate steps were not recorded"
            );
        }
        self.trace
    }

    fn push(&mut self, store: &NodeStore<K>, root: Link, kind: StepKind<K>) {
        let snapshot = Snapshot::capture(store, root, kind);
        trace!(
            step = self.trace.steps.len(),
            nodes = snapshot.nodes.len(),
            message = %snapshot.message,
            "recorded snapshot"
        );
        self.trace.steps.push(snapshot);
    }
}
