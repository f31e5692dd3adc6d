//! Ordered placement and red-red repair.
//!
//! The fixup pass is written once against the side of the parent under the
//! grandparent; the mirrored cases fall out of [`Side::opposite`].

use std::cmp::Ordering;
use std::fmt::Display;

use tracing::debug;

use crate::engine::RbTree;
use crate::node::{Color, Side};
use crate::rotate::rotate;
use crate::trace::{StepKind, TraceRecorder};

/// Where an ordered search put a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The tree was empty; the new node is the (black) root.
    Root(usize),
    /// Attached as a red leaf under `parent`.
    Child { node: usize, parent: usize },
    /// An equal value already lives at this index.
    Duplicate(usize),
}

impl<K: Ord + Clone + Display> RbTree<K> {
    /// Attach `value` as a leaf without repairing colors.
    pub(crate) fn place(&mut self, value: K) -> Placement {
        let Some(mut current) = self.root else {
            let node = self.allocate(value);
            self.store.set_color(node, Color::Black);
            self.root = Some(node);
            return Placement::Root(node);
        };

        loop {
            let side = match value.cmp(self.store.value(current)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Placement::Duplicate(current),
            };
            match self.store.child(current, side) {
                Some(next) => current = next,
                None => {
                    let node = self.allocate(value);
                    self.store.set_parent(node, Some(current));
                    self.store.set_child(current, side, Some(node));
                    return Placement::Child {
                        node,
                        parent: current,
                    };
                }
            }
        }
    }

    /// Resolve red-red violations from `node` upward, then blacken the root.
    pub(crate) fn fix_insert(&mut self, mut node: usize, recorder: &mut TraceRecorder<K>) {
        while let Some(parent) = self
            .store
            .parent(node)
            .filter(|&parent| self.store.is_red(parent))
        {
            // A red root only exists after manual rotations; it is
            // blackened below.
            let Some(grandparent) = self.store.parent(parent) else {
                break;
            };
            let side = self.store.side_in_parent(parent, grandparent);
            node = self.resolve(node, parent, grandparent, side, recorder);
        }

        if let Some(root) = self.root {
            if self.store.is_red(root) {
                self.store.set_color(root, Color::Black);
            }
        }
    }

    /// One fixup round for a red `node` under a red `parent` that hangs on
    /// `side` of `grandparent`. Returns the node the loop continues from.
    fn resolve(
        &mut self,
        node: usize,
        parent: usize,
        grandparent: usize,
        side: Side,
        recorder: &mut TraceRecorder<K>,
    ) -> usize {
        let uncle = self
            .store
            .child(grandparent, side.opposite())
            .filter(|&uncle| self.store.is_red(uncle));

        if let Some(uncle) = uncle {
            debug!(
                node = %self.store.id(node),
                grandparent = %self.store.id(grandparent),
                "fixup: recolor"
            );
            self.store.set_color(parent, Color::Black);
            self.store.set_color(uncle, Color::Black);
            self.store.set_color(grandparent, Color::Red);
            let kind = StepKind::Recolor {
                parent: self.store.value(parent).clone(),
                uncle: self.store.value(uncle).clone(),
                grandparent: self.store.value(grandparent).clone(),
            };
            recorder.record(&self.store, self.root, kind);
            return grandparent;
        }

        // Absent and black uncles are handled alike from here on.
        let (mut node, mut parent, mut grandparent) = (node, parent, grandparent);

        if self.store.child(parent, side.opposite()) == Some(node) {
            debug!(node = %self.store.id(node), toward = %side, "fixup: triangle");
            let kind = StepKind::Triangle {
                toward: side,
                pivot: self.store.value(parent).clone(),
            };
            recorder.record(&self.store, self.root, kind);
            node = parent;
            self.rotate_internal(node, side);
            recorder.record(&self.store, self.root, StepKind::Rotated { toward: side });
            parent = self.parent_of(node);
            grandparent = self.parent_of(parent);
        }

        let toward = side.opposite();
        debug!(node = %self.store.id(node), toward = %toward, "fixup: line");
        let kind = StepKind::Line {
            toward,
            pivot: self.store.value(grandparent).clone(),
        };
        recorder.record(&self.store, self.root, kind);
        self.store.set_color(parent, Color::Black);
        self.store.set_color(grandparent, Color::Red);
        self.rotate_internal(grandparent, toward);
        recorder.record(&self.store, self.root, StepKind::Rotated { toward });

        node
    }

    fn rotate_internal(&mut self, node: usize, toward: Side) {
        if let Err(err) = rotate(&mut self.store, &mut self.root, node, toward) {
            panic!("fixup rotation on a node without the required child: {err}");
        }
    }

    fn parent_of(&self, index: usize) -> usize {
        match self.store.parent(index) {
            Some(parent) => parent,
            None => panic!("node {} has no parent during fixup", self.store.id(index)),
        }
    }
}
