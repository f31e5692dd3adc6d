//! Subtree rotation.
//!
//! The same primitive serves the insertion fixup and manual rotation
//! requests. It rewires shape and parent links only; colors are untouched
//! and red-black invariants are neither checked nor repaired.

use crate::error::{Result, TreeError};
use crate::node::{Link, NodeStore, Side};

/// Rotate the subtree rooted at `node` toward `toward`, returning the index
/// of the pivot that replaces it.
///
/// ```text
///        P                          P
///        |                          |
///        N       rotate left        X
///       / \     ------------>      / \
///      A   X                      N   C
///         / \                    / \
///        B   C                  A   B
/// ```
///
/// A right rotation is the mirror image. When `node` is the root, `root`
/// is retargeted to the pivot. Fails without mutating anything when `node`
/// has no child on the side opposite `toward`.
pub(crate) fn rotate<K>(
    store: &mut NodeStore<K>,
    root: &mut Link,
    node: usize,
    toward: Side,
) -> Result<usize> {
    let away = toward.opposite();
    let Some(pivot) = store.child(node, away) else {
        return Err(TreeError::InvalidRotation {
            node: store.id(node),
            side: toward,
        });
    };

    // B moves across from the pivot to N.
    let inner = store.child(pivot, toward);
    store.set_child(node, away, inner);
    if let Some(inner) = inner {
        store.set_parent(inner, Some(node));
    }

    let parent = store.parent(node);
    store.set_parent(pivot, parent);
    match parent {
        None => *root = Some(pivot),
        Some(parent) => {
            let side = store.side_in_parent(node, parent);
            store.set_child(parent, side, Some(pivot));
        }
    }

    store.set_child(pivot, toward, Some(node));
    store.set_parent(node, Some(pivot));

    Ok(pivot)
}
