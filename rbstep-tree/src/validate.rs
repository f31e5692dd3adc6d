//! Red-black invariant checks.
//!
//! Used by tests, by consumers that want to confirm a recorded step, and by
//! the engine itself after every insert in debug builds.

use crate::node::NodeId;
use crate::view::TreeView;

/// A broken tree invariant, naming the node where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("node {node} has a parent link that does not match its position")]
    BrokenParentLink { node: NodeId },

    #[error("node {node} is out of search order")]
    OutOfOrder { node: NodeId },

    #[error("root {0} is red")]
    RedRoot(NodeId),

    #[error("red node {parent} has red child {child}")]
    RedRed { parent: NodeId, child: NodeId },

    #[error("black height differs below node {node}: {left} on the left, {right} on the right")]
    BlackHeight {
        node: NodeId,
        left: usize,
        right: usize,
    },
}

impl<K: Ord> TreeView<'_, K> {
    /// Check parent links and strict search order.
    ///
    /// These hold for any tree the engine produces, including one reshaped
    /// by manual rotations.
    pub fn validate_structure(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root_index() {
            let node = self.raw(root);
            if node.parent.is_some() {
                return Err(InvariantViolation::BrokenParentLink { node: node.id });
            }
        }

        for index in self.pre_order_indices() {
            let node = self.raw(index);
            for child in [node.left, node.right].into_iter().flatten() {
                let child = self.raw(child);
                if child.parent != Some(index) {
                    return Err(InvariantViolation::BrokenParentLink { node: child.id });
                }
            }
        }

        let order = self.in_order_indices();
        for pair in order.windows(2) {
            let (prev, next) = (self.raw(pair[0]), self.raw(pair[1]));
            if prev.value >= next.value {
                return Err(InvariantViolation::OutOfOrder { node: next.id });
            }
        }

        Ok(())
    }

    /// Check the full red-black invariant set and return the black height
    /// of the root (black nodes on any root-to-leaf path, null leaves not
    /// counted; zero for an empty tree).
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        self.validate_structure()?;

        let Some(root) = self.root_index() else {
            return Ok(0);
        };
        if self.raw(root).color.is_red() {
            return Err(InvariantViolation::RedRoot(self.raw(root).id));
        }

        // Pre-order reversed visits children before their parent.
        let order = self.pre_order_indices();
        let mut black_height = vec![0usize; order.iter().max().map_or(0, |max| max + 1)];
        for &index in order.iter().rev() {
            let node = self.raw(index);
            let below = |child: Option<usize>| child.map_or(0, |child| black_height[child]);
            let (left, right) = (below(node.left), below(node.right));
            if left != right {
                return Err(InvariantViolation::BlackHeight {
                    node: node.id,
                    left,
                    right,
                });
            }

            if node.color.is_red() {
                for child in [node.left, node.right].into_iter().flatten() {
                    let child = self.raw(child);
                    if child.color.is_red() {
                        return Err(InvariantViolation::RedRed {
                            parent: node.id,
                            child: child.id,
                        });
                    }
                }
            }

            black_height[index] = left + usize::from(node.color.is_black());
        }

        Ok(black_height[root])
    }
}
