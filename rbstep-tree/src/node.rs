//! Node storage.
//!
//! Nodes live in an arena and refer to each other by arena index. A node's
//! identity ([`NodeId`]) is separate from its index so that snapshot copies,
//! which are laid out in their own compact arenas, keep the identity of the
//! live node they were copied from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Red-Black tree node color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Check if the color is red
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Check if the color is black
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// A child slot, or the direction of a rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The mirrored side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Stable node identity.
///
/// Assigned once when a value enters the tree and carried unchanged into
/// every snapshot copy of that node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena index of a related node, absent for a null leaf.
pub(crate) type Link = Option<usize>;

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) id: NodeId,
    pub(crate) value: K,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<K> Node<K> {
    /// A detached red node.
    pub(crate) fn new(id: NodeId, value: K) -> Self {
        Self {
            id,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Owns the nodes of one tree.
///
/// Indexing with an index the store never handed out is an engine bug and
/// panics.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<K> {
    nodes: Vec<Node<K>>,
}

impl<K> NodeStore<K> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn nodes(&self) -> &[Node<K>] {
        &self.nodes
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Allocate a red node with no relations and return its index.
    pub(crate) fn create_node(&mut self, id: NodeId, value: K) -> usize {
        self.nodes.push(Node::new(id, value));
        self.nodes.len() - 1
    }

    pub(crate) fn node(&self, index: usize) -> &Node<K> {
        &self.nodes[index]
    }

    pub(crate) fn id(&self, index: usize) -> NodeId {
        self.nodes[index].id
    }

    pub(crate) fn value(&self, index: usize) -> &K {
        &self.nodes[index].value
    }

    pub(crate) fn is_red(&self, index: usize) -> bool {
        self.nodes[index].color.is_red()
    }

    pub(crate) fn set_color(&mut self, index: usize, color: Color) {
        self.nodes[index].color = color;
    }

    pub(crate) fn parent(&self, index: usize) -> Link {
        self.nodes[index].parent
    }

    pub(crate) fn set_parent(&mut self, index: usize, parent: Link) {
        self.nodes[index].parent = parent;
    }

    pub(crate) fn child(&self, index: usize, side: Side) -> Link {
        self.nodes[index].child(side)
    }

    pub(crate) fn set_child(&mut self, index: usize, side: Side, child: Link) {
        *self.nodes[index].child_mut(side) = child;
    }

    /// Which slot of `parent` holds `index`.
    ///
    /// Panics when neither slot does: the parent link is corrupt.
    pub(crate) fn side_in_parent(&self, index: usize, parent: usize) -> Side {
        let node = &self.nodes[parent];
        if node.left == Some(index) {
            Side::Left
        } else if node.right == Some(index) {
            Side::Right
        } else {
            panic!(
                "parent link of node {} points at {}, which does not hold it as a child",
                self.nodes[index].id, node.id
            );
        }
    }
}
