//! Read-only views over a tree arena.
//!
//! The live tree and every snapshot expose their shape through the same
//! [`TreeView`] / [`NodeRef`] pair, so a consumer renders or inspects a
//! recorded step exactly like the settled tree.

use std::cmp::Ordering;

use serde::Serialize;

use crate::node::{Color, Link, Node, NodeId, Side};

/// Borrowed, read-only view of one tree.
#[derive(Debug)]
pub struct TreeView<'a, K> {
    nodes: &'a [Node<K>],
    root: Link,
}

impl<K> Clone for TreeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for TreeView<'_, K> {}

impl<'a, K> TreeView<'a, K> {
    pub(crate) fn new(nodes: &'a [Node<K>], root: Link) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> Option<NodeRef<'a, K>> {
        self.root.map(|index| self.at(index))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.pre_order_indices().len()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<usize> = self.root.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&index| [self.nodes[index].left, self.nodes[index].right])
                .flatten()
                .collect();
        }
        height
    }

    /// Look up a node by identity.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'a, K>> {
        self.pre_order_indices()
            .into_iter()
            .find(|&index| self.nodes[index].id == id)
            .map(|index| self.at(index))
    }

    pub fn pre_order(&self) -> Vec<&'a K> {
        self.values(self.pre_order_indices())
    }

    pub fn in_order(&self) -> Vec<&'a K> {
        self.values(self.in_order_indices())
    }

    pub fn post_order(&self) -> Vec<&'a K> {
        // Node, right, left reversed is left, right, node.
        let mut order = Vec::new();
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].left);
            stack.extend(self.nodes[index].right);
        }
        order.reverse();
        self.values(order)
    }

    /// Every reachable node, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a, K>> + '_ {
        self.pre_order_indices()
            .into_iter()
            .map(move |index| self.at(index))
    }

    pub(crate) fn pre_order_indices(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].right);
            stack.extend(self.nodes[index].left);
        }
        order
    }

    pub(crate) fn in_order_indices(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(index) = current {
                stack.push(index);
                current = self.nodes[index].left;
            }
            let Some(index) = stack.pop() else {
                break;
            };
            order.push(index);
            current = self.nodes[index].right;
        }
        order
    }

    pub(crate) fn raw(&self, index: usize) -> &'a Node<K> {
        &self.nodes[index]
    }

    pub(crate) fn root_index(&self) -> Link {
        self.root
    }

    fn at(&self, index: usize) -> NodeRef<'a, K> {
        NodeRef {
            nodes: self.nodes,
            index,
        }
    }

    fn values(&self, order: Vec<usize>) -> Vec<&'a K> {
        order
            .into_iter()
            .map(|index| &self.nodes[index].value)
            .collect()
    }
}

impl<'a, K: Ord> TreeView<'a, K> {
    /// Ordered search for `value`.
    pub fn find(&self, value: &K) -> Option<NodeRef<'a, K>> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(self.at(index)),
            };
        }
        None
    }
}

impl<K: Clone> TreeView<'_, K> {
    /// Owned nested copy of the tree, for serialization.
    pub fn to_nested(&self) -> Option<NestedNode<K>> {
        self.root().map(|root| root.to_nested())
    }
}

/// Read-only handle to one node of a [`TreeView`].
#[derive(Debug)]
pub struct NodeRef<'a, K> {
    nodes: &'a [Node<K>],
    index: usize,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    pub fn id(&self) -> NodeId {
        self.node().id
    }

    pub fn value(&self) -> &'a K {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.child(Side::Right)
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, K>> {
        self.node().child(side).map(|index| self.at(index))
    }

    /// The node holding this one as a child, absent for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.node().parent.map(|index| self.at(index))
    }

    fn node(&self) -> &'a Node<K> {
        &self.nodes[self.index]
    }

    fn at(&self, index: usize) -> NodeRef<'a, K> {
        NodeRef {
            nodes: self.nodes,
            index,
        }
    }
}

impl<K: Clone> NodeRef<'_, K> {
    /// Owned nested copy of the subtree rooted here.
    pub fn to_nested(&self) -> NestedNode<K> {
        NestedNode {
            id: self.id(),
            value: self.value().clone(),
            color: self.color(),
            left: self.left().map(|left| Box::new(left.to_nested())),
            right: self.right().map(|right| Box::new(right.to_nested())),
        }
    }
}

/// Owned, nested form of a subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedNode<K> {
    pub id: NodeId,
    pub value: K,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<NestedNode<K>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<NestedNode<K>>>,
}
