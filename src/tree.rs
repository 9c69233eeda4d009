use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::tree_queue::level_order;
use crate::tree_stack::{inorder_iterative, postorder_iterative, preorder_iterative};

pub type Link<T> = Option<Box<TreeNode<T>>>;

/// Node of an owned binary tree.
///
/// Every node is owned by at most one parent, so the structure is a tree by construction.
/// None of the traversals check for cycles: a structure where a node is reachable twice
/// (only constructible with unsafe code) is a precondition violation.
///
/// Traversals only read `value`; they never restructure the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> TreeNode<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn new(value: T, left: Option<TreeNode<T>>, right: Option<TreeNode<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn with_left(mut self, left: TreeNode<T>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: TreeNode<T>) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T: Clone> TreeNode<T> {
    /// Builds a tree from level-order slots: `slots[0]` is the root, and the next two
    /// slots are consumed as left/right children of every present node, in queue order.
    /// Absent slots (`None`) have no children of their own.
    ///
    /// ```ignore
    /// //      1
    /// //     / \
    /// //    2   3
    /// //     \
    /// //      4
    /// let tree = TreeNode::from_level_order(&[Some(1), Some(2), Some(3), None, Some(4)]);
    /// ```
    pub fn from_level_order(slots: &[Option<T>]) -> Option<Self> {
        let mut slots = slots.iter().cloned();
        let mut root = TreeNode::leaf(slots.next()??);
        {
            let mut queue: VecDeque<&mut TreeNode<T>> = VecDeque::new();
            queue.push_back(&mut root);

            while let Some(node) = queue.pop_front() {
                let TreeNode { left, right, .. } = node;
                *left = slots.next().flatten().map(|v| Box::new(TreeNode::leaf(v)));
                *right = slots.next().flatten().map(|v| Box::new(TreeNode::leaf(v)));
                queue.extend(left.as_deref_mut());
                queue.extend(right.as_deref_mut());
            }
        }
        Some(root)
    }
}

// The derived drop would recurse once per level; unlink children onto a heap stack instead
// so degenerate trees of any depth can be dropped.
impl<T> Drop for TreeNode<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode<T>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Depth-first or breadth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Pre,
    In,
    Post,
    Level,
}

/// How a depth-first order is evaluated. Level order always uses a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Call stack depth equals tree height.
    Recursive,
    /// Heap-allocated auxiliary stack, safe for degenerate trees.
    #[default]
    Iterative,
}

/// Result of a traversal: a flat sequence for depth-first orders, one sequence per depth
/// for level order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traversal<T> {
    Flat(Vec<T>),
    Levels(Vec<Vec<T>>),
}

impl<T> Traversal<T> {
    /// Number of visited values.
    pub fn len(&self) -> usize {
        match self {
            Traversal::Flat(values) => values.len(),
            Traversal::Levels(levels) => levels.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in visiting order; level order is concatenated level by level.
    pub fn into_flat(self) -> Vec<T> {
        match self {
            Traversal::Flat(values) => values,
            Traversal::Levels(levels) => levels.into_iter().flatten().collect(),
        }
    }
}

/// Traverses `root` in the given order. An absent root yields an empty result for every order.
#[instrument(level = "debug", skip(root))]
pub fn traverse<T: Clone>(
    root: Option<&TreeNode<T>>,
    order: Order,
    strategy: Strategy,
) -> Traversal<T> {
    let result = match (order, strategy) {
        (Order::Level, _) => Traversal::Levels(level_order(root)),
        (Order::Pre, Strategy::Recursive) => Traversal::Flat(preorder_recursive(root)),
        (Order::In, Strategy::Recursive) => Traversal::Flat(inorder_recursive(root)),
        (Order::Post, Strategy::Recursive) => Traversal::Flat(postorder_recursive(root)),
        (Order::Pre, Strategy::Iterative) => Traversal::Flat(preorder_iterative(root)),
        (Order::In, Strategy::Iterative) => Traversal::Flat(inorder_iterative(root)),
        (Order::Post, Strategy::Iterative) => Traversal::Flat(postorder_iterative(root)),
    };
    debug!(visited = result.len(), "traversal done");
    result
}

/// Node, left subtree, right subtree.
pub fn preorder_recursive<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    fn walk<T: Clone>(node: &TreeNode<T>, out: &mut Vec<T>) {
        out.push(node.value.clone());
        if let Some(left) = node.left.as_deref() {
            walk(left, out);
        }
        if let Some(right) = node.right.as_deref() {
            walk(right, out);
        }
    }

    let mut out = Vec::new();
    if let Some(node) = root {
        walk(node, &mut out);
    }
    out
}

/// Left subtree, node, right subtree.
pub fn inorder_recursive<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    fn walk<T: Clone>(node: &TreeNode<T>, out: &mut Vec<T>) {
        if let Some(left) = node.left.as_deref() {
            walk(left, out);
        }
        out.push(node.value.clone());
        if let Some(right) = node.right.as_deref() {
            walk(right, out);
        }
    }

    let mut out = Vec::new();
    if let Some(node) = root {
        walk(node, &mut out);
    }
    out
}

/// Left subtree, right subtree, node.
pub fn postorder_recursive<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    fn walk<T: Clone>(node: &TreeNode<T>, out: &mut Vec<T>) {
        if let Some(left) = node.left.as_deref() {
            walk(left, out);
        }
        if let Some(right) = node.right.as_deref() {
            walk(right, out);
        }
        out.push(node.value.clone());
    }

    let mut out = Vec::new();
    if let Some(node) = root {
        walk(node, &mut out);
    }
    out
}
