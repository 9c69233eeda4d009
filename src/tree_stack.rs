/*
Stack based traversals.

Each function mirrors its recursive counterpart in tree.rs, but keeps the pending work on a
heap-allocated Vec instead of the call stack. Auxiliary space is bounded by tree height,
so degenerate (list-like) trees of any depth are fine.

The stack holds plain `&TreeNode<T>` borrows: the tree is only read, never restructured.
 */
use tracing::instrument;

use crate::tree::TreeNode;

impl<T> TreeNode<T> {
    /// Number of nodes, counted with an explicit stack.
    #[instrument(level = "trace", skip(self))]
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        count
    }
}

/// Node, left subtree, right subtree.
///
/// Right child is pushed first so the left subtree is popped (visited) first.
pub fn preorder_iterative<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    let mut out = Vec::new();
    let mut stack: Vec<&TreeNode<T>> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        out.push(node.value.clone());
        stack.extend(node.right.as_deref());
        stack.extend(node.left.as_deref());
    }

    out
}

/// Left subtree, node, right subtree.
///
/// Walks down the left spine pushing every node; a popped node is emitted and the walk
/// continues with its right subtree.
pub fn inorder_iterative<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    let mut out = Vec::new();
    let mut stack: Vec<&TreeNode<T>> = Vec::new();
    let mut current = root;

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left.as_deref();
        }
        match stack.pop() {
            Some(node) => {
                out.push(node.value.clone());
                current = node.right.as_deref();
            }
            None => break,
        }
    }

    out
}

/// Left subtree, right subtree, node.
///
/// Every node is pushed twice: first unexpanded, then (after its children were scheduled)
/// marked as expanded, at which point it is emitted.
pub fn postorder_iterative<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<T> {
    let mut out = Vec::new();
    let mut stack: Vec<(&TreeNode<T>, bool)> = root.into_iter().map(|node| (node, false)).collect();

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            out.push(node.value.clone());
        } else {
            stack.push((node, true));
            stack.extend(node.right.as_deref().map(|child| (child, false)));
            stack.extend(node.left.as_deref().map(|child| (child, false)));
        }
    }

    out
}
