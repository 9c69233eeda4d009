use std::collections::VecDeque;

use crate::tree::TreeNode;

impl<T> TreeNode<T> {
    /// Calculates the height of the tree using a breadth-first traversal.
    /// Each element in the queue is a pair (node, depth); a single node has height 1.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        queue.push_back((self, 1)); // (node, depth)

        while let Some((node, depth)) = queue.pop_front() {
            if depth > max_depth {
                max_depth = depth;
            }
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                queue.push_back((child, depth + 1));
            }
        }

        max_depth
    }
}

/// Returns the values grouped by depth, shallowest level first, left to right within a level.
///
/// The FIFO queue is seeded with the root; each round drains exactly the nodes of one level
/// (the queue length at the start of the round) and schedules their children.
pub fn level_order<T: Clone>(root: Option<&TreeNode<T>>) -> Vec<Vec<T>> {
    let mut levels = Vec::new();
    let mut queue: VecDeque<&TreeNode<T>> = root.into_iter().collect();

    while !queue.is_empty() {
        let width = queue.len();
        let mut level = Vec::with_capacity(width);
        for _ in 0..width {
            let Some(node) = queue.pop_front() else { break };
            level.push(node.value.clone());
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        levels.push(level);
    }

    levels
}
