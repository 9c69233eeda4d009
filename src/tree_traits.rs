use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::tree::TreeNode;

/// Placeholder label for a missing child next to a present sibling.
pub const ABSENT: &str = "·";

pub trait TreeConvert {
    fn to_termtree(&self) -> Tree<String>;
}

impl<T: Display> TreeConvert for TreeNode<T> {
    /// Renders the tree for diagnostics. Recursive: meant for trees small enough to print.
    #[instrument(level = "trace", skip(self))]
    fn to_termtree(&self) -> Tree<String> {
        let root = self.value.to_string();
        if self.is_leaf() {
            return Tree::new(root);
        }

        // Both slots are shown once a node has any child, so left and right stay distinguishable
        let leaves: Vec<_> = [self.left.as_deref(), self.right.as_deref()]
            .into_iter()
            .map(|child| match child {
                Some(node) => node.to_termtree(),
                None => Tree::new(ABSENT.to_string()),
            })
            .collect();

        Tree::new(root).with_leaves(leaves)
    }
}
