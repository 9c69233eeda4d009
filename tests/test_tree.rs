use proptest::prelude::*;
use rstest::{fixture, rstest};

use algokit::tree::{inorder_recursive, postorder_recursive, preorder_recursive};
use algokit::tree_queue::level_order;
use algokit::tree_stack::{inorder_iterative, postorder_iterative, preorder_iterative};
use algokit::util::testing;
use algokit::tree::Strategy as Walk;
use algokit::{traverse, Order, Traversal, TreeConvert, TreeNode};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

//        F
//      /   \
//     B     G
//    / \     \
//   A   D     I
//      / \   /
//     C   E H
#[fixture]
fn letters() -> TreeNode<char> {
    TreeNode::new(
        'F',
        Some(TreeNode::new(
            'B',
            Some(TreeNode::leaf('A')),
            Some(TreeNode::new('D', Some(TreeNode::leaf('C')), Some(TreeNode::leaf('E')))),
        )),
        Some(TreeNode::new('G', None, Some(TreeNode::new('I', Some(TreeNode::leaf('H')), None)))),
    )
}

/// Degenerate tree: 0 at the root, every further value as left child of the previous one.
fn left_chain(depth: usize) -> TreeNode<usize> {
    let mut node = TreeNode::leaf(depth - 1);
    for value in (0..depth - 1).rev() {
        node = TreeNode::leaf(value).with_left(node);
    }
    node
}

fn right_chain(depth: usize) -> TreeNode<usize> {
    let mut node = TreeNode::leaf(depth - 1);
    for value in (0..depth - 1).rev() {
        node = TreeNode::leaf(value).with_right(node);
    }
    node
}

fn flat(chars: &str) -> Traversal<char> {
    Traversal::Flat(chars.chars().collect())
}

#[rstest]
#[case(Order::Pre, "FBADCEGIH")]
#[case(Order::In, "ABCDEFGHI")]
#[case(Order::Post, "ACEDBHIGF")]
fn test_depth_first_orders(letters: TreeNode<char>, #[case] order: Order, #[case] expected: &str) {
    assert_eq!(traverse(Some(&letters), order, Walk::Recursive), flat(expected));
    assert_eq!(traverse(Some(&letters), order, Walk::Iterative), flat(expected));
}

#[rstest]
fn test_level_order(letters: TreeNode<char>) {
    assert_eq!(
        level_order(Some(&letters)),
        vec![vec!['F'], vec!['B', 'G'], vec!['A', 'D', 'I'], vec!['C', 'E', 'H']]
    );
    assert_eq!(letters.height(), 4);
    assert_eq!(letters.size(), 9);
}

#[rstest]
#[case(Walk::Recursive)]
#[case(Walk::Iterative)]
fn test_absent_root_yields_empty_sequences(#[case] strategy: Walk) {
    assert_eq!(traverse::<char>(None, Order::Pre, strategy), Traversal::Flat(vec![]));
    assert_eq!(traverse::<char>(None, Order::In, strategy), Traversal::Flat(vec![]));
    assert_eq!(traverse::<char>(None, Order::Post, strategy), Traversal::Flat(vec![]));
    assert_eq!(traverse::<char>(None, Order::Level, strategy), Traversal::Levels(vec![]));
}

#[rstest]
fn test_traversal_does_not_modify_tree(letters: TreeNode<char>) {
    let before = letters.clone();
    for order in [Order::Pre, Order::In, Order::Post, Order::Level] {
        traverse(Some(&letters), order, Walk::Iterative);
        traverse(Some(&letters), order, Walk::Recursive);
    }
    assert_eq!(letters, before);
}

#[rstest]
fn test_termtree_rendering(letters: TreeNode<char>) {
    let rendered = letters.to_termtree().to_string();
    println!("{}", rendered);
    assert!(rendered.starts_with('F'));
    assert_eq!(rendered.lines().count(), 11); // 9 nodes plus markers for G.left and I.right
}

#[rstest]
#[case(1_000)]
fn test_recursive_and_iterative_agree_on_degenerate_trees(#[case] depth: usize) {
    for tree in [left_chain(depth), right_chain(depth)] {
        assert_eq!(preorder_recursive(Some(&tree)), preorder_iterative(Some(&tree)));
        assert_eq!(inorder_recursive(Some(&tree)), inorder_iterative(Some(&tree)));
        assert_eq!(postorder_recursive(Some(&tree)), postorder_iterative(Some(&tree)));
    }
}

#[rstest]
fn test_iterative_forms_handle_very_deep_trees() {
    let depth = 200_000;
    let ascending: Vec<usize> = (0..depth).collect();
    let descending: Vec<usize> = (0..depth).rev().collect();

    let tree = left_chain(depth);
    assert_eq!(preorder_iterative(Some(&tree)), ascending);
    assert_eq!(inorder_iterative(Some(&tree)), descending);
    assert_eq!(postorder_iterative(Some(&tree)), descending);
    assert_eq!(level_order(Some(&tree)).len(), depth);
    assert_eq!(tree.height(), depth);
    assert_eq!(tree.size(), depth);
    // dropping `tree` must not recurse per level either
}

fn arb_tree() -> impl Strategy<Value = Option<TreeNode<i32>>> {
    prop::collection::vec(prop::option::weighted(0.8, -50i32..50), 0..80)
        .prop_map(|slots| TreeNode::from_level_order(&slots))
}

proptest! {
    #[test]
    fn prop_recursive_and_iterative_forms_agree(tree in arb_tree()) {
        let root = tree.as_ref();
        prop_assert_eq!(preorder_recursive(root), preorder_iterative(root));
        prop_assert_eq!(inorder_recursive(root), inorder_iterative(root));
        prop_assert_eq!(postorder_recursive(root), postorder_iterative(root));
    }

    #[test]
    fn prop_every_order_visits_every_node_once(tree in arb_tree()) {
        let root = tree.as_ref();
        let size = root.map_or(0, TreeNode::size);
        prop_assert_eq!(preorder_iterative(root).len(), size);
        prop_assert_eq!(inorder_iterative(root).len(), size);
        prop_assert_eq!(postorder_iterative(root).len(), size);
        prop_assert_eq!(size == 0, root.is_none());
    }

    #[test]
    fn prop_level_order_is_a_permutation_of_preorder(tree in arb_tree()) {
        let root = tree.as_ref();
        let mut levels: Vec<i32> = level_order(root).into_iter().flatten().collect();
        let mut pre = preorder_recursive(root);
        levels.sort_unstable();
        pre.sort_unstable();
        prop_assert_eq!(levels, pre);
        prop_assert_eq!(level_order(root).len(), root.map_or(0, TreeNode::height));
    }
}
