//! Algorithmic pattern toolkit.
//!
//! Four independent pattern families behind plain function calls:
//! - [`tree`], [`tree_stack`], [`tree_queue`]: binary tree traversals, recursive and with
//!   explicit stack/queue
//! - [`window`]: fixed and variable sliding windows
//! - [`two_pointer`]: opposite-direction, slow/fast and Floyd cycle scans
//! - [`dp`]: memoized, tabulated and rolling forms of a fixed problem catalogue
//!
//! All functions are pure and synchronous. Auxiliary state (stacks, queues, frequency maps,
//! memo tables) is created per call, so independent calls may run concurrently.

pub mod config;
pub mod dp;
pub mod errors;
pub mod toolkit;
pub mod tree;
pub mod tree_queue;
pub mod tree_stack;
pub mod tree_traits;
pub mod two_pointer;
pub mod util;
pub mod window;

pub use config::Settings;
pub use errors::{PatternError, PatternResult};
pub use toolkit::Toolkit;
pub use tree::{traverse, Order, Strategy, Traversal, TreeNode};
pub use tree_traits::TreeConvert;
