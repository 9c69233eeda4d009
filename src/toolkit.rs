use tracing::instrument;

use crate::config::Settings;
use crate::dp::{self, DpStrategy};
use crate::errors::PatternResult;
use crate::tree::{self, Order, Strategy, Traversal, TreeNode};
use crate::window::{self, Aggregate};

/// Entry point that applies configured default strategies to the free functions.
///
/// Holds nothing but the settings: every call allocates its own auxiliary structures, so a
/// `Toolkit` can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    settings: Settings,
}

impl Toolkit {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn traversal_strategy(&self) -> Strategy {
        self.settings.traversal.strategy
    }

    pub fn dp_strategy(&self) -> DpStrategy {
        self.settings.dp.strategy
    }

    pub fn aggregate(&self) -> Aggregate {
        self.settings.window.aggregate
    }

    pub fn traverse<T: Clone>(&self, root: Option<&TreeNode<T>>, order: Order) -> Traversal<T> {
        tree::traverse(root, order, self.traversal_strategy())
    }

    pub fn fibonacci(&self, n: i64) -> PatternResult<u128> {
        dp::fibonacci(n, self.dp_strategy())
    }

    pub fn climb_stairs(&self, n: i64) -> PatternResult<u128> {
        dp::climb_stairs(n, self.dp_strategy())
    }

    pub fn house_robber(&self, values: &[i64]) -> PatternResult<i64> {
        dp::house_robber(values, self.dp_strategy())
    }

    pub fn knapsack(&self, weights: &[i64], values: &[i64], capacity: i64) -> PatternResult<i64> {
        dp::knapsack(weights, values, capacity, self.dp_strategy())
    }

    /// Largest configured aggregate over all windows of `k` elements.
    #[instrument(level = "debug", skip(self, seq), fields(len = seq.len()))]
    pub fn best_window(&self, seq: &[i64], k: usize) -> PatternResult<i64> {
        window::max_window(seq, k, self.aggregate())
    }
}
