//! Sliding window scans over finite sequences.
//!
//! Fixed windows slide a range of exactly `k` elements one step at a time, updating a running
//! aggregate instead of recomputing it. Variable windows grow the right boundary every step and
//! shrink the left boundary while the window violates its constraint; each left step is paid
//! for by an earlier right step, so every scan is amortized O(n).
//!
//! Window sums are accumulated in `i128`, so no intermediate step can overflow. A fixed window
//! whose sum does not fit into `i64` is reported as invalid input.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::{PatternError, PatternResult};

/// Aggregate computed for every fixed-size window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    #[default]
    Sum,
    Max,
    Min,
}

/// Occurrence counts of the symbols currently inside a variable window.
struct WindowState<'a, T: Hash + Eq> {
    counts: HashMap<&'a T, usize>,
    left: usize,
}

impl<'a, T: Hash + Eq> WindowState<'a, T> {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
            left: 0,
        }
    }

    /// Records `item` entering at the right boundary, returns its new count.
    fn enter(&mut self, item: &'a T) -> usize {
        let count = self.counts.entry(item).or_insert(0);
        *count += 1;
        *count
    }

    /// Drops the item at the left boundary and advances it.
    fn leave(&mut self, seq: &'a [T]) {
        let item = &seq[self.left];
        if let Some(count) = self.counts.get_mut(item) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(item);
            }
        }
        self.left += 1;
    }

    fn distinct(&self) -> usize {
        self.counts.len()
    }

    fn count(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }
}

fn check_fixed(operation: &'static str, len: usize, k: usize) -> PatternResult<()> {
    if k == 0 {
        warn!(operation, "window size 0 rejected");
        return Err(PatternError::invalid(operation, "window size must be at least 1"));
    }
    if len < k {
        debug!(operation, len, k, "sequence shorter than window");
        return Err(PatternError::InsufficientInput { len, window: k });
    }
    Ok(())
}

fn check_non_negative(operation: &'static str, seq: &[i64]) -> PatternResult<()> {
    match seq.iter().position(|&x| x < 0) {
        Some(idx) => {
            warn!(operation, idx, "negative element rejected");
            Err(PatternError::invalid(
                operation,
                format!("element {idx} is negative ({})", seq[idx]),
            ))
        }
        None => Ok(()),
    }
}

/// Calls `emit` with the aggregate of every window of size `k`, left to right.
/// Assumes `1 <= k <= seq.len()`.
fn scan_fixed(
    operation: &'static str,
    seq: &[i64],
    k: usize,
    aggregate: Aggregate,
    mut emit: impl FnMut(i64),
) -> PatternResult<()> {
    match aggregate {
        Aggregate::Sum => {
            let mut sum: i128 = 0;
            for (right, &x) in seq.iter().enumerate() {
                sum += i128::from(x);
                if right >= k {
                    sum -= i128::from(seq[right - k]);
                }
                if right + 1 >= k {
                    let start = right + 1 - k;
                    let value = i64::try_from(sum).map_err(|_| {
                        warn!(operation, start, "window sum out of range");
                        PatternError::invalid(
                            operation,
                            format!("sum of window starting at {start} exceeds i64 ({sum})"),
                        )
                    })?;
                    emit(value);
                }
            }
        }
        Aggregate::Max | Aggregate::Min => {
            // Candidate indices; values are monotonic front to back, front is the extremum
            let dominated = |kept: i64, incoming: i64| match aggregate {
                Aggregate::Max => kept <= incoming,
                _ => kept >= incoming,
            };
            let mut candidates: VecDeque<usize> = VecDeque::with_capacity(k);
            for (right, &x) in seq.iter().enumerate() {
                while candidates.back().is_some_and(|&back| dominated(seq[back], x)) {
                    candidates.pop_back();
                }
                candidates.push_back(right);
                if candidates.front().is_some_and(|&front| front + k <= right) {
                    candidates.pop_front();
                }
                if right + 1 >= k {
                    if let Some(&front) = candidates.front() {
                        emit(seq[front]);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Aggregate of every window of exactly `k` elements, one entry per window start.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn window_aggregates(
    seq: &[i64],
    k: usize,
    aggregate: Aggregate,
) -> PatternResult<Vec<i64>> {
    check_fixed("window_aggregates", seq.len(), k)?;
    let mut out = Vec::with_capacity(seq.len() + 1 - k);
    scan_fixed("window_aggregates", seq, k, aggregate, |value| out.push(value))?;
    Ok(out)
}

/// Largest aggregate over all windows of exactly `k` elements, in a single pass.
///
/// `Sum` yields the maximum window sum, `Max` the largest window maximum and `Min` the
/// largest window minimum. A sequence shorter than `k` reports `InsufficientInput`.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn max_window(seq: &[i64], k: usize, aggregate: Aggregate) -> PatternResult<i64> {
    check_fixed("max_window", seq.len(), k)?;
    let mut best = i64::MIN;
    scan_fixed("max_window", seq, k, aggregate, |value| best = best.max(value))?;
    debug!(best, "max_window done");
    Ok(best)
}

/// Smallest aggregate over all windows of exactly `k` elements, in a single pass.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn min_window(seq: &[i64], k: usize, aggregate: Aggregate) -> PatternResult<i64> {
    check_fixed("min_window", seq.len(), k)?;
    let mut best = i64::MAX;
    scan_fixed("min_window", seq, k, aggregate, |value| best = best.min(value))?;
    debug!(best, "min_window done");
    Ok(best)
}

/// Number of distinct symbols in every window of exactly `k` elements.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn distinct_counts<T: Hash + Eq>(seq: &[T], k: usize) -> PatternResult<Vec<usize>> {
    check_fixed("distinct_counts", seq.len(), k)?;
    let mut state = WindowState::new();
    let mut out = Vec::with_capacity(seq.len() + 1 - k);
    for (right, item) in seq.iter().enumerate() {
        state.enter(item);
        if right >= k {
            state.leave(seq);
        }
        if right + 1 >= k {
            out.push(state.distinct());
        }
    }
    Ok(out)
}

/// Length of the shortest contiguous run whose sum is at least `target`.
///
/// Elements must be non-negative, otherwise shrinking could skip valid windows.
/// Returns `None` when no run qualifies.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn shortest_subarray_with_sum_at_least(
    seq: &[i64],
    target: i64,
) -> PatternResult<Option<usize>> {
    check_non_negative("shortest_subarray_with_sum_at_least", seq)?;

    let target = i128::from(target);
    let mut best: Option<usize> = None;
    let mut sum: i128 = 0;
    let mut left = 0;
    for (right, &x) in seq.iter().enumerate() {
        sum += i128::from(x);
        while left <= right && sum >= target {
            let len = right + 1 - left;
            best = Some(best.map_or(len, |b| b.min(len)));
            sum -= i128::from(seq[left]);
            left += 1;
        }
    }

    debug!(?best, "shortest window");
    Ok(best)
}

/// Length of the longest contiguous run whose sum does not exceed `limit`; 0 if none.
///
/// Elements must be non-negative.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn longest_subarray_with_sum_at_most(seq: &[i64], limit: i64) -> PatternResult<usize> {
    check_non_negative("longest_subarray_with_sum_at_most", seq)?;

    let limit = i128::from(limit);
    let mut best = 0;
    let mut sum: i128 = 0;
    let mut left = 0;
    for (right, &x) in seq.iter().enumerate() {
        sum += i128::from(x);
        while left <= right && sum > limit {
            sum -= i128::from(seq[left]);
            left += 1;
        }
        best = best.max(right + 1 - left);
    }

    debug!(best, "longest window");
    Ok(best)
}

/// Length of the longest contiguous run with at most `k` distinct symbols; 0 if none.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn longest_with_at_most_k_distinct<T: Hash + Eq>(seq: &[T], k: usize) -> usize {
    let mut state = WindowState::new();
    let mut best = 0;
    for (right, item) in seq.iter().enumerate() {
        state.enter(item);
        while state.distinct() > k {
            state.leave(seq);
        }
        best = best.max(right + 1 - state.left);
    }
    debug!(best, "longest window");
    best
}

/// Character variant of [`longest_with_at_most_k_distinct`]; lengths count chars, not bytes.
pub fn longest_substring_k_distinct(s: &str, k: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    longest_with_at_most_k_distinct(&chars, k)
}

/// Length of the longest contiguous run in which no symbol repeats.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn longest_without_repeats<T: Hash + Eq>(seq: &[T]) -> usize {
    let mut state = WindowState::new();
    let mut best = 0;
    for (right, item) in seq.iter().enumerate() {
        state.enter(item);
        while state.count(item) > 1 {
            state.leave(seq);
        }
        best = best.max(right + 1 - state.left);
    }
    best
}

/// Character variant of [`longest_without_repeats`].
pub fn longest_substring_without_repeats(s: &str) -> usize {
    let chars: Vec<char> = s.chars().collect();
    longest_without_repeats(&chars)
}
