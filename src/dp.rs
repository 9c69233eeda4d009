//! Dynamic programming catalogue.
//!
//! Every problem is offered side by side as memoized top-down recursion (`*_memo`) and
//! bottom-up tabulation (`*_tab`), and where the recurrence only looks back a fixed distance,
//! as a rolling-variable reduction (`*_rolling`). All variants of a problem return identical
//! results. Input is validated before any computation; memo tables and DP tables live for
//! exactly one call.
//!
//! The memoized forms recurse once per subproblem along a chain (depth `n`, or the item
//! count for sequences). Callers with very long inputs should use the tabulated forms.
//!
//! The knapsack forms index their tables by capacity: tabulation allocates
//! `(items + 1) x (capacity + 1)` cells and the rolling form `capacity + 1`, so a capacity far
//! beyond the total item weight costs memory in proportion and can exhaust the allocator.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::{PatternError, PatternResult};

/// Largest `n` whose Fibonacci number fits into `u128`.
pub const MAX_FIBONACCI_N: i64 = 186;
/// Largest `n` whose stair count (`fib(n + 1)`) fits into `u128`.
pub const MAX_STAIRS_N: i64 = MAX_FIBONACCI_N - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DpStrategy {
    Memoized,
    Tabulated,
    /// Tabulation keeping only the entries the recurrence still needs.
    #[default]
    Rolling,
}

/// Subproblem results of one top-level call.
struct Memo<K, V> {
    table: HashMap<K, V>,
}

impl<K: Hash + Eq, V: Copy> Memo<K, V> {
    fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.table.get(key).copied()
    }

    fn insert(&mut self, key: K, value: V) -> V {
        self.table.insert(key, value);
        value
    }
}

// ---------------------------------------------------------------------------
// Fibonacci: f(0) = 0, f(1) = 1, f(n) = f(n-1) + f(n-2)
// ---------------------------------------------------------------------------

fn check_fibonacci(n: i64) -> PatternResult<usize> {
    if n < 0 {
        warn!(n, "negative fibonacci index");
        return Err(PatternError::invalid("fibonacci", format!("n must be >= 0, got {n}")));
    }
    if n > MAX_FIBONACCI_N {
        return Err(PatternError::Overflow {
            operation: "fibonacci",
            n,
        });
    }
    Ok(n as usize)
}

pub fn fibonacci_memo(n: i64) -> PatternResult<u128> {
    fn f(n: usize, memo: &mut Memo<usize, u128>) -> u128 {
        if n < 2 {
            return n as u128;
        }
        if let Some(value) = memo.get(&n) {
            return value;
        }
        let value = f(n - 1, memo) + f(n - 2, memo);
        memo.insert(n, value)
    }

    let n = check_fibonacci(n)?;
    Ok(f(n, &mut Memo::new()))
}

pub fn fibonacci_tab(n: i64) -> PatternResult<u128> {
    let n = check_fibonacci(n)?;
    let mut table = vec![0u128; n + 1];
    if n >= 1 {
        table[1] = 1;
    }
    for i in 2..=n {
        table[i] = table[i - 1] + table[i - 2];
    }
    Ok(table[n])
}

pub fn fibonacci_rolling(n: i64) -> PatternResult<u128> {
    let n = check_fibonacci(n)?;
    if n == 0 {
        return Ok(0);
    }
    let (mut prev, mut curr) = (0u128, 1u128);
    for _ in 1..n {
        (prev, curr) = (curr, prev + curr);
    }
    Ok(curr)
}

#[instrument(level = "debug")]
pub fn fibonacci(n: i64, strategy: DpStrategy) -> PatternResult<u128> {
    let value = match strategy {
        DpStrategy::Memoized => fibonacci_memo(n),
        DpStrategy::Tabulated => fibonacci_tab(n),
        DpStrategy::Rolling => fibonacci_rolling(n),
    }?;
    debug!(%value, "fibonacci");
    Ok(value)
}

// ---------------------------------------------------------------------------
// Climbing stairs: ways(1) = 1, ways(2) = 2, ways(n) = ways(n-1) + ways(n-2)
// ---------------------------------------------------------------------------

fn check_stairs(n: i64) -> PatternResult<usize> {
    if n <= 0 {
        warn!(n, "non-positive stair count");
        return Err(PatternError::invalid("climb_stairs", format!("n must be >= 1, got {n}")));
    }
    if n > MAX_STAIRS_N {
        return Err(PatternError::Overflow {
            operation: "climb_stairs",
            n,
        });
    }
    Ok(n as usize)
}

pub fn climb_stairs_memo(n: i64) -> PatternResult<u128> {
    fn ways(n: usize, memo: &mut Memo<usize, u128>) -> u128 {
        if n <= 2 {
            return n as u128;
        }
        if let Some(value) = memo.get(&n) {
            return value;
        }
        let value = ways(n - 1, memo) + ways(n - 2, memo);
        memo.insert(n, value)
    }

    let n = check_stairs(n)?;
    Ok(ways(n, &mut Memo::new()))
}

pub fn climb_stairs_tab(n: i64) -> PatternResult<u128> {
    let n = check_stairs(n)?;
    // index 0 unused, ways(1) = 1, ways(2) = 2
    let mut table = vec![0u128; n.max(2) + 1];
    table[1] = 1;
    table[2] = 2;
    for i in 3..=n {
        table[i] = table[i - 1] + table[i - 2];
    }
    Ok(table[n])
}

pub fn climb_stairs_rolling(n: i64) -> PatternResult<u128> {
    let n = check_stairs(n)?;
    let (mut prev, mut curr) = (1u128, 1u128); // ways(0) as the empty pattern, ways(1)
    for _ in 1..n {
        (prev, curr) = (curr, prev + curr);
    }
    Ok(curr)
}

#[instrument(level = "debug")]
pub fn climb_stairs(n: i64, strategy: DpStrategy) -> PatternResult<u128> {
    let value = match strategy {
        DpStrategy::Memoized => climb_stairs_memo(n),
        DpStrategy::Tabulated => climb_stairs_tab(n),
        DpStrategy::Rolling => climb_stairs_rolling(n),
    }?;
    debug!(%value, "climb_stairs");
    Ok(value)
}

// ---------------------------------------------------------------------------
// House robber: best(i) = max(best(i-1), best(i-2) + value(i))
// ---------------------------------------------------------------------------

fn check_house_values(values: &[i64]) -> PatternResult<()> {
    if let Some(idx) = values.iter().position(|&v| v < 0) {
        warn!(idx, "negative house value");
        return Err(PatternError::invalid(
            "house_robber",
            format!("value {idx} is negative ({})", values[idx]),
        ));
    }
    check_total("house_robber", values)
}

/// Every partial result is bounded by the total of the non-negative values, so a total that
/// fits into `i64` keeps all additions in range.
fn check_total(operation: &'static str, values: &[i64]) -> PatternResult<()> {
    match values.iter().try_fold(0i64, |acc, &v| acc.checked_add(v)) {
        Some(_) => Ok(()),
        None => {
            warn!(operation, "total value out of range");
            Err(PatternError::invalid(operation, "sum of all values exceeds i64"))
        }
    }
}

/// Best total over the first `len` houses, keyed by prefix length.
pub fn house_robber_memo(values: &[i64]) -> PatternResult<i64> {
    fn best(len: usize, values: &[i64], memo: &mut Memo<usize, i64>) -> i64 {
        match len {
            0 => 0,
            1 => values[0],
            _ => {
                if let Some(value) = memo.get(&len) {
                    return value;
                }
                let skip = best(len - 1, values, memo);
                let take = best(len - 2, values, memo) + values[len - 1];
                memo.insert(len, skip.max(take))
            }
        }
    }

    check_house_values(values)?;
    Ok(best(values.len(), values, &mut Memo::new()))
}

pub fn house_robber_tab(values: &[i64]) -> PatternResult<i64> {
    check_house_values(values)?;
    let mut table = vec![0i64; values.len() + 1];
    for (i, &value) in values.iter().enumerate() {
        let take = if i == 0 { value } else { table[i - 1] + value };
        table[i + 1] = table[i].max(take);
    }
    Ok(table[values.len()])
}

pub fn house_robber_rolling(values: &[i64]) -> PatternResult<i64> {
    check_house_values(values)?;
    let (mut two_back, mut one_back) = (0i64, 0i64);
    for &value in values {
        (two_back, one_back) = (one_back, one_back.max(two_back + value));
    }
    Ok(one_back)
}

#[instrument(level = "debug", skip(values), fields(len = values.len()))]
pub fn house_robber(values: &[i64], strategy: DpStrategy) -> PatternResult<i64> {
    let value = match strategy {
        DpStrategy::Memoized => house_robber_memo(values),
        DpStrategy::Tabulated => house_robber_tab(values),
        DpStrategy::Rolling => house_robber_rolling(values),
    }?;
    debug!(value, "house_robber");
    Ok(value)
}

// ---------------------------------------------------------------------------
// Maximum subarray (Kadane)
// ---------------------------------------------------------------------------

/// Sum and inclusive bounds of a best contiguous run.
///
/// Sums are accumulated in `i128`; a best sum above `i64::MAX` is reported as `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub sum: i64,
    pub start: usize,
    pub end: usize,
}

/// Largest sum of a non-empty contiguous run.
///
/// The empty run is not a candidate: an all-negative sequence yields its largest element.
/// Empty input has no non-empty run and yields `None`. See [`max_subarray_or_empty`] for the
/// variant that admits the empty run.
pub fn max_subarray(seq: &[i64]) -> Option<i64> {
    max_subarray_span(seq).map(|span| span.sum)
}

/// Kadane's scan, also reporting where the first best run starts and ends.
///
/// The running "best ending here" restarts at the current element whenever the run so far
/// is negative, i.e. whenever extending would be strictly worse than restarting.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn max_subarray_span(seq: &[i64]) -> Option<Span> {
    let (&first, rest) = seq.split_first()?;
    let (mut best_sum, mut best_start, mut best_end) = (i128::from(first), 0, 0);
    let (mut current, mut current_start) = (i128::from(first), 0);

    for (offset, &x) in rest.iter().enumerate() {
        let i = offset + 1;
        if current < 0 {
            current = i128::from(x);
            current_start = i;
        } else {
            current += i128::from(x);
        }
        if current > best_sum {
            (best_sum, best_start, best_end) = (current, current_start, i);
        }
    }

    let best = Span {
        sum: clamp_sum(best_sum),
        start: best_start,
        end: best_end,
    };
    debug!(?best, "max_subarray");
    Some(best)
}

/// A best sum is at least one element, so it can only leave `i64` upwards.
fn clamp_sum(sum: i128) -> i64 {
    i64::try_from(sum).unwrap_or(i64::MAX)
}

/// Memoized form of [`max_subarray`]: `ending(i) = max(seq[i], ending(i-1) + seq[i])`.
pub fn max_subarray_memo(seq: &[i64]) -> Option<i64> {
    fn ending(i: usize, seq: &[i64], memo: &mut Memo<usize, i128>) -> i128 {
        let x = i128::from(seq[i]);
        if i == 0 {
            return x;
        }
        if let Some(value) = memo.get(&i) {
            return value;
        }
        let before = ending(i - 1, seq, memo);
        let value = if before < 0 { x } else { before + x };
        memo.insert(i, value)
    }

    if seq.is_empty() {
        return None;
    }
    let mut memo = Memo::new();
    // Evaluating the last index first fills the memo for every prefix
    ending(seq.len() - 1, seq, &mut memo);
    (0..seq.len())
        .map(|i| ending(i, seq, &mut memo))
        .max()
        .map(clamp_sum)
}

/// Largest sum of a possibly empty contiguous run: never below 0, 0 for empty input.
pub fn max_subarray_or_empty(seq: &[i64]) -> i64 {
    max_subarray(seq).map_or(0, |best| best.max(0))
}

// ---------------------------------------------------------------------------
// 0/1 knapsack
// ---------------------------------------------------------------------------

/// Validated knapsack input: weights and capacity as table indices.
struct Knapsack<'a> {
    weights: Vec<usize>,
    values: &'a [i64],
    capacity: usize,
}

#[instrument(level = "trace", skip(weights, values))]
fn check_knapsack<'a>(
    operation: &'static str,
    weights: &[i64],
    values: &'a [i64],
    capacity: i64,
) -> PatternResult<Knapsack<'a>> {
    if weights.len() != values.len() {
        warn!(
            weights = weights.len(),
            values = values.len(),
            "mismatched knapsack input"
        );
        return Err(PatternError::invalid(
            operation,
            format!("{} weights but {} values", weights.len(), values.len()),
        ));
    }
    let capacity = usize::try_from(capacity).map_err(|_| {
        PatternError::invalid(operation, format!("capacity must be >= 0, got {capacity}"))
    })?;
    let weights = weights
        .iter()
        .enumerate()
        .map(|(idx, &w)| {
            usize::try_from(w).map_err(|_| {
                PatternError::invalid(operation, format!("weight {idx} is negative ({w})"))
            })
        })
        .collect::<PatternResult<Vec<_>>>()?;
    if let Some(idx) = values.iter().position(|&v| v < 0) {
        return Err(PatternError::invalid(
            operation,
            format!("value {idx} is negative ({})", values[idx]),
        ));
    }
    check_total(operation, values)?;
    Ok(Knapsack {
        weights,
        values,
        capacity,
    })
}

impl Knapsack<'_> {
    /// Full `(items + 1) x (capacity + 1)` table; row `i` only reads row `i - 1`.
    fn table(&self) -> Vec<Vec<i64>> {
        let mut table = vec![vec![0i64; self.capacity + 1]; self.weights.len() + 1];
        for (i, (&weight, &value)) in self.weights.iter().zip(self.values).enumerate() {
            for cap in 0..=self.capacity {
                let skip = table[i][cap];
                table[i + 1][cap] = if weight <= cap {
                    skip.max(table[i][cap - weight] + value)
                } else {
                    skip
                };
            }
        }
        table
    }
}

/// Best value using items `i..` within remaining capacity, keyed by `(i, capacity)`.
pub fn knapsack_memo(weights: &[i64], values: &[i64], capacity: i64) -> PatternResult<i64> {
    fn best(
        i: usize,
        cap: usize,
        input: &Knapsack<'_>,
        memo: &mut Memo<(usize, usize), i64>,
    ) -> i64 {
        if i == input.weights.len() {
            return 0;
        }
        if let Some(value) = memo.get(&(i, cap)) {
            return value;
        }
        let skip = best(i + 1, cap, input, memo);
        let weight = input.weights[i];
        let value = if weight <= cap {
            skip.max(best(i + 1, cap - weight, input, memo) + input.values[i])
        } else {
            skip
        };
        memo.insert((i, cap), value)
    }

    let input = check_knapsack("knapsack", weights, values, capacity)?;
    Ok(best(0, input.capacity, &input, &mut Memo::new()))
}

/// Full-table form; allocates `(items + 1) x (capacity + 1)` cells.
pub fn knapsack_tab(weights: &[i64], values: &[i64], capacity: i64) -> PatternResult<i64> {
    let input = check_knapsack("knapsack", weights, values, capacity)?;
    let table = input.table();
    Ok(table[input.weights.len()][input.capacity])
}

/// Single-row reduction of [`knapsack_tab`]: capacities are visited in descending order so
/// every cell still holds the previous row's value when it is read. The row still has
/// `capacity + 1` cells.
pub fn knapsack_rolling(weights: &[i64], values: &[i64], capacity: i64) -> PatternResult<i64> {
    let input = check_knapsack("knapsack", weights, values, capacity)?;
    let mut row = vec![0i64; input.capacity + 1];
    for (&weight, &value) in input.weights.iter().zip(input.values) {
        for cap in (weight..=input.capacity).rev() {
            row[cap] = row[cap].max(row[cap - weight] + value);
        }
    }
    Ok(row[input.capacity])
}

/// Best value together with the chosen item indices (ascending), recovered from the full table.
pub fn knapsack_selection(
    weights: &[i64],
    values: &[i64],
    capacity: i64,
) -> PatternResult<(i64, Vec<usize>)> {
    let input = check_knapsack("knapsack_selection", weights, values, capacity)?;
    let table = input.table();

    let mut chosen = Vec::new();
    let mut cap = input.capacity;
    for i in (0..input.weights.len()).rev() {
        if table[i + 1][cap] != table[i][cap] {
            chosen.push(i);
            cap -= input.weights[i];
        }
    }
    chosen.reverse();
    Ok((table[input.weights.len()][input.capacity], chosen))
}

#[instrument(level = "debug", skip(weights, values), fields(items = weights.len()))]
pub fn knapsack(
    weights: &[i64],
    values: &[i64],
    capacity: i64,
    strategy: DpStrategy,
) -> PatternResult<i64> {
    let value = match strategy {
        DpStrategy::Memoized => knapsack_memo(weights, values, capacity),
        DpStrategy::Tabulated => knapsack_tab(weights, values, capacity),
        DpStrategy::Rolling => knapsack_rolling(weights, values, capacity),
    }?;
    debug!(value, "knapsack");
    Ok(value)
}
