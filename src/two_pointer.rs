//! Two-cursor scans: opposite-direction, same-direction (slow/fast) and Floyd's
//! tortoise-and-hare over linked structures.
//!
//! Linked structures are successor tables: `next[i]` is the index of the node after `i`,
//! `None` terminates the list. Node identity is the index, so cycles are expressible without
//! shared ownership. All linked scans are read-only.

use tracing::{debug, instrument, warn};

use crate::errors::{PatternError, PatternResult};

/// Indices `(left, right)`, `left < right`, of two elements of `sorted` that add up to `target`.
///
/// Cursors start at both ends: a match returns immediately, a smaller sum advances `left`,
/// a larger one retreats `right`. The first match in that scan order wins. Input must be
/// sorted ascending; unsorted input is rejected before scanning. Returns `None` if no pair matches.
#[instrument(level = "debug", skip(sorted), fields(len = sorted.len()))]
pub fn pair_with_sum(sorted: &[i64], target: i64) -> PatternResult<Option<(usize, usize)>> {
    if let Some(idx) = sorted.windows(2).position(|w| w[0] > w[1]) {
        warn!(idx, "unsorted input rejected");
        return Err(PatternError::invalid(
            "pair_with_sum",
            format!("input is not sorted ascending at index {}", idx + 1),
        ));
    }
    if sorted.len() < 2 {
        return Ok(None);
    }

    let target = i128::from(target);
    let (mut left, mut right) = (0, sorted.len() - 1);
    while left < right {
        let sum = i128::from(sorted[left]) + i128::from(sorted[right]);
        if sum == target {
            debug!(left, right, "pair found");
            return Ok(Some((left, right)));
        }
        if sum < target {
            left += 1;
        } else {
            right -= 1;
        }
    }

    debug!("no pair");
    Ok(None)
}

/// Compacts a sorted slice in place so that each distinct value appears once, and returns
/// the new logical length.
///
/// `slow` marks the last unique position, `fast` scans ahead; each new value is moved down
/// to `slow + 1`. Only `seq[..len]` is specified afterwards: the tail holds leftovers in no
/// particular order and is NOT cleared. Unsorted input leaves non-adjacent duplicates.
pub fn dedup_sorted<T: PartialEq>(seq: &mut [T]) -> usize {
    if seq.is_empty() {
        return 0;
    }

    let mut slow = 0;
    for fast in 1..seq.len() {
        if seq[fast] != seq[slow] {
            slow += 1;
            seq.swap(slow, fast);
        }
    }
    slow + 1
}

/// True if `seq` reads the same in both directions; cursors meet in the middle.
pub fn is_palindrome<T: PartialEq>(seq: &[T]) -> bool {
    if seq.is_empty() {
        return true;
    }
    let (mut left, mut right) = (0, seq.len() - 1);
    while left < right {
        if seq[left] != seq[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }
    true
}

/// Floyd's cycle search over any successor function.
///
/// `slow` advances one step and `fast` two per round. Returns the state where they meet,
/// or `None` once `step` runs out (no cycle). States are compared with `==`, so they must
/// identify a position uniquely (an index, not a payload that may repeat).
pub fn floyd_meeting_point<T, F>(start: T, mut step: F) -> Option<T>
where
    T: Clone + PartialEq,
    F: FnMut(&T) -> Option<T>,
{
    let mut slow = start.clone();
    let mut fast = start;
    loop {
        let ahead = step(&fast)?;
        fast = step(&ahead)?;
        slow = step(&slow)?;
        if slow == fast {
            return Some(slow);
        }
    }
}

fn check_links(
    operation: &'static str,
    next: &[Option<usize>],
    head: Option<usize>,
) -> PatternResult<()> {
    let len = next.len();
    if let Some(h) = head.filter(|&h| h >= len) {
        warn!(operation, head = h, len, "dangling head");
        return Err(PatternError::invalid(
            operation,
            format!("head {h} out of range for {len} nodes"),
        ));
    }
    if let Some((idx, target)) = next
        .iter()
        .enumerate()
        .find_map(|(idx, succ)| succ.filter(|&t| t >= len).map(|t| (idx, t)))
    {
        warn!(operation, idx, target, len, "dangling successor");
        return Err(PatternError::invalid(
            operation,
            format!("node {idx} links to {target}, out of range for {len} nodes"),
        ));
    }
    Ok(())
}

/// True if following `next` from `head` revisits a node.
#[instrument(level = "debug", skip(next), fields(len = next.len()))]
pub fn has_cycle(next: &[Option<usize>], head: Option<usize>) -> PatternResult<bool> {
    check_links("has_cycle", next, head)?;
    let found = head.and_then(|h| floyd_meeting_point(h, |&i| next[i])).is_some();
    debug!(found, "cycle scan done");
    Ok(found)
}

/// Index of the first node on the cycle reachable from `head`, `None` for acyclic lists.
///
/// After the meeting point is found, one cursor restarts at `head` and both advance one step
/// at a time; they meet at the cycle entry.
#[instrument(level = "debug", skip(next), fields(len = next.len()))]
pub fn cycle_start(next: &[Option<usize>], head: Option<usize>) -> PatternResult<Option<usize>> {
    check_links("cycle_start", next, head)?;
    let Some(h) = head else { return Ok(None) };
    let Some(meeting) = floyd_meeting_point(h, |&i| next[i]) else {
        return Ok(None);
    };

    let (mut from_head, mut from_meeting) = (h, meeting);
    while from_head != from_meeting {
        match (next[from_head], next[from_meeting]) {
            (Some(a), Some(b)) => {
                from_head = a;
                from_meeting = b;
            }
            // both cursors walk into the cycle, which has no terminator
            _ => return Ok(None),
        }
    }
    Ok(Some(from_head))
}

/// Middle node of an acyclic list (the second of two middles for even lengths).
///
/// Cyclic lists have no middle and are rejected.
#[instrument(level = "debug", skip(next), fields(len = next.len()))]
pub fn middle(next: &[Option<usize>], head: Option<usize>) -> PatternResult<Option<usize>> {
    if has_cycle(next, head)? {
        return Err(PatternError::invalid("middle", "list contains a cycle"));
    }
    let Some(h) = head else { return Ok(None) };

    let (mut slow, mut fast) = (h, h);
    while let Some(ahead) = next[fast] {
        let Some(s) = next[slow] else { break };
        slow = s;
        match next[ahead] {
            Some(f) => fast = f,
            None => break,
        }
    }
    Ok(Some(slow))
}
