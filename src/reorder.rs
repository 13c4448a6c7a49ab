//! Ordered-sequence moves.
//!
//! The two list primitives behind every task move: shifting an item inside
//! one sequence, and transferring it from one sequence to another. Both
//! copy their inputs and clamp the insertion index, so callers can feed them
//! indices straight from pointer geometry without bounds checks.

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;

/// Move the item at `from` to `to` within one sequence.
///
/// `to` is an index into the sequence *after* the item has been removed and
/// is clamped to `[0, len - 1]`. An out-of-range `from` returns the input
/// unchanged.
#[must_use]
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = items.to_vec();
    if from >= result.len() {
        return result;
    }
    let item = result.remove(from);
    let to = to.min(result.len());
    result.insert(to, item);
    result
}

/// Move the item at `from` in `source` to index `to` in `dest`.
///
/// `to` is clamped to `[0, dest.len()]`. An out-of-range `from` returns both
/// inputs unchanged.
#[must_use]
pub fn transfer<T: Clone>(source: &[T], dest: &[T], from: usize, to: usize) -> (Vec<T>, Vec<T>) {
    let mut source = source.to_vec();
    let mut dest = dest.to_vec();
    if from >= source.len() {
        return (source, dest);
    }
    let item = source.remove(from);
    let to = to.min(dest.len());
    dest.insert(to, item);
    (source, dest)
}
