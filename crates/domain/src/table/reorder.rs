//! Array reordering primitives used by drag and drop.

/// Moves one item from `from` to `to`, clamping both indices to the array.
///
/// After the call the moved item sits at index `to` and the items in between
/// shift by one towards `from`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let Some(last) = items.len().checked_sub(1) else {
        return;
    };
    let from = from.min(last);
    let to = to.min(last);
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Moves several items as one contiguous block.
///
/// The items at `indices` are removed (highest index first so the remaining
/// indices stay valid) and reinserted, in their original relative order, at
/// `drop_index` corrected by the number of removed items that preceded it.
/// Indices beyond the array are ignored.
///
/// Returns the index the block was inserted at.
pub fn move_block<T>(items: &mut Vec<T>, indices: &[usize], drop_index: usize) -> usize {
    let mut sorted: Vec<usize> = indices.iter().copied().filter(|&i| i < items.len()).collect();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.is_empty() {
        return drop_index.min(items.len());
    }

    let mut block = Vec::with_capacity(sorted.len());
    for &index in sorted.iter().rev() {
        block.push(items.remove(index));
    }
    block.reverse();

    let removed_before = sorted.iter().filter(|&&i| i < drop_index).count();
    let insert_at = drop_index.saturating_sub(removed_before).min(items.len());
    items.splice(insert_at..insert_at, block);
    insert_at
}

/// Removes, for every item in `moved`, the first not yet claimed element of
/// `items` that `matches` it. Matching is by content, so when the source holds
/// several identical rows the earliest ones go first.
///
/// Returns the number of removed elements.
pub fn remove_matching<T, U>(
    items: &mut Vec<T>,
    moved: &[U],
    matches: impl Fn(&T, &U) -> bool,
) -> usize {
    let mut claimed: Vec<usize> = Vec::with_capacity(moved.len());
    for target in moved {
        let found = items
            .iter()
            .enumerate()
            .find(|(i, item)| !claimed.contains(i) && matches(item, target))
            .map(|(i, _)| i);
        if let Some(index) = found {
            claimed.push(index);
        }
    }
    claimed.sort_unstable_by(|a, b| b.cmp(a));
    for &index in &claimed {
        items.remove(index);
    }
    claimed.len()
}
