//! Stable merge sort over partially ordered elements.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::SequenceError;

/// Sorts `(position, element)` pairs by element, stopping at the first pair
/// of elements with no defined ordering.
///
/// Stable: elements comparing equal keep their input order. The reported
/// positions are the elements' positions in the original input, lowest
/// first.
pub(crate) fn checked_merge_sort<T: PartialOrd>(
    mut items: Vec<(usize, T)>,
) -> Result<Vec<(usize, T)>, SequenceError> {
    if items.len() <= 1 {
        // A lone element must still be comparable with itself (rejects NaN).
        if let Some((position, element)) = items.first()
            && element.partial_cmp(element).is_none()
        {
            return Err(incomparable(*position, *position));
        }
        return Ok(items);
    }

    let right = items.split_off(items.len() / 2);
    let left = checked_merge_sort(items)?;
    let right = checked_merge_sort(right)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let ordering = match (left.peek(), right.peek()) {
            (Some((left_position, left_element)), Some((right_position, right_element))) => {
                left_element
                    .partial_cmp(right_element)
                    .ok_or_else(|| incomparable(*left_position, *right_position))?
            }
            _ => break,
        };
        if ordering == Ordering::Greater {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

fn incomparable(first: usize, second: usize) -> SequenceError {
    let (left, right) = (first.min(second), first.max(second));
    debug!(left, right, "elements have no natural ordering");
    SequenceError::Incomparable { left, right }
}
