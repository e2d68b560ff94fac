//! Helper algorithms for the `linear_algebra` module.

/// Where each index ends up after removing a set of indices.
///
/// # Arguments
///
/// * `indices` - Sorted, unique indices to remove, all smaller than `len`.
/// * `len` - Number of indices before removal.
///
/// # Return value
///
/// For each original index, `None` if it was removed and otherwise its new position.
pub(crate) fn index_map_without(indices: &[usize], len: usize) -> Vec<Option<usize>> {
    debug_assert!(indices.is_sorted());
    debug_assert!(indices.iter().all(|&i| i < len));

    let mut map = Vec::with_capacity(len);
    let mut removed = indices.iter().peekable();
    let mut nr_removed = 0;
    for i in 0..len {
        if removed.next_if_eq(&&i).is_some() {
            nr_removed += 1;
            map.push(None);
        } else {
            map.push(Some(i - nr_removed));
        }
    }

    map
}
