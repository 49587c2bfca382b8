//! Array sorting for a single unit of work.

/// Sorts the slice into non-decreasing order.
///
/// Elements carry no identity beyond their value, so an unstable sort is enough.
pub fn sort_in_place(values: &mut [i64]) {
    values.sort_unstable();
}

/// Owned variant of [`sort_in_place`], handy when the array moves into a task.
pub fn sorted(mut values: Vec<i64>) -> Vec<i64> {
    sort_in_place(&mut values);
    values
}
