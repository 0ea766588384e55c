/// Counts values per bin.
///
/// `bin_of` maps each value to a bin index in `0..bin_count`; values mapped outside that
/// range are ignored.
///
/// # Examples
///
/// ```
/// # use senafit_stats::counts::bin_counts;
/// // last digit of each number
/// let counts = bin_counts([10_u8, 20, 31, 45], 10, |n| usize::from(n % 10));
/// assert_eq!(counts, vec![2, 1, 0, 0, 0, 1, 0, 0, 0, 0]);
/// ```
#[must_use]
pub fn bin_counts<I, F>(values: I, bin_count: usize, mut bin_of: F) -> Vec<u32>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> usize,
{
    let mut counts = vec![0; bin_count];
    for value in values {
        if let Some(count) = counts.get_mut(bin_of(value)) {
            *count += 1;
        }
    }
    counts
}

/// Counts values satisfying `pred`.
#[must_use]
pub fn count_where<I, F>(values: I, mut pred: F) -> u32
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> bool,
{
    values
        .into_iter()
        .filter(|v| pred(v))
        .fold(0, |count, _| count + 1)
}
