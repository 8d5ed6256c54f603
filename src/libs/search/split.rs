use fxhash::FxHashSet;

/// Left third and right third of an unaligned query.
///
/// The left part is the first 33%, the right part starts at 66%; the middle
/// is not searched.
///
/// ```
/// let (left, right) = chimr::libs::search::split_query(b"AAAAACCCCCGGGGGTTTTT");
/// assert_eq!(left, b"AAAAAC");
/// assert_eq!(right, b"GGTTTTT");
/// ```
pub fn split_query(unaligned: &[u8]) -> (&[u8], &[u8]) {
    let len = unaligned.len();
    let left_end = (len as f64 * 0.33) as usize;
    let right_start = (len as f64 * 0.66) as usize;

    (&unaligned[..left_end], &unaligned[right_start..])
}

/// Interleaves two ranked lists, dropping repeats.
///
/// Position by position, the entry of `first` goes before the entry of
/// `second`. After the shorter list runs out, the rest of the longer one is
/// appended in order.
pub fn merge_ranked(first: &[usize], second: &[usize]) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    let mut merged = vec![];

    let mut push = |idx: usize, merged: &mut Vec<usize>| {
        if seen.insert(idx) {
            merged.push(idx);
        }
    };

    let common = first.len().min(second.len());
    for i in 0..common {
        push(first[i], &mut merged);
        push(second[i], &mut merged);
    }
    for &idx in first[common..].iter().chain(&second[common..]) {
        push(idx, &mut merged);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_interleave() {
        assert_eq!(merge_ranked(&[1, 2, 3], &[4, 2, 5]), vec![1, 4, 2, 3, 5]);
        assert_eq!(merge_ranked(&[1, 2], &[1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_merge_uneven() {
        assert_eq!(merge_ranked(&[7], &[3, 7, 9, 1]), vec![7, 3, 9, 1]);
        assert_eq!(merge_ranked(&[3, 7, 9, 1], &[7]), vec![3, 7, 9, 1]);
        assert_eq!(merge_ranked(&[], &[2, 2, 4]), vec![2, 4]);
        assert!(merge_ranked(&[], &[]).is_empty());
    }

    #[test]
    fn test_split_short() {
        let (left, right) = split_query(b"ACG");
        assert!(left.is_empty());
        assert_eq!(right, b"CG");

        let (left, right) = split_query(b"");
        assert!(left.is_empty() && right.is_empty());
    }
}
