use crate::libs::column::ColumnMap;
use crate::libs::search::Candidates;
use crate::libs::seq::{is_base, is_gap, Sequence};

/// Percentage of the query's base columns where the candidate also has a
/// base, truncated to an integer. A query without bases covers nothing.
///
/// ```
/// use chimr::libs::filter::coverage;
/// assert_eq!(coverage(b"ACGT--", b"AC----"), 50);
/// assert_eq!(coverage(b"ACG---", b"--GTTT"), 33);
/// assert_eq!(coverage(b"------", b"ACGTAC"), 0);
/// ```
pub fn coverage(query: &[u8], candidate: &[u8]) -> i32 {
    let mut num_bases = 0usize;
    let mut num_covered = 0usize;

    for (&q, &c) in query.iter().zip(candidate) {
        if is_base(q) {
            num_bases += 1;
            if is_base(c) {
                num_covered += 1;
            }
        }
    }

    if num_bases == 0 {
        return 0;
    }

    (num_covered * 100 / num_bases) as i32
}

/// Drops candidates whose coverage of the query is not above `min_coverage`.
///
/// Survivors keep their order and their pool indexes.
pub fn coverage_filter(candidates: Candidates, query: &[u8], min_coverage: i32) -> Candidates {
    let (seqs, indexes): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .filter(|(seq, _)| coverage(query, seq.aligned()) > min_coverage)
        .unzip();

    Candidates::new(seqs, indexes)
}

/// Removes columns where the query and every candidate hold a gap.
///
/// All aligned forms are rewritten in place; the returned map is `map`
/// narrowed to the surviving columns.
pub fn vertical_filter(query: &mut Sequence, refs: &mut [Sequence], map: &ColumnMap) -> ColumnMap {
    let width = query.len();
    let mut gaps = vec![0usize; width];

    for seq in std::iter::once(&*query).chain(refs.iter()) {
        for (j, &b) in seq.aligned().iter().enumerate().take(width) {
            if is_gap(b) {
                gaps[j] += 1;
            }
        }
    }

    let num_seqs = refs.len() + 1;
    let keep: Vec<bool> = gaps.iter().map(|&g| g != num_seqs).collect();
    let num_removed = keep.iter().filter(|&&k| !k).count();
    log::debug!("vertical filter removed {} of {} columns", num_removed, width);

    for seq in std::iter::once(&mut *query).chain(refs.iter_mut()) {
        let filtered = seq
            .aligned()
            .iter()
            .zip(&keep)
            .filter(|(_, &k)| k)
            .map(|(&b, _)| b)
            .collect();
        seq.set_aligned(filtered);
    }

    map.retain(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(aligned: &[&[u8]]) -> Candidates {
        let seqs = aligned
            .iter()
            .enumerate()
            .map(|(i, a)| Sequence::new(&format!("r{}", i), a))
            .collect();
        Candidates::new(seqs, (10..10 + aligned.len()).collect())
    }

    #[test]
    fn test_coverage_filter() {
        let query = b"ACGTACGTAC";
        let cands = candidates(&[b"ACGTACGTAC", b"ACGTAC----", b"ACGTACGT--", b"----------"]);

        let kept = coverage_filter(cands, query, 70);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.indexes(), &[10, 12]);
        assert_eq!(kept.seqs()[1].name(), "r2");
    }

    #[test]
    fn test_coverage_filter_boundary() {
        // exactly at the threshold is dropped
        let query = b"ACGTACGTAC";
        let kept = coverage_filter(candidates(&[b"ACGTACG---"]), query, 70);
        assert!(kept.is_empty());
        let kept = coverage_filter(candidates(&[b"ACGTACG---"]), query, 69);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_coverage_filter_monotonic() {
        let query = b"ACGTACGTAC";
        let rows: [&[u8]; 5] = [
            b"ACGTACGTAC",
            b"ACGTAC----",
            b"ACGTACGT--",
            b"AC--------",
            b"-CGTACGTA-",
        ];
        let mut last = usize::MAX;
        for min in [0, 20, 50, 70, 80, 90, 100] {
            let kept = coverage_filter(candidates(&rows), query, min).len();
            assert!(kept <= last);
            last = kept;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_vertical_filter() {
        let mut query = Sequence::new("q", b"A-C.-GT");
        let mut refs = vec![
            Sequence::new("r1", b"A-CT-G-"),
            Sequence::new("r2", b"A.C--GA"),
        ];
        let map = ColumnMap::window(5, 11);
        let map = vertical_filter(&mut query, &mut refs, &map);

        assert_eq!(query.aligned(), b"AC.GT");
        assert_eq!(refs[0].aligned(), b"ACTG-");
        assert_eq!(refs[1].aligned(), b"AC-GA");
        assert_eq!(map.as_slice(), &[5, 7, 8, 10, 11]);
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_trim_then_filter_matches_single_pass() {
        use crate::libs::trim::{trim_seqs, TrimMode};

        let query = Sequence::new("q", b"--A--CG-T---");
        let refs = vec![
            Sequence::new("r1", b"---T-CG-A---"),
            Sequence::new("r2", b"--.A-CG--C--"),
        ];

        // two steps
        let (mut q, mut r) = (query.clone(), refs.clone());
        let trimmed = trim_seqs(&mut q, &mut r, TrimMode::Union);
        let two_step = vertical_filter(&mut q, &mut r, &trimmed);

        // single pass over the untouched input
        let (mut q, mut r) = (query.clone(), refs.clone());
        let one_step = vertical_filter(&mut q, &mut r, &ColumnMap::identity(query.len()));

        assert_eq!(two_step, one_step);
        assert_eq!(one_step.as_slice(), &[2, 3, 5, 6, 8, 9]);
    }
}
