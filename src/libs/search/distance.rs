use super::{Candidates, CandidateSupplier};
use crate::libs::seq::{is_base, Sequence};

/// Fraction of differing columns among those where either side has a base.
///
/// A gap facing a base counts as a difference; gap facing gap is skipped.
///
/// ```
/// use chimr::libs::search::distance::aligned_distance;
/// assert_eq!(aligned_distance(b"ACGT", b"ACGA"), 0.25);
/// assert_eq!(aligned_distance(b"AC--", b"ACG-"), 1.0 / 3.0);
/// assert_eq!(aligned_distance(b"----", b"----"), 0.0);
/// ```
pub fn aligned_distance(left: &[u8], right: &[u8]) -> f64 {
    let mut compared = 0usize;
    let mut diff = 0usize;
    for (&l, &r) in left.iter().zip(right) {
        if is_base(l) || is_base(r) {
            compared += 1;
            if !l.eq_ignore_ascii_case(&r) {
                diff += 1;
            }
        }
    }

    if compared == 0 {
        0.0
    } else {
        diff as f64 / compared as f64
    }
}

/// The `num_wanted` pool entries closest to the query by [`aligned_distance`].
///
/// Equal distances keep pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceSupplier;

impl CandidateSupplier for DistanceSupplier {
    fn supply(&self, query: &Sequence, pool: &[Sequence], num_wanted: usize) -> Candidates {
        let mut dists: Vec<(usize, f64)> = pool
            .iter()
            .enumerate()
            .filter(|(_, seq)| seq.name() != query.name())
            .map(|(i, seq)| (i, aligned_distance(query.aligned(), seq.aligned())))
            .collect();
        dists.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let closest: Vec<usize> = dists.iter().take(num_wanted).map(|d| d.0).collect();
        Candidates::from_pool(query, pool, &closest)
    }
}
