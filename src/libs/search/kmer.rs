use super::{kmer_codes, merge_ranked, rank_hits, split_query};
use super::{CandidateSupplier, Candidates, Hit, RankedSearch};
use crate::libs::error::ChimeraError;
use crate::libs::seq::Sequence;
use fxhash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Inverted index from `k`-mers to the pool entries containing them.
#[derive(Debug, Clone)]
pub struct KmerIndex {
    k: usize,
    num_refs: usize,
    postings: FxHashMap<u64, Vec<usize>>,
}

impl KmerIndex {
    pub fn new(refs: &[Vec<u8>], k: usize) -> Result<Self, ChimeraError> {
        if k == 0 || k > 32 {
            return Err(ChimeraError::InvalidParameter(format!(
                "k-mer size must be in 1..=32, got {}",
                k
            )));
        }

        let mut postings: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
        for (i, seq) in refs.iter().enumerate() {
            let distinct: FxHashSet<u64> = kmer_codes(seq, k).into_iter().map(|c| c.1).collect();
            for code in distinct {
                postings.entry(code).or_default().push(i);
            }
        }

        Ok(Self {
            k,
            num_refs: refs.len(),
            postings,
        })
    }
}

impl RankedSearch for KmerIndex {
    /// Scores every entry by the fraction of the fragment's distinct k-mers
    /// it shares.
    fn search(&self, seq: &[u8], num: usize) -> Vec<Hit> {
        let distinct: FxHashSet<u64> = kmer_codes(seq, self.k).into_iter().map(|c| c.1).collect();

        let mut shared = vec![0usize; self.num_refs];
        for code in &distinct {
            if let Some(refs) = self.postings.get(code) {
                for &r in refs {
                    shared[r] += 1;
                }
            }
        }

        let total = distinct.len().max(1) as f32;
        let mut hits: Vec<Hit> = shared
            .iter()
            .enumerate()
            .map(|(index, &cnt)| Hit {
                index,
                score: cnt as f32 / total,
            })
            .collect();
        rank_hits(&mut hits);
        hits.truncate(num);

        hits
    }
}

/// Split search over k-mer indexes; the left-third ranking leads the merge.
pub struct KmerSupplier {
    left: Arc<dyn RankedSearch>,
    right: Arc<dyn RankedSearch>,
}

impl KmerSupplier {
    pub fn new(left: Arc<dyn RankedSearch>, right: Arc<dyn RankedSearch>) -> Self {
        Self { left, right }
    }

    /// Both sides share one index over the unaligned templates.
    pub fn from_pool(pool: &[Sequence], k: usize) -> Result<Self, ChimeraError> {
        let refs: Vec<Vec<u8>> = pool.iter().map(|s| s.unaligned()).collect();
        let index: Arc<dyn RankedSearch> = Arc::new(KmerIndex::new(&refs, k)?);

        Ok(Self::new(index.clone(), index))
    }
}

impl CandidateSupplier for KmerSupplier {
    fn supply(&self, query: &Sequence, pool: &[Sequence], num_wanted: usize) -> Candidates {
        let unaligned = query.unaligned();
        let (left, right) = split_query(&unaligned);

        let left_hits: Vec<usize> = self
            .left
            .search(left, num_wanted)
            .iter()
            .map(|h| h.index)
            .collect();
        let right_hits: Vec<usize> = self
            .right
            .search(right, num_wanted)
            .iter()
            .map(|h| h.index)
            .collect();
        log::debug!(
            "{}: k-mer hits left {:?} right {:?}",
            query.name(),
            left_hits,
            right_hits
        );

        let merged = merge_ranked(&left_hits, &right_hits);
        Candidates::from_pool(query, pool, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<Sequence> {
        vec![
            Sequence::new("left", b"AAACCCGGGTTTACAGATTACATTTGGGCCCAAA"),
            Sequence::new("right", b"GATCGATCGATCGATCGTACTTGACAGTCCAGTA"),
            Sequence::new("both", b"AAACCCGGGTTTACGATCGACAGTCCAGTA"),
        ]
    }

    #[test]
    fn test_kmer_index_search() {
        let refs: Vec<Vec<u8>> = pool().iter().map(|s| s.unaligned()).collect();
        let index = KmerIndex::new(&refs, 5).unwrap();

        let hits = index.search(b"AAACCCGGGTTTAC", 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[1].index, 2);
        assert_eq!(hits[2].score, 0.0);

        assert!(KmerIndex::new(&refs, 0).is_err());
        assert!(KmerIndex::new(&refs, 33).is_err());
    }

    #[test]
    fn test_kmer_supplier_merge() {
        let pool = pool();
        let supplier = KmerSupplier::from_pool(&pool, 5).unwrap();

        // left third from "left", right third from "right"
        let query = Sequence::new(
            "q",
            b"AAACCCGGGTTT--ACAGAT-TACATTTCGATCGTACTTGACAGTCCAGTA",
        );
        let cands = supplier.supply(&query, &pool, 1);
        assert_eq!(cands.indexes(), &[0, 1]);

        let cands = supplier.supply(&query, &pool, 3);
        assert_eq!(cands.len(), 3);
        assert_eq!(&cands.indexes()[..2], &[0, 1]);
    }
}
