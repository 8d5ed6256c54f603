use super::{kmer_codes, merge_ranked, rank_hits, split_query};
use super::{CandidateSupplier, Candidates, Hit, RankedSearch};
use crate::libs::error::ChimeraError;
use crate::libs::seq::Sequence;
use fxhash::FxHashMap;
use std::sync::Arc;

// megablast scoring
const REWARD: i32 = 1;
const PENALTY: i32 = -2;
const X_DROP: i32 = 10;

/// Extends a word hit along its diagonal in both directions with X-drop
/// termination.
///
/// The seed column is scored once, by the left pass. Returns the query end
/// (exclusive) of the best-scoring segment and its score.
pub fn extend_ungapped(q_seq: &[u8], s_seq: &[u8], q_pos: usize, s_pos: usize) -> (usize, i32) {
    let mut current = 0;
    let mut max_score = 0;

    for i in 0..=q_pos.min(s_pos) {
        current += if q_seq[q_pos - i] == s_seq[s_pos - i] {
            REWARD
        } else {
            PENALTY
        };
        if current > max_score {
            max_score = current;
        } else if max_score - current > X_DROP {
            break;
        }
    }

    let mut current = max_score;
    let mut best_j = 0;
    let mut j = 1;
    while q_pos + j < q_seq.len() && s_pos + j < s_seq.len() {
        current += if q_seq[q_pos + j] == s_seq[s_pos + j] {
            REWARD
        } else {
            PENALTY
        };
        if current > max_score {
            max_score = current;
            best_j = j;
        } else if max_score - current > X_DROP {
            break;
        }
        j += 1;
    }

    (q_pos + best_j + 1, max_score)
}

/// Word positions of every pool entry, for seeded ungapped search.
#[derive(Debug, Clone)]
pub struct WordIndex {
    word_size: usize,
    refs: Vec<Vec<u8>>,
    postings: FxHashMap<u64, Vec<(usize, usize)>>,
}

impl WordIndex {
    pub fn new(refs: &[Vec<u8>], word_size: usize) -> Result<Self, ChimeraError> {
        if word_size == 0 || word_size > 32 {
            return Err(ChimeraError::InvalidParameter(format!(
                "word size must be in 1..=32, got {}",
                word_size
            )));
        }

        let refs: Vec<Vec<u8>> = refs.iter().map(|r| r.to_ascii_uppercase()).collect();
        let mut postings: FxHashMap<u64, Vec<(usize, usize)>> = FxHashMap::default();
        for (i, seq) in refs.iter().enumerate() {
            for (pos, code) in kmer_codes(seq, word_size) {
                postings.entry(code).or_default().push((i, pos));
            }
        }

        Ok(Self {
            word_size,
            refs,
            postings,
        })
    }
}

impl RankedSearch for WordIndex {
    /// Best ungapped segment score per entry; entries without a word hit are
    /// not reported.
    fn search(&self, seq: &[u8], num: usize) -> Vec<Hit> {
        let seq = seq.to_ascii_uppercase();
        let mut best = vec![0i32; self.refs.len()];
        // query end already reached on each (entry, diagonal)
        let mut reached: FxHashMap<(usize, isize), usize> = FxHashMap::default();

        for (q_pos, code) in kmer_codes(&seq, self.word_size) {
            let Some(words) = self.postings.get(&code) else {
                continue;
            };
            for &(r, s_pos) in words {
                let diag = s_pos as isize - q_pos as isize;
                if let Some(&end) = reached.get(&(r, diag)) {
                    if q_pos < end {
                        continue;
                    }
                }

                let (q_end, score) = extend_ungapped(&seq, &self.refs[r], q_pos, s_pos);
                reached.insert((r, diag), q_end.max(q_pos + self.word_size));
                best[r] = best[r].max(score);
            }
        }

        let mut hits: Vec<Hit> = best
            .iter()
            .enumerate()
            .filter(|(_, &score)| score > 0)
            .map(|(index, &score)| Hit {
                index,
                score: score as f32,
            })
            .collect();
        rank_hits(&mut hits);
        hits.truncate(num);

        hits
    }
}

/// Split search over word indexes, megablast style.
///
/// Each side asks for one hit more than wanted; the shorter ranked list
/// leads the merge.
pub struct BlastSupplier {
    left: Arc<dyn RankedSearch>,
    right: Arc<dyn RankedSearch>,
}

impl BlastSupplier {
    pub fn new(left: Arc<dyn RankedSearch>, right: Arc<dyn RankedSearch>) -> Self {
        Self { left, right }
    }

    pub fn from_pool(pool: &[Sequence], word_size: usize) -> Result<Self, ChimeraError> {
        let refs: Vec<Vec<u8>> = pool.iter().map(|s| s.unaligned()).collect();
        let index: Arc<dyn RankedSearch> = Arc::new(WordIndex::new(&refs, word_size)?);

        Ok(Self::new(index.clone(), index))
    }
}

impl CandidateSupplier for BlastSupplier {
    fn supply(&self, query: &Sequence, pool: &[Sequence], num_wanted: usize) -> Candidates {
        let unaligned = query.unaligned();
        let (left, right) = split_query(&unaligned);

        let left_hits: Vec<usize> = self
            .left
            .search(left, num_wanted + 1)
            .iter()
            .map(|h| h.index)
            .collect();
        let right_hits: Vec<usize> = self
            .right
            .search(right, num_wanted + 1)
            .iter()
            .map(|h| h.index)
            .collect();
        log::debug!(
            "{}: word hits left {:?} right {:?}",
            query.name(),
            left_hits,
            right_hits
        );

        let merged = if right_hits.len() < left_hits.len() {
            merge_ranked(&right_hits, &left_hits)
        } else {
            merge_ranked(&left_hits, &right_hits)
        };
        Candidates::from_pool(query, pool, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_ungapped() {
        // identical stretch of 8 around the seed
        let (end, score) = extend_ungapped(b"TTACGTACGTTT", b"GGACGTACGTGG", 4, 4);
        assert_eq!(score, 8);
        assert_eq!(end, 10);

        // a single mismatch inside a long match is bridged
        let q = b"ACGTACGTACGTACGTACGT";
        let s = b"ACGTACGTACCTACGTACGT";
        let (end, score) = extend_ungapped(q, s, 0, 0);
        assert_eq!(end, 20);
        assert_eq!(score, 19 - 2);
    }

    #[test]
    fn test_word_index_search() {
        let refs = vec![
            b"GGGGGGGGGGGGGGGGGGGG".to_vec(),
            b"ttgacgatcgtacgatcgaattc".to_vec(),
            b"TTGACGATCGTACGAT".to_vec(),
        ];
        let index = WordIndex::new(&refs, 11).unwrap();

        let hits = index.search(b"GACGATCGTACGATCGAA", 5);
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2]);
        assert!(hits[0].score > hits[1].score);

        assert!(index.search(b"CCCCCCCCCCCCCCC", 5).is_empty());
        assert!(WordIndex::new(&refs, 0).is_err());
    }

    #[test]
    fn test_blast_supplier_shorter_first() {
        let pool = vec![
            Sequence::new("a", b"ACGTTGCAAGCTTAGCCTAGGATCCAAGTTCGAGGCATTACGGATCCATGAC"),
            Sequence::new("b", b"TTTTGGGGCCCCAAAATTTTGGGGCCCCAAAAGGCATTACGGATCCATGAC"),
            Sequence::new("c", b"ACGTTGCAAGCTTAGCCTAGGATCCAAGTTCGAGGAAAAAAAAAAAAAAAAA"),
        ];
        let supplier = BlastSupplier::from_pool(&pool, 11).unwrap();
        let query = Sequence::new("q", b"ACGTTGCAAGCTTAGCCTAGG--ATCCAAGTTCGAGGCATTACGGATCCATGAC");

        // left third hits a and c, right third hits a and b
        let cands = supplier.supply(&query, &pool, 5);
        assert_eq!(cands.len(), 3);
        assert!(cands.indexes().contains(&1));
        assert!(cands.indexes().contains(&2));
        assert_eq!(cands.indexes()[0], 0);
    }
}
