//! Candidate parents for a query.
//!
//! Three interchangeable strategies pick reference sequences from the pool:
//! aligned distance, a megablast-like word search, and a k-mer search. The
//! two search-backed ones split the query into a left and a right third and
//! merge the two ranked lists (see [`merge_ranked`]).

pub mod blast;
pub mod distance;
pub mod kmer;
pub mod split;

pub use blast::{BlastSupplier, WordIndex};
pub use distance::DistanceSupplier;
pub use kmer::{KmerIndex, KmerSupplier};
pub use split::{merge_ranked, split_query};

use crate::libs::error::ChimeraError;
use crate::libs::seq::Sequence;
use std::str::FromStr;

/// Working set of candidate parents.
///
/// `seqs[i]` is a private copy of `pool[indexes[i]]`.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    seqs: Vec<Sequence>,
    indexes: Vec<usize>,
}

impl Candidates {
    pub fn new(seqs: Vec<Sequence>, indexes: Vec<usize>) -> Self {
        debug_assert_eq!(seqs.len(), indexes.len());
        Self { seqs, indexes }
    }

    /// Copies the pool entries at `merged`, skipping the query itself.
    pub fn from_pool(query: &Sequence, pool: &[Sequence], merged: &[usize]) -> Self {
        let mut seqs = vec![];
        let mut indexes = vec![];
        for &idx in merged {
            if let Some(seq) = pool.get(idx) {
                if seq.name() != query.name() {
                    seqs.push(seq.clone());
                    indexes.push(idx);
                }
            }
        }

        Self { seqs, indexes }
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn seqs(&self) -> &[Sequence] {
        &self.seqs
    }

    pub fn seqs_mut(&mut self) -> &mut [Sequence] {
        &mut self.seqs
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }
}

impl IntoIterator for Candidates {
    type Item = (Sequence, usize);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<Sequence>, std::vec::IntoIter<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.seqs.into_iter().zip(self.indexes)
    }
}

/// A pool search hit, best first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub score: f32,
}

/// Orders hits by descending score, then ascending pool index.
pub fn rank_hits(hits: &mut [Hit]) {
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
}

/// An index over the reference pool answering "which entries look most
/// like this unaligned fragment".
pub trait RankedSearch: Send + Sync {
    fn search(&self, seq: &[u8], num: usize) -> Vec<Hit>;
}

/// Chooses candidate parents for a query.
///
/// Implementations must be deterministic and never return the query itself
/// (matched by name).
pub trait CandidateSupplier: Send + Sync {
    fn supply(&self, query: &Sequence, pool: &[Sequence], num_wanted: usize) -> Candidates;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    Distance,
    Blast,
    #[default]
    Kmer,
}

impl FromStr for SearchMethod {
    type Err = ChimeraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SearchMethod::Distance),
            "blast" => Ok(SearchMethod::Blast),
            "kmer" => Ok(SearchMethod::Kmer),
            _ => Err(ChimeraError::UnknownSearchMethod(s.to_string())),
        }
    }
}

/// Builds the supplier for `method`, indexing `pool` where needed.
pub fn build_supplier(
    method: SearchMethod,
    pool: &[Sequence],
    kmer_size: usize,
    word_size: usize,
) -> Result<Box<dyn CandidateSupplier>, ChimeraError> {
    let supplier: Box<dyn CandidateSupplier> = match method {
        SearchMethod::Distance => Box::new(DistanceSupplier),
        SearchMethod::Blast => Box::new(BlastSupplier::from_pool(pool, word_size)?),
        SearchMethod::Kmer => Box::new(KmerSupplier::from_pool(pool, kmer_size)?),
    };

    Ok(supplier)
}

/// 2-bit code of a nucleotide; `None` for anything ambiguous.
pub(crate) fn nt_code(b: u8) -> Option<u64> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

/// Packed codes of every unambiguous `k`-mer, with its start offset.
pub(crate) fn kmer_codes(seq: &[u8], k: usize) -> Vec<(usize, u64)> {
    let mut codes = vec![];
    if k == 0 || seq.len() < k {
        return codes;
    }

    let mask = if k >= 32 { u64::MAX } else { (1u64 << (2 * k)) - 1 };
    let mut code = 0u64;
    let mut valid = 0usize;
    for (i, &b) in seq.iter().enumerate() {
        match nt_code(b) {
            Some(c) => {
                code = ((code << 2) | c) & mask;
                valid += 1;
            }
            None => {
                code = 0;
                valid = 0;
            }
        }
        if valid >= k {
            codes.push((i + 1 - k, code));
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_method_parse() {
        assert_eq!("distance".parse::<SearchMethod>().unwrap(), SearchMethod::Distance);
        assert_eq!("blast".parse::<SearchMethod>().unwrap(), SearchMethod::Blast);
        assert_eq!("kmer".parse::<SearchMethod>().unwrap(), SearchMethod::Kmer);
        match "megablast".parse::<SearchMethod>() {
            Err(ChimeraError::UnknownSearchMethod(name)) => assert_eq!(name, "megablast"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rank_hits() {
        let mut hits = vec![
            Hit { index: 3, score: 0.5 },
            Hit { index: 1, score: 0.9 },
            Hit { index: 0, score: 0.5 },
        ];
        rank_hits(&mut hits);
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 0, 3]);
    }

    #[test]
    fn test_kmer_codes() {
        let codes = kmer_codes(b"ACGNACGT", 3);
        // ACG, then ACG and CGT after the N
        assert_eq!(codes, vec![(0, 0b000110), (4, 0b000110), (5, 0b011011)]);
        assert!(kmer_codes(b"AC", 3).is_empty());
    }

    #[test]
    fn test_candidates_from_pool() {
        let pool = vec![
            Sequence::new("a", b"ACGT"),
            Sequence::new("q", b"ACGT"),
            Sequence::new("b", b"ACGA"),
        ];
        let query = Sequence::new("q", b"ACGT");
        let cands = Candidates::from_pool(&query, &pool, &[2, 1, 0, 7]);

        assert_eq!(cands.indexes(), &[2, 0]);
        assert_eq!(cands.seqs()[0].name(), "b");
        assert_eq!(cands.len(), 2);
    }
}
