//! Chimera detection against a pool of aligned templates.
//!
//! For one query, candidate parents are supplied and filtered by coverage,
//! all sequences are trimmed to a common window and stripped of all-gap
//! columns, and a score matrix over (candidate, column) is filled where
//! staying on one parent is free and switching costs a penalty. The best
//! path through the matrix splits the query into parent regions; two or
//! more regions make it a chimera.

pub mod cancel;
pub mod matrix;
pub mod params;
pub mod report;
pub mod trace;

pub use cancel::CancelToken;
pub use matrix::{ScoreCell, ScoreMatrix};
pub use params::ChimeraParams;
pub use report::ChimeraRegion;
pub use trace::{BestPath, TraceRegion};

use crate::libs::error::ChimeraError;
use crate::libs::filter::{coverage_filter, vertical_filter};
use crate::libs::search::{CandidateSupplier, Candidates};
use crate::libs::seq::Sequence;
use crate::libs::trim::trim_seqs;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Yes,
    No,
    /// Fewer than two usable candidates
    Unknown,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Yes => "yes",
            Classification::No => "no",
            Classification::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub classification: Classification,
    /// Parent regions, only filled for chimeras
    pub regions: Vec<ChimeraRegion>,
    /// Query vs. the reconstruction of the winning path, 0 without a path
    pub query_chimera: f32,
    /// Stopped early by a cancel request
    pub cancelled: bool,
}

impl Detection {
    fn new(classification: Classification) -> Self {
        Self {
            classification,
            regions: vec![],
            query_chimera: 0.0,
            cancelled: false,
        }
    }

    fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::new(Classification::No)
        }
    }

    pub fn is_chimera(&self) -> bool {
        self.classification == Classification::Yes
    }
}

/// Decides whether queries are chimeras of the pool's templates.
///
/// Holds no per-query state; one instance can serve many threads.
pub struct Maligner<'a> {
    pool: &'a [Sequence],
    supplier: &'a dyn CandidateSupplier,
    params: &'a ChimeraParams,
}

impl<'a> Maligner<'a> {
    pub fn new(
        pool: &'a [Sequence],
        supplier: &'a dyn CandidateSupplier,
        params: &'a ChimeraParams,
    ) -> Self {
        Self {
            pool,
            supplier,
            params,
        }
    }

    /// Runs every stage for `query`.
    ///
    /// `cancel` is polled after candidate selection, after the matrix is
    /// filled and after path extraction.
    pub fn detect(&self, query: &Sequence, cancel: &CancelToken) -> Result<Detection, ChimeraError> {
        // trimming and filtering rewrite the aligned forms
        let mut query = query.clone();

        let candidates = self
            .supplier
            .supply(&query, self.pool, self.params.num_wanted);
        log::debug!("{}: {} candidates supplied", query.name(), candidates.len());
        if cancel.is_cancelled() {
            return Ok(Detection::cancelled());
        }

        for seq in candidates.seqs() {
            if seq.len() != query.len() {
                return Err(ChimeraError::LengthMismatch {
                    name: seq.name().to_string(),
                    expected: query.len(),
                    found: seq.len(),
                });
            }
        }

        let mut candidates =
            coverage_filter(candidates, query.aligned(), self.params.min_coverage);
        log::debug!(
            "{}: {} candidates above {}% coverage",
            query.name(),
            candidates.len(),
            self.params.min_coverage
        );
        if candidates.len() < 2 {
            return Ok(Detection::new(Classification::Unknown));
        }

        let penalty = self.params.chimera_penalty(query.num_bases());
        log::debug!("{}: chimera penalty {}", query.name(), penalty);

        self.chimera_maligner(&mut query, &mut candidates, penalty, cancel)
    }

    fn chimera_maligner(
        &self,
        query: &mut Sequence,
        candidates: &mut Candidates,
        penalty: i32,
        cancel: &CancelToken,
    ) -> Result<Detection, ChimeraError> {
        let map = trim_seqs(query, candidates.seqs_mut(), self.params.trim);
        if query.is_empty() {
            return Ok(Detection::new(Classification::No));
        }
        let map = vertical_filter(query, candidates.seqs_mut(), &map);

        let mut matrix = ScoreMatrix::new(candidates.len(), query.len());
        matrix.fill(
            query.aligned(),
            candidates.seqs(),
            self.params.match_score,
            self.params.mismatch_penalty,
            penalty,
        );
        log::debug!(
            "{}: filled {} x {} score matrix",
            query.name(),
            matrix.rows(),
            matrix.cols()
        );
        if cancel.is_cancelled() {
            return Ok(Detection::cancelled());
        }

        let best = trace::extract_highest_path(&matrix, query.aligned(), candidates.seqs());
        if cancel.is_cancelled() {
            return Ok(Detection::cancelled());
        }

        let Some(best) = best else {
            return Ok(Detection::new(Classification::No));
        };
        if best.regions.len() < 2 {
            return Ok(Detection {
                query_chimera: best.query_chimera,
                ..Detection::new(Classification::No)
            });
        }

        let regions = report::report_regions(
            &best,
            query.aligned(),
            candidates.seqs(),
            candidates.indexes(),
            self.pool,
            &map,
        );

        Ok(Detection {
            classification: Classification::Yes,
            regions,
            query_chimera: best.query_chimera,
            cancelled: false,
        })
    }
}
