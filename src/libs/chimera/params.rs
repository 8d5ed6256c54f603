pub use crate::libs::search::SearchMethod;
pub use crate::libs::trim::TrimMode;

/// Settings of one detection run. Values are taken as given.
#[derive(Debug, Clone)]
pub struct ChimeraParams {
    /// Candidates requested from the supplier
    pub num_wanted: usize,
    pub match_score: i32,
    /// Score of a mismatching column, normally negative
    pub mismatch_penalty: i32,
    /// Divergence ratio a breakpoint has to beat
    pub min_div_r: f32,
    /// Accepted for compatibility; not consulted
    pub min_similarity: i32,
    /// Candidates need strictly more than this coverage of the query, in percent
    pub min_coverage: i32,
    pub search: SearchMethod,
    pub trim: TrimMode,
    pub kmer_size: usize,
    pub word_size: usize,
}

impl Default for ChimeraParams {
    fn default() -> Self {
        Self {
            num_wanted: 15,
            match_score: 5,
            mismatch_penalty: -4,
            min_div_r: 1.007,
            min_similarity: 90,
            min_coverage: 70,
            search: SearchMethod::Kmer,
            trim: TrimMode::Union,
            kmer_size: 7,
            word_size: 11,
        }
    }
}

impl ChimeraParams {
    /// Score added whenever the path switches parents.
    ///
    /// A single parent may explain `(1 - 1/min_div_r) * num_bases` mismatches
    /// as noise; switching costs one mismatch more than that.
    ///
    /// ```
    /// let params = chimr::libs::chimera::ChimeraParams::default();
    /// assert_eq!(params.chimera_penalty(60), -4);
    /// assert_eq!(params.chimera_penalty(1000), -28);
    /// ```
    pub fn chimera_penalty(&self, num_bases: usize) -> i32 {
        let allowable = (1.0 - 1.0 / f64::from(self.min_div_r)) * num_bases as f64;
        let num_allowable = allowable as i32;

        (num_allowable + 1) * self.mismatch_penalty
    }
}
