use super::trace::BestPath;
use crate::libs::column::ColumnMap;
use crate::libs::identity::percent_identity;
use crate::libs::seq::Sequence;

/// One parent region of a chimeric query.
#[derive(Debug, Clone, PartialEq)]
pub struct ChimeraRegion {
    pub parent: String,
    /// The parent as it appears in the reference pool, untrimmed
    pub parent_aligned: Vec<u8>,
    /// Region bounds in input alignment columns
    pub nast_start: usize,
    pub nast_end: usize,
    /// Region bounds in filtered columns
    pub region_start: usize,
    pub region_end: usize,
    /// Query vs. parent over the whole chimeric span
    pub query_to_parent: f32,
    /// Query-chimera identity over `query_to_parent`
    pub div_r: f32,
    /// Query vs. parent over this region only
    pub query_to_parent_local: f32,
}

/// Turns the winning path into result records.
///
/// `refs` are the filtered candidates, `indexes` their positions in `pool`,
/// and `map` leads filtered columns back to input columns.
pub fn report_regions(
    best: &BestPath,
    query: &[u8],
    refs: &[Sequence],
    indexes: &[usize],
    pool: &[Sequence],
    map: &ColumnMap,
) -> Vec<ChimeraRegion> {
    let (trace_start, trace_end) = (best.start(), best.end());
    let query_in_range = &query[trace_start..=trace_end];

    best.regions
        .iter()
        .map(|region| {
            let parent = &refs[region.row];
            let parent_aligned = indexes
                .get(region.row)
                .and_then(|&idx| pool.get(idx))
                .map(|seq| seq.aligned().to_vec())
                .unwrap_or_default();

            let parent_in_range = &parent.aligned()[trace_start..=trace_end];
            let query_to_parent = percent_identity(query_in_range, parent_in_range);

            let query_in_region = &query[region.start..=region.end];
            let parent_in_region = &parent.aligned()[region.start..=region.end];

            ChimeraRegion {
                parent: parent.name().to_string(),
                parent_aligned,
                nast_start: map.get(region.start).unwrap_or(region.start),
                nast_end: map.get(region.end).unwrap_or(region.end),
                region_start: region.start,
                region_end: region.end,
                query_to_parent,
                div_r: best.query_chimera / query_to_parent,
                query_to_parent_local: percent_identity(query_in_region, parent_in_region),
            }
        })
        .collect()
}
