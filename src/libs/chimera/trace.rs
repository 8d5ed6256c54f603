use super::matrix::{ScoreCell, ScoreMatrix};
use crate::libs::identity::percent_identity;
use crate::libs::seq::Sequence;

/// Columns `start..=end` attributed to candidate `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRegion {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

/// The path chosen among all maximal-score paths.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPath {
    pub regions: Vec<TraceRegion>,
    /// Identity of the query against the chimeric reconstruction
    pub query_chimera: f32,
    /// Identity of the query against the mirrored reconstruction
    pub query_anti_chimera: f32,
}

impl BestPath {
    pub fn start(&self) -> usize {
        self.regions.first().map(|r| r.start).unwrap_or(0)
    }

    pub fn end(&self) -> usize {
        self.regions.last().map(|r| r.end).unwrap_or(0)
    }
}

/// Follows predecessor links back from `from` while scores stay positive.
///
/// Returned cells run forward in column order.
pub fn traceback(matrix: &ScoreMatrix, from: &ScoreCell) -> Vec<ScoreCell> {
    let mut path = vec![];
    let mut row = Some(from.row);
    let mut col = Some(from.col);

    while let (Some(r), Some(c)) = (row, col) {
        let cell = matrix.cell(r, c);
        if cell.score <= 0 {
            break;
        }
        path.push(*cell);

        row = cell.prev;
        col = c.checked_sub(1);
    }
    path.reverse();

    path
}

/// Merges consecutive steps on the same row into regions.
pub fn path_to_regions(path: &[ScoreCell]) -> Vec<TraceRegion> {
    let mut regions: Vec<TraceRegion> = vec![];

    for cell in path {
        match regions.last_mut() {
            Some(region) if region.row == cell.row => region.end = cell.col,
            _ => regions.push(TraceRegion {
                row: cell.row,
                start: cell.col,
                end: cell.col,
            }),
        }
    }

    regions
}

/// Each region's columns taken from its own candidate.
pub fn chimeric_seq(regions: &[TraceRegion], refs: &[Sequence]) -> Vec<u8> {
    let mut chimera = vec![];
    for region in regions {
        chimera.extend_from_slice(&refs[region.row].aligned()[region.start..=region.end]);
    }

    chimera
}

/// Region `i`'s columns taken from the candidate of region `n - 1 - i`.
///
/// ```
/// use chimr::libs::chimera::trace::{anti_chimeric_seq, TraceRegion};
/// use chimr::libs::seq::Sequence;
/// let refs = vec![Sequence::new("a", b"AAAA"), Sequence::new("b", b"CCCC")];
/// let regions = vec![
///     TraceRegion { row: 0, start: 0, end: 0 },
///     TraceRegion { row: 1, start: 1, end: 3 },
/// ];
/// assert_eq!(anti_chimeric_seq(&regions, &refs), b"CAAA".to_vec());
/// ```
pub fn anti_chimeric_seq(regions: &[TraceRegion], refs: &[Sequence]) -> Vec<u8> {
    let mut anti_chimera = vec![];
    for (i, region) in regions.iter().enumerate() {
        let opposite = &regions[regions.len() - 1 - i];
        anti_chimera.extend_from_slice(&refs[opposite.row].aligned()[region.start..=region.end]);
    }

    anti_chimera
}

/// Picks the winning path among every cell of maximal score.
///
/// Paths are tried in matrix scan order; a later one replaces the current
/// pick only when the query matches its anti-chimera strictly better.
/// The first path is kept even when every anti-chimera identity is 0, so
/// such a query still reports its regions instead of an empty trace.
/// Returns `None` when the matrix holds no positive score.
pub fn extract_highest_path(
    matrix: &ScoreMatrix,
    query: &[u8],
    refs: &[Sequence],
) -> Option<BestPath> {
    let (highest, cells) = matrix.highest_cells();
    log::debug!("highest score {} reached by {} cells", highest, cells.len());

    let mut best: Option<BestPath> = None;
    for cell in &cells {
        let path = traceback(matrix, cell);
        if path.is_empty() {
            continue;
        }
        let regions = path_to_regions(&path);

        let start = path[0].col;
        let end = path[path.len() - 1].col;
        let query_in_range = &query[start..=end];

        let query_chimera = percent_identity(query_in_range, &chimeric_seq(&regions, refs));
        let query_anti_chimera =
            percent_identity(query_in_range, &anti_chimeric_seq(&regions, refs));

        let replace = match &best {
            None => true,
            Some(b) => query_anti_chimera > b.query_anti_chimera,
        };
        if replace {
            best = Some(BestPath {
                regions,
                query_chimera,
                query_anti_chimera,
            });
        }
    }

    best
}
