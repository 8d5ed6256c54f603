use crate::libs::column::ColumnMap;
use crate::libs::error::ChimeraError;
use crate::libs::seq::Sequence;
use std::str::FromStr;

/// How the alignment window shared by a query and its candidates is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimMode {
    /// From the first column where any sequence has a base to the last one.
    #[default]
    Union,
    /// From the first column where every sequence has started to the last
    /// column before any of them ends.
    Overlap,
}

impl FromStr for TrimMode {
    type Err = ChimeraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(TrimMode::Union),
            "overlap" => Ok(TrimMode::Overlap),
            _ => Err(ChimeraError::UnknownTrimMode(s.to_string())),
        }
    }
}

/// Trims the query and all candidates to the same window, in place.
///
/// Returns the map from trimmed columns to input columns. When no window
/// survives, every aligned form is emptied and the map is empty.
pub fn trim_seqs(query: &mut Sequence, refs: &mut [Sequence], mode: TrimMode) -> ColumnMap {
    let bounds: Vec<Option<(usize, usize)>> = std::iter::once(&*query)
        .chain(refs.iter())
        .map(|seq| seq.base_bounds())
        .collect();

    let window = match mode {
        TrimMode::Union => {
            let front = bounds.iter().flatten().map(|b| b.0).min();
            let rear = bounds.iter().flatten().map(|b| b.1).max();
            front.zip(rear)
        }
        TrimMode::Overlap => {
            if bounds.iter().any(|b| b.is_none()) {
                None
            } else {
                let front = bounds.iter().flatten().map(|b| b.0).max();
                let rear = bounds.iter().flatten().map(|b| b.1).min();
                front.zip(rear).filter(|(f, r)| r >= f)
            }
        }
    };

    match window {
        Some((front, rear)) => {
            for seq in std::iter::once(&mut *query).chain(refs.iter_mut()) {
                let trimmed = seq.aligned()[front..=rear].to_vec();
                seq.set_aligned(trimmed);
            }
            ColumnMap::window(front, rear)
        }
        None => {
            for seq in std::iter::once(&mut *query).chain(refs.iter_mut()) {
                seq.set_aligned(vec![]);
            }
            ColumnMap::default()
        }
    }
}
