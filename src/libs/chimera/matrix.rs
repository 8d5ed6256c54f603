use crate::libs::seq::{is_base, Sequence};

/// Score of a cell no path has reached yet.
pub const UNSCORED: i32 = -9_999_999;

/// One (candidate, column) cell of the score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCell {
    pub score: i32,
    /// Candidate row of the best predecessor in the previous column
    pub prev: Option<usize>,
    pub row: usize,
    pub col: usize,
}

/// Column score of a query symbol against a candidate symbol.
///
/// Gap against gap and anything against `N` are neutral.
///
/// ```
/// use chimr::libs::chimera::matrix::local_score;
/// assert_eq!(local_score(b'A', b'A', 5, -4), 5);
/// assert_eq!(local_score(b'A', b'G', 5, -4), -4);
/// assert_eq!(local_score(b'A', b'-', 5, -4), -4);
/// assert_eq!(local_score(b'-', b'.', 5, -4), 0);
/// assert_eq!(local_score(b'n', b'G', 5, -4), 0);
/// ```
pub fn local_score(q: u8, s: u8, match_score: i32, mismatch_penalty: i32) -> i32 {
    if !is_base(q) && !is_base(s) {
        0
    } else if q.eq_ignore_ascii_case(&b'N') || s.eq_ignore_ascii_case(&b'N') {
        0
    } else if q == s {
        match_score
    } else {
        mismatch_penalty
    }
}

/// Candidates by columns. Every row may hand over to every other row at a
/// cost, so filling is quadratic in the number of candidates per column.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    cells: Vec<Vec<ScoreCell>>,
    cols: usize,
}

impl ScoreMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| ScoreCell {
                        score: UNSCORED,
                        prev: None,
                        row,
                        col,
                    })
                    .collect()
            })
            .collect();

        Self { cells, cols }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &ScoreCell {
        &self.cells[row][col]
    }

    /// Fills the matrix column by column.
    ///
    /// A cell takes the best of all cells of the previous column plus the
    /// local score, paying `penalty` when it comes from another row. Totals
    /// are floored at zero so a path can restart anywhere. Ties keep the
    /// lowest predecessor row.
    pub fn fill(
        &mut self,
        query: &[u8],
        refs: &[Sequence],
        match_score: i32,
        mismatch_penalty: i32,
        penalty: i32,
    ) {
        let num_rows = self.rows();
        if self.cols == 0 || num_rows == 0 {
            return;
        }

        for (i, subject) in refs.iter().enumerate().take(num_rows) {
            let q = query[0];
            let s = subject.aligned()[0];
            self.cells[i][0].score = if !is_base(q) && !is_base(s) {
                0
            } else if q == s {
                match_score
            } else {
                0
            };
        }

        for j in 1..self.cols {
            for i in 0..num_rows {
                let local = local_score(
                    query[j],
                    refs[i].aligned()[j],
                    match_score,
                    mismatch_penalty,
                );

                let mut best = UNSCORED;
                let mut best_prev = None;
                for p in 0..num_rows {
                    let mut total = self.cells[p][j - 1].score + local;
                    if p != i {
                        total += penalty;
                    }
                    if total < 0 {
                        total = 0;
                    }

                    if total > best {
                        best = total;
                        best_prev = Some(p);
                    }
                }

                self.cells[i][j].score = best;
                self.cells[i][j].prev = best_prev;
            }
        }
    }

    /// The highest score and every cell reaching it, scanning row by row.
    ///
    /// A zero maximum yields no cells.
    pub fn highest_cells(&self) -> (i32, Vec<ScoreCell>) {
        let mut highest = 0;
        let mut cells = vec![];

        for row in &self.cells {
            for cell in row {
                if cell.score > highest {
                    highest = cell.score;
                    cells.clear();
                    cells.push(*cell);
                } else if cell.score == highest && highest > 0 {
                    cells.push(*cell);
                }
            }
        }

        (highest, cells)
    }
}
