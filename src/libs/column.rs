/// Maps a current column index back to the original alignment column.
///
/// Trimming and column filtering each shrink the alignment; the map is
/// narrowed alongside so that it always points into the untouched input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    spots: Vec<usize>,
}

impl ColumnMap {
    /// `0..len` mapped onto itself.
    pub fn identity(len: usize) -> Self {
        Self {
            spots: (0..len).collect(),
        }
    }

    /// Columns `start..=end` of the original alignment.
    pub fn window(start: usize, end: usize) -> Self {
        Self {
            spots: (start..=end).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn get(&self, col: usize) -> Option<usize> {
        self.spots.get(col).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.spots
    }

    /// Keeps the entries whose current column is flagged in `keep`.
    ///
    /// ```
    /// use chimr::libs::column::ColumnMap;
    /// let map = ColumnMap::window(3, 7);
    /// let map = map.retain(&[true, false, true, false, true]);
    /// assert_eq!(map.as_slice(), &[3, 5, 7]);
    /// ```
    pub fn retain(&self, keep: &[bool]) -> Self {
        let spots = self
            .spots
            .iter()
            .zip(keep)
            .filter(|(_, &k)| k)
            .map(|(&s, _)| s)
            .collect();
        Self { spots }
    }

    /// Original columns never decrease along current columns.
    pub fn is_monotonic(&self) -> bool {
        self.spots.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let map = ColumnMap::window(2, 4);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(0), Some(2));
        assert_eq!(map.get(2), Some(4));
        assert_eq!(map.get(3), None);
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_retain_composes() {
        let trimmed = ColumnMap::window(1, 6);
        let filtered = trimmed.retain(&[true, true, false, false, true, true]);
        assert_eq!(filtered.as_slice(), &[1, 2, 5, 6]);

        // a second pass narrows further, still pointing to the input
        let again = filtered.retain(&[false, true, true, true]);
        assert_eq!(again.as_slice(), &[2, 5, 6]);
        assert!(again.is_monotonic());
    }
}
