use std::io::BufRead;

/// Gap symbols of an aligned sequence.
pub fn is_gap(b: u8) -> bool {
    b == b'-' || b == b'.'
}

/// Alphabetic symbols are bases; everything else is treated as a gap.
pub fn is_base(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// A named sequence in alignment coordinates.
///
/// The aligned form may be rewritten in place by trimming and column
/// filtering, so callers hand out clones and keep their originals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    aligned: Vec<u8>,
}

impl Sequence {
    pub fn new(name: &str, aligned: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            aligned: aligned.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aligned(&self) -> &[u8] {
        &self.aligned
    }

    pub fn set_aligned(&mut self, aligned: Vec<u8>) {
        self.aligned = aligned;
    }

    pub fn len(&self) -> usize {
        self.aligned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned.is_empty()
    }

    /// The aligned form with `-` and `.` removed.
    ///
    /// ```
    /// let seq = chimr::libs::seq::Sequence::new("s", b"..AC-GT--");
    /// assert_eq!(seq.unaligned(), b"ACGT".to_vec());
    /// assert_eq!(seq.num_bases(), 4);
    /// ```
    pub fn unaligned(&self) -> Vec<u8> {
        self.aligned
            .iter()
            .copied()
            .filter(|&b| !is_gap(b))
            .collect()
    }

    pub fn num_bases(&self) -> usize {
        self.aligned.iter().filter(|&&b| !is_gap(b)).count()
    }

    /// Index of the first and last base column, if any.
    pub fn base_bounds(&self) -> Option<(usize, usize)> {
        let first = self.aligned.iter().position(|&b| is_base(b))?;
        let last = self.aligned.iter().rposition(|&b| is_base(b))?;
        Some((first, last))
    }
}

/// Reads all records of an aligned FASTA stream.
pub fn read_aligned<R: BufRead>(reader: R) -> anyhow::Result<Vec<Sequence>> {
    let mut fa_in = noodles_fasta::io::Reader::new(reader);
    let mut seqs = vec![];

    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8(record.name().into())?;
        let seq = record.sequence();
        let aligned = seq.get(..).unwrap_or_default();

        seqs.push(Sequence::new(&name, aligned));
    }

    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_gap_and_base() {
        assert!(is_gap(b'-'));
        assert!(is_gap(b'.'));
        assert!(!is_gap(b'N'));
        assert!(is_base(b'a'));
        assert!(is_base(b'N'));
        assert!(!is_base(b'~'));
    }

    #[test]
    fn test_base_bounds() {
        let seq = Sequence::new("s", b"--AC-G..");
        assert_eq!(seq.base_bounds(), Some((2, 5)));

        let empty = Sequence::new("e", b"----");
        assert_eq!(empty.base_bounds(), None);
        assert_eq!(empty.num_bases(), 0);
    }

    #[test]
    fn test_read_aligned() {
        let input = ">seq1 desc\n--ACGT\n>seq2\nAC\nGT--\n";
        let seqs = read_aligned(BufReader::new(input.as_bytes())).unwrap();

        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name(), "seq1");
        assert_eq!(seqs[0].aligned(), b"--ACGT");
        assert_eq!(seqs[1].aligned(), b"ACGT--");
    }
}
