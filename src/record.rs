use serde::Serialize;

use std::fmt;

use crate::errors::FormatError;
use crate::iupac::BaseSet;

/// A half-open `[start, end)` interval over sequence coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// One transcript: an identifier, its case-preserved sequence, and the exons given by the
/// uppercase runs of that sequence.
///
/// Everything outside an exon is intron. Records are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    id: String,
    seq: Vec<u8>,
    exons: Vec<Interval>,
}

impl SequenceRecord {
    /// Build a record, checking the identifier and the nucleotide alphabet.
    pub fn new(id: impl AsRef<str>, seq: impl Into<Vec<u8>>) -> Result<Self, FormatError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(FormatError::MissingId);
        }

        let seq = seq.into();
        if let Some(pos) = seq.iter().position(|&c| !BaseSet::is_valid_symbol(c)) {
            return Err(FormatError::InvalidBase {
                id: id.to_owned(),
                pos,
                base: seq[pos],
            });
        }

        let exons = exon_intervals(&seq);

        Ok(Self {
            id: id.to_owned(),
            seq,
            exons,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn exons(&self) -> &[Interval] {
        &self.exons
    }

    pub fn is_exon(&self, pos: usize) -> bool {
        let i = self.exons.partition_point(|e| e.end <= pos);
        self.exons.get(i).is_some_and(|e| e.contains(pos))
    }
}

/// Maximal runs of uppercase letters, in order.
pub fn exon_intervals(seq: &[u8]) -> Vec<Interval> {
    let mut res = Vec::new();
    let mut run_start = None;

    for (i, c) in seq.iter().enumerate() {
        match (c.is_ascii_uppercase(), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                res.push(Interval::new(start, i));
                run_start = None;
            }
            _ => (),
        }
    }

    if let Some(start) = run_start {
        res.push(Interval::new(start, seq.len()));
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_partition(record: &SequenceRecord) {
        let exons = record.exons();
        for w in exons.windows(2) {
            assert!(w[0].end < w[1].start, "exons must be disjoint and separated");
        }

        let mut covered = 0;
        for pos in 0..record.len() {
            let hits = exons.iter().filter(|e| e.contains(pos)).count();
            let upper = record.seq()[pos].is_ascii_uppercase();
            assert_eq!(hits, upper as usize, "position {pos}");
            assert_eq!(record.is_exon(pos), upper);
            covered += hits;
        }

        let gaps = record.len() - exons.iter().map(Interval::len).sum::<usize>();
        assert_eq!(covered + gaps, record.len());
    }

    #[test]
    fn test_exons_from_case() {
        let r = SequenceRecord::new("INSR", "atgcATGCATgcaGGt").unwrap();
        assert_eq!(r.id(), "INSR");
        assert_eq!(r.exons(), &[Interval::new(4, 10), Interval::new(13, 15)]);
        check_partition(&r);
    }

    #[test]
    fn test_all_intron_and_all_exon() {
        let r = SequenceRecord::new("a", "acgtnacgu").unwrap();
        assert!(r.exons().is_empty());
        check_partition(&r);

        let r = SequenceRecord::new("b", "ACGTNACGU").unwrap();
        assert_eq!(r.exons(), &[Interval::new(0, 9)]);
        check_partition(&r);
    }

    #[test]
    fn test_empty_sequence() {
        let r = SequenceRecord::new("empty", "").unwrap();
        assert!(r.is_empty());
        assert!(r.exons().is_empty());
    }

    #[test]
    fn test_leading_and_trailing_exons() {
        let r = SequenceRecord::new("x", "AAcTT").unwrap();
        assert_eq!(r.exons(), &[Interval::new(0, 2), Interval::new(3, 5)]);
        check_partition(&r);
    }

    #[test]
    fn test_format_errors() {
        assert_eq!(SequenceRecord::new("  ", "ACGT"), Err(FormatError::MissingId));
        assert_eq!(
            SequenceRecord::new("seq1", "ACGXt"),
            Err(FormatError::InvalidBase {
                id: "seq1".to_owned(),
                pos: 3,
                base: b'X',
            })
        );
        assert!(SequenceRecord::new("seq1", "AC GT").is_err());
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(0, 4);
        assert!(a.overlaps(&Interval::new(3, 5)));
        assert!(!a.overlaps(&Interval::new(4, 6)));
        assert_eq!(a.to_string(), "[0, 4)");
    }
}
