use memchr::memmem;

use serde::Serialize;

use crate::iupac::BaseSet;
use crate::motifs::*;
use crate::record::*;

/// A sequence prepared for scanning: upper-cased with `U` read as `T`, plus the base set of
/// every position.
pub struct ScanText {
    upper: Vec<u8>,
    bases: Vec<BaseSet>,
}

impl ScanText {
    pub fn new(seq: &[u8]) -> Self {
        let upper = seq
            .iter()
            .map(|c| match c.to_ascii_uppercase() {
                b'U' => b'T',
                c => c,
            })
            .collect::<Vec<_>>();
        let bases = upper.iter().map(|&c| BaseSet::of_base(c)).collect();

        Self { upper, bases }
    }

    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }
}

pub trait Searcher {
    /// Call `hit_fn` with every start position where the motif matches, in increasing order.
    fn search(&self, text: &ScanText, hit_fn: impl FnMut(usize));

    fn motif_len(&self) -> usize;
}

/// Searches for motifs without ambiguity codes.
pub struct LiteralSearcher {
    finder: memmem::Finder<'static>,
}

impl LiteralSearcher {
    pub fn new(literal: &[u8]) -> Self {
        Self {
            finder: memmem::Finder::new(literal).into_owned(),
        }
    }
}

impl Searcher for LiteralSearcher {
    fn search(&self, text: &ScanText, mut hit_fn: impl FnMut(usize)) {
        let n = self.motif_len();
        let mut i = 0;

        // restart one past each hit so that overlapping hits are found too
        while i + n <= text.upper.len() {
            let Some(j) = self.finder.find(&text.upper[i..]) else {
                break;
            };
            hit_fn(i + j);
            i += j + 1;
        }
    }

    fn motif_len(&self) -> usize {
        self.finder.needle().len()
    }
}

/// Sliding-window search that checks each position against its allowed base set.
pub struct IupacSearcher {
    expanded: Vec<BaseSet>,
}

impl IupacSearcher {
    pub fn new(expanded: &[BaseSet]) -> Self {
        Self {
            expanded: expanded.to_owned(),
        }
    }
}

impl Searcher for IupacSearcher {
    fn search(&self, text: &ScanText, mut hit_fn: impl FnMut(usize)) {
        let n = self.expanded.len();
        if n == 0 || n > text.bases.len() {
            return;
        }

        for (start, window) in text.bases.windows(n).enumerate() {
            if window
                .iter()
                .zip(&self.expanded)
                .all(|(&base, &allowed)| base.intersects(allowed))
            {
                hit_fn(start);
            }
        }
    }

    fn motif_len(&self) -> usize {
        self.expanded.len()
    }
}

pub enum MotifSearcher {
    Literal(LiteralSearcher),
    Iupac(IupacSearcher),
}

impl MotifSearcher {
    pub fn new(motif: &Motif) -> Self {
        match motif.literal_bytes() {
            Some(literal) => Self::Literal(LiteralSearcher::new(&literal)),
            None => Self::Iupac(IupacSearcher::new(motif.expanded())),
        }
    }
}

impl Searcher for MotifSearcher {
    fn search(&self, text: &ScanText, hit_fn: impl FnMut(usize)) {
        match self {
            Self::Literal(s) => s.search(text, hit_fn),
            Self::Iupac(s) => s.search(text, hit_fn),
        }
    }

    fn motif_len(&self) -> usize {
        match self {
            Self::Literal(s) => s.motif_len(),
            Self::Iupac(s) => s.motif_len(),
        }
    }
}

/// One match of one motif in one sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MotifOccurrence {
    pub start: usize,
    pub end: usize,
    pub motif_idx: usize,
}

impl MotifOccurrence {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scans sequences for every motif of a run.
pub struct MotifScanner {
    searchers: Vec<MotifSearcher>,
}

impl MotifScanner {
    pub fn new(motifs: &Motifs) -> Self {
        Self {
            searchers: motifs.iter().map(|(_, m)| MotifSearcher::new(m)).collect(),
        }
    }

    /// All occurrences of all motifs, grouped by motif, by increasing start within a motif.
    pub fn scan(&self, record: &SequenceRecord) -> Vec<MotifOccurrence> {
        let text = ScanText::new(record.seq());
        let mut res = Vec::new();

        for (motif_idx, searcher) in self.searchers.iter().enumerate() {
            let len = searcher.motif_len();
            searcher.search(&text, |start| {
                res.push(MotifOccurrence {
                    start,
                    end: start + len,
                    motif_idx,
                })
            });
        }

        res
    }
}

/// Every start position of `motif` in `record`, including overlapping ones.
pub fn find_starts(motif: &Motif, record: &SequenceRecord) -> Vec<usize> {
    let text = ScanText::new(record.seq());
    let mut res = Vec::new();
    MotifSearcher::new(motif).search(&text, |start| res.push(start));
    res
}
