use rustc_hash::FxHashSet;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::*;
use crate::iupac::BaseSet;
use crate::parse_utils::trim_ascii_whitespace;

/// A compiled motif: the raw IUPAC string and the set of allowed bases at each position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    raw: String,
    expanded: Vec<BaseSet>,
}

impl Motif {
    /// Compile a raw motif, case-insensitively.
    ///
    /// The raw string is stored upper-cased, which is also how motifs are compared and labeled.
    pub fn compile(raw: impl AsRef<[u8]>) -> std::result::Result<Self, PatternError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }

        let expanded = raw
            .iter()
            .enumerate()
            .map(|(pos, &symbol)| {
                BaseSet::from_symbol(symbol).ok_or_else(|| PatternError::InvalidSymbol {
                    motif: utf8(raw),
                    pos,
                    symbol,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: utf8(&raw.to_ascii_uppercase()),
            expanded,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn expanded(&self) -> &[BaseSet] {
        &self.expanded
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Whether every position allows exactly one base.
    pub fn is_literal(&self) -> bool {
        self.expanded.iter().all(|s| s.len() == 1)
    }

    /// The motif spelled with literal bases only, if it has no ambiguity codes.
    pub fn literal_bytes(&self) -> Option<Vec<u8>> {
        self.expanded.iter().map(|s| s.literal()).collect()
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// The ordered motif list for a run.
///
/// A motif's index in this list identifies it everywhere else: occurrences refer to it, the
/// color table is indexed by it, and it breaks ties when assigning lanes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Motifs {
    motifs: Vec<Motif>,
}

impl Motifs {
    /// Compile every motif, failing on the first invalid one.
    ///
    /// Duplicates (compared case-insensitively) keep only their first position.
    pub fn from_strs(
        motifs: impl IntoIterator<Item = impl AsRef<[u8]>>,
    ) -> std::result::Result<Self, PatternError> {
        let mut res = Self::default();
        let mut seen = FxHashSet::default();

        for raw in motifs {
            res.push_unique(Motif::compile(raw)?, &mut seen);
        }

        Ok(res)
    }

    /// Compile every motif, keeping the valid ones and returning the errors for the rest.
    pub fn compile_each(
        motifs: impl IntoIterator<Item = impl AsRef<[u8]>>,
    ) -> (Self, Vec<PatternError>) {
        let mut res = Self::default();
        let mut seen = FxHashSet::default();
        let mut errors = Vec::new();

        for raw in motifs {
            match Motif::compile(raw) {
                Ok(motif) => res.push_unique(motif, &mut seen),
                Err(e) => errors.push(e),
            }
        }

        (res, errors)
    }

    fn push_unique(&mut self, motif: Motif, seen: &mut FxHashSet<String>) {
        if seen.insert(motif.raw.clone()) {
            self.motifs.push(motif);
        } else {
            log::warn!("Ignoring duplicate motif \"{}\"", motif.raw);
        }
    }

    pub fn motifs(&self) -> &[Motif] {
        &self.motifs
    }

    pub fn get(&self, idx: usize) -> Option<&Motif> {
        self.motifs.get(idx)
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Motif)> {
        self.motifs.iter().enumerate()
    }
}

/// Read a motif list: one motif per line, blank lines skipped.
pub fn read_motif_list(reader: impl BufRead) -> std::io::Result<Vec<Vec<u8>>> {
    let mut res = Vec::new();

    for line in reader.split(b'\n') {
        let line = line?;
        if let Some(motif) = trim_ascii_whitespace(&line) {
            res.push(motif.to_owned());
        }
    }

    Ok(res)
}

pub fn read_motif_file(file: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let path = file.as_ref();
    let io_err = |e: std::io::Error| Error::FileIo {
        file: path.display().to_string(),
        source: Box::new(e),
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    read_motif_list(reader).map_err(io_err)
}
