use std::fmt;
use std::sync::Arc;

use crate::lanes::LaneAssignment;
use crate::layout::SequenceLayout;
use crate::record::SequenceRecord;
use crate::search::MotifOccurrence;

/// Where a record was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(String),
    Bytes,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(file) => write!(f, "file: \"{file}\""),
            Origin::Bytes => write!(f, "bytes"),
        }
    }
}

/// A record on its way through a [`Graph`](crate::graph::Graph).
///
/// Each stage fills in the next part: occurrences after scanning, lanes after lane assignment,
/// and the layout last.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub record: SequenceRecord,
    pub origin: Arc<Origin>,
    pub idx: usize,
    pub occurrences: Option<Vec<MotifOccurrence>>,
    pub lanes: Option<LaneAssignment>,
    pub layout: Option<SequenceLayout>,
}

impl Transcript {
    pub fn new(record: SequenceRecord, origin: Arc<Origin>, idx: usize) -> Self {
        Self {
            record,
            origin,
            idx,
            occurrences: None,
            lanes: None,
            layout: None,
        }
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            Some(layout) => write!(f, "{layout}"),
            None => writeln!(
                f,
                "{} ({} bases, record {} from {})",
                self.record.id(),
                self.record.len(),
                self.idx,
                self.origin
            ),
        }
    }
}
