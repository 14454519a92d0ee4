use crate::graph::*;
use crate::motifs::Motifs;
use crate::search::MotifScanner;

pub struct ScanMotifsOp {
    scanner: MotifScanner,
}

impl ScanMotifsOp {
    const NAME: &'static str = "ScanMotifsOp";

    /// Find every occurrence of every motif in each transcript, overlapping ones included.
    pub fn new(motifs: &Motifs) -> Self {
        let literal = motifs.iter().filter(|(_, m)| m.is_literal()).count();
        log::debug!(
            "Scanning for {} motifs, {literal} without ambiguity codes",
            motifs.len()
        );

        Self {
            scanner: MotifScanner::new(motifs),
        }
    }
}

impl GraphNode for ScanMotifsOp {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(mut transcript) = transcript else {
            panic!("Expected some transcript!")
        };

        transcript.occurrences = Some(self.scanner.scan(&transcript.record));
        Ok((Some(transcript), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
