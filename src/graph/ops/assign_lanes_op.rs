use crate::graph::*;
use crate::lanes::assign_lanes;

pub struct AssignLanesOp;

impl AssignLanesOp {
    const NAME: &'static str = "AssignLanesOp";

    /// Place the occurrences of each transcript on the fewest lanes that keep them apart.
    ///
    /// A transcript that was never scanned gets no lanes.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AssignLanesOp {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for AssignLanesOp {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(mut transcript) = transcript else {
            panic!("Expected some transcript!")
        };

        let occurrences = transcript.occurrences.clone().unwrap_or_default();
        transcript.lanes = Some(assign_lanes(occurrences));
        Ok((Some(transcript), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
