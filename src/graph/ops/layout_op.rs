use std::sync::Arc;

use crate::graph::*;

pub struct LayoutOp {
    colors: Arc<ColorTable>,
}

impl LayoutOp {
    const NAME: &'static str = "LayoutOp";

    /// Bundle the exons and lane-assigned occurrences of each transcript with the run's colors.
    pub fn new(colors: Arc<ColorTable>) -> Self {
        Self { colors }
    }
}

impl GraphNode for LayoutOp {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(mut transcript) = transcript else {
            panic!("Expected some transcript!")
        };

        let lanes = transcript.lanes.take().unwrap_or_default();
        let layout = SequenceLayout::new(&transcript.record, lanes, Arc::clone(&self.colors));
        log::debug!(
            "Laid out \"{}\": {} occurrences on {} lanes",
            layout.id,
            layout.occurrences.len(),
            layout.lane_count
        );
        transcript.layout = Some(layout);

        Ok((Some(transcript), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
